//! Transformations and the transformer that applies them as a batch.

pub mod errors;
pub mod transformation;
pub mod transformer;

pub use errors::TransformError;
pub use transformation::{replace_component_argument_value, Transformation};
pub use transformer::Transformer;
