pub mod applicator;
pub mod loader;
pub mod schema;

pub use applicator::{apply_transforms, build_transformer, ApplicationError, TransformOutcome};
pub use loader::{load_from_path, load_from_str, ConfigError};
pub use schema::{
    EditSpec, InsertPosition, Metadata, SelectorKind, SelectorSpec, TransformConfig,
    TransformDefinition, ValidationError, ValidationIssue,
};
