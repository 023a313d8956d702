//! Modelica Transformer: declarative source-to-source edits for Modelica
//! models.
//!
//! A [`Transformer`] owns a list of [`Transformation`]s, each pairing a
//! [`Selector`] (which nodes) with an [`EditFactory`] (what to do to them).
//! On `execute`, the source is parsed, every transformation is resolved into
//! byte-range [`Edit`]s, and the edits are applied to the original text as
//! one batch.
//!
//! # Architecture
//!
//! - [`tree`]: grammar-agnostic arena syntax tree and the [`SourceParser`]
//!   contract.
//! - [`modelica`] and [`ts`]: the two front-ends, a hand-written Modelica
//!   parser and a tree-sitter adapter.
//! - [`select`]: rule/field/text queries, paths, and selector chaining.
//! - [`edit`]: the edit primitive and batch application.
//! - [`transform`]: transformations and the transformer.
//! - [`config`]: TOML transform files and applying them to model trees.
//!
//! # Example
//!
//! ```
//! use modelica_transformer::{replace_component_argument_value, Transformer};
//!
//! let mut transformer = Transformer::new();
//! transformer.add(replace_component_argument_value("EM", "k", "8"));
//!
//! let out = transformer.execute("model M EMF EM(k=1); end M;").unwrap();
//! assert_eq!(out, "model M EMF EM(k=8); end M;");
//! ```

pub mod config;
pub mod edit;
pub mod modelica;
pub mod select;
pub mod transform;
pub mod tree;
pub mod ts;

// Re-exports
pub use config::{
    apply_transforms, build_transformer, load_from_path, load_from_str, ApplicationError,
    ConfigError, TransformConfig, TransformOutcome,
};
pub use edit::{apply_edits, Edit, EditError, EditFactory, EditOp, EditVerification};
pub use modelica::ModelicaParser;
pub use select::{
    select, select_path, Chain, ComponentArgSelector, ComponentDeclarationSelector,
    ConnectSelector, PathSelector, PathStep, PathSyntaxError, SelectError, Selector,
};
pub use transform::{replace_component_argument_value, TransformError, Transformation, Transformer};
pub use tree::{Node, ParseError, SourceParser, Span, SyntaxTree};
pub use ts::TreeSitterParser;
