//! Selector engine: structural and textual queries over a [`SyntaxTree`].
//!
//! [`select`] is the primitive: an any-depth search by rule name with an
//! optional child-field filter. [`select_path`] narrows through a sequence of
//! such steps. The [`Selector`] trait wraps both behind one interface that
//! built-in and user-defined selectors share, and [`Selector::chain`] feeds
//! one selector's matches into the next.
//!
//! [`SyntaxTree`]: crate::tree::SyntaxTree

pub mod debug;
pub mod engine;
pub mod errors;
pub mod path;
pub mod selectors;

pub use debug::{describe_matches, MatchSummary};
pub use engine::{select, select_path, PathStep};
pub use errors::{PathSyntaxError, SelectError};
pub use path::parse_path;
pub use selectors::{
    Chain, ComponentArgSelector, ComponentDeclarationSelector, ConnectSelector, PathSelector,
    Selector,
};
