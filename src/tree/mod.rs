//! Grammar-agnostic syntax trees.
//!
//! Every front-end (the Modelica parser, tree-sitter grammars) lowers its
//! output into a [`SyntaxTree`]: an arena of nodes carrying a rule name, an
//! optional field label on the edge from the parent, and a byte span into the
//! original source. The selector engine and the edit model only ever see this
//! shape, so they work unchanged for any grammar.

pub mod builder;
pub mod errors;
pub mod node;

pub use builder::TreeBuilder;
pub use errors::ParseError;
pub use node::{Descendants, Node, NodeId, Span, SyntaxTree};

/// Anything that can turn source text into a [`SyntaxTree`].
pub trait SourceParser {
    /// Parse `source`, failing if the grammar rejects it.
    fn parse(&mut self, source: &str) -> Result<SyntaxTree, ParseError>;
}

impl<P: SourceParser + ?Sized> SourceParser for Box<P> {
    fn parse(&mut self, source: &str) -> Result<SyntaxTree, ParseError> {
        (**self).parse(source)
    }
}
