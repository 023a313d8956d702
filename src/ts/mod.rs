//! Tree-sitter front-end.
//!
//! Lets the selector engine and transformer run over any language with a
//! tree-sitter grammar, not just Modelica.

pub mod parser;

pub use parser::TreeSitterParser;
