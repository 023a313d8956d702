//! Modelica front-end.
//!
//! Lowers Modelica source into a [`SyntaxTree`](crate::tree::SyntaxTree)
//! whose rule names follow the Modelica language grammar (`declaration`,
//! `element_modification`, `connect_clause`, ...), which is what the built-in
//! selectors search for.

pub mod lexer;
pub mod parser;

pub use lexer::{tokenize, Lexeme, Token};
pub use parser::ModelicaParser;
