use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognized input {text:?} at byte {offset}")]
    Lex { offset: usize, text: String },

    #[error("expected {expected}, found {found:?} at byte {offset}")]
    UnexpectedToken {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("expected {expected}, found end of input")]
    UnexpectedEof { expected: String },

    #[error("failed to set language for parser")]
    LanguageSet,

    #[error("failed to parse source code")]
    ParseFailed,

    #[error("syntax error detected at byte {byte_start}..{byte_end}")]
    Syntax { byte_start: usize, byte_end: usize },

    #[error("unbalanced syntax tree: {open} nodes left open, {roots} roots")]
    Unbalanced { open: usize, roots: usize },
}
