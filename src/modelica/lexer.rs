//! Token definitions for Modelica source.
//!
//! Whitespace and both comment styles are skipped by the lexer, so the
//! parser only ever sees significant tokens. Keywords are lexed as
//! [`Token::Ident`] and recognized by text in the parser.

use crate::tree::{ParseError, Span};
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum Token {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    #[regex(r"'([^'\\]|\\.)*'")]
    Ident,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    UnsignedNumber,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,
    #[token("=")]
    Equals,
    #[token(":=")]
    Assign,
    #[token(".")]
    Dot,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token(".+")]
    DotPlus,
    #[token(".-")]
    DotMinus,
    #[token(".*")]
    DotStar,
    #[token("./")]
    DotSlash,
    #[token(".^")]
    DotCaret,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("==")]
    EqEq,
    #[token("<>")]
    Ne,
}

pub const KEYWORDS: &[&str] = &[
    "algorithm",
    "and",
    "annotation",
    "block",
    "break",
    "class",
    "connect",
    "connector",
    "constant",
    "constrainedby",
    "der",
    "discrete",
    "each",
    "else",
    "elseif",
    "elsewhen",
    "encapsulated",
    "end",
    "enumeration",
    "equation",
    "expandable",
    "extends",
    "external",
    "false",
    "final",
    "flow",
    "for",
    "function",
    "if",
    "import",
    "impure",
    "in",
    "initial",
    "inner",
    "input",
    "loop",
    "model",
    "not",
    "operator",
    "or",
    "outer",
    "output",
    "package",
    "parameter",
    "partial",
    "protected",
    "public",
    "pure",
    "record",
    "redeclare",
    "replaceable",
    "return",
    "stream",
    "then",
    "true",
    "type",
    "when",
    "while",
    "within",
];

/// The static keyword matching `text`, if it is one.
pub fn keyword(text: &str) -> Option<&'static str> {
    KEYWORDS.iter().find(|kw| **kw == text).copied()
}

impl Token {
    /// Fixed spelling of punctuation tokens.
    pub fn literal(self) -> Option<&'static str> {
        let text = match self {
            Token::Ident | Token::String | Token::UnsignedNumber => return None,
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Comma => ",",
            Token::Semi => ";",
            Token::Colon => ":",
            Token::Equals => "=",
            Token::Assign => ":=",
            Token::Dot => ".",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Caret => "^",
            Token::DotPlus => ".+",
            Token::DotMinus => ".-",
            Token::DotStar => ".*",
            Token::DotSlash => "./",
            Token::DotCaret => ".^",
            Token::Lt => "<",
            Token::Le => "<=",
            Token::Gt => ">",
            Token::Ge => ">=",
            Token::EqEq => "==",
            Token::Ne => "<>",
        };
        Some(text)
    }
}

/// A significant token and where it sits in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Span,
}

/// Tokenize `source`, failing on the first unrecognized character run.
pub fn tokenize(source: &str) -> Result<Vec<Lexeme>, ParseError> {
    let mut lexer = Token::lexer(source);
    let mut lexemes = Vec::new();
    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        match result {
            Ok(token) => lexemes.push(Lexeme { token, span }),
            Err(()) => {
                return Err(ParseError::Lex {
                    offset: span.start,
                    text: lexer.slice().to_string(),
                })
            }
        }
    }
    Ok(lexemes)
}
