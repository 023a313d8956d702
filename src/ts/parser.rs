use crate::tree::{ParseError, SourceParser, Span, SyntaxTree, TreeBuilder};
use ast_grep_language::{LanguageExt, SupportLang};
use tree_sitter::{Language, Parser};

/// Tree-sitter parser wrapper that lowers its CST into a [`SyntaxTree`].
///
/// Node kinds become rule names and tree-sitter field names become field
/// labels, so a Rust `function_item` exposes its identifier as field `name`.
/// Anonymous nodes (keywords, punctuation) are kept as terminals.
pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    /// Create a parser for an arbitrary tree-sitter language.
    pub fn new(language: &Language) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(language)
            .map_err(|_| ParseError::LanguageSet)?;
        Ok(Self { parser })
    }

    /// Create a parser for one of the grammars bundled with ast-grep.
    pub fn for_lang(lang: SupportLang) -> Result<Self, ParseError> {
        Self::new(&lang.get_ts_language())
    }

    pub fn rust() -> Result<Self, ParseError> {
        Self::for_lang(SupportLang::Rust)
    }
}

impl SourceParser for TreeSitterParser {
    fn parse(&mut self, source: &str) -> Result<SyntaxTree, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(ParseError::ParseFailed)?;
        let root = tree.root_node();

        if let Some(error) = first_error_node(root) {
            return Err(ParseError::Syntax {
                byte_start: error.start_byte(),
                byte_end: error.end_byte(),
            });
        }

        let mut builder = TreeBuilder::new();
        lower(root, None, &mut builder);
        builder.finish(source)
    }
}

fn lower(node: tree_sitter::Node<'_>, field: Option<&'static str>, builder: &mut TreeBuilder) {
    builder.start_node(node.kind(), field);

    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            lower(cursor.node(), cursor.field_name(), builder);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    builder.finish_node_spanning(Span::new(node.start_byte(), node.end_byte()));
}

fn first_error_node(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_node)
}
