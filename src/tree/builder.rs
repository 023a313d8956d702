use crate::tree::errors::ParseError;
use crate::tree::node::{NodeData, NodeId, Span, SyntaxTree};

/// Incremental, stack-based constructor for a [`SyntaxTree`].
///
/// Front-ends open a node, add tokens and nested nodes, then close it.
/// A node closed with [`finish_node`](Self::finish_node) spans its non-empty
/// children; a node with no text at all becomes an insertion point right
/// after the last token seen.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
    roots: Vec<NodeId>,
    last_token_end: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, rule: &'static str, field: Option<&'static str>, span: Span) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        let parent = self.stack.last().copied();
        self.nodes.push(NodeData {
            rule,
            field,
            span,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.nodes[parent.index()].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Open a node; subsequent tokens and nodes become its children.
    pub fn start_node(&mut self, rule: &'static str, field: Option<&'static str>) -> NodeId {
        let id = self.push(rule, field, Span::empty(self.last_token_end));
        self.stack.push(id);
        id
    }

    /// Add a terminal under the currently open node.
    pub fn token(&mut self, rule: &'static str, field: Option<&'static str>, span: Span) -> NodeId {
        self.last_token_end = span.end;
        self.push(rule, field, span)
    }

    /// Close the innermost open node, deriving its span from its children.
    pub fn finish_node(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let covered = self.nodes[id.index()]
            .children
            .iter()
            .map(|child| self.nodes[child.index()].span)
            .filter(|span| !span.is_empty())
            .reduce(Span::cover);
        self.nodes[id.index()].span = covered.unwrap_or(Span::empty(self.last_token_end));
        Some(id)
    }

    /// Close the innermost open node with a span supplied by the front-end.
    pub fn finish_node_spanning(&mut self, span: Span) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.nodes[id.index()].span = span;
        self.last_token_end = self.last_token_end.max(span.end);
        Some(id)
    }

    /// Seal the tree. Exactly one root must have been built and closed.
    pub fn finish(self, source: impl Into<String>) -> Result<SyntaxTree, ParseError> {
        match (self.stack.len(), self.roots.as_slice()) {
            (0, [root]) => Ok(SyntaxTree::from_parts(source.into(), self.nodes, *root)),
            (open, roots) => Err(ParseError::Unbalanced {
                open,
                roots: roots.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_node_sits_after_last_token() {
        let mut b = TreeBuilder::new();
        b.start_node("decl", None);
        b.token("IDENT", Some("IDENT"), Span::new(2, 3));
        b.start_node("comment", Some("comment"));
        b.finish_node();
        b.finish_node();
        let tree = b.finish("  x ").unwrap();

        let root = tree.root();
        assert_eq!(root.span(), Span::new(2, 3));
        let comment = root.children_by_field("comment").next().unwrap();
        assert_eq!(comment.span(), Span::empty(3));
        assert_eq!(comment.text(), "");
    }

    #[test]
    fn unbalanced_is_an_error() {
        let mut b = TreeBuilder::new();
        b.start_node("open", None);
        assert!(matches!(
            b.finish(""),
            Err(ParseError::Unbalanced { open: 1, roots: 1 })
        ));

        let mut b = TreeBuilder::new();
        b.token("a", None, Span::new(0, 1));
        b.token("b", None, Span::new(1, 2));
        assert!(matches!(
            b.finish("ab"),
            Err(ParseError::Unbalanced { open: 0, roots: 2 })
        ));
    }

    #[test]
    fn explicit_span_wins() {
        let mut b = TreeBuilder::new();
        b.start_node("source_file", None);
        b.token("x", None, Span::new(1, 2));
        b.finish_node_spanning(Span::new(0, 4));
        let tree = b.finish(" x  ").unwrap();
        assert_eq!(tree.root().span(), Span::new(0, 4));
    }
}
