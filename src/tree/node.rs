use std::fmt;
use std::ops::Range;

/// Byte range of a node in the source text, `[start, end)`.
///
/// A node covering the characters `start..=stop` has `end == stop + 1`;
/// an insertion point has `start == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end }
    }

    /// Zero-width span at `at`.
    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Smallest span containing both.
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) rule: &'static str,
    pub(crate) field: Option<&'static str>,
    pub(crate) span: Span,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// A parsed document: the source text plus an arena of nodes over it.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl SyntaxTree {
    pub(crate) fn from_parts(source: String, nodes: Vec<NodeData>, root: NodeId) -> Self {
        Self {
            source,
            nodes,
            root,
        }
    }

    /// The text the tree was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: self.root,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.index() < self.nodes.len()).then_some(Node { tree: self, id })
    }

    /// Number of nodes, terminals included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Borrowed handle to one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    fn data(self) -> &'t NodeData {
        &self.tree.nodes[self.id.index()]
    }

    fn at(self, id: NodeId) -> Node<'t> {
        Node {
            tree: self.tree,
            id,
        }
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn tree(self) -> &'t SyntaxTree {
        self.tree
    }

    /// Grammar rule (or token class) that produced this node.
    pub fn rule(self) -> &'static str {
        self.data().rule
    }

    /// Field label on the edge from the parent, if the grammar assigns one.
    pub fn field(self) -> Option<&'static str> {
        self.data().field
    }

    pub fn span(self) -> Span {
        self.data().span
    }

    /// Source text covered by the node.
    pub fn text(self) -> &'t str {
        &self.tree.source[self.span().range()]
    }

    /// Token texts under the node joined with nothing in between.
    ///
    /// Whitespace and anything the front-end skipped between tokens drop
    /// out, so `r[i + 1].p` renders as `r[i+1].p`. Use [`text`](Self::text)
    /// for anything that maps back to source offsets.
    pub fn rendered_text(self) -> String {
        if self.is_leaf() {
            return self.text().to_string();
        }
        self.descendants()
            .filter(|node| node.is_leaf())
            .map(|node| node.text())
            .collect()
    }

    pub fn parent(self) -> Option<Node<'t>> {
        self.data().parent.map(|id| self.at(id))
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = Node<'t>> + ExactSizeIterator {
        self.data().children.iter().map(move |&id| self.at(id))
    }

    pub fn child_count(self) -> usize {
        self.data().children.len()
    }

    pub fn is_leaf(self) -> bool {
        self.data().children.is_empty()
    }

    /// Children reached through the field `name`, in order.
    ///
    /// A field may be multi-valued (e.g. both operands of a connect clause).
    /// An absent field yields nothing rather than an error.
    pub fn children_by_field<'a>(self, name: &'a str) -> impl Iterator<Item = Node<'t>> + 'a
    where
        't: 'a,
    {
        self.children().filter(move |child| child.field() == Some(name))
    }

    /// Pre-order traversal starting at (and including) this node.
    pub fn descendants(self) -> Descendants<'t> {
        Descendants {
            tree: self.tree,
            stack: vec![self.id],
        }
    }

    pub fn ancestors(self) -> impl Iterator<Item = Node<'t>> {
        std::iter::successors(self.parent(), |node| node.parent())
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("rule", &self.rule())
            .field("span", &self.span())
            .finish()
    }
}

/// Iterator returned by [`Node::descendants`].
pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = Node {
            tree: self.tree,
            id,
        };
        self.stack.extend(node.data().children.iter().rev().copied());
        Some(node)
    }
}
