//! The parsed document: a node arena plus the parser's recovery notes.

use std::ops::{Deref, Index};

use crate::{Node, NodeId, SourceRange};

/// An ordered forest of nodes backed by an arena.
///
/// Nodes are stored in the order the parser opened them, which is document
/// (pre-)order: every node's start offset is strictly greater than the one
/// before it. A `Document` is read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    recoveries: Vec<Recovery>,
}

/// A note left by the parser when it had to repair malformed markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub kind: RecoveryKind,
    /// Where the problem was detected.
    pub range: SourceRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryKind {
    /// An element with a required end tag was closed implicitly.
    UnclosedElement { name: String },
    /// A closing tag that matched no open element was dropped.
    StrayClosingTag { name: String },
    /// A comment ran to the end of the input.
    UnterminatedComment,
}

impl Document {
    /// Top-level nodes, in source order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Top-level nodes as navigable references.
    pub fn root_refs(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.roots.iter().map(|&id| NodeRef::new(self, id))
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Returns a navigable reference, or `None` for a foreign id.
    pub fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.get(id).map(|_| NodeRef::new(self, id))
    }

    /// Every node in document order.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(|idx| NodeRef::new(self, NodeId(idx)))
    }

    /// Repairs the parser made while building this document.
    pub fn recoveries(&self) -> &[Recovery] {
        &self.recoveries
    }
}

impl Index<NodeId> for Document {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

/// A node together with the document it belongs to, for navigation.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn node(&self) -> &'a Node {
        &self.doc[self.id]
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent.map(|id| NodeRef::new(self.doc, id))
    }

    pub fn prev_sibling(&self) -> Option<NodeRef<'a>> {
        self.node().prev_sibling.map(|id| NodeRef::new(self.doc, id))
    }

    pub fn next_sibling(&self) -> Option<NodeRef<'a>> {
        self.node().next_sibling.map(|id| NodeRef::new(self.doc, id))
    }

    pub fn children(self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + ExactSizeIterator {
        let doc = self.doc;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef::new(doc, id))
    }

    /// The `n`th child, if any.
    pub fn child(&self, n: usize) -> Option<NodeRef<'a>> {
        self.node()
            .children
            .get(n)
            .map(|&id| NodeRef::new(self.doc, id))
    }
}

impl Deref for NodeRef<'_> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.node()
    }
}

/// Incremental construction of a [`Document`].
///
/// Nodes must be pushed in document order. `push` wires the parent, child
/// and sibling links; [`DocumentBuilder::node_mut`] lets the builder owner
/// fill in data that is only known once an element closes.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `node` as the last child of `parent`, or as a new root.
    pub fn push(&mut self, mut node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.doc.nodes.len());

        let siblings = match parent {
            Some(parent_id) => &self.doc.nodes[parent_id.0].children,
            None => &self.doc.roots,
        };
        let prev = siblings.last().copied();

        node.parent = parent;
        node.prev_sibling = prev;
        node.next_sibling = None;
        self.doc.nodes.push(node);

        if let Some(prev_id) = prev {
            self.doc.nodes[prev_id.0].next_sibling = Some(id);
        }
        match parent {
            Some(parent_id) => self.doc.nodes[parent_id.0].children.push(id),
            None => self.doc.roots.push(id),
        }

        id
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.doc.nodes[id.0]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.doc.nodes[id.0]
    }

    pub fn recover(&mut self, kind: RecoveryKind, range: SourceRange) {
        self.doc.recoveries.push(Recovery { kind, range });
    }

    pub fn finish(self) -> Document {
        self.doc
    }
}
