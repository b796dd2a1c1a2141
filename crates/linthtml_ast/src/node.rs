//! Node definitions.
//!
//! Nodes live in a [`Document`](crate::Document) arena and refer to each
//! other through [`NodeId`] indices. Only `children` expresses ownership;
//! `parent` and the sibling links are plain lookups.

use crate::{SourceRange, Span};

/// Index of a node inside its document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Returns the raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A parsed unit of the document tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// What this node is, with its kind-specific data.
    pub kind: NodeKind,
    /// Full extent of the node: open tag through close tag for elements.
    pub range: SourceRange,
    pub parent: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    /// Owned children, in source order.
    pub children: Vec<NodeId>,
}

/// The kinds of nodes the parser produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    /// Raw character data between tags.
    Text(String),
    /// Inner text of a `<!-- ... -->` comment.
    Comment(String),
    /// Inner text of a `<!...>` or `<?...>` declaration, e.g. `DOCTYPE html`.
    Declaration(String),
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name, ASCII-lowercased.
    pub name: String,
    /// Every attribute in the open tag, in source order, repeats included.
    pub attributes: Vec<Attribute>,
    /// Lowercased names that occur more than once in the open tag, each listed once.
    pub duplicates: Vec<String>,
    /// The open tag, angle brackets included.
    pub open: SourceRange,
    /// The close tag, if the element was explicitly closed.
    pub close: Option<SourceRange>,
    /// Whether the open tag ended with `/>`.
    pub self_closing: bool,
}

impl Element {
    /// Returns the first attribute with the given name (ASCII case-insensitive).
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
    }
}

/// An attribute of an open tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Name as written in the source.
    pub name: String,
    /// Unquoted value, `None` for a bare attribute such as `disabled`.
    pub value: Option<String>,
    /// The whole `name="value"` text.
    pub range: SourceRange,
}

impl Node {
    /// Creates a detached node; links are set when it is added to a document.
    pub fn new(kind: NodeKind, range: SourceRange) -> Self {
        Self {
            kind,
            range,
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.range.span
    }

    /// Absolute start offset.
    #[inline]
    pub fn start(&self) -> usize {
        self.range.span.start
    }

    /// Absolute end offset (exclusive).
    #[inline]
    pub fn end(&self) -> usize {
        self.range.span.end
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, NodeKind::Comment(_))
    }

    /// Returns the element data for element nodes.
    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the raw character data of text, comment and declaration nodes.
    pub fn data(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(data) | NodeKind::Comment(data) | NodeKind::Declaration(data) => {
                Some(data)
            }
            NodeKind::Element(_) => None,
        }
    }

    /// Returns the tag name for element nodes.
    pub fn tag_name(&self) -> Option<&str> {
        self.as_element().map(|element| element.name.as_str())
    }
}
