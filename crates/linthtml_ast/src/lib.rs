//! # linthtml_ast
//!
//! Document tree types for linthtml.
//!
//! The parser produces a [`Document`]: an arena of [`Node`]s addressed by
//! [`NodeId`]. Children are owned by their parent through id lists, while
//! parent and sibling links are plain id lookups, so the tree can be walked
//! in both directions without reference counting.
//!
//! Every node carries a [`SourceRange`]: a byte [`Span`] plus its resolved
//! 1-indexed line/column [`Location`], computed with a [`LineIndex`].
//!
//! ## Example
//!
//! ```rust
//! use linthtml_ast::{LineIndex, Position};
//!
//! let index = LineIndex::new("<p>\r\n</p>");
//! assert_eq!(index.position(5), Position::new(2, 1));
//! ```

mod document;
mod line_index;
mod node;
mod span;
pub mod visitor;

pub use document::{Document, DocumentBuilder, NodeRef, Recovery, RecoveryKind};
pub use line_index::LineIndex;
pub use node::{Attribute, Element, Node, NodeId, NodeKind};
pub use span::{Location, Position, SourceRange, Span};

pub use visitor::{VisitResult, Visitor};
