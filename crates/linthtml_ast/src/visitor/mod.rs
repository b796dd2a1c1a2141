//! Visitor pattern for document traversal.
//!
//! - [`Visitor`] - read-only traversal trait
//! - [`walk_document`] - visits every root in order
//! - [`walk_node`] - visits a node and its descendants without recursing
//!
//! # Example
//!
//! ```rust
//! use linthtml_ast::visitor::{Visitor, VisitResult, walk_document};
//! use linthtml_ast::{Document, NodeRef};
//! use std::ops::ControlFlow;
//!
//! struct CommentCollector<'a> {
//!     comments: Vec<&'a str>,
//! }
//!
//! impl<'a> Visitor<'a> for CommentCollector<'a> {
//!     fn visit_comment(&mut self, node: NodeRef<'a>) -> VisitResult {
//!         self.comments.extend(node.node().data());
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let doc = Document::default();
//! let mut collector = CommentCollector { comments: Vec::new() };
//! let _ = walk_document(&mut collector, &doc);
//! assert!(collector.comments.is_empty());
//! ```

mod visit;
mod walk;

pub use visit::{VisitResult, Visitor};
pub use walk::{walk_document, walk_node};
