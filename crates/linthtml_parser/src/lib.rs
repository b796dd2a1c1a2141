//! # linthtml_parser
//!
//! Parser layer for linthtml.
//!
//! This crate provides:
//! - A `Parser` trait for plugging in document parsers
//! - An error-tolerant HTML parser that records exact tag positions
//!
//! ## Architecture
//!
//! Parsers convert source text into a [`linthtml_ast::Document`]. Malformed
//! markup never fails a parse: the parser repairs what it can and leaves a
//! [`linthtml_ast::Recovery`] note for each repair.
//!
//! ## Example
//!
//! ```rust
//! use linthtml_parser::{HtmlParser, Parser};
//!
//! let parser = HtmlParser::new();
//! let doc = parser.parse("<p class=\"a\">Hello</p>");
//!
//! let p = doc.root_refs().next().unwrap();
//! assert_eq!(p.tag_name(), Some("p"));
//! ```

mod html;
mod tokenizer;
mod traits;

pub use html::HtmlParser;
pub use traits::Parser;
