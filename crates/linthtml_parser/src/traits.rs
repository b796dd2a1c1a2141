//! Parser trait definition.

use linthtml_ast::Document;

/// Trait for parsing source text into a [`Document`].
///
/// Parsing is infallible: implementations must turn malformed input into
/// the best tree they can and describe their repairs through
/// [`Document::recoveries`].
///
/// # Example
///
/// ```rust,ignore
/// use linthtml_parser::Parser;
/// use linthtml_ast::Document;
///
/// struct MyParser;
///
/// impl Parser for MyParser {
///     fn name(&self) -> &str {
///         "my-parser"
///     }
///
///     fn extensions(&self) -> &[&str] {
///         &["myext"]
///     }
///
///     fn parse(&self, source: &str) -> Document {
///         // Parse implementation
///         todo!()
///     }
/// }
/// ```
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["html", "htm"]`).
    fn extensions(&self) -> &[&str];

    /// Parses the source text into a document.
    fn parse(&self, source: &str) -> Document;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
