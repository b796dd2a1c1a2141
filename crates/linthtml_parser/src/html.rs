//! Error-tolerant HTML parser.
//!
//! Builds a [`Document`] in one left-to-right pass over the tokens, keeping a
//! stack of open elements. Nodes are pushed into the arena as soon as they
//! open, so arena order is document order.

use std::collections::{HashMap, HashSet};

use linthtml_ast::{
    Attribute, Document, DocumentBuilder, Element, LineIndex, Node, NodeId, NodeKind,
    RecoveryKind, Span,
};

use crate::Parser;
use crate::tokenizer::{OpenTag, Token, Tokenizer};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements that HTML allows to be closed implicitly.
const OPTIONAL_END_TAG_ELEMENTS: &[&str] = &[
    "html", "head", "body", "p", "li", "dt", "dd", "option", "optgroup", "tr", "td", "th",
    "thead", "tbody", "tfoot", "colgroup", "rp", "rt", "caption",
];

/// HTML parser implementation.
///
/// Recovery policy for malformed markup:
/// - a closing tag closes every element opened after its matching element;
/// - a closing tag without a matching open element is dropped;
/// - void elements and `/>` tags never take children;
/// - elements still open at the end of input close there.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlParser;

impl HtmlParser {
    /// Creates a new HTML parser.
    pub fn new() -> Self {
        Self
    }
}

impl Parser for HtmlParser {
    fn name(&self) -> &str {
        "html"
    }

    fn extensions(&self) -> &[&str] {
        &["html", "htm", "xhtml"]
    }

    fn parse(&self, source: &str) -> Document {
        TreeBuilder::new(source).build()
    }
}

struct TreeBuilder<'a> {
    source: &'a str,
    index: LineIndex<'a>,
    doc: DocumentBuilder,
    open: Vec<NodeId>,
    /// How many elements of each name are on `open`.
    open_names: HashMap<String, usize>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            index: LineIndex::new(source),
            doc: DocumentBuilder::new(),
            open: Vec::new(),
            open_names: HashMap::new(),
        }
    }

    fn build(mut self) -> Document {
        for token in Tokenizer::new(self.source) {
            match token {
                Token::Text(span) => {
                    let text = NodeKind::Text(self.source[span.start..span.end].to_string());
                    self.push(text, span);
                }
                Token::Comment {
                    span,
                    data,
                    terminated,
                } => {
                    let comment = NodeKind::Comment(self.source[data.start..data.end].to_string());
                    self.push(comment, span);
                    if !terminated {
                        self.doc
                            .recover(RecoveryKind::UnterminatedComment, self.index.range(span));
                    }
                }
                Token::Declaration { span, data } => {
                    let declaration =
                        NodeKind::Declaration(self.source[data.start..data.end].to_string());
                    self.push(declaration, span);
                }
                Token::OpenTag(tag) => self.open_element(tag),
                Token::CloseTag { name, span } => self.close_element(name, span),
            }
        }

        let eof = self.source.len();
        while let Some(id) = self.pop_open() {
            self.close_implicitly(id, eof);
        }

        self.doc.finish()
    }

    fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let node = Node::new(kind, self.index.range(span));
        self.doc.push(node, self.open.last().copied())
    }

    fn open_element(&mut self, tag: OpenTag<'_>) {
        let name = tag.name.to_ascii_lowercase();
        let takes_children = !tag.self_closing && !VOID_ELEMENTS.contains(&name.as_str());

        let attributes: Vec<Attribute> = tag
            .attributes
            .iter()
            .map(|attr| Attribute {
                name: attr.name.to_string(),
                value: attr.value.map(str::to_string),
                range: self.index.range(attr.span),
            })
            .collect();
        let duplicates = duplicate_names(&attributes);

        let element = Element {
            name,
            attributes,
            duplicates,
            open: self.index.range(tag.span),
            close: None,
            self_closing: tag.self_closing,
        };
        let id = self.push(NodeKind::Element(element), tag.span);

        if takes_children {
            self.push_open(id);
        }
    }

    fn push_open(&mut self, id: NodeId) {
        if let Some(name) = self.doc.node(id).tag_name() {
            *self.open_names.entry(name.to_string()).or_default() += 1;
        }
        self.open.push(id);
    }

    fn pop_open(&mut self) -> Option<NodeId> {
        let id = self.open.pop()?;
        if let Some(name) = self.doc.node(id).tag_name()
            && let Some(count) = self.open_names.get_mut(name)
        {
            *count -= 1;
            if *count == 0 {
                self.open_names.remove(name);
            }
        }
        Some(id)
    }

    fn close_element(&mut self, name: &str, span: Span) {
        let name = name.to_ascii_lowercase();
        if !self.open_names.contains_key(&name) {
            self.doc
                .recover(RecoveryKind::StrayClosingTag { name }, self.index.range(span));
            return;
        }

        while let Some(&top) = self.open.last() {
            if self.doc.node(top).tag_name() == Some(name.as_str()) {
                break;
            }
            self.pop_open();
            self.close_implicitly(top, span.start);
        }

        if let Some(id) = self.pop_open() {
            let close = self.index.range(span);
            let range = self.index.range(Span::new(self.doc.node(id).start(), span.end));
            let node = self.doc.node_mut(id);
            node.range = range;
            if let NodeKind::Element(element) = &mut node.kind {
                element.close = Some(close);
            }
        }
    }

    /// Ends an element at `end` without a close tag.
    fn close_implicitly(&mut self, id: NodeId, end: usize) {
        let range = self.index.range(Span::new(self.doc.node(id).start(), end));
        self.doc.node_mut(id).range = range;

        let unclosed = match &self.doc.node(id).kind {
            NodeKind::Element(element)
                if !OPTIONAL_END_TAG_ELEMENTS.contains(&element.name.as_str()) =>
            {
                Some((element.name.clone(), element.open))
            }
            _ => None,
        };
        if let Some((name, open)) = unclosed {
            self.doc
                .recover(RecoveryKind::UnclosedElement { name }, open);
        }
    }
}

/// Lowercased attribute names that occur more than once, each listed once,
/// in the order of their first repetition.
fn duplicate_names(attributes: &[Attribute]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for attr in attributes {
        let name = attr.name.to_ascii_lowercase();
        if !seen.insert(name.clone()) && !duplicates.contains(&name) {
            duplicates.push(name);
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use linthtml_ast::{NodeRef, Position, Recovery};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(source: &str) -> Document {
        HtmlParser::new().parse(source)
    }

    fn element<'a>(node: NodeRef<'a>) -> &'a Element {
        node.node().as_element().expect("expected an element")
    }

    fn positions(range: linthtml_ast::SourceRange) -> ((usize, usize), (usize, usize)) {
        let Position { line: l1, column: c1 } = range.loc.start;
        let Position { line: l2, column: c2 } = range.loc.end;
        ((l1, c1), (l2, c2))
    }

    fn recovery_kinds(doc: &Document) -> Vec<RecoveryKind> {
        doc.recoveries().iter().map(|r: &Recovery| r.kind.clone()).collect()
    }

    #[test]
    fn test_parser_name_and_extensions() {
        let parser = HtmlParser::new();
        assert_eq!(parser.name(), "html");
        assert!(parser.can_parse("html"));
        assert!(parser.can_parse("HTM"));
        assert!(!parser.can_parse("md"));
    }

    #[test]
    fn test_parse_empty_document() {
        let doc = parse("");
        assert!(doc.is_empty());
        assert!(doc.roots().is_empty());
        assert!(doc.recoveries().is_empty());
    }

    #[test]
    fn test_tag_positions() {
        let doc = parse("<body>\n  <div a=\"jofwei\">\n    TextTextText\n  </div>\n</body>\n");

        let body = doc.root_refs().next().unwrap();
        let body_el = element(body);
        assert_eq!(positions(body_el.open), ((1, 1), (1, 7)));
        assert_eq!(positions(body_el.close.unwrap()), ((5, 1), (5, 8)));

        assert!(body.child(0).unwrap().is_text());
        let div = element(body.child(1).unwrap());
        assert_eq!(div.name, "div");
        assert_eq!(positions(div.open), ((2, 3), (2, 19)));
        assert_eq!(positions(div.close.unwrap()), ((4, 3), (4, 9)));
    }

    #[test]
    fn test_duplicate_attributes() {
        let doc = parse(r#"<div class="a" id="b" class="c"></div>"#);
        let div = element(doc.root_refs().next().unwrap());

        assert_eq!(div.attributes.len(), 3);
        assert_eq!(div.duplicates, vec!["class".to_string()]);
        let values: Vec<Option<&str>> = div.attributes.iter().map(|a| a.value.as_deref()).collect();
        assert_eq!(values, vec![Some("a"), Some("b"), Some("c")]);
    }

    #[test]
    fn test_duplicate_attributes_listed_once_case_insensitively() {
        let doc = parse(r#"<a ID=1 id=2 Id=3 href=x HREF=y>"#);
        let a = element(doc.root_refs().next().unwrap());
        assert_eq!(a.attributes.len(), 5);
        assert_eq!(a.duplicates, vec!["id".to_string(), "href".to_string()]);
    }

    #[test]
    fn test_tag_names_are_lowercased() {
        let doc = parse("<DIV><Span></SPAN></div>");
        let div = doc.root_refs().next().unwrap();
        assert_eq!(div.tag_name(), Some("div"));
        assert_eq!(div.child(0).unwrap().tag_name(), Some("span"));
        assert!(doc.recoveries().is_empty());
    }

    #[test]
    fn test_void_and_self_closing_elements_take_no_children() {
        let doc = parse("<p><br><img src=a.png><x-icon/>text</p>");
        let p = doc.root_refs().next().unwrap();

        let kinds: Vec<Option<&str>> = p.children().map(|c| c.node().tag_name()).collect();
        assert_eq!(kinds, vec![Some("br"), Some("img"), Some("x-icon"), None]);
        assert!(element(p.child(2).unwrap()).self_closing);
        assert!(element(p.child(0).unwrap()).close.is_none());
        assert!(doc.recoveries().is_empty());
    }

    #[test]
    fn test_comment_and_declaration_nodes() {
        let doc = parse("<!DOCTYPE html><!-- note -->");
        let nodes: Vec<&NodeKind> = doc.iter().map(|n| &n.node().kind).collect();
        assert_eq!(
            nodes,
            vec![
                &NodeKind::Declaration("DOCTYPE html".to_string()),
                &NodeKind::Comment(" note ".to_string()),
            ]
        );
    }

    #[test]
    fn test_raw_text_element_content() {
        let doc = parse("<script>a < b && '</div>'</script>");
        let script = doc.root_refs().next().unwrap();

        assert_eq!(script.children().count(), 1);
        assert_eq!(script.child(0).unwrap().data(), Some("a < b && '</div>'"));
        assert!(element(script).close.is_some());
        assert!(doc.recoveries().is_empty());
    }

    #[test]
    fn test_lone_lt_is_text() {
        let doc = parse("<p>1 < 2</p>");
        let p = doc.root_refs().next().unwrap();
        assert_eq!(p.children().count(), 1);
        assert_eq!(p.child(0).unwrap().data(), Some("1 < 2"));
    }

    #[test]
    fn test_close_tag_closes_open_descendants() {
        let source = "<div><span><b>x</div>";
        let doc = parse(source);
        let div = doc.root_refs().next().unwrap();
        let span = div.child(0).unwrap();
        let b = span.child(0).unwrap();

        assert!(element(div).close.is_some());
        assert!(element(span).close.is_none());
        assert!(element(b).close.is_none());
        // Implicitly closed elements end where the closing tag begins.
        assert_eq!(span.end(), source.find("</div>").unwrap());
        assert_eq!(b.end(), span.end());
        assert_eq!(
            recovery_kinds(&doc),
            vec![
                RecoveryKind::UnclosedElement { name: "b".to_string() },
                RecoveryKind::UnclosedElement { name: "span".to_string() },
            ]
        );
    }

    #[test]
    fn test_stray_closing_tag_is_dropped() {
        let doc = parse("<div></span>text</div>");
        let div = doc.root_refs().next().unwrap();

        assert_eq!(div.children().count(), 1);
        assert!(element(div).close.is_some());
        assert_eq!(
            recovery_kinds(&doc),
            vec![RecoveryKind::StrayClosingTag { name: "span".to_string() }]
        );
        assert_eq!(positions(doc.recoveries()[0].range), ((1, 6), (1, 13)));
    }

    #[test]
    fn test_elements_open_at_eof_close_there() {
        let source = "<section>\n<p>text";
        let doc = parse(source);
        let section = doc.root_refs().next().unwrap();

        assert_eq!(section.end(), source.len());
        assert_eq!(section.child(1).unwrap().end(), source.len());
        // `p` may omit its end tag.
        assert_eq!(
            recovery_kinds(&doc),
            vec![RecoveryKind::UnclosedElement { name: "section".to_string() }]
        );
    }

    #[test]
    fn test_unterminated_comment() {
        let source = "<div><!-- open";
        let doc = parse(source);
        let comment = doc.iter().find(|n| n.is_comment()).unwrap();

        assert_eq!(comment.data(), Some(" open"));
        assert_eq!(comment.end(), source.len());
        assert!(recovery_kinds(&doc).contains(&RecoveryKind::UnterminatedComment));
    }

    #[test]
    fn test_sibling_links() {
        let doc = parse("<ul><li>a</li><li>b</li></ul>");
        let ul = doc.root_refs().next().unwrap();
        let first = ul.child(0).unwrap();
        let second = first.next_sibling().unwrap();

        assert_eq!(second.prev_sibling().map(|n| n.id()), Some(first.id()));
        assert_eq!(second.parent().map(|n| n.id()), Some(ul.id()));
        assert!(second.next_sibling().is_none());
    }

    fn assert_well_formed(doc: &Document) {
        let mut last_start = None;
        for node in doc.iter() {
            if let Some(prev) = last_start {
                assert!(node.start() > prev, "arena order must follow start offsets");
            }
            last_start = Some(node.start());

            if let Some(el) = node.as_element() {
                assert!(el.open.span.end <= node.end());
                if let Some(close) = el.close {
                    assert!(close.span.start >= el.open.span.end);
                    assert_eq!(close.span.end, node.end());
                }
            }
            if let Some(parent) = node.parent() {
                assert!(parent.span().encloses(&node.span()));
            }
        }
    }

    #[rstest]
    #[case::well_formed("<html><head><title>t</title></head><body><p>x</p></body></html>")]
    #[case::misnested("<b><i>x</b>y</i>")]
    #[case::stray_closers("</x></y>text</z>")]
    #[case::unclosed("<div><div><div>")]
    #[case::broken_tags("<div <p a=\"1\">< /p><")]
    #[case::comment_in_text("a<!--b-->c<!--")]
    #[case::crlf("<p>\r\n<span>\r</span>\n</p>\r\n")]
    #[case::unicode("<p title=\"é\">日本語</p>")]
    fn test_structural_invariants(#[case] source: &str) {
        assert_well_formed(&parse(source));
    }
}
