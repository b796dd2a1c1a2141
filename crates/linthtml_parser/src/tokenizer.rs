//! Markup tokenizer.
//!
//! Splits the source into text runs, comments, declarations and tags. A `<`
//! that does not open a well-formed tag is folded into the surrounding text,
//! so the tokens always tile the whole input without gaps or overlaps.

use std::collections::HashSet;

use linthtml_ast::Span;

/// Elements whose content is read verbatim up to their closing tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Text(Span),
    Comment {
        span: Span,
        /// The text between `<!--` and `-->`.
        data: Span,
        terminated: bool,
    },
    Declaration {
        span: Span,
        data: Span,
    },
    OpenTag(OpenTag<'a>),
    CloseTag {
        name: &'a str,
        span: Span,
    },
}

impl Token<'_> {
    pub(crate) fn span(&self) -> Span {
        match self {
            Token::Text(span)
            | Token::Comment { span, .. }
            | Token::Declaration { span, .. }
            | Token::CloseTag { span, .. } => *span,
            Token::OpenTag(tag) => tag.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OpenTag<'a> {
    /// Name as written.
    pub name: &'a str,
    pub attributes: Vec<RawAttribute<'a>>,
    pub span: Span,
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawAttribute<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
    pub span: Span,
}

pub(crate) struct Tokenizer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// A tag found while scanning text, emitted right after that text.
    pending: Option<Token<'a>>,
    /// Set after a raw-text open tag; holds the lowercased element name.
    raw_text: Option<String>,
    /// Last offsets of `>`, `"` and `'`. A search starting past them fails
    /// without scanning.
    last_gt: Option<usize>,
    last_double_quote: Option<usize>,
    last_single_quote: Option<usize>,
    /// Attribute-loop offsets from which an open tag is known to run into
    /// the end of input. The outcome of the loop only depends on the offset.
    dead_ends: HashSet<usize>,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            pending: None,
            raw_text: None,
            last_gt: rfind_byte(source.as_bytes(), b'>'),
            last_double_quote: rfind_byte(source.as_bytes(), b'"'),
            last_single_quote: rfind_byte(source.as_bytes(), b'\''),
            dead_ends: HashSet::new(),
        }
    }

    /// Like [`find_byte`], but answers at once when `needle` does not occur
    /// at or after `from`.
    fn find_terminator(&self, needle: u8, from: usize) -> Option<usize> {
        let last = match needle {
            b'>' => self.last_gt,
            b'"' => self.last_double_quote,
            b'\'' => self.last_single_quote,
            _ => return find_byte(self.bytes, needle, from),
        };
        if last? < from {
            return None;
        }
        find_byte(self.bytes, needle, from)
    }

    /// Records the position after `token` and arms raw-text mode if needed.
    fn advance(&mut self, token: Token<'a>) -> Token<'a> {
        self.pos = token.span().end;
        if let Token::OpenTag(tag) = &token {
            let name = tag.name.to_ascii_lowercase();
            if !tag.self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
                self.raw_text = Some(name);
            }
        }
        token
    }

    /// Reads the content of a raw-text element up to its closing tag.
    fn raw_text_run(&mut self, name: &str) -> Option<Token<'a>> {
        let start = self.pos;
        let end = self.find_raw_text_end(start, name).unwrap_or(self.bytes.len());
        if end == start {
            return None;
        }
        self.pos = end;
        Some(Token::Text(Span::new(start, end)))
    }

    fn find_raw_text_end(&self, from: usize, name: &str) -> Option<usize> {
        let mut cursor = from;
        while let Some(lt) = find_byte(self.bytes, b'<', cursor) {
            let name_start = lt + 2;
            let name_end = name_start + name.len();
            let matches = self.bytes.get(lt + 1) == Some(&b'/')
                && self
                    .bytes
                    .get(name_start..name_end)
                    .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name.as_bytes()))
                && self
                    .bytes
                    .get(name_end)
                    .is_none_or(|&b| is_whitespace(b) || b == b'/' || b == b'>');
            if matches {
                return Some(lt);
            }
            cursor = lt + 1;
        }
        None
    }

    /// Tries to read a comment, declaration or tag starting at `pos`.
    fn tag_at(&mut self, pos: usize) -> Option<Token<'a>> {
        let rest = &self.bytes[pos..];
        if rest.first() != Some(&b'<') {
            return None;
        }
        if rest.starts_with(b"<!--") {
            return Some(self.comment(pos));
        }
        // Everything below ends with a `>`.
        if self.last_gt? < pos {
            return None;
        }
        match *rest.get(1)? {
            b'!' | b'?' => self.declaration(pos),
            b'/' => self.close_tag(pos),
            b if b.is_ascii_alphabetic() => self.open_tag(pos),
            _ => None,
        }
    }

    fn comment(&self, pos: usize) -> Token<'a> {
        let data_start = pos + 4;
        match self.source[data_start..].find("-->") {
            Some(len) => Token::Comment {
                span: Span::new(pos, data_start + len + 3),
                data: Span::new(data_start, data_start + len),
                terminated: true,
            },
            None => Token::Comment {
                span: Span::new(pos, self.bytes.len()),
                data: Span::new(data_start, self.bytes.len()),
                terminated: false,
            },
        }
    }

    fn declaration(&self, pos: usize) -> Option<Token<'a>> {
        let data_start = pos + 2;
        let gt = self.find_terminator(b'>', data_start)?;
        let mut data_end = gt;
        if self.bytes[pos + 1] == b'?' && data_end > data_start && self.bytes[data_end - 1] == b'?'
        {
            data_end -= 1;
        }
        Some(Token::Declaration {
            span: Span::new(pos, gt + 1),
            data: Span::new(data_start, data_end),
        })
    }

    fn close_tag(&self, pos: usize) -> Option<Token<'a>> {
        let name_start = pos + 2;
        if !self.bytes.get(name_start)?.is_ascii_alphabetic() {
            return None;
        }
        let name_end = self.scan_name(name_start);
        let gt = self.find_terminator(b'>', name_end)?;
        Some(Token::CloseTag {
            name: &self.source[name_start..name_end],
            span: Span::new(pos, gt + 1),
        })
    }

    fn open_tag(&mut self, pos: usize) -> Option<Token<'a>> {
        let mut visited = Vec::new();
        let tag = self.scan_open_tag(pos, &mut visited);
        if tag.is_none() {
            self.dead_ends.extend(visited);
        }
        tag
    }

    /// Reads an open tag, recording every attribute-loop offset it passes.
    fn scan_open_tag(&self, pos: usize, visited: &mut Vec<usize>) -> Option<Token<'a>> {
        let name_start = pos + 1;
        let name_end = self.scan_name(name_start);
        let mut attributes = Vec::new();
        let mut i = name_end;

        loop {
            i = self.skip_whitespace(i);
            if self.dead_ends.contains(&i) {
                return None;
            }
            visited.push(i);
            match *self.bytes.get(i)? {
                b'>' => {
                    return Some(Token::OpenTag(OpenTag {
                        name: &self.source[name_start..name_end],
                        attributes,
                        span: Span::new(pos, i + 1),
                        self_closing: false,
                    }));
                }
                b'/' if self.bytes.get(i + 1) == Some(&b'>') => {
                    return Some(Token::OpenTag(OpenTag {
                        name: &self.source[name_start..name_end],
                        attributes,
                        span: Span::new(pos, i + 2),
                        self_closing: true,
                    }));
                }
                b'/' => i += 1,
                _ => {
                    let attribute = self.attribute(i)?;
                    i = attribute.span.end;
                    attributes.push(attribute);
                }
            }
        }
    }

    /// Reads one `name`, `name=value`, `name="value"` or `name='value'`.
    ///
    /// Returns `None` when a quoted value is never closed.
    fn attribute(&self, start: usize) -> Option<RawAttribute<'a>> {
        // The first byte always belongs to the name, even if it is `=`.
        let name_end = self.scan_attribute_name(start + 1);
        let name = &self.source[start..name_end];

        let eq = self.skip_whitespace(name_end);
        if self.bytes.get(eq) != Some(&b'=') {
            return Some(RawAttribute {
                name,
                value: None,
                span: Span::new(start, name_end),
            });
        }

        let value_start = self.skip_whitespace(eq + 1);
        let (value, end) = match *self.bytes.get(value_start)? {
            quote @ (b'"' | b'\'') => {
                let close = self.find_terminator(quote, value_start + 1)?;
                (&self.source[value_start + 1..close], close + 1)
            }
            b'>' => ("", value_start),
            _ => {
                let mut end = value_start;
                while end < self.bytes.len() && !is_whitespace(self.bytes[end]) && self.bytes[end] != b'>' {
                    end += 1;
                }
                (&self.source[value_start..end], end)
            }
        };

        Some(RawAttribute {
            name,
            value: Some(value),
            span: Span::new(start, end),
        })
    }

    fn scan_name(&self, mut i: usize) -> usize {
        while i < self.bytes.len() {
            let b = self.bytes[i];
            if is_whitespace(b) || b == b'/' || b == b'>' {
                break;
            }
            i += 1;
        }
        i
    }

    fn scan_attribute_name(&self, mut i: usize) -> usize {
        while i < self.bytes.len() {
            let b = self.bytes[i];
            if is_whitespace(b) || b == b'/' || b == b'>' || b == b'=' {
                break;
            }
            i += 1;
        }
        i
    }

    fn skip_whitespace(&self, mut i: usize) -> usize {
        while i < self.bytes.len() && is_whitespace(self.bytes[i]) {
            i += 1;
        }
        i
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.pending.take() {
            return Some(self.advance(token));
        }
        if let Some(name) = self.raw_text.take()
            && let Some(text) = self.raw_text_run(&name)
        {
            return Some(text);
        }
        if self.pos >= self.bytes.len() {
            return None;
        }

        let start = self.pos;
        if let Some(token) = self.tag_at(start) {
            return Some(self.advance(token));
        }

        let mut cursor = start + 1;
        loop {
            match find_byte(self.bytes, b'<', cursor) {
                Some(lt) => {
                    if let Some(token) = self.tag_at(lt) {
                        self.pending = Some(token);
                        self.pos = lt;
                        return Some(Token::Text(Span::new(start, lt)));
                    }
                    cursor = lt + 1;
                }
                None => {
                    self.pos = self.bytes.len();
                    return Some(Token::Text(Span::new(start, self.bytes.len())));
                }
            }
        }
    }
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

fn find_byte(bytes: &[u8], needle: u8, from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|idx| from + idx)
}

fn rfind_byte(bytes: &[u8], needle: u8) -> Option<usize> {
    bytes.iter().rposition(|&b| b == needle)
}
