//! Offset to line/column resolution.

use crate::{Location, Position, SourceRange, Span};

/// Line start table for a source text.
///
/// Built in one pass over the source. `\r\n`, `\r` and `\n` each count as a
/// single line break, so a CRLF pair never produces an empty line in between.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    /// Byte offset at which each line begins. Always starts with `0`.
    line_starts: Vec<usize>,
    /// Whether the line at the same index holds only ASCII bytes.
    ascii_lines: Vec<bool>,
}

impl<'a> LineIndex<'a> {
    /// Builds the index for `source`.
    pub fn new(source: &'a str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0];
        let mut ascii_lines = Vec::new();
        let mut ascii = true;

        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' => {
                    i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                    line_starts.push(i);
                    ascii_lines.push(ascii);
                    ascii = true;
                }
                b'\n' => {
                    i += 1;
                    line_starts.push(i);
                    ascii_lines.push(ascii);
                    ascii = true;
                }
                b => {
                    ascii &= b.is_ascii();
                    i += 1;
                }
            }
        }
        ascii_lines.push(ascii);

        Self {
            source,
            line_starts,
            ascii_lines,
        }
    }

    /// Returns the source text this index was built for.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Number of lines. An empty source has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where the given 1-indexed line begins.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1)
            .and_then(|idx| self.line_starts.get(idx).copied())
    }

    /// Resolves a byte offset to a 1-indexed line and column.
    ///
    /// Offsets past the end of the source clamp to the end.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line_idx = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line_idx];

        let column = if self.ascii_lines[line_idx] {
            offset - line_start
        } else {
            match self.source.get(line_start..offset) {
                Some(prefix) => prefix.chars().count(),
                None => offset - line_start,
            }
        };

        Position::new(line_idx + 1, column + 1)
    }

    /// Resolves both ends of a span.
    pub fn location(&self, span: Span) -> Location {
        Location::new(self.position(span.start), self.position(span.end))
    }

    /// Resolves a span into a [`SourceRange`].
    pub fn range(&self, span: Span) -> SourceRange {
        SourceRange::new(span, self.location(span))
    }
}
