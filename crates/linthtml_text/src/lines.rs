use linthtml_ast::Node;
use serde::Serialize;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TextError {
    #[error("Expected a text node")]
    #[diagnostic(code(linthtml::text::not_text_node))]
    NotTextNode,
}

/// One logical line of a text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line<'a> {
    /// Zero-based index of the line within the node.
    pub offset: usize,
    /// The line's text, with or without its terminator.
    pub text: &'a str,
}

/// Splits the data of a text node into lines.
///
/// See [`split_lines`] for the splitting rules.
pub fn get_lines(node: &Node, include_eol: bool) -> Result<Vec<Line<'_>>, TextError> {
    if !node.is_text() {
        return Err(TextError::NotTextNode);
    }
    let data = node.data().ok_or(TextError::NotTextNode)?;
    Ok(split_lines(data, include_eol))
}

/// Splits `data` at `\r\n`, `\r` and `\n`.
///
/// Each terminator is kept at the end of its line when `include_eol` is set
/// and dropped otherwise. A trailing fragment without a terminator becomes
/// the last line only when it is non-empty, so joining the lines of
/// `split_lines(data, true)` always gives back `data`.
pub fn split_lines(data: &str, include_eol: bool) -> Vec<Line<'_>> {
    let bytes = data.as_bytes();
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let eol_len = match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => 2,
            b'\r' | b'\n' => 1,
            _ => {
                i += 1;
                continue;
            }
        };

        let end = if include_eol { i + eol_len } else { i };
        lines.push(Line {
            offset: lines.len(),
            text: &data[line_start..end],
        });
        i += eol_len;
        line_start = i;
    }

    if line_start != data.len() {
        lines.push(Line {
            offset: lines.len(),
            text: &data[line_start..],
        });
    }

    lines
}
