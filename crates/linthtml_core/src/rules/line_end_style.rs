use serde_json::Value;

use linthtml_ast::{Location, NodeRef, Position};
use linthtml_text::get_lines;

use crate::{ConfigError, Issue, Rule, RuleContext};

/// Enforces one line terminator inside text nodes.
pub struct LineEndStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEnding {
    Cr,
    Lf,
    CrLf,
}

impl LineEnding {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "cr" => Some(Self::Cr),
            "lf" => Some(Self::Lf),
            "crlf" => Some(Self::CrLf),
            _ => None,
        }
    }

    /// The terminator `line` ends with, if any.
    fn of(line: &str) -> Option<Self> {
        if line.ends_with("\r\n") {
            Some(Self::CrLf)
        } else if line.ends_with('\r') {
            Some(Self::Cr)
        } else if line.ends_with('\n') {
            Some(Self::Lf)
        } else {
            None
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Cr => "cr",
            Self::Lf => "lf",
            Self::CrLf => "crlf",
        }
    }
}

impl Rule for LineEndStyle {
    fn name(&self) -> &'static str {
        "line-end-style"
    }

    fn description(&self) -> &'static str {
        "Require a consistent line ending style (cr, lf or crlf)"
    }

    fn validate_config(&self, value: Value) -> Result<Value, ConfigError> {
        match value.as_str().and_then(LineEnding::parse) {
            Some(ending) => Ok(Value::String(ending.as_str().to_string())),
            None => Err(ConfigError::invalid(
                self.name(),
                format!("{value} is not accepted, accepted values are \"cr\", \"lf\" and \"crlf\""),
            )),
        }
    }

    fn lint(&self, node: NodeRef<'_>, option: &Value, context: &mut RuleContext) {
        let Some(expected) = option.as_str().and_then(LineEnding::parse) else {
            return;
        };
        let Ok(lines) = get_lines(node.node(), true) else {
            return;
        };

        let start = node.range.loc.start;
        for line in lines {
            let Some(found) = LineEnding::of(line.text) else {
                continue;
            };
            if found == expected {
                continue;
            }

            let line_no = start.line + line.offset;
            let first_column = if line.offset == 0 { start.column } else { 1 };
            let position = Location::new(
                Position::new(line_no, 1),
                Position::new(line_no, first_column + line.text.chars().count()),
            );
            context.report(Issue::new("E015", position).with_data("format", found.as_str()));
        }
    }
}
