use serde_json::Value;

use linthtml_ast::{Location, NodeRef, Position};
use linthtml_text::{Line, split_lines};

use crate::{ConfigError, Issue, Rule, RuleContext};

/// Reports spaces at the end of lines in text nodes.
///
/// The line on which the next sibling starts and the line on which the
/// parent ends are skipped: the spaces there indent a tag, not text.
pub struct LineNoTrailingWhitespace;

impl Rule for LineNoTrailingWhitespace {
    fn name(&self) -> &'static str {
        "line-no-trailing-whitespace"
    }

    fn description(&self) -> &'static str {
        "Disallow trailing spaces at the end of lines"
    }

    fn validate_config(&self, value: Value) -> Result<Value, ConfigError> {
        super::expect_bool(self.name(), value)
    }

    fn lint(&self, node: NodeRef<'_>, _option: &Value, context: &mut RuleContext) {
        if !node.is_text() {
            return;
        }
        let Some(data) = node.data() else {
            return;
        };

        let start = node.range.loc.start;
        let sibling_line = node.next_sibling().map(|sibling| sibling.range.loc.start.line);
        let parent_close_line = node.parent().map(|parent| parent.range.loc.end.line);

        for Line { offset, text } in split_lines(data, false) {
            let trimmed = text.trim_end_matches(' ');
            if trimmed.len() == text.len() {
                continue;
            }

            let line = start.line + offset;
            if Some(line) == sibling_line || Some(line) == parent_close_line {
                continue;
            }

            let first_column = if offset == 0 { start.column } else { 1 };
            let position = Location::new(
                Position::new(line, first_column + trimmed.chars().count()),
                Position::new(line, first_column + text.chars().count()),
            );
            context.report(Issue::new("E055", position));
        }
    }
}
