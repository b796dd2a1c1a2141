//! Lint findings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use linthtml_ast::Location;

/// Rule name attached to issues raised by directive comments.
pub const INLINE_CONFIG_RULE: &str = "inline_config";

/// Rule name attached to issues raised from parser recoveries.
pub const PARSER_RULE: &str = "parser";

/// One reported lint finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue code, e.g. `E015` or `INLINE_02`.
    pub code: String,
    /// Name of the rule that reported it.
    pub rule: String,
    pub position: Location,
    #[serde(default)]
    pub meta: IssueMeta,
}

/// Free-form data used to build the message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueMeta {
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Issue {
    /// Creates an issue without a rule name; [`RuleContext::report`](crate::RuleContext::report)
    /// fills it in.
    pub fn new(code: impl Into<String>, position: Location) -> Self {
        Self {
            code: code.into(),
            rule: String::new(),
            position,
            meta: IssueMeta::default(),
        }
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = rule.into();
        self
    }

    /// Adds one `meta.data` entry.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.data.insert(key.into(), value.into());
        self
    }

    fn data(&self, key: &str) -> String {
        match self.meta.data.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Human-readable message derived from the code and `meta.data`.
    pub fn message(&self) -> String {
        match self.code.as_str() {
            "E003" => format!("The attribute \"{}\" is duplicated", self.data("attribute")),
            "E015" => format!(
                "Line ending does not match the configured style: found \"{}\"",
                self.data("format")
            ),
            "E051" => format!(
                "\"{}\" is not a valid option name in an inline configuration",
                self.data("name")
            ),
            "E055" => "Trailing whitespace".to_string(),
            "INLINE_01" => self.data("message"),
            "INLINE_02" => format!(
                "Unknown rule or option \"{}\" in inline configuration",
                self.data("rule_name")
            ),
            "INLINE_03" => format!(
                "Cannot parse inline configuration value \"{}\"",
                self.data("rule_configuration")
            ),
            "PARSE_01" => format!("Element <{}> is never closed", self.data("name")),
            "PARSE_02" => format!(
                "Closing tag </{}> does not match any open element",
                self.data("name")
            ),
            "PARSE_03" => "Comment is never closed".to_string(),
            code => format!("Issue {code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linthtml_ast::Position;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn loc() -> Location {
        Location::new(Position::new(2, 3), Position::new(2, 9))
    }

    #[test]
    fn test_issue_serialization_shape() {
        let issue = Issue::new("E015", loc())
            .with_rule("line-end-style")
            .with_data("format", "crlf");

        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "E015",
                "rule": "line-end-style",
                "position": {
                    "start": { "line": 2, "column": 3 },
                    "end": { "line": 2, "column": 9 }
                },
                "meta": { "data": { "format": "crlf" } }
            })
        );
    }

    #[test]
    fn test_issue_deserializes_without_meta() {
        let json = r#"{
            "code": "E055",
            "rule": "line-no-trailing-whitespace",
            "position": { "start": { "line": 1, "column": 4 }, "end": { "line": 1, "column": 6 } }
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.meta.data.is_empty());
    }

    #[rstest]
    #[case::dup(Issue::new("E003", loc()).with_data("attribute", "class"), "The attribute \"class\" is duplicated")]
    #[case::unknown(Issue::new("INLINE_02", loc()).with_data("rule_name", "foo"), "Unknown rule or option \"foo\" in inline configuration")]
    #[case::rejected(Issue::new("INLINE_01", loc()).with_data("message", "Inline configuration is bad"), "Inline configuration is bad")]
    #[case::unclosed(Issue::new("PARSE_01", loc()).with_data("name", "div"), "Element <div> is never closed")]
    #[case::unknown_code(Issue::new("X999", loc()), "Issue X999")]
    fn test_message(#[case] issue: Issue, #[case] expected: &str) {
        assert_eq!(issue.message(), expected);
    }
}
