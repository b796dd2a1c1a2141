//! Built-in rules.

mod attr_no_dup;
mod line_end_style;
mod line_no_trailing_whitespace;

use serde_json::Value;

use crate::{ConfigError, Rule};

pub use attr_no_dup::AttrNoDup;
pub use line_end_style::LineEndStyle;
pub use line_no_trailing_whitespace::LineNoTrailingWhitespace;

pub(crate) fn builtin() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(AttrNoDup),
        Box::new(LineEndStyle),
        Box::new(LineNoTrailingWhitespace),
    ]
}

/// Accepts only `true`/`false`.
fn expect_bool(rule: &str, value: Value) -> Result<Value, ConfigError> {
    match value {
        Value::Bool(_) => Ok(value),
        other => Err(ConfigError::invalid(
            rule,
            format!("expected a boolean, got {other}"),
        )),
    }
}
