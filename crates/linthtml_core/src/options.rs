//! Rule option resolution.

use std::collections::HashMap;

use serde_json::Value;

use crate::{ConfigError, RuleSet};

/// Resolved option values, keyed by rule name.
pub type RuleOptions = HashMap<String, Value>;

/// Validates option values on behalf of the inline configuration engine.
pub trait OptionValidator {
    /// Whether `name` is a known option.
    fn is_option(&self, name: &str) -> bool;

    /// Validates `value` for `name` and returns the value to store.
    ///
    /// `is_previous` is set when the value is being restored by `$previous`;
    /// such values were already accepted once.
    fn set_option(&self, name: &str, value: Value, is_previous: bool)
    -> Result<Value, ConfigError>;
}

impl OptionValidator for RuleSet {
    fn is_option(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn set_option(
        &self,
        name: &str,
        value: Value,
        is_previous: bool,
    ) -> Result<Value, ConfigError> {
        let rule = self.get(name).ok_or_else(|| ConfigError::undefined(name))?;
        if is_previous || !is_enabled_value(&value) {
            return Ok(value);
        }
        rule.validate_config(value)
    }
}

/// Whether an option value turns its rule on.
pub fn is_enabled_value(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// Validates every entry of `raw` against `validator`.
pub fn resolve_options(
    validator: &dyn OptionValidator,
    raw: &HashMap<String, Value>,
) -> Result<RuleOptions, ConfigError> {
    raw.iter()
        .map(|(name, value)| {
            let value = validator.set_option(name, value.clone(), false)?;
            Ok((name.clone(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_set_knows_builtin_options() {
        let rules = RuleSet::builtin();
        assert!(rules.is_option("line-end-style"));
        assert!(!rules.is_option("line_end_style"));
    }

    #[test]
    fn test_set_option_normalizes() {
        let rules = RuleSet::builtin();
        let value = rules
            .set_option("line-end-style", json!("CRLF"), false)
            .unwrap();
        assert_eq!(value, json!("crlf"));
    }

    #[test]
    fn test_set_option_accepts_disabling_values() {
        let rules = RuleSet::builtin();
        assert_eq!(
            rules.set_option("line-end-style", json!(false), false).unwrap(),
            json!(false)
        );
    }

    #[test]
    fn test_set_option_unknown_rule() {
        let rules = RuleSet::builtin();
        let error = rules.set_option("nope", json!(true), false).unwrap_err();
        assert!(error.message().starts_with("Configuration"));
    }

    #[test]
    fn test_previous_values_skip_validation() {
        let rules = RuleSet::builtin();
        let value = rules.set_option("line-end-style", json!("LF"), true).unwrap();
        assert_eq!(value, json!("LF"));
    }

    #[test]
    fn test_resolve_options_reports_first_rejection() {
        let rules = RuleSet::builtin();
        let raw = HashMap::from([("line-end-style".to_string(), json!("unix"))]);
        assert!(resolve_options(&rules, &raw).is_err());

        let raw = HashMap::from([
            ("line-end-style".to_string(), json!("lf")),
            ("attr-no-dup".to_string(), json!(true)),
        ]);
        let resolved = resolve_options(&rules, &raw).unwrap();
        assert_eq!(resolved.len(), 2);
    }
}
