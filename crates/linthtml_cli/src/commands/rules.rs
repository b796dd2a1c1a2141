//! Rules command implementation

use linthtml_core::{LinterConfig, RuleSet, is_enabled_value};
use miette::Result;

use crate::cli::Cli;
use crate::commands::load_config;

pub fn run_rules(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    print!("{}", format_rules(&RuleSet::builtin(), &config));
    Ok(())
}

fn format_rules(rules: &RuleSet, config: &LinterConfig) -> String {
    let mut out = String::new();
    for rule in rules.iter() {
        let status = match config.rules.get(rule.name()) {
            Some(value) if is_enabled_value(value) => "on",
            _ => "off",
        };
        out.push_str(&format!(
            "{:<30} {:<4} {}\n",
            rule.name(),
            status,
            rule.description()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_format_rules_marks_enabled_rules() {
        let mut config = LinterConfig::new();
        config.rules.insert("attr-no-dup".to_string(), json!(true));
        config.rules.insert("line-end-style".to_string(), json!(false));

        let listing = format_rules(&RuleSet::builtin(), &config);
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("attr-no-dup"));
        assert!(lines[0].contains(" on "));
        assert!(lines[1].starts_with("line-end-style"));
        assert!(lines[1].contains(" off "));
        assert!(lines[2].contains("Disallow trailing spaces"));
    }
}
