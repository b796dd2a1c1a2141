use serde_json::Value;

use linthtml_ast::NodeRef;

use crate::{ConfigError, Issue, Rule, RuleContext};

/// Reports attributes repeated within one open tag.
pub struct AttrNoDup;

impl Rule for AttrNoDup {
    fn name(&self) -> &'static str {
        "attr-no-dup"
    }

    fn description(&self) -> &'static str {
        "Disallow duplicate attributes on an element"
    }

    fn validate_config(&self, value: Value) -> Result<Value, ConfigError> {
        super::expect_bool(self.name(), value)
    }

    fn lint(&self, node: NodeRef<'_>, _option: &Value, context: &mut RuleContext) {
        let Some(element) = node.as_element() else {
            return;
        };

        for name in &element.duplicates {
            // Point at the first repetition.
            let position = element
                .attributes
                .iter()
                .filter(|attr| attr.name.eq_ignore_ascii_case(name))
                .nth(1)
                .map_or(element.open.loc, |attr| attr.range.loc);

            context.report(Issue::new("E003", position).with_data("attribute", name.as_str()));
        }
    }
}
