//! The rule contract.

use serde_json::Value;

use linthtml_ast::NodeRef;

use crate::rules;
use crate::{ConfigError, Issue};

/// When the engine invokes a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Once per node, during the document-order tree walk.
    Dom,
}

/// A lint rule.
///
/// Rules are shared across threads when files are linted in parallel, so
/// they hold no per-document state; everything a run needs is passed in.
pub trait Rule: Send + Sync {
    /// Unique rule name, also the name of its option.
    fn name(&self) -> &'static str;

    /// One-line description shown by `linthtml rules`.
    fn description(&self) -> &'static str;

    fn phase(&self) -> Phase {
        Phase::Dom
    }

    /// Validates and normalizes an option value.
    fn validate_config(&self, value: Value) -> Result<Value, ConfigError> {
        Ok(value)
    }

    /// Checks one node. `option` is the value stored under [`Rule::name`].
    fn lint(&self, node: NodeRef<'_>, option: &Value, context: &mut RuleContext);
}

/// Collects the issues a rule reports.
#[derive(Debug)]
pub struct RuleContext<'r> {
    rule: &'r str,
    issues: Vec<Issue>,
}

impl<'r> RuleContext<'r> {
    pub fn new(rule: &'r str) -> Self {
        Self {
            rule,
            issues: Vec::new(),
        }
    }

    /// Records an issue, tagging it with the running rule's name.
    pub fn report(&mut self, issue: Issue) {
        self.issues.push(issue.with_rule(self.rule));
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

/// The set of rules known to a linter.
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Every built-in rule.
    pub fn builtin() -> Self {
        Self::new(rules::builtin())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.name() == name)
            .map(|rule| rule.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}
