//! Lints one parsed document.

use std::ops::ControlFlow;

use tracing::debug;

use linthtml_ast::visitor::walk_document;
use linthtml_ast::{Document, NodeRef, Recovery, RecoveryKind, VisitResult, Visitor};

use crate::issue::PARSER_RULE;
use crate::options::is_enabled_value;
use crate::{
    InlineConfig, InlineConfigError, Issue, OptionRejection, Phase, RuleContext, RuleOptions,
    RuleSet,
};

/// Runs every enabled rule over `doc`, honouring inline directives.
///
/// Issues come back sorted by position; issues at the same position keep
/// the order they were reported in.
pub(crate) fn lint_document(
    doc: &Document,
    rules: &RuleSet,
    basis: &RuleOptions,
) -> Result<Vec<Issue>, InlineConfigError> {
    let mut inline = InlineConfig::new(rules);
    inline.reset(basis);

    let mut issues = Vec::new();
    for node in doc.iter().filter(|node| node.is_comment()) {
        issues.extend(inline.feed_comment(node.node())?);
    }

    let mut walker = RuleWalker {
        rules,
        inline,
        issues,
        error: None,
    };
    let _ = walk_document(&mut walker, doc);
    if let Some(error) = walker.error {
        return Err(error);
    }

    let mut issues = walker.issues;
    issues.extend(doc.recoveries().iter().map(recovery_issue));
    issues.sort_by_key(|issue| issue.position);

    debug!("Linted {} nodes, found {} issues", doc.len(), issues.len());
    Ok(issues)
}

struct RuleWalker<'r> {
    rules: &'r RuleSet,
    inline: InlineConfig<'r>,
    issues: Vec<Issue>,
    error: Option<InlineConfigError>,
}

impl<'a> Visitor<'a> for RuleWalker<'_> {
    fn enter_node(&mut self, node: NodeRef<'a>) -> VisitResult {
        match self.inline.get_opts_at_index(node.start()) {
            Ok(rejections) => self
                .issues
                .extend(rejections.iter().map(OptionRejection::to_issue)),
            Err(error) => {
                self.error = Some(error);
                return ControlFlow::Break(());
            }
        }

        let options = self.inline.current();
        for rule in self.rules.iter().filter(|rule| rule.phase() == Phase::Dom) {
            let Some(option) = options.get(rule.name()) else {
                continue;
            };
            if !is_enabled_value(option) {
                continue;
            }

            let mut context = RuleContext::new(rule.name());
            rule.lint(node, option, &mut context);
            self.issues.extend(context.into_issues());
        }

        ControlFlow::Continue(())
    }
}

fn recovery_issue(recovery: &Recovery) -> Issue {
    let issue = match &recovery.kind {
        RecoveryKind::UnclosedElement { name } => {
            Issue::new("PARSE_01", recovery.range.loc).with_data("name", name.as_str())
        }
        RecoveryKind::StrayClosingTag { name } => {
            Issue::new("PARSE_02", recovery.range.loc).with_data("name", name.as_str())
        }
        RecoveryKind::UnterminatedComment => Issue::new("PARSE_03", recovery.range.loc),
    };
    issue.with_rule(PARSER_RULE)
}
