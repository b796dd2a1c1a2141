//! Inline configuration.
//!
//! A comment such as
//!
//! ```html
//! <!-- linthtml-configure line-end-style="crlf" attr-no-dup=false -->
//! ```
//!
//! changes rule options for everything that starts after the comment ends.
//! Directives are collected up front with [`InlineConfig::feed_comment`] and
//! then applied lazily while the caller walks the document forward with
//! [`InlineConfig::get_opts_at_index`].

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound::{Excluded, Included};
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use linthtml_ast::{Node, SourceRange};

use crate::issue::INLINE_CONFIG_RULE;
use crate::{ConfigError, InlineConfigError, Issue, OptionValidator, RuleOptions};

/// The value that restores an option to what it was before its last change.
pub const PREVIOUS: &str = "$previous";

static DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*linthtml-configure\s+(.*)").expect("valid directive regex"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=]+)(?:\s*=\s*('[^']*'|"[^"]*"|[^'"\s]\S*))?"#)
        .expect("valid attribute regex")
});

/// The new value of one option.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Value(Value),
    /// Restore the value the option held before its most recent change.
    Previous,
}

/// One `name=value` pair of a directive.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDelta {
    pub name: String,
    pub value: OptionValue,
}

/// The option changes of one directive comment.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    /// Start offset of the comment.
    pub start: usize,
    /// End offset of the comment; the entry applies to offsets after it.
    pub end: usize,
    /// Where the comment is, for reporting.
    pub range: SourceRange,
    pub deltas: Vec<OptionDelta>,
}

/// A delta the validator refused while an entry was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionRejection {
    pub option: String,
    /// The validator's error, reworded as an inline configuration error.
    pub error: ConfigError,
    /// The directive comment the delta came from.
    pub range: SourceRange,
}

impl OptionRejection {
    /// The `INLINE_01` issue for this rejection.
    pub fn to_issue(&self) -> Issue {
        Issue::new("INLINE_01", self.range.loc)
            .with_rule(INLINE_CONFIG_RULE)
            .with_data("option", self.option.clone())
            .with_data("message", self.error.message())
    }
}

/// The resolved options plus the value each option had before its last change.
#[derive(Debug, Clone, Default)]
pub struct OptionState {
    current: RuleOptions,
    /// `None` records that the option was absent before the change.
    previous: HashMap<String, Option<Value>>,
}

impl OptionState {
    pub fn new(basis: &RuleOptions) -> Self {
        Self {
            current: basis.clone(),
            previous: HashMap::new(),
        }
    }

    pub fn current(&self) -> &RuleOptions {
        &self.current
    }

    /// The value `name` had before its latest change, if it was ever changed.
    pub fn previous(&self, name: &str) -> Option<Option<&Value>> {
        self.previous.get(name).map(Option::as_ref)
    }

    /// Applies every delta of `entry` in order.
    ///
    /// `$previous` resolves against the shadow values as they were before
    /// this entry. The pre-change value of every touched option is captured
    /// before validation, so a rejected change still moves the shadow value.
    pub fn apply(
        &mut self,
        entry: &ConfigEntry,
        validator: &dyn OptionValidator,
    ) -> Vec<OptionRejection> {
        let mut undo: HashMap<String, Option<Value>> = HashMap::new();
        let mut rejections = Vec::new();

        for delta in &entry.deltas {
            let (value, is_previous) = match &delta.value {
                OptionValue::Value(value) => (Some(value.clone()), false),
                OptionValue::Previous => match self.previous.get(&delta.name) {
                    Some(previous) => (previous.clone(), true),
                    None => continue,
                },
            };

            undo.insert(delta.name.clone(), self.current.get(&delta.name).cloned());

            let Some(value) = value else {
                self.current.remove(&delta.name);
                continue;
            };

            match validator.set_option(&delta.name, value, is_previous) {
                Ok(value) => {
                    self.current.insert(delta.name.clone(), value);
                }
                Err(error) => rejections.push(OptionRejection {
                    option: delta.name.clone(),
                    error: error.into_inline(),
                    range: entry.range,
                }),
            }
        }

        self.previous.extend(undo);
        rejections
    }
}

/// Per-document inline configuration engine.
///
/// The cursor only moves forward: after options were requested for an
/// index, later requests must name a strictly greater index (or `0`, which
/// rewinds the cursor without undoing applied entries).
pub struct InlineConfig<'v> {
    validator: &'v dyn OptionValidator,
    index_configs: BTreeMap<usize, ConfigEntry>,
    state: OptionState,
    index: usize,
}

impl<'v> InlineConfig<'v> {
    pub fn new(validator: &'v dyn OptionValidator) -> Self {
        Self {
            validator,
            index_configs: BTreeMap::new(),
            state: OptionState::default(),
            index: 0,
        }
    }

    /// Starts over from `basis`. Registered entries are kept.
    pub fn reset(&mut self, basis: &RuleOptions) {
        self.state = OptionState::new(basis);
        self.index = 0;
    }

    /// The options in effect at the cursor.
    pub fn current(&self) -> &RuleOptions {
        self.state.current()
    }

    pub fn state(&self) -> &OptionState {
        &self.state
    }

    /// The cursor: the last index options were requested for.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Registered entries in offset order.
    pub fn entries(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.index_configs.values()
    }

    /// Registers an entry under its end offset.
    pub fn add_config(&mut self, entry: ConfigEntry) -> Result<(), InlineConfigError> {
        if self.index_configs.contains_key(&entry.end) {
            return Err(InlineConfigError::DuplicateIndex { index: entry.end });
        }
        self.index_configs.insert(entry.end, entry);
        Ok(())
    }

    /// Applies the entries in `(cursor, new_index]` and moves the cursor.
    ///
    /// Returns the deltas the validator rejected on the way.
    pub fn get_opts_at_index(
        &mut self,
        new_index: usize,
    ) -> Result<Vec<OptionRejection>, InlineConfigError> {
        if new_index != 0 && new_index <= self.index {
            return Err(InlineConfigError::OutOfOrder {
                requested: new_index,
                current: self.index,
            });
        }

        let mut rejections = Vec::new();
        if new_index > self.index {
            for entry in self
                .index_configs
                .range((Excluded(self.index), Included(new_index)))
                .map(|(_, entry)| entry)
            {
                debug!(
                    "Applying inline configuration at {} ({} options)",
                    entry.end,
                    entry.deltas.len()
                );
                rejections.extend(self.state.apply(entry, self.validator));
            }
        }
        self.index = new_index;

        Ok(rejections)
    }

    /// Reads a directive out of a comment node.
    ///
    /// Valid pairs become one [`ConfigEntry`]; each bad pair becomes an issue
    /// without affecting the others. Comments that are not directives, and
    /// nodes that are not comments, yield nothing.
    pub fn feed_comment(&mut self, node: &Node) -> Result<Vec<Issue>, InlineConfigError> {
        if !node.is_comment() {
            return Ok(Vec::new());
        }
        let Some(pairs) = node
            .data()
            .and_then(|data| DIRECTIVE.captures(data))
            .and_then(|captures| captures.get(1))
            .map(|pairs| pairs.as_str())
        else {
            return Ok(Vec::new());
        };

        let mut deltas = Vec::new();
        let mut issues = Vec::new();
        for (name, value) in parse_html_attrs(pairs) {
            match self.parse_pair(name, value, &node.range) {
                Ok(delta) => deltas.push(delta),
                Err(issue) => issues.push(issue),
            }
        }

        if !deltas.is_empty() {
            self.add_config(ConfigEntry {
                start: node.start(),
                end: node.end(),
                range: node.range,
                deltas,
            })?;
        }

        Ok(issues)
    }

    /// Turns one attribute-like pair into a delta, or the issue explaining
    /// why it cannot be one.
    fn parse_pair(
        &self,
        name: &str,
        value: Option<&str>,
        range: &SourceRange,
    ) -> Result<OptionDelta, Issue> {
        if !is_valid_name(name) {
            return Err(Issue::new("E051", range.loc)
                .with_rule(INLINE_CONFIG_RULE)
                .with_data("name", name));
        }

        let value = value.unwrap_or_default();
        let value = match value.as_bytes().first() {
            Some(b'"' | b'\'') => value.get(1..value.len() - 1).unwrap_or_default(),
            _ => value,
        };
        let value = value.replace('\'', "\"");
        let name = name.replace('_', "-");

        if !self.validator.is_option(&name) {
            return Err(Issue::new("INLINE_02", range.loc)
                .with_rule(INLINE_CONFIG_RULE)
                .with_data("rule_name", name));
        }

        if value == PREVIOUS {
            return Ok(OptionDelta {
                name,
                value: OptionValue::Previous,
            });
        }

        let parsed = match serde_json::from_str::<Value>(&value) {
            Ok(parsed) => parsed,
            Err(_) if is_valid_name(&value) => Value::String(value),
            Err(_) => {
                return Err(Issue::new("INLINE_03", range.loc)
                    .with_rule(INLINE_CONFIG_RULE)
                    .with_data("rule_configuration", value));
            }
        };

        Ok(OptionDelta {
            name,
            value: OptionValue::Value(parsed),
        })
    }
}

/// Splits `name=value` pairs; quoted values keep their quotes.
fn parse_html_attrs(source: &str) -> Vec<(&str, Option<&str>)> {
    ATTRIBUTE
        .captures_iter(source)
        .filter_map(|captures| {
            let name = captures.get(1)?.as_str();
            Some((name, captures.get(2).map(|value| value.as_str())))
        })
        .collect()
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
