//! # linthtml_core
//!
//! Core linter engine for linthtml.
//!
//! This crate provides:
//! - The main `Linter` orchestrator
//! - The inline configuration engine driven by `linthtml-configure` comments
//! - The `Rule` contract and the built-in rules
//! - Configuration loading
//! - File discovery and parallel processing
//!
//! ## Example
//!
//! ```rust,ignore
//! use linthtml_core::{Linter, LinterConfig};
//!
//! let config = LinterConfig::from_file(".linthtmlrc.json")?;
//! let linter = Linter::new(config)?;
//!
//! let (results, failures) = linter.lint_patterns(&["**/*.html".to_string()])?;
//! for result in results {
//!     println!("{}: {} issues", result.path.display(), result.issues.len());
//! }
//! ```

mod config;
mod document_linter;
mod error;
pub mod file_finder;
mod file_linter;
mod inline_config;
mod issue;
mod linter;
mod options;
mod result;
mod rule;
pub mod rules;

pub use linthtml_ast::{Location, Position};

pub use config::{CONFIG_FILE_NAMES, LinterConfig};
pub use error::{ConfigError, InlineConfigError, LinterError};
pub use file_finder::FileFinder;
pub use file_linter::MAX_FILE_SIZE;
pub use inline_config::{
    ConfigEntry, InlineConfig, OptionDelta, OptionRejection, OptionState, OptionValue, PREVIOUS,
};
pub use issue::{INLINE_CONFIG_RULE, Issue, IssueMeta, PARSER_RULE};
pub use linter::{LintFilesResult, Linter};
pub use options::{OptionValidator, RuleOptions, is_enabled_value, resolve_options};
pub use result::LintResult;
pub use rule::{Phase, Rule, RuleContext, RuleSet};
