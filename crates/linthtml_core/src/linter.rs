//! Core linter engine.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, warn};

use linthtml_parser::{HtmlParser, Parser};

use crate::document_linter::lint_document;
use crate::file_finder::FileFinder;
use crate::file_linter::lint_file_internal;
use crate::options::resolve_options;
use crate::{Issue, LintResult, LinterConfig, LinterError, RuleOptions, RuleSet};

/// Result type for lint_files and lint_patterns methods.
///
/// Contains a tuple of:
/// - Successful lint results
/// - Failed files with their errors (path and error)
pub type LintFilesResult = Result<(Vec<LintResult>, Vec<(PathBuf, LinterError)>), LinterError>;

/// The core linter engine.
///
/// Holds only read-only state after construction, so one `Linter` can be
/// shared by every worker thread. Each document gets its own inline
/// configuration engine.
#[derive(Debug)]
pub struct Linter {
    config: LinterConfig,
    rules: RuleSet,
    /// Validated options every document starts from.
    options: RuleOptions,
    parser: HtmlParser,
    finder: FileFinder,
}

impl Linter {
    /// Creates a new linter with the given configuration.
    ///
    /// Fails when the configuration names an unknown rule or a value a rule
    /// does not accept, or when an include/exclude glob is invalid.
    pub fn new(config: LinterConfig) -> Result<Self, LinterError> {
        let rules = RuleSet::builtin();
        let options = resolve_options(&rules, &config.rules)?;
        let finder = FileFinder::new(&config.include, &config.exclude)?;

        debug!(
            "Linter ready with {} rules, {} configured",
            rules.len(),
            options.len()
        );

        Ok(Self {
            config,
            rules,
            options,
            parser: HtmlParser::new(),
            finder,
        })
    }

    pub fn config(&self) -> &LinterConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The resolved option basis.
    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    /// Lints one in-memory document.
    pub fn lint_source(&self, source: &str) -> Result<Vec<Issue>, LinterError> {
        let doc = self.parser.parse(source);
        Ok(lint_document(&doc, &self.rules, &self.options)?)
    }

    /// Lints files matching the given patterns.
    ///
    /// Globs are expanded under the configuration file's directory, or the
    /// working directory when the configuration was not loaded from a file.
    ///
    /// Returns a tuple of (successful results, failed files with errors).
    pub fn lint_patterns(&self, patterns: &[String]) -> LintFilesResult {
        let base_dir = self
            .config
            .base_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let files = self.finder.discover_files(patterns, base_dir)?;
        self.lint_files(&files)
    }

    /// Lints a list of files in parallel using rayon.
    ///
    /// A file that cannot be read or linted is reported next to the
    /// successes instead of failing the whole batch.
    ///
    /// Returns a tuple of (successful results, failed files with errors).
    pub fn lint_files(&self, paths: &[PathBuf]) -> LintFilesResult {
        let results: Vec<Result<LintResult, (PathBuf, LinterError)>> = paths
            .par_iter()
            .map(|path| {
                lint_file_internal(path, &self.rules, &self.options)
                    .map_err(|e| (path.clone(), e))
            })
            .collect();

        let mut successes = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(lint_result) => successes.push(lint_result),
                Err((path, error)) => {
                    warn!("Failed to lint {}: {}", path.display(), error);
                    failures.push((path, error));
                }
            }
        }

        Ok((successes, failures))
    }
}
