//! Lint result types.

use std::path::PathBuf;

use serde::Serialize;

use crate::Issue;

/// The issues found in one file.
#[derive(Debug, Clone, Serialize)]
pub struct LintResult {
    pub path: PathBuf,
    pub issues: Vec<Issue>,
}

impl LintResult {
    pub fn new(path: PathBuf, issues: Vec<Issue>) -> Self {
        Self { path, issues }
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}
