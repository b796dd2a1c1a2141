//! Single file linting logic.

use std::fs;
use std::path::Path;

use tracing::debug;

use linthtml_parser::{HtmlParser, Parser};

use crate::document_linter::lint_document;
use crate::error::LinterError;
use crate::result::LintResult;
use crate::{RuleOptions, RuleSet};

/// Files larger than this are rejected without being read.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub(crate) fn lint_file_internal(
    path: &Path,
    rules: &RuleSet,
    options: &RuleOptions,
) -> Result<LintResult, LinterError> {
    debug!("Linting {}", path.display());

    let content = read_source(path)?;
    let doc = HtmlParser::new().parse(&content);
    let issues = lint_document(&doc, rules, options)?;

    Ok(LintResult::new(path.to_path_buf(), issues))
}

/// Reads a regular file no larger than [`MAX_FILE_SIZE`].
fn read_source(path: &Path) -> Result<String, LinterError> {
    let metadata = fs::metadata(path).map_err(|e| {
        LinterError::file(format!(
            "Failed to read metadata for {}: {}",
            path.display(),
            e
        ))
    })?;

    if !metadata.is_file() {
        return Err(LinterError::file(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(LinterError::file(format!(
            "File size exceeds limit of {} bytes: {}",
            MAX_FILE_SIZE,
            path.display()
        )));
    }

    fs::read_to_string(path)
        .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))
}
