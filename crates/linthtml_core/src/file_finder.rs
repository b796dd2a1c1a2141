//! File discovery.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::LinterError;

/// Resolves command-line patterns to the files to lint.
///
/// Include and exclude globs come from the configuration and are matched
/// against paths relative to the directory being searched. Exclusion wins.
#[derive(Debug)]
pub struct FileFinder {
    include_globs: Option<GlobSet>,
    exclude_globs: Option<GlobSet>,
}

impl FileFinder {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, LinterError> {
        Ok(Self {
            include_globs: build_globset(include)?,
            exclude_globs: build_globset(exclude)?,
        })
    }

    /// Checks if a file path should be ignored based on include/exclude patterns.
    pub fn should_ignore(&self, path: &Path) -> bool {
        if self
            .exclude_globs
            .as_ref()
            .is_some_and(|excludes| excludes.is_match(path))
        {
            return true;
        }

        self.include_globs
            .as_ref()
            .is_some_and(|includes| !includes.is_match(path))
    }

    /// Expands `patterns` under `base_dir`.
    ///
    /// A pattern naming an existing file is taken as is; anything else is a
    /// glob. The result is sorted and free of duplicates.
    pub fn discover_files(
        &self,
        patterns: &[String],
        base_dir: &Path,
    ) -> Result<Vec<PathBuf>, LinterError> {
        let mut files = Vec::new();
        let mut globs = Vec::new();

        for pattern in patterns {
            let path = Path::new(pattern);
            if path.is_file() {
                if self.should_ignore(path) {
                    debug!("Ignoring {}", path.display());
                } else {
                    files.push(path.to_path_buf());
                }
            } else {
                globs.push(pattern.clone());
            }
        }

        if let Some(glob_set) = build_globset(&globs)? {
            for entry in WalkDir::new(base_dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let path = entry.path();
                let relative = path.strip_prefix(base_dir).unwrap_or(path);
                if glob_set.is_match(relative) && !self.should_ignore(relative) {
                    files.push(path.to_path_buf());
                }
            }
        }

        files.sort();
        files.dedup();

        info!("Discovered {} files to lint", files.len());
        Ok(files)
    }
}

fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, LinterError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| LinterError::config(format!("Invalid pattern '{}': {}", pattern, e)))?;
        builder.add(glob);
    }

    let globset = builder
        .build()
        .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))?;

    Ok(Some(globset))
}
