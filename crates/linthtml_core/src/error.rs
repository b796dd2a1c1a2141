//! Linter error types.

use thiserror::Error;

/// Errors that can occur during linting.
#[derive(Debug, Error)]
pub enum LinterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error.
    #[error("File error: {0}")]
    File(String),

    /// The inline configuration engine was driven out of contract.
    #[error("Inline configuration engine error: {0}")]
    Inline(#[from] InlineConfigError),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }
}

impl From<ConfigError> for LinterError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error.to_string())
    }
}

/// Misuse of [`InlineConfig`](crate::InlineConfig).
///
/// These point at a bug in the caller, never at a defect in the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InlineConfigError {
    /// Two directives were registered at the same end offset.
    #[error("A configuration already exists at index {index}")]
    DuplicateIndex { index: usize },

    /// Options were requested for an index at or before the cursor.
    #[error("Cannot get options for index {requested} when index {current} has already been checked")]
    OutOfOrder { requested: usize, current: usize },
}

/// A rejected rule option value.
///
/// Messages start with `Configuration`; [`ConfigError::into_inline`] rewrites
/// that prefix for values that came from a directive comment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// An option value a rule does not accept.
    pub fn invalid(rule: &str, reason: impl std::fmt::Display) -> Self {
        Self::new(format!(
            "Configuration for rule \"{rule}\" is invalid: {reason}"
        ))
    }

    /// An option name no rule answers to.
    pub fn undefined(rule: &str) -> Self {
        Self::new(format!("Configuration for rule \"{rule}\" is undefined"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Rewrites the message so it reads as an inline configuration error.
    pub fn into_inline(self) -> Self {
        match self.message.strip_prefix("Configuration") {
            Some(rest) => Self::new(format!("Inline configuration{rest}")),
            None => self,
        }
    }
}
