//! CLI error types.

use std::io;

use nextdate_core::{RecurrenceError, TaskError, TracingError};
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing fields, malformed, or out of range.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading input or the configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Task JSON could not be read or written.
    #[error("invalid task JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Rule or date rejected by the recurrence engine.
    #[error("{0}")]
    Recurrence(#[from] RecurrenceError),

    /// Task rejected by the scheduling policy.
    #[error("{0}")]
    Task(#[from] TaskError),

    /// Logging could not be set up.
    #[error("{0}")]
    Tracing(#[from] TracingError),
}

impl CliError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<nextdate_core::EvalError> for CliError {
    fn from(err: nextdate_core::EvalError) -> Self {
        Self::Recurrence(err.into())
    }
}
