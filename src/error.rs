//! Error types for Histex

use std::io;
use thiserror::Error;

/// Result type for Histex operations
pub type Result<T> = std::result::Result<T, HistexError>;

/// Errors that abort an export operation
///
/// Per-item write failures are not represented here: they are collected as
/// [`crate::export::ItemStatus::Failed`] entries and never abort a batch.
#[derive(Debug, Error)]
pub enum HistexError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// "Export to last dir" was invoked before any directory was used
    #[error("No previous export directory recorded")]
    NoPriorDirectory,

    /// Directory state could not be read or persisted
    #[error("Directory state error: {0}")]
    State(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Capture manifest could not be loaded
    #[error("Invalid capture file: {0}")]
    InvalidCapture(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}
