//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting or loading records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored checkpoint exists but cannot be parsed into well-formed
    /// records. Surfaced to the operator; never silently discarded.
    #[error("Corrupt checkpoint at {path}: {reason}")]
    CorruptCheckpoint { path: String, reason: String },

    /// A durable write failed. Fatal to the run; the previous checkpoint on
    /// disk is left intact.
    #[error("Checkpoint write failed: {0}")]
    WriteFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn corrupt(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorruptCheckpoint {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn write_failed(msg: impl Into<String>) -> Self {
        Self::WriteFailed(msg.into())
    }
}
