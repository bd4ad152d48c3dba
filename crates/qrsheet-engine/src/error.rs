//! Engine error types.

use thiserror::Error;

use qrsheet_models::ItemId;
use qrsheet_store::StoreError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// The item source could not enumerate the work set. Fatal to the run;
/// nothing has been mutated and any prior checkpoint is left untouched.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// A stage failed for a single item. Non-fatal: the item is skipped this run
/// and retried on the next resume.
#[derive(Debug, Error)]
#[error("Stage '{stage}' failed for '{item}': {message}")]
pub struct StageError {
    pub item: ItemId,
    pub stage: &'static str,
    pub message: String,
}

impl StageError {
    pub fn new(stage: &'static str, item: &ItemId, message: impl Into<String>) -> Self {
        Self {
            item: item.clone(),
            stage,
            message: message.into(),
        }
    }
}

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Reset failed: {0}")]
    Reset(String),

    #[error("Finalization failed: {0}")]
    Finalize(String),
}

impl EngineError {
    pub fn reset(msg: impl Into<String>) -> Self {
        Self::Reset(msg.into())
    }

    pub fn finalize(msg: impl Into<String>) -> Self {
        Self::Finalize(msg.into())
    }
}
