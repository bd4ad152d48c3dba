//! Render error types.

use thiserror::Error;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while producing the QR sheet.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to load QR artifact: {0}")]
    Artifact(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn artifact(msg: impl Into<String>) -> Self {
        Self::Artifact(msg.into())
    }

    pub fn pdf(msg: impl Into<String>) -> Self {
        Self::Pdf(msg.into())
    }
}
