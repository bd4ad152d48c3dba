//! Item source seam.

use async_trait::async_trait;

use qrsheet_models::Item;

use crate::error::SourceError;

/// Enumerates the full candidate work set for a run.
///
/// An empty vec is a legitimate answer ("the folder has no videos") and is
/// reported distinctly from "resume found zero remaining"; failures to reach
/// the upstream listing surface as [`SourceError::Unavailable`].
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Name of this source for logging.
    fn name(&self) -> &'static str;

    /// Enumerate every candidate item, in a stable order.
    async fn enumerate(&self) -> Result<Vec<Item>, SourceError>;
}
