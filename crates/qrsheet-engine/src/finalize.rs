//! Finalizer seam.

use async_trait::async_trait;

use qrsheet_models::Record;

use crate::error::EngineResult;

/// Consumer of the complete record set.
///
/// Invoked at most once per run, only when every enumerated item is recorded
/// and no stop was requested. The runner deletes the checkpoint strictly
/// after `finalize` returns Ok, so a crash mid-finalization still permits
/// recovery via resume.
#[async_trait]
pub trait Finalizer: Send + Sync {
    /// Persist the final outputs for the full record set.
    async fn finalize(&self, records: &[Record]) -> EngineResult<()>;

    /// Remove prior final outputs. Called once before a fresh (non-resume)
    /// run.
    async fn reset(&self) -> EngineResult<()> {
        Ok(())
    }
}
