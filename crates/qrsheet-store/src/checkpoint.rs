//! Durable checkpoint store.

use std::path::{Path, PathBuf};

use tracing::debug;

use qrsheet_models::Record;

use crate::error::StoreResult;
use crate::tabular;

/// Durable key-value persistence of per-item results, one file per run.
///
/// The store always receives the complete up-to-date record set on `save` and
/// replaces the file atomically, so a crash at any point leaves either the
/// previous checkpoint or the new one on disk, never a torn write.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The checkpoint file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all previously completed records.
    ///
    /// Returns an empty vec when no checkpoint exists; fails with
    /// `CorruptCheckpoint` when the file exists but cannot be parsed.
    pub fn load(&self) -> StoreResult<Vec<Record>> {
        let records = tabular::read_records(&self.path)?;
        debug!(
            path = %self.path.display(),
            records = records.len(),
            "Loaded checkpoint"
        );
        Ok(records)
    }

    /// Atomically replace the checkpoint with the full record set.
    pub fn save(&self, records: &[Record]) -> StoreResult<()> {
        tabular::write_records_atomic(&self.path, records)?;
        debug!(
            path = %self.path.display(),
            records = records.len(),
            "Saved checkpoint"
        );
        Ok(())
    }

    /// Remove the checkpoint. Not an error if it is already gone.
    pub fn delete(&self) -> StoreResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Deleted checkpoint");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
