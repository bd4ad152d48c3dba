//! Final manifest output.

use std::path::Path;

use tracing::info;

use qrsheet_models::Record;

use crate::error::StoreResult;
use crate::tabular;

/// Write the final manifest: the same tabular shape as the checkpoint,
/// written once at successful completion. Uses the same atomic replace so a
/// crash mid-finalization cannot leave a torn manifest.
pub fn write_manifest(path: &Path, records: &[Record]) -> StoreResult<()> {
    tabular::write_records_atomic(path, records)?;
    info!(
        path = %path.display(),
        records = records.len(),
        "Wrote final manifest"
    );
    Ok(())
}

/// Remove a previously written manifest. Not an error if absent.
pub fn remove_manifest(path: &Path) -> StoreResult<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
