//! Manifest + PDF sheet finalizer.

use std::path::PathBuf;

use async_trait::async_trait;

use qrsheet_engine::{EngineError, EngineResult, Finalizer};
use qrsheet_models::Record;
use qrsheet_render::{cells_from_records, SheetRenderer};
use qrsheet_store::{remove_manifest, write_manifest};

/// Writes the final CSV manifest, then renders the PDF sheet.
///
/// Both outputs are durable before the runner deletes the checkpoint; if
/// either fails the checkpoint survives and a resume can finalize again.
pub struct SheetFinalizer {
    manifest_path: PathBuf,
    sheet_path: PathBuf,
    renderer: SheetRenderer,
}

impl SheetFinalizer {
    pub fn new(
        manifest_path: impl Into<PathBuf>,
        sheet_path: impl Into<PathBuf>,
        renderer: SheetRenderer,
    ) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            sheet_path: sheet_path.into(),
            renderer,
        }
    }
}

#[async_trait]
impl Finalizer for SheetFinalizer {
    async fn finalize(&self, records: &[Record]) -> EngineResult<()> {
        write_manifest(&self.manifest_path, records)
            .map_err(|e| EngineError::finalize(e.to_string()))?;

        let cells =
            cells_from_records(records).map_err(|e| EngineError::finalize(e.to_string()))?;
        self.renderer
            .render(&cells, &self.sheet_path)
            .map_err(|e| EngineError::finalize(e.to_string()))
    }

    async fn reset(&self) -> EngineResult<()> {
        remove_manifest(&self.manifest_path).map_err(|e| EngineError::reset(e.to_string()))?;
        match std::fs::remove_file(&self.sheet_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EngineError::reset(e.to_string())),
        }
    }
}
