//! QR code artifact stage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::Luma;
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use qrsheet_engine::{EngineError, EngineResult, FieldUpdates, Stage, StageError};
use qrsheet_models::{Item, Record, FIELD_LINK, FIELD_QR_PATH};

/// Pixels per QR module. Matches the box size the sheet layout expects.
const MODULE_PIXELS: u32 = 10;

/// Encodes the item's link into a PNG under the artifact directory.
///
/// Reads the `link` field produced by an earlier stage and writes
/// `<dir>/<item id>.png`. Reset clears every file in the artifact directory.
#[derive(Debug)]
pub struct QrCodeStage {
    out_dir: PathBuf,
}

impl QrCodeStage {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Where the artifact for an item lands.
    pub fn artifact_path(&self, item: &Item) -> PathBuf {
        self.out_dir.join(format!("{}.png", item.id))
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

#[async_trait]
impl Stage for QrCodeStage {
    fn name(&self) -> &'static str {
        "qr_code"
    }

    async fn run(&self, item: &Item, outputs: &Record) -> Result<FieldUpdates, StageError> {
        let link = outputs.get(FIELD_LINK).ok_or_else(|| {
            StageError::new(self.name(), &item.id, "no link produced by earlier stages")
        })?;

        let code = QrCode::with_error_correction_level(link.as_bytes(), EcLevel::L)
            .map_err(|e| StageError::new(self.name(), &item.id, e.to_string()))?;
        let pixels = code
            .render::<Luma<u8>>()
            .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
            .build();

        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .map_err(|e| StageError::new(self.name(), &item.id, e.to_string()))?;

        let path = self.artifact_path(item);
        pixels
            .save(&path)
            .map_err(|e| StageError::new(self.name(), &item.id, e.to_string()))?;
        debug!(video = %item.id, path = %path.display(), "Wrote QR code");

        Ok(vec![(
            FIELD_QR_PATH.to_string(),
            path.to_string_lossy().into_owned(),
        )])
    }

    async fn reset(&self) -> EngineResult<()> {
        let mut entries = match tokio::fs::read_dir(&self.out_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(EngineError::reset(e.to_string())),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| EngineError::reset(e.to_string()))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if is_file {
                tokio::fs::remove_file(entry.path())
                    .await
                    .map_err(|e| EngineError::reset(e.to_string()))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];

    fn record_with_link(item: &Item) -> Record {
        let mut record = Record::new(&item.id);
        record.set(FIELD_LINK, "https://drive.google.com/file/d/1AbC-9/view");
        record
    }

    #[tokio::test]
    async fn test_writes_png_artifact() {
        let dir = TempDir::new().unwrap();
        let stage = QrCodeStage::new(dir.path().join("qr_codes"));
        let item = Item::remote("anna03", "1AbC-9");

        let updates = stage.run(&item, &record_with_link(&item)).await.unwrap();

        let path = stage.artifact_path(&item);
        assert_eq!(
            updates,
            vec![(
                FIELD_QR_PATH.to_string(),
                path.to_string_lossy().into_owned()
            )]
        );
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], &PNG_MAGIC);
    }

    #[tokio::test]
    async fn test_fails_without_link() {
        let dir = TempDir::new().unwrap();
        let stage = QrCodeStage::new(dir.path());
        let item = Item::remote("anna", "1AbC-9");

        let err = stage.run(&item, &Record::new(&item.id)).await.unwrap_err();
        assert_eq!(err.stage, "qr_code");
    }

    #[tokio::test]
    async fn test_reset_clears_artifacts() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("qr_codes");
        let stage = QrCodeStage::new(&out);
        let item = Item::remote("anna", "1AbC-9");

        stage.run(&item, &record_with_link(&item)).await.unwrap();
        assert!(stage.artifact_path(&item).exists());

        stage.reset().await.unwrap();
        assert!(!stage.artifact_path(&item).exists());
        assert!(out.exists(), "the directory itself stays");
    }

    #[tokio::test]
    async fn test_reset_without_directory_is_ok() {
        let dir = TempDir::new().unwrap();
        let stage = QrCodeStage::new(dir.path().join("never_created"));
        stage.reset().await.unwrap();
    }
}
