//! Collaborator wiring and run entry point.

use anyhow::Context;
use url::Url;

use qrsheet_engine::{
    spawn_stop_listener, BatchRunner, CancelFlag, ItemSource, RunOutcome, Stage,
};
use qrsheet_models::RunMode;
use qrsheet_render::{SheetGeometry, SheetRenderer};
use qrsheet_stages::{QrCodeStage, ShareLinkStage, UploadStage};
use qrsheet_store::CheckpointStore;

use crate::config::{Config, LinkMode, SourceKind};
use crate::drive::DriveFolderSource;
use crate::finalize::SheetFinalizer;
use crate::folder::LocalFolderSource;

/// Pick the item source for this run.
pub fn build_source(config: &Config) -> anyhow::Result<Box<dyn ItemSource>> {
    match config.source {
        SourceKind::Drive => {
            let folder_id = config
                .drive_folder_id
                .clone()
                .context("DRIVE_FOLDER_ID is required for the drive source")?;
            let token = config
                .drive_token
                .clone()
                .context("DRIVE_ACCESS_TOKEN is required for the drive source")?;
            Ok(Box::new(DriveFolderSource::new(folder_id, token)))
        }
        SourceKind::Folder => Ok(Box::new(LocalFolderSource::new(&config.video_dir))),
    }
}

/// Assemble the stage pipeline: link production, then the QR artifact.
pub fn build_stages(config: &Config) -> anyhow::Result<Vec<Box<dyn Stage>>> {
    let link: Box<dyn Stage> = match config.link_mode {
        LinkMode::Share => Box::new(ShareLinkStage),
        LinkMode::Upload => {
            let endpoint = config
                .upload_endpoint
                .as_deref()
                .context("UPLOAD_ENDPOINT is required for upload mode")?;
            let endpoint =
                Url::parse(endpoint).context("UPLOAD_ENDPOINT is not a valid URL")?;
            let token = config
                .upload_token
                .clone()
                .context("UPLOAD_TOKEN is required for upload mode")?;
            Box::new(UploadStage::new(endpoint, token, config.watch_base.clone()))
        }
    };
    Ok(vec![link, Box::new(QrCodeStage::new(&config.qr_dir))])
}

/// Execute one run with the console stop listener attached.
pub async fn run(mode: RunMode, config: Config) -> anyhow::Result<RunOutcome> {
    let store = CheckpointStore::new(&config.checkpoint_path);
    let source = build_source(&config)?;
    let stages = build_stages(&config)?;
    let finalizer = SheetFinalizer::new(
        &config.manifest_path,
        &config.sheet_path,
        SheetRenderer::new(SheetGeometry::default()),
    );

    let cancel = CancelFlag::new();
    let listener = spawn_stop_listener(cancel.clone());

    let runner = BatchRunner::new(store, source, stages, Box::new(finalizer), cancel);
    let outcome = runner.run(mode).await?;

    // The listener has nothing left to signal once the run is over.
    listener.abort();
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_wires_folder_and_share() {
        let config = Config::default();
        assert!(build_source(&config).is_ok());
        assert_eq!(build_stages(&config).unwrap().len(), 2);
    }

    #[test]
    fn test_drive_source_requires_credentials() {
        let config = Config {
            source: SourceKind::Drive,
            ..Config::default()
        };
        assert!(build_source(&config).is_err());

        let config = Config {
            source: SourceKind::Drive,
            drive_folder_id: Some("folder".into()),
            drive_token: Some("token".into()),
            ..Config::default()
        };
        assert!(build_source(&config).is_ok());
    }

    #[test]
    fn test_upload_mode_requires_endpoint_and_token() {
        let config = Config {
            link_mode: LinkMode::Upload,
            ..Config::default()
        };
        assert!(build_stages(&config).is_err());

        let config = Config {
            link_mode: LinkMode::Upload,
            upload_endpoint: Some("not a url".into()),
            upload_token: Some("token".into()),
            ..Config::default()
        };
        assert!(build_stages(&config).is_err());

        let config = Config {
            link_mode: LinkMode::Upload,
            upload_endpoint: Some("https://upload.example.com/videos".into()),
            upload_token: Some("token".into()),
            ..Config::default()
        };
        assert!(build_stages(&config).is_ok());
    }
}
