//! CLI configuration.
//!
//! Everything beyond the fresh/resume mode argument comes from the
//! environment; `.env` files are honored by the binary.

use std::path::PathBuf;

/// Which collaborator enumerates the work set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// List a Google Drive folder
    Drive,
    /// Scan a local video folder
    #[default]
    Folder,
}

impl SourceKind {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "drive" => Some(SourceKind::Drive),
            "folder" => Some(SourceKind::Folder),
            _ => None,
        }
    }
}

/// How the per-video link is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkMode {
    /// Derive the share URL from the remote file id
    #[default]
    Share,
    /// Upload the local file and use the returned watch URL
    Upload,
}

impl LinkMode {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "share" => Some(LinkMode::Share),
            "upload" => Some(LinkMode::Upload),
            _ => None,
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Checkpoint file rewritten after every completed video
    pub checkpoint_path: PathBuf,
    /// Final manifest written once on success
    pub manifest_path: PathBuf,
    /// Final PDF sheet
    pub sheet_path: PathBuf,
    /// Directory for QR PNG artifacts
    pub qr_dir: PathBuf,
    /// Work set enumeration
    pub source: SourceKind,
    /// Local folder scanned when `source` is `Folder`
    pub video_dir: PathBuf,
    /// Drive folder listed when `source` is `Drive`
    pub drive_folder_id: Option<String>,
    /// Bearer token for the Drive listing
    pub drive_token: Option<String>,
    /// Link production mode
    pub link_mode: LinkMode,
    /// Upload endpoint, required for `LinkMode::Upload`
    pub upload_endpoint: Option<String>,
    /// Bearer token for uploads
    pub upload_token: Option<String>,
    /// Base the uploaded video id is appended to
    pub watch_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            checkpoint_path: PathBuf::from("qrsheet_progress.csv"),
            manifest_path: PathBuf::from("video_links.csv"),
            sheet_path: PathBuf::from("qr_code_sheet.pdf"),
            qr_dir: PathBuf::from("qr_codes"),
            source: SourceKind::default(),
            video_dir: PathBuf::from("videos"),
            drive_folder_id: None,
            drive_token: None,
            link_mode: LinkMode::default(),
            upload_endpoint: None,
            upload_token: None,
            watch_base: "https://www.youtube.com/watch?v=".to_string(),
        }
    }
}

impl Config {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Self {
            checkpoint_path: std::env::var("QRSHEET_CHECKPOINT")
                .map(PathBuf::from)
                .unwrap_or(defaults.checkpoint_path),
            manifest_path: std::env::var("QRSHEET_MANIFEST")
                .map(PathBuf::from)
                .unwrap_or(defaults.manifest_path),
            sheet_path: std::env::var("QRSHEET_SHEET")
                .map(PathBuf::from)
                .unwrap_or(defaults.sheet_path),
            qr_dir: std::env::var("QRSHEET_QR_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.qr_dir),
            source: std::env::var("QRSHEET_SOURCE")
                .ok()
                .and_then(|s| SourceKind::parse(&s))
                .unwrap_or_default(),
            video_dir: std::env::var("QRSHEET_VIDEO_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.video_dir),
            drive_folder_id: std::env::var("DRIVE_FOLDER_ID").ok(),
            drive_token: std::env::var("DRIVE_ACCESS_TOKEN").ok(),
            link_mode: std::env::var("QRSHEET_LINK")
                .ok()
                .and_then(|s| LinkMode::parse(&s))
                .unwrap_or_default(),
            upload_endpoint: std::env::var("UPLOAD_ENDPOINT").ok(),
            upload_token: std::env::var("UPLOAD_TOKEN").ok(),
            watch_base: std::env::var("UPLOAD_WATCH_BASE").unwrap_or(defaults.watch_base),
        }
    }
}
