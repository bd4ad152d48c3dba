//! Local video folder source.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use qrsheet_engine::{ItemSource, SourceError};
use qrsheet_models::{title_from_file_name, Item};

/// Extensions treated as video files.
const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "mov", "mkv", "avi", "webm", "m4v"];

/// Enumerates the video files of a local directory, sorted by file name so
/// repeated runs see the same order.
#[derive(Debug)]
pub struct LocalFolderSource {
    dir: PathBuf,
}

impl LocalFolderSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

fn is_video(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[async_trait]
impl ItemSource for LocalFolderSource {
    fn name(&self) -> &'static str {
        "folder"
    }

    async fn enumerate(&self) -> Result<Vec<Item>, SourceError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|e| {
            SourceError::unavailable(format!("{}: {}", self.dir.display(), e))
        })?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| SourceError::unavailable(e.to_string()))?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_file && is_video(&name) {
                names.push(name);
            }
        }
        names.sort();

        debug!(dir = %self.dir.display(), videos = names.len(), "Scanned video folder");
        Ok(names
            .into_iter()
            .map(|name| {
                let path = self.dir.join(&name);
                Item::local(title_from_file_name(&name), path)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_video() {
        assert!(is_video("clip.mp4"));
        assert!(is_video("clip.MOV"));
        assert!(!is_video("notes.txt"));
        assert!(!is_video("noext"));
    }

    #[tokio::test]
    async fn test_enumerates_sorted_videos_only() {
        let dir = TempDir::new().unwrap();
        for name in ["b.mov", "a.mp4", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.mp4")).unwrap();

        let items = LocalFolderSource::new(dir.path()).enumerate().await.unwrap();

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(
            items[0].address.local_path(),
            Some(&dir.path().join("a.mp4"))
        );
    }

    #[tokio::test]
    async fn test_missing_directory_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let source = LocalFolderSource::new(dir.path().join("gone"));
        assert!(source.enumerate().await.is_err());
    }

    #[tokio::test]
    async fn test_empty_directory_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let items = LocalFolderSource::new(dir.path()).enumerate().await.unwrap();
        assert!(items.is_empty());
    }
}
