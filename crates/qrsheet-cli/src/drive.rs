//! Google Drive folder listing source.
//!
//! Lists the video files of one Drive folder over the REST API with a
//! bearer token supplied by the operator. Obtaining the token (consent
//! flows, refresh) is out of scope.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use qrsheet_engine::{ItemSource, SourceError};
use qrsheet_models::{title_from_file_name, Item};

const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
    name: String,
}

/// Enumerates the videos of a Drive folder as `(title, file id)` items.
#[derive(Debug)]
pub struct DriveFolderSource {
    client: reqwest::Client,
    folder_id: String,
    token: String,
}

impl DriveFolderSource {
    pub fn new(folder_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            folder_id: folder_id.into(),
            token: token.into(),
        }
    }
}

fn items_from_files(files: Vec<DriveFile>) -> Vec<Item> {
    files
        .into_iter()
        .map(|file| Item::remote(title_from_file_name(&file.name), file.id))
        .collect()
}

#[async_trait]
impl ItemSource for DriveFolderSource {
    fn name(&self) -> &'static str {
        "drive"
    }

    async fn enumerate(&self) -> Result<Vec<Item>, SourceError> {
        let query = format!(
            "'{}' in parents and mimeType contains 'video/'",
            self.folder_id
        );
        debug!(folder = %self.folder_id, "Listing Drive folder");

        let response = self
            .client
            .get(DRIVE_FILES_URL)
            .query(&[("q", query.as_str()), ("fields", "files(id, name)")])
            .bearer_auth(&self.token)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SourceError::unavailable(e.to_string()))?;

        let list: FileList = response
            .json()
            .await
            .map_err(|e| SourceError::unavailable(e.to_string()))?;

        Ok(items_from_files(list.files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_list_parses() {
        let json = r#"{"files":[{"id":"1AbC","name":"anna03.mp4"},{"id":"2DeF","name":"ben.mov"}]}"#;
        let list: FileList = serde_json::from_str(json).unwrap();
        assert_eq!(list.files.len(), 2);
        assert_eq!(list.files[0].id, "1AbC");
    }

    #[test]
    fn test_empty_listing_parses() {
        let list: FileList = serde_json::from_str("{}").unwrap();
        assert!(list.files.is_empty());
    }

    #[test]
    fn test_items_drop_extension_and_keep_file_id() {
        let items = items_from_files(vec![DriveFile {
            id: "1AbC".into(),
            name: "anna03.mp4".into(),
        }]);
        assert_eq!(items[0].id.as_str(), "anna03");
        assert_eq!(items[0].address.file_id(), Some("1AbC"));
    }

    #[tokio::test]
    #[ignore = "requires Drive credentials"]
    async fn test_enumerate_live_folder() {
        dotenvy::dotenv().ok();
        let source = DriveFolderSource::new(
            std::env::var("DRIVE_FOLDER_ID").expect("DRIVE_FOLDER_ID"),
            std::env::var("DRIVE_ACCESS_TOKEN").expect("DRIVE_ACCESS_TOKEN"),
        );
        let items = source.enumerate().await.expect("listing failed");
        println!("{} videos", items.len());
    }
}
