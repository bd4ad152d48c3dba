//! Video upload stage.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::info;
use url::Url;

use qrsheet_engine::{FieldUpdates, Stage, StageError};
use qrsheet_models::{Item, Record, FIELD_LINK};

/// Response body of the upload endpoint.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    /// Id of the uploaded video, appended to the watch base URL
    id: String,
}

/// Uploads the item's local video file and emits the resulting watch link.
///
/// Sends the file as a multipart POST with a bearer token. The endpoint is
/// expected to answer with a JSON body carrying the uploaded video id.
/// Acquiring the token is the operator's concern; consent flows are out of
/// scope here.
#[derive(Debug)]
pub struct UploadStage {
    client: reqwest::Client,
    endpoint: Url,
    token: String,
    watch_base: String,
}

impl UploadStage {
    pub fn new(endpoint: Url, token: impl Into<String>, watch_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            token: token.into(),
            watch_base: watch_base.into(),
        }
    }

    /// Watch URL for an uploaded video id.
    fn watch_url(&self, id: &str) -> String {
        format!("{}{}", self.watch_base, id)
    }
}

#[async_trait]
impl Stage for UploadStage {
    fn name(&self) -> &'static str {
        "upload"
    }

    async fn run(&self, item: &Item, _outputs: &Record) -> Result<FieldUpdates, StageError> {
        let path = item.address.local_path().ok_or_else(|| {
            StageError::new(self.name(), &item.id, "item has no local video file")
        })?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| StageError::new(self.name(), &item.id, e.to_string()))?;
        let part = Part::bytes(bytes).file_name(item.id.to_string());
        let form = Form::new().part("video", part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| StageError::new(self.name(), &item.id, e.to_string()))?;

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| StageError::new(self.name(), &item.id, e.to_string()))?;

        let link = self.watch_url(&body.id);
        info!(video = %item.id, link = %link, "Uploaded video");
        Ok(vec![(FIELD_LINK.to_string(), link)])
    }
}
