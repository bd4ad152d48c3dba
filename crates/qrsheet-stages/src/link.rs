//! Share-link stage.

use async_trait::async_trait;

use qrsheet_engine::{FieldUpdates, Stage, StageError};
use qrsheet_models::{Item, Record, FIELD_LINK};

/// Build the public view URL for a Drive file id.
pub fn share_link(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/view", file_id)
}

/// Derives the shareable view link from an item's remote file id.
///
/// Purely computational; the only way it fails is an item that carries no
/// remote id (e.g. one enumerated from a local folder).
#[derive(Debug, Default)]
pub struct ShareLinkStage;

#[async_trait]
impl Stage for ShareLinkStage {
    fn name(&self) -> &'static str {
        "share_link"
    }

    async fn run(&self, item: &Item, _outputs: &Record) -> Result<FieldUpdates, StageError> {
        let file_id = item.address.file_id().ok_or_else(|| {
            StageError::new(self.name(), &item.id, "item has no remote file id")
        })?;
        Ok(vec![(FIELD_LINK.to_string(), share_link(file_id))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_link_format() {
        assert_eq!(
            share_link("1AbC-9"),
            "https://drive.google.com/file/d/1AbC-9/view"
        );
    }

    #[tokio::test]
    async fn test_emits_link_for_remote_item() {
        let item = Item::remote("anna", "1AbC-9");
        let record = Record::new(&item.id);

        let updates = ShareLinkStage.run(&item, &record).await.unwrap();
        assert_eq!(
            updates,
            vec![(
                FIELD_LINK.to_string(),
                "https://drive.google.com/file/d/1AbC-9/view".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_fails_for_local_item() {
        let item = Item::local("anna", "/videos/anna.mp4");
        let record = Record::new(&item.id);

        let err = ShareLinkStage.run(&item, &record).await.unwrap_err();
        assert_eq!(err.stage, "share_link");
        assert_eq!(err.item.as_str(), "anna");
    }
}
