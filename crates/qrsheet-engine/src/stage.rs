//! Stage pipeline seam.

use async_trait::async_trait;

use qrsheet_models::{Item, Record};

use crate::error::{EngineResult, StageError};

/// Field updates produced by one stage for one item.
pub type FieldUpdates = Vec<(String, String)>;

/// One transformation step applied to an item.
///
/// Stages run in fixed declared order. Each receives the item plus the
/// outputs accumulated from earlier stages, and returns the fields it adds.
/// A failure skips the item for this run without aborting the batch.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Name of this stage for logging and error reporting.
    fn name(&self) -> &'static str;

    /// Run this stage for one item.
    async fn run(&self, item: &Item, outputs: &Record) -> Result<FieldUpdates, StageError>;

    /// Clear prior artifacts of this stage. Called once before a fresh
    /// (non-resume) run.
    async fn reset(&self) -> EngineResult<()> {
        Ok(())
    }
}

/// Run every stage in declared order, folding field updates into a record.
///
/// The record starts with only the item identity; the first stage error
/// aborts the pipeline for this item and is returned to the caller.
pub async fn run_pipeline(stages: &[Box<dyn Stage>], item: &Item) -> Result<Record, StageError> {
    let mut record = Record::new(&item.id);
    for stage in stages {
        let updates = stage.run(item, &record).await?;
        record.extend(updates);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrsheet_models::{FIELD_LINK, FIELD_QR_PATH};

    struct LinkStage;

    #[async_trait]
    impl Stage for LinkStage {
        fn name(&self) -> &'static str {
            "link"
        }

        async fn run(&self, item: &Item, _outputs: &Record) -> Result<FieldUpdates, StageError> {
            Ok(vec![(
                FIELD_LINK.to_string(),
                format!("https://example.com/{}", item.id),
            )])
        }
    }

    struct NeedsLinkStage;

    #[async_trait]
    impl Stage for NeedsLinkStage {
        fn name(&self) -> &'static str {
            "needs_link"
        }

        async fn run(&self, item: &Item, outputs: &Record) -> Result<FieldUpdates, StageError> {
            let link = outputs
                .get(FIELD_LINK)
                .ok_or_else(|| StageError::new(self.name(), &item.id, "no link yet"))?;
            Ok(vec![(FIELD_QR_PATH.to_string(), format!("{link}.png"))])
        }
    }

    #[tokio::test]
    async fn test_pipeline_threads_outputs_in_order() {
        let stages: Vec<Box<dyn Stage>> = vec![Box::new(LinkStage), Box::new(NeedsLinkStage)];
        let item = Item::remote("anna", "f1");

        let record = run_pipeline(&stages, &item).await.unwrap();
        assert_eq!(record.title(), "anna");
        assert_eq!(record.get(FIELD_LINK), Some("https://example.com/anna"));
        assert_eq!(
            record.get(FIELD_QR_PATH),
            Some("https://example.com/anna.png")
        );
    }

    #[tokio::test]
    async fn test_pipeline_stops_at_first_failing_stage() {
        // Declared out of order: the dependent stage runs first and fails.
        let stages: Vec<Box<dyn Stage>> = vec![Box::new(NeedsLinkStage), Box::new(LinkStage)];
        let item = Item::remote("anna", "f1");

        let err = run_pipeline(&stages, &item).await.unwrap_err();
        assert_eq!(err.stage, "needs_link");
        assert_eq!(err.item.as_str(), "anna");
    }
}
