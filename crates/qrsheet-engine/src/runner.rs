//! Batch runner.
//!
//! Orchestrates one run: load checkpoint, enumerate the source, walk the
//! remaining items through the stage pipeline, checkpoint after every
//! completed item, stop early on cancellation, finalize on full completion.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use qrsheet_models::{Item, Record, RunMode, RunStatus};
use qrsheet_store::CheckpointStore;

use crate::cancel::CancelFlag;
use crate::error::EngineResult;
use crate::finalize::Finalizer;
use crate::source::ItemSource;
use crate::stage::{run_pipeline, Stage};

/// Outcome report of a finished (not aborted) run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Terminal status
    pub status: RunStatus,
    /// Items the source enumerated
    pub total: usize,
    /// Items newly processed this run
    pub processed: usize,
    /// Items skipped this run because a stage failed
    pub skipped: usize,
    /// The source returned zero items ("nothing to do")
    pub source_empty: bool,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
    /// The full record set as of the end of the run
    pub records: Vec<Record>,
}

impl RunOutcome {
    fn new(status: RunStatus, total: usize, records: Vec<Record>) -> Self {
        Self {
            status,
            total,
            processed: 0,
            skipped: 0,
            source_empty: false,
            finished_at: Utc::now(),
            records,
        }
    }
}

/// The checkpointed batch-processing engine.
pub struct BatchRunner {
    store: CheckpointStore,
    source: Box<dyn ItemSource>,
    stages: Vec<Box<dyn Stage>>,
    finalizer: Box<dyn Finalizer>,
    cancel: CancelFlag,
}

impl BatchRunner {
    /// Create a new runner over the given collaborators.
    pub fn new(
        store: CheckpointStore,
        source: Box<dyn ItemSource>,
        stages: Vec<Box<dyn Stage>>,
        finalizer: Box<dyn Finalizer>,
        cancel: CancelFlag,
    ) -> Self {
        Self {
            store,
            source,
            stages,
            finalizer,
            cancel,
        }
    }

    /// Execute one run to its terminal status.
    ///
    /// Returns Err only for run-aborting failures: an unavailable source, a
    /// corrupt checkpoint, a failed checkpoint write, or a failed reset or
    /// finalization. Per-item stage failures are logged, counted and skipped.
    pub async fn run(&self, mode: RunMode) -> EngineResult<RunOutcome> {
        let run_id = Uuid::new_v4();
        info!(run_id = %run_id, source = self.source.name(), ?mode, "Starting batch run");

        if !mode.is_resume() {
            self.reset_collaborators().await?;
        }

        let mut records = self.store.load()?;
        let items = self.source.enumerate().await?;
        if items.is_empty() {
            info!("Source has no videos; nothing to do");
            let mut outcome = RunOutcome::new(RunStatus::Completed, 0, records);
            outcome.source_empty = true;
            return Ok(outcome);
        }

        let total = items.len();
        let done: HashSet<&str> = records.iter().map(|r| r.title()).collect();
        let remaining: Vec<&Item> = items
            .iter()
            .filter(|item| !done.contains(item.id.as_str()))
            .collect();
        drop(done);

        info!(
            total,
            recorded = records.len(),
            remaining = remaining.len(),
            "Enumerated videos"
        );
        if remaining.is_empty() {
            info!("Every video is already recorded; finishing up");
        } else {
            info!("Type 'stop' at any time to finish the current video and exit");
        }

        let mut processed = 0usize;
        let mut skipped = 0usize;

        for item in remaining {
            if self.cancel.is_cancelled() {
                info!(
                    recorded = records.len(),
                    total,
                    "Stop requested; checkpoint kept for the next resume"
                );
                let mut outcome = RunOutcome::new(RunStatus::Cancelled, total, records);
                outcome.processed = processed;
                outcome.skipped = skipped;
                return Ok(outcome);
            }

            match run_pipeline(&self.stages, item).await {
                Ok(record) => {
                    records.push(record);
                    // Synchronous durability barrier: the next item does not
                    // start until this one is on disk.
                    self.store.save(&records)?;
                    processed += 1;
                    info!(
                        video = %item.id,
                        "Processed video {}/{}",
                        records.len(),
                        total
                    );
                }
                Err(e) => {
                    error!(video = %item.id, stage = e.stage, "Skipping video: {}", e);
                    skipped += 1;
                }
            }
        }

        if let Err(e) = self.finalizer.finalize(&records).await {
            error!("Finalization failed, checkpoint kept: {}", e);
            return Err(e);
        }
        self.store.delete()?;

        if skipped > 0 {
            warn!(skipped, "Run completed with skipped videos");
        }
        info!(
            status = %RunStatus::Completed,
            recorded = records.len(),
            total,
            "Batch run finished"
        );

        let mut outcome = RunOutcome::new(RunStatus::Completed, total, records);
        outcome.processed = processed;
        outcome.skipped = skipped;
        Ok(outcome)
    }

    /// Full reset before a fresh run: checkpoint, stage artifacts, final
    /// outputs.
    async fn reset_collaborators(&self) -> EngineResult<()> {
        info!("Starting fresh; clearing prior checkpoint and outputs");
        self.store.delete()?;
        for stage in &self.stages {
            stage.reset().await?;
        }
        self.finalizer.reset().await
    }
}
