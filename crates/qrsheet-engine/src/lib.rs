//! Resumable, cooperatively-cancellable batch pipeline engine.
//!
//! The engine enumerates work items from an [`ItemSource`], runs each through
//! an ordered [`Stage`] pipeline, persists a checkpoint after every completed
//! item, honors a console-driven [`CancelFlag`] between items, and hands the
//! complete record set to a [`Finalizer`] exactly once on full, uncancelled
//! completion.

pub mod cancel;
pub mod error;
pub mod finalize;
pub mod runner;
pub mod source;
pub mod stage;

pub use cancel::{spawn_stop_listener, CancelFlag, STOP_COMMAND};
pub use error::{EngineError, EngineResult, SourceError, StageError};
pub use finalize::Finalizer;
pub use runner::{BatchRunner, RunOutcome};
pub use source::ItemSource;
pub use stage::{run_pipeline, FieldUpdates, Stage};
