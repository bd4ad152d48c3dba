//! Shared data models for the qrsheet batch pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Work items and their source addresses
//! - Records persisted to the checkpoint and final manifest
//! - Run modes and run status reporting

pub mod item;
pub mod record;
pub mod run;
pub mod utils;

// Re-export common types
pub use item::{Item, ItemAddress, ItemId};
pub use record::{Record, RecordError, FIELD_LINK, FIELD_QR_PATH, FIELD_TITLE};
pub use run::{RunMode, RunStatus};
pub use utils::{display_name, title_from_file_name};
