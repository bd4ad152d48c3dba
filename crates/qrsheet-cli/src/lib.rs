//! Batch QR sheet generator.
//!
//! Wires the engine to its concrete collaborators: a Drive or local-folder
//! item source, the link and QR stages, and the manifest + PDF finalizer.

pub mod app;
pub mod config;
pub mod drive;
pub mod finalize;
pub mod folder;

pub use app::run;
pub use config::{Config, LinkMode, SourceKind};
