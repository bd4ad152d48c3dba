//! Run mode and status models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a run starts: from scratch or from a prior checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Clear prior checkpoint, artifacts and final outputs, then start over
    #[default]
    Fresh,
    /// Keep the existing checkpoint and process only unrecorded items
    Resume,
}

impl RunMode {
    pub fn is_resume(&self) -> bool {
        matches!(self, RunMode::Resume)
    }
}

/// Terminal status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// All items were visited; the finalizer ran and the checkpoint is gone
    Completed,
    /// A stop was requested; the checkpoint stays on disk for the next resume
    Cancelled,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Completed => "completed",
            RunStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_as_str() {
        assert_eq!(RunStatus::Completed.as_str(), "completed");
        assert_eq!(RunStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn test_run_mode_default_is_fresh() {
        assert_eq!(RunMode::default(), RunMode::Fresh);
        assert!(!RunMode::Fresh.is_resume());
        assert!(RunMode::Resume.is_resume());
    }
}
