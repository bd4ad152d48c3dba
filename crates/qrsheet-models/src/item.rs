//! Work item models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Stable identity of a work item, unique within a run.
///
/// The identity is the video title without its file extension. It is carried
/// explicitly on every item and record; it is never re-derived by parsing
/// other fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Source-specific addressing data for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemAddress {
    /// A file in a remote folder (e.g. Google Drive), addressed by file id.
    RemoteFile { file_id: String },
    /// A video file on the local filesystem.
    LocalFile { path: PathBuf },
}

impl ItemAddress {
    /// Remote file id, if this address is remote.
    pub fn file_id(&self) -> Option<&str> {
        match self {
            ItemAddress::RemoteFile { file_id } => Some(file_id),
            ItemAddress::LocalFile { .. } => None,
        }
    }

    /// Local path, if this address is local.
    pub fn local_path(&self) -> Option<&PathBuf> {
        match self {
            ItemAddress::LocalFile { path } => Some(path),
            ItemAddress::RemoteFile { .. } => None,
        }
    }
}

/// One unit of work: a video with a stable identity and an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identity, the checkpoint de-duplication key
    pub id: ItemId,

    /// Where the video lives
    pub address: ItemAddress,
}

impl Item {
    /// Create a new item.
    pub fn new(id: impl Into<ItemId>, address: ItemAddress) -> Self {
        Self {
            id: id.into(),
            address,
        }
    }

    /// Create an item addressed by a remote file id.
    pub fn remote(id: impl Into<ItemId>, file_id: impl Into<String>) -> Self {
        Self::new(
            id,
            ItemAddress::RemoteFile {
                file_id: file_id.into(),
            },
        )
    }

    /// Create an item addressed by a local path.
    pub fn local(id: impl Into<ItemId>, path: impl Into<PathBuf>) -> Self {
        Self::new(id, ItemAddress::LocalFile { path: path.into() })
    }
}
