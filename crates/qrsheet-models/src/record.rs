//! Persisted record models.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::ItemId;

/// Field name carrying the item identity. Present on every record.
pub const FIELD_TITLE: &str = "title";

/// Field name carrying the video link produced by a link or upload stage.
pub const FIELD_LINK: &str = "link";

/// Field name carrying the QR code artifact path.
pub const FIELD_QR_PATH: &str = "qr_path";

/// Errors that can occur when constructing records from raw fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record is missing the '{FIELD_TITLE}' field")]
    MissingTitle,

    #[error("record has an empty '{FIELD_TITLE}' field")]
    EmptyTitle,
}

/// The persisted outcome of running one item through the full stage pipeline.
///
/// An ordered mapping from field name to string value. The `title` field is
/// always the item identity; every other field is a stage output. Field order
/// is preserved so the checkpoint round-trips byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create a record for an item, containing only the identity field.
    pub fn new(id: &ItemId) -> Self {
        Self {
            fields: vec![(FIELD_TITLE.to_string(), id.as_str().to_string())],
        }
    }

    /// Build a record from raw fields, validating the identity invariant.
    pub fn from_fields(fields: Vec<(String, String)>) -> Result<Self, RecordError> {
        let title = fields
            .iter()
            .find(|(name, _)| name == FIELD_TITLE)
            .ok_or(RecordError::MissingTitle)?;
        if title.1.trim().is_empty() {
            return Err(RecordError::EmptyTitle);
        }
        Ok(Self { fields })
    }

    /// The item identity this record belongs to.
    pub fn title(&self) -> &str {
        // Guaranteed by construction
        self.get(FIELD_TITLE).unwrap_or_default()
    }

    /// Look up a field value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a field, replacing an existing value or appending a new field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Apply a batch of stage outputs in order.
    pub fn extend(&mut self, updates: Vec<(String, String)>) {
        for (name, value) in updates {
            self.set(name, value);
        }
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// All fields in insertion order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}
