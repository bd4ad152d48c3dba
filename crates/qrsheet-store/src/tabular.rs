//! Tabular codec shared by the checkpoint and the final manifest.
//!
//! Records are stored as CSV: one header row naming the fields, one row per
//! record. Field order follows the first record so a `save` → `load` cycle
//! round-trips with no loss.

use std::collections::HashSet;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use qrsheet_models::{Record, FIELD_TITLE};

use crate::error::{StoreError, StoreResult};

/// Read all records from a tabular file.
///
/// A missing file is the normal "no prior progress" case and yields an empty
/// vec. Anything unparseable, a row without the identity field, or a
/// duplicated identity is reported as `CorruptCheckpoint`.
pub(crate) fn read_records(path: &Path) -> StoreResult<Vec<Record>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::Io(e)),
    };

    let display = path.display().to_string();
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| StoreError::corrupt(&display, e.to_string()))?
        .clone();

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for row in reader.records() {
        let row = row.map_err(|e| StoreError::corrupt(&display, e.to_string()))?;
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        let record = Record::from_fields(fields)
            .map_err(|e| StoreError::corrupt(&display, e.to_string()))?;

        if !seen.insert(record.title().to_string()) {
            return Err(StoreError::corrupt(
                &display,
                format!("duplicate identity '{}'", record.title()),
            ));
        }
        records.push(record);
    }

    Ok(records)
}

/// Atomically replace the file at `path` with the given records.
///
/// The rows are written to a sibling temp file which is then renamed over the
/// destination, so an interrupted write never leaves a half-written file
/// behind. The header is taken from the first record; with no records a
/// header-only file is written.
pub(crate) fn write_records_atomic(path: &Path, records: &[Record]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::write_failed(e.to_string()))?;
        }
    }

    let tmp = path.with_extension("tmp");

    let file = File::create(&tmp).map_err(|e| StoreError::write_failed(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(file);

    let header: Vec<&str> = match records.first() {
        Some(first) => first.field_names().collect(),
        None => vec![FIELD_TITLE],
    };
    writer
        .write_record(&header)
        .map_err(|e| StoreError::write_failed(e.to_string()))?;

    for record in records {
        let row: Vec<&str> = header
            .iter()
            .map(|name| record.get(name).unwrap_or_default())
            .collect();
        writer
            .write_record(&row)
            .map_err(|e| StoreError::write_failed(e.to_string()))?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| StoreError::write_failed(e.to_string()))?;
    file.sync_all()
        .map_err(|e| StoreError::write_failed(e.to_string()))?;

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        StoreError::write_failed(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrsheet_models::{ItemId, FIELD_LINK};
    use tempfile::TempDir;

    fn record(title: &str, link: &str) -> Record {
        let mut r = Record::new(&ItemId::from(title));
        r.set(FIELD_LINK, link);
        r
    }

    #[test]
    fn test_roundtrip_preserves_order_and_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.csv");

        let records = vec![
            record("anna03", "https://example.com/a"),
            record("ben", "https://example.com/b"),
        ];
        write_records_atomic(&path, &records).unwrap();

        let loaded = read_records(&path).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let loaded = read_records(&dir.path().join("nope.csv")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_empty_save_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.csv");
        write_records_atomic(&path, &[]).unwrap();
        assert!(path.exists());
        assert!(read_records(&path).unwrap().is_empty());
    }

    #[test]
    fn test_row_without_identity_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.csv");
        std::fs::write(&path, "link\nhttps://example.com/a\n").unwrap();

        let err = read_records(&path).unwrap_err();
        assert!(matches!(err, StoreError::CorruptCheckpoint { .. }));
    }

    #[test]
    fn test_ragged_row_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.csv");
        std::fs::write(&path, "title,link\nanna,https://a,extra\n").unwrap();

        let err = read_records(&path).unwrap_err();
        assert!(matches!(err, StoreError::CorruptCheckpoint { .. }));
    }

    #[test]
    fn test_duplicate_identity_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.csv");
        std::fs::write(&path, "title,link\nanna,a\nanna,b\n").unwrap();

        let err = read_records(&path).unwrap_err();
        assert!(matches!(err, StoreError::CorruptCheckpoint { .. }));
    }

    #[test]
    fn test_stale_tmp_file_does_not_affect_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.csv");

        // Simulate a crash that left garbage in the temp location.
        std::fs::write(path.with_extension("tmp"), b"\x00garbage").unwrap();

        let records = vec![record("anna", "https://example.com/a")];
        write_records_atomic(&path, &records).unwrap();
        assert_eq!(read_records(&path).unwrap(), records);
    }

    #[test]
    fn test_replace_drops_no_prior_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("progress.csv");

        let mut records = vec![record("anna", "a")];
        write_records_atomic(&path, &records).unwrap();

        records.push(record("ben", "b"));
        write_records_atomic(&path, &records).unwrap();

        assert_eq!(read_records(&path).unwrap().len(), 2);
    }
}
