//! Record store backed by a pretty-printed JSON file.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use glee_model::ValidatedRow;

use super::{RecordStore, StoreError, StoredRecord, check_unique, matching_keys};

/// Records kept in a JSON array on disk, unique on one key field.
///
/// The file is rewritten after every successful insert, so rows already
/// written survive an interrupted import.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    key_field: String,
    records: Vec<StoredRecord>,
}

impl JsonFileStore {
    /// Opens the store at `path`; a missing file is an empty store.
    pub fn open(
        path: impl Into<PathBuf>,
        key_field: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        let records = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                operation: "read",
                path: path.clone(),
                source,
            })?;
            if contents.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&contents).map_err(|source| StoreError::Format {
                    path: path.clone(),
                    source,
                })?
            }
        } else {
            Vec::new()
        };
        tracing::debug!(path = %path.display(), records = records.len(), "opened store");
        Ok(Self {
            path,
            key_field: key_field.into(),
            records,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes every record through a temp file and rename.
    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.records).map_err(|source| {
            StoreError::Format {
                path: self.path.clone(),
                source,
            }
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|source| StoreError::Io {
            operation: "create",
            path: temp_path.clone(),
            source,
        })?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|source| StoreError::Io {
                operation: "write",
                path: temp_path.clone(),
                source,
            })?;
        fs::rename(&temp_path, &self.path).map_err(|source| StoreError::Io {
            operation: "replace",
            path: self.path.clone(),
            source,
        })
    }
}

impl RecordStore for JsonFileStore {
    fn existing_keys(
        &self,
        field: &str,
        candidates: &BTreeSet<String>,
    ) -> Result<BTreeSet<String>, StoreError> {
        Ok(matching_keys(&self.records, field, candidates))
    }

    fn insert(&mut self, row: &ValidatedRow) -> Result<(), StoreError> {
        check_unique(&self.records, &self.key_field, row)?;
        self.records.push(StoredRecord::from_row(row));
        if let Err(err) = self.persist() {
            self.records.pop();
            return Err(err);
        }
        Ok(())
    }
}
