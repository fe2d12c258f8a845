//! Record stores the executor writes to.

mod error;
mod json;
mod memory;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use glee_model::{FieldValue, ValidatedRow};
use serde::{Deserialize, Serialize};

pub use error::StoreError;
pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Backend collaborator of an import.
///
/// The workflow needs exactly two things from it: one batch lookup of the
/// natural keys that already exist, and single-row inserts that fail with a
/// structured error.
pub trait RecordStore {
    /// Subset of `candidates` already present under `field`.
    fn existing_keys(
        &self,
        field: &str,
        candidates: &BTreeSet<String>,
    ) -> Result<BTreeSet<String>, StoreError>;

    fn insert(&mut self, row: &ValidatedRow) -> Result<(), StoreError>;
}

/// One persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub imported_at: DateTime<Utc>,
    pub values: BTreeMap<String, FieldValue>,
}

impl StoredRecord {
    pub fn from_row(row: &ValidatedRow) -> Self {
        Self {
            imported_at: Utc::now(),
            values: row.values.clone(),
        }
    }

    /// Normalized key of this record under `field`.
    pub fn key(&self, field: &str) -> Option<String> {
        normalize_key(self.values.get(field)?)
    }

    /// Cell text for `field`; empty when the record has no value.
    pub fn cell(&self, field: &str) -> String {
        self.values
            .get(field)
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

fn normalize_key(value: &FieldValue) -> Option<String> {
    let key = value.to_string().trim().to_lowercase();
    (!key.is_empty()).then_some(key)
}

fn row_key(row: &ValidatedRow, field: &str) -> Option<String> {
    normalize_key(row.get(field)?)
}

fn matching_keys(
    records: &[StoredRecord],
    field: &str,
    candidates: &BTreeSet<String>,
) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(|record| record.key(field))
        .filter(|key| candidates.contains(key))
        .collect()
}

/// Rejects `row` when a record with the same key is already stored.
fn check_unique(
    records: &[StoredRecord],
    key_field: &str,
    row: &ValidatedRow,
) -> Result<(), StoreError> {
    let Some(key) = row_key(row, key_field) else {
        return Ok(());
    };
    if records
        .iter()
        .any(|record| record.key(key_field).as_deref() == Some(key.as_str()))
    {
        return Err(StoreError::Constraint {
            message: format!("duplicate key value violates unique constraint on {key_field}"),
        });
    }
    Ok(())
}
