//! In-memory store.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};

use glee_model::ValidatedRow;

use super::{RecordStore, StoreError, StoredRecord, check_unique, matching_keys, row_key};

/// Records held in memory, unique on one key field.
///
/// Failures can be scripted per key so executor behaviour can be exercised
/// without a real backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    key_field: String,
    records: Vec<StoredRecord>,
    failures: BTreeMap<String, String>,
    lookups: Cell<usize>,
    attempts: usize,
}

impl MemoryStore {
    pub fn new(key_field: impl Into<String>) -> Self {
        Self {
            key_field: key_field.into(),
            ..Self::default()
        }
    }

    /// Seeds an existing record.
    #[must_use]
    pub fn with_record(mut self, row: &ValidatedRow) -> Self {
        self.records.push(StoredRecord::from_row(row));
        self
    }

    /// Makes every insert of a row keyed `key` fail with `message`.
    #[must_use]
    pub fn failing_on(mut self, key: &str, message: impl Into<String>) -> Self {
        self.failures
            .insert(key.trim().to_lowercase(), message.into());
        self
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

    /// Number of `existing_keys` calls served.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    /// Number of `insert` calls received, failed ones included.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl RecordStore for MemoryStore {
    fn existing_keys(
        &self,
        field: &str,
        candidates: &BTreeSet<String>,
    ) -> Result<BTreeSet<String>, StoreError> {
        self.lookups.set(self.lookups.get() + 1);
        Ok(matching_keys(&self.records, field, candidates))
    }

    fn insert(&mut self, row: &ValidatedRow) -> Result<(), StoreError> {
        self.attempts += 1;
        let scripted = row_key(row, &self.key_field).and_then(|key| self.failures.get(&key));
        if let Some(message) = scripted {
            return Err(StoreError::backend(message.clone()));
        }
        check_unique(&self.records, &self.key_field, row)?;
        self.records.push(StoredRecord::from_row(row));
        Ok(())
    }
}
