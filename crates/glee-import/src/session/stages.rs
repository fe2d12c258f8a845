//! Stage snapshots of an import session.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glee_ingest::{ParsedCsv, read_csv_file};
use glee_map::{FieldMapper, SavedMapping};
use glee_model::{
    FieldDescriptor, ImportProfile, ImportSummary, RawRow, VALIDATION_PREVIEW_LIMIT, ValidatedRow,
};
use glee_validate::{RowValidator, ValidationOutcome};

use super::{InvalidRowPolicy, SessionError, SessionStage};
use crate::executor::execute_import;
use crate::key::NaturalKey;
use crate::reconcile::{Reconciliation, candidate_keys, partition_duplicates};
use crate::store::RecordStore;

type Result<T> = std::result::Result<T, SessionError>;

/// No file chosen yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Idle;

impl Idle {
    pub fn new() -> Self {
        Self
    }

    pub fn stage(&self) -> SessionStage {
        SessionStage::Idle
    }

    pub fn select_file(&self, path: impl Into<PathBuf>) -> FileSelected {
        FileSelected::new(path.into())
    }
}

/// A file has been chosen but not read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelected {
    path: PathBuf,
}

impl FileSelected {
    fn new(path: PathBuf) -> Self {
        tracing::info!(path = %path.display(), "file selected");
        Self { path }
    }

    pub fn stage(&self) -> SessionStage {
        SessionStage::FileSelected
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn select_file(&self, path: impl Into<PathBuf>) -> FileSelected {
        FileSelected::new(path.into())
    }

    /// Reads the file and auto-maps its headers onto `profile`.
    pub fn parse(&self, profile: &ImportProfile) -> Result<Parsed> {
        let csv = read_csv_file(&self.path)?;
        Parsed::new(self.path.clone(), profile, csv)
    }
}

/// File parsed; bindings suggested and open for edits.
#[derive(Debug, Clone)]
pub struct Parsed {
    source: PathBuf,
    profile: ImportProfile,
    csv: ParsedCsv,
    mapper: FieldMapper,
}

impl Parsed {
    /// Starts a session from already-parsed CSV content.
    pub fn new(
        source: impl Into<PathBuf>,
        profile: &ImportProfile,
        csv: ParsedCsv,
    ) -> Result<Self> {
        profile.validate()?;
        let mut mapper = FieldMapper::new(profile.unbound_fields());
        mapper.auto_map(&csv.headers.columns);
        let source = source.into();
        tracing::info!(
            path = %source.display(),
            profile = %profile.name,
            rows = csv.row_count(),
            columns = csv.headers.len(),
            "file parsed"
        );
        Ok(Self {
            source,
            profile: profile.clone(),
            csv,
            mapper,
        })
    }

    pub fn stage(&self) -> SessionStage {
        SessionStage::Parsed
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn profile(&self) -> &ImportProfile {
        &self.profile
    }

    pub fn headers(&self) -> &[String] {
        &self.csv.headers.columns
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.csv.rows
    }

    pub fn mapper(&self) -> &FieldMapper {
        &self.mapper
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        self.mapper.fields()
    }

    /// Snapshot with one binding overridden by the user.
    pub fn with_mapping(&self, target: &str, header: Option<&str>) -> Result<Parsed> {
        let mut next = self.clone();
        next.mapper.set_mapping_by_target(target, header)?;
        Ok(next)
    }

    /// Snapshot with saved manual bindings applied.
    ///
    /// Also returns the targets whose saved header is missing from this file.
    pub fn with_saved_mapping(&self, saved: &SavedMapping) -> (Parsed, Vec<String>) {
        let mut next = self.clone();
        let skipped = saved.apply(&mut next.mapper);
        (next, skipped)
    }

    pub fn select_file(&self, path: impl Into<PathBuf>) -> FileSelected {
        FileSelected::new(path.into())
    }

    /// Confirms the mapping; fails while a required field is unbound.
    pub fn map(&self) -> Result<Mapped> {
        self.mapper.ensure_complete()?;
        let summary = self.mapper.summary();
        tracing::info!(
            mapped = summary.mapped,
            total = summary.total_fields,
            "mapping confirmed"
        );
        Ok(Mapped {
            parsed: self.clone(),
        })
    }
}

/// Every required field is bound.
#[derive(Debug, Clone)]
pub struct Mapped {
    parsed: Parsed,
}

impl Mapped {
    pub fn stage(&self) -> SessionStage {
        SessionStage::Mapped
    }

    pub fn profile(&self) -> &ImportProfile {
        &self.parsed.profile
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        self.parsed.fields()
    }

    pub fn mapper(&self) -> &FieldMapper {
        &self.parsed.mapper
    }

    /// Back to editing bindings.
    pub fn remap(&self) -> Parsed {
        self.parsed.clone()
    }

    pub fn validate(&self) -> Validated {
        let outcome = RowValidator::new(self.fields()).validate(self.parsed.rows());
        Validated {
            mapped: self.clone(),
            outcome,
        }
    }
}

/// Rows split into valid and invalid.
#[derive(Debug, Clone)]
pub struct Validated {
    mapped: Mapped,
    outcome: ValidationOutcome,
}

impl Validated {
    pub fn stage(&self) -> SessionStage {
        SessionStage::Validated
    }

    pub fn profile(&self) -> &ImportProfile {
        self.mapped.profile()
    }

    pub fn outcome(&self) -> &ValidationOutcome {
        &self.outcome
    }

    pub fn back_to_mapping(&self) -> Parsed {
        self.mapped.remap()
    }

    /// Drops rows whose natural key already exists.
    ///
    /// The store is asked once for every candidate key of the batch.
    pub fn reconcile<S>(&self, store: &S, policy: InvalidRowPolicy) -> Result<Reconciled>
    where
        S: RecordStore + ?Sized,
    {
        if !self.outcome.is_clean() && policy == InvalidRowPolicy::Block {
            let preview = self.outcome.error_preview(VALIDATION_PREVIEW_LIMIT);
            let more = preview.more_label();
            let mut lines = preview.shown;
            lines.extend(more);
            return Err(SessionError::InvalidRows {
                count: self.outcome.invalid.len(),
                preview: lines,
            });
        }

        let key = NaturalKey::from(self.profile());
        let candidates = candidate_keys(&self.outcome.valid, &key);
        let existing = if candidates.is_empty() {
            BTreeSet::new()
        } else {
            store.existing_keys(key.target(), &candidates)?
        };
        let reconciliation = partition_duplicates(&self.outcome.valid, &existing, &key);
        tracing::info!(
            fresh = reconciliation.fresh.len(),
            duplicates = reconciliation.duplicate_count,
            skipped_invalid = self.outcome.invalid.len(),
            "reconciled against store"
        );
        Ok(Reconciled {
            validated: self.clone(),
            key,
            reconciliation,
        })
    }
}

/// Fresh rows ready to write.
///
/// Not `Clone`: [`execute`](Self::execute) consumes the stage, so a batch
/// is written at most once.
///
/// ```compile_fail
/// use glee_import::{MemoryStore, Reconciled};
///
/// fn write_twice(reconciled: Reconciled, store: &mut MemoryStore) {
///     let _first = reconciled.execute(store, |_, _| {});
///     let _again = reconciled.execute(store, |_, _| {});
/// }
/// ```
///
/// ```compile_fail
/// use glee_import::Reconciled;
///
/// fn keep_a_copy(reconciled: &Reconciled) -> Reconciled {
///     reconciled.clone()
/// }
/// ```
#[derive(Debug)]
pub struct Reconciled {
    validated: Validated,
    key: NaturalKey,
    reconciliation: Reconciliation,
}

impl Reconciled {
    pub fn stage(&self) -> SessionStage {
        SessionStage::Reconciled
    }

    pub fn key(&self) -> &NaturalKey {
        &self.key
    }

    pub fn fresh(&self) -> &[ValidatedRow] {
        &self.reconciliation.fresh
    }

    pub fn duplicate_count(&self) -> usize {
        self.reconciliation.duplicate_count
    }

    /// Invalid rows left out under [`InvalidRowPolicy::SkipInvalid`].
    pub fn skipped_invalid(&self) -> usize {
        self.validated.outcome.invalid.len()
    }

    pub fn back_to_mapping(&self) -> Parsed {
        self.validated.back_to_mapping()
    }

    /// Writes the fresh rows. There is no way back from here.
    pub fn execute<S, F>(self, store: &mut S, on_progress: F) -> Completed
    where
        S: RecordStore + ?Sized,
        F: FnMut(usize, usize),
    {
        let skipped_invalid = self.skipped_invalid();
        let summary = execute_import(
            store,
            &self.reconciliation.fresh,
            &self.key,
            self.reconciliation.duplicate_count,
            on_progress,
        );
        Completed {
            summary,
            skipped_invalid,
        }
    }
}

/// Rows written; only a fresh session can follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    summary: ImportSummary,
    skipped_invalid: usize,
}

impl Completed {
    pub fn stage(&self) -> SessionStage {
        SessionStage::Completed
    }

    pub fn summary(&self) -> &ImportSummary {
        &self.summary
    }

    pub fn skipped_invalid(&self) -> usize {
        self.skipped_invalid
    }

    pub fn restart(self) -> Idle {
        Idle
    }
}
