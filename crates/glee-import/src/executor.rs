//! Import executor.

use glee_model::{ImportSummary, ValidatedRow};

use crate::key::NaturalKey;
use crate::store::RecordStore;

/// Inserts `rows` one at a time and reports the outcome.
///
/// A failed insert is counted and recorded as
/// `Failed to insert <key>: <message>`; the next row is still attempted.
/// `duplicates` is the count dropped during reconciliation and is folded
/// into the summary totals. `on_progress` receives `(done, total)` after
/// every row.
pub fn execute_import<S, F>(
    store: &mut S,
    rows: &[ValidatedRow],
    key: &NaturalKey,
    duplicates: usize,
    mut on_progress: F,
) -> ImportSummary
where
    S: RecordStore + ?Sized,
    F: FnMut(usize, usize),
{
    let mut summary = ImportSummary {
        total: rows.len() + duplicates,
        duplicates,
        ..ImportSummary::default()
    };

    for (index, row) in rows.iter().enumerate() {
        match store.insert(row) {
            Ok(()) => summary.successful += 1,
            Err(err) => {
                let label = key.describe(row);
                tracing::warn!(line = row.line, key = %label, error = %err, "insert failed");
                summary.failed += 1;
                summary.errors.push(format!("Failed to insert {label}: {err}"));
            }
        }
        on_progress(index + 1, rows.len());
    }

    tracing::info!(
        total = summary.total,
        successful = summary.successful,
        failed = summary.failed,
        duplicates = summary.duplicates,
        "import complete"
    );
    summary
}
