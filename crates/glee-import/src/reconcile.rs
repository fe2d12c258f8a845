//! Duplicate reconciliation against keys that already exist.

use std::collections::BTreeSet;

use glee_model::ValidatedRow;

use crate::key::NaturalKey;

/// Rows left to write and how many were dropped as duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub fresh: Vec<ValidatedRow>,
    pub duplicate_count: usize,
}

/// Distinct keys of `rows`, for the single batch lookup against the store.
pub fn candidate_keys(rows: &[ValidatedRow], key: &NaturalKey) -> BTreeSet<String> {
    rows.iter().filter_map(|row| key.extract(row)).collect()
}

/// Splits `rows` into fresh rows and a duplicate count.
///
/// A row is a duplicate when its key is in `existing`, or when an earlier
/// row of the same batch carried the same key. Rows without a key are
/// always fresh.
pub fn partition_duplicates(
    rows: &[ValidatedRow],
    existing: &BTreeSet<String>,
    key: &NaturalKey,
) -> Reconciliation {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut reconciliation = Reconciliation::default();
    for row in rows {
        match key.extract(row) {
            Some(value) if existing.contains(&value) || !seen.insert(value.clone()) => {
                tracing::debug!(line = row.line, key = %value, "duplicate row skipped");
                reconciliation.duplicate_count += 1;
            }
            _ => reconciliation.fresh.push(row.clone()),
        }
    }
    reconciliation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fan(line: usize, email: &str) -> ValidatedRow {
        ValidatedRow::new(line).with_text("email", email)
    }

    #[test]
    fn repeated_key_in_batch_keeps_first() {
        let rows = vec![
            fan(2, "a@x.org"),
            fan(3, "A@x.org"),
            fan(4, "b@x.org"),
            fan(5, "a@x.org"),
        ];
        let result = partition_duplicates(&rows, &BTreeSet::new(), &NaturalKey::field("email"));
        assert_eq!(result.duplicate_count, 2);
        let lines: Vec<usize> = result.fresh.iter().map(|row| row.line).collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn keyless_rows_are_fresh() {
        let rows = vec![ValidatedRow::new(2), ValidatedRow::new(3)];
        let result = partition_duplicates(&rows, &BTreeSet::new(), &NaturalKey::field("email"));
        assert_eq!(result.fresh.len(), 2);
        assert_eq!(result.duplicate_count, 0);
    }

    #[test]
    fn candidates_are_distinct_normalized_keys() {
        let rows = vec![fan(2, "A@x.org"), fan(3, "a@x.org "), ValidatedRow::new(4)];
        let keys = candidate_keys(&rows, &NaturalKey::field("email"));
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["a@x.org"]);
    }
}
