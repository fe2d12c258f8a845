//! Import run summary and message truncation helpers.

use serde::{Deserialize, Serialize};

/// Number of write errors shown in a summary before collapsing to "+N more".
pub const SUMMARY_ERROR_LIMIT: usize = 5;

/// Number of validation errors previewed before collapsing to "+N more".
pub const VALIDATION_PREVIEW_LIMIT: usize = 3;

/// Outcome of one executed import.
///
/// For a completed run `total == successful + failed + duplicates`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub duplicates: usize,
    pub errors: Vec<String>,
}

impl ImportSummary {
    pub fn is_balanced(&self) -> bool {
        self.total == self.successful + self.failed + self.duplicates
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Errors as they are displayed to the user.
    pub fn displayed_errors(&self) -> Truncated<&str> {
        truncate(
            self.errors.iter().map(String::as_str),
            SUMMARY_ERROR_LIMIT,
        )
    }
}

/// The first `limit` items of a list plus the number left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated<T> {
    pub shown: Vec<T>,
    pub remaining: usize,
}

impl<T> Truncated<T> {
    /// `"+N more"` when items were left out.
    pub fn more_label(&self) -> Option<String> {
        (self.remaining > 0).then(|| format!("+{} more", self.remaining))
    }
}

pub fn truncate<T>(items: impl IntoIterator<Item = T>, limit: usize) -> Truncated<T> {
    let mut shown = Vec::new();
    let mut remaining = 0usize;
    for item in items {
        if shown.len() < limit {
            shown.push(item);
        } else {
            remaining += 1;
        }
    }
    Truncated { shown, remaining }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_reports_remaining() {
        let truncated = truncate(1..=8, 5);
        assert_eq!(truncated.shown, vec![1, 2, 3, 4, 5]);
        assert_eq!(truncated.remaining, 3);
        assert_eq!(truncated.more_label().as_deref(), Some("+3 more"));
    }

    #[test]
    fn truncate_short_list_has_no_label() {
        let truncated = truncate(vec!["a", "b"], 3);
        assert_eq!(truncated.shown, vec!["a", "b"]);
        assert_eq!(truncated.more_label(), None);
    }

    #[test]
    fn summary_balance() {
        let summary = ImportSummary {
            total: 3,
            successful: 2,
            failed: 1,
            duplicates: 0,
            errors: vec!["Failed to insert b@x.org: boom".into()],
        };
        assert!(summary.is_balanced());
        assert!(summary.has_failures());

        let broken = ImportSummary {
            total: 4,
            ..summary
        };
        assert!(!broken.is_balanced());
    }

    #[test]
    fn displayed_errors_cap_at_five() {
        let summary = ImportSummary {
            errors: (0..7).map(|i| format!("error {i}")).collect(),
            ..ImportSummary::default()
        };
        let displayed = summary.displayed_errors();
        assert_eq!(displayed.shown.len(), SUMMARY_ERROR_LIMIT);
        assert_eq!(displayed.more_label().as_deref(), Some("+2 more"));
    }
}
