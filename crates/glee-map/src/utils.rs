//! Utility functions for mapping operations.

/// Reduces a header or field name to lower-case alphanumerics.
///
/// `First Name`, `first_name` and `FIRST-NAME` all become `firstname`.
pub fn compact_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
