//! Field-level checks and coercions.

use std::sync::LazyLock;

use regex::Regex;

/// Error recorded when an email value has the wrong shape.
pub const INVALID_EMAIL: &str = "Invalid email format";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// `local@domain.tld` with no whitespace anywhere.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn required_message(label: &str) -> String {
    format!("{label} is required")
}

/// Parses a whole number, falling back to 0.
///
/// Accepts surrounding whitespace, a leading sign and an all-zero decimal
/// tail (spreadsheets often export integers as `12.0`). Values outside the
/// `i64` range and exponent forms are not integers and give 0.
pub fn coerce_integer(value: &str) -> i64 {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return parsed;
    }
    match trimmed.split_once('.') {
        Some((whole, fraction))
            if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') =>
        {
            whole.parse::<i64>().unwrap_or(0)
        }
        _ => 0,
    }
}
