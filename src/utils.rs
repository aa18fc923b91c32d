//! Shared utilities for the ingestion pipeline.
//!
//! The numeric parser and the placeholder-token set live here because the
//! profiler, the imputation engine, and the dataset finalizer all need
//! identical behavior; a cell that counts as numeric in the preview must
//! count as numeric at finalize time.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Characters commonly used in numeric formatting that should be stripped.
pub const NUMERIC_FORMAT_CHARS: [char; 6] = [',', '$', '%', '€', '£', ' '];

/// Tokens that semantically represent a missing value even though the cell
/// is not empty. Matched case-insensitively against the trimmed cell.
pub static PLACEHOLDER_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "na", "n/a", "null", "none", "nil", "nan", "?", "-", "missing", "unknown", ".",
    ]
    .into_iter()
    .collect()
});

/// Check whether a cell value is a placeholder token.
pub fn is_placeholder_token(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    PLACEHOLDER_TOKENS.contains(lower.as_str())
}

/// Clean a string for numeric parsing by removing formatting characters.
///
/// # Example
///
/// ```rust,ignore
/// use tabular_ingest::utils::clean_numeric_string;
///
/// assert_eq!(clean_numeric_string("$1,234.56"), "1234.56");
/// assert_eq!(clean_numeric_string("  42%  "), "42");
/// ```
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Try to parse a cell as a numeric value, tolerating common formatting
/// like currency symbols and thousands separators.
pub fn parse_number(s: &str) -> Option<f64> {
    let cleaned = clean_numeric_string(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Check if a cell can be parsed as a numeric value.
pub fn is_numeric_string(s: &str) -> bool {
    parse_number(s).is_some()
}

/// Normalize a cell for imputation: empty and placeholder cells collapse to
/// the empty string, everything else keeps its raw value.
pub fn normalize_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_placeholder_token(trimmed) {
        String::new()
    } else {
        raw.to_string()
    }
}
