//! Utility functions and helpers

pub mod number;

/// Split a comma-separated term list, lower-casing and trimming each term.
///
/// Empty terms are kept so callers can tell "," apart from "".
pub fn split_terms(s: &str) -> Vec<String> {
    s.to_lowercase()
        .split(',')
        .map(|term| term.trim().to_string())
        .collect()
}
