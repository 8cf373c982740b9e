//! Error types for tablesift

use thiserror::Error;

use crate::types::filter::FilterKind;

/// Errors raised when a host drives the engine with ids or inputs the page
/// does not know about. Malformed user input never produces an error.
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Unknown filter '{0}'")]
    UnknownFilter(String),

    #[error("Unknown row '{0}'")]
    UnknownRow(String),

    #[error("Filter '{0}' is registered twice")]
    DuplicateFilter(String),

    #[error("Filter '{id}' is a {expected} filter, got {actual} criteria")]
    KindMismatch {
        id: String,
        expected: FilterKind,
        actual: FilterKind,
    },

    #[error("Filter '{id}' has no text field '{field}'")]
    UnknownField { id: String, field: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for tablesift operations
pub type Result<T> = std::result::Result<T, FilterError>;
