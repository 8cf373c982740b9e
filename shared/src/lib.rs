//! Shared types and utilities for tablesift
//!
//! This crate contains the data model of a filterable report page (filter
//! state, rows, cells, page snapshots), locale-aware number parsing and the
//! error type used by the engine and its hosts.

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{FilterError, Result};
pub use types::{filter::*, snapshot::*, table::*};
pub use utils::number::{parse_num, NumberFormat};
