//! Table data structures
//!
//! A report table is a list of rows; each row holds one cell per filterable
//! column. The `excluded` markers are written by the evaluation pass.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::filter::FilterId;

/// Identifier of a table row
pub type RowId = String;

/// One row's value for one filterable column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Displayed text (task names, numbers)
    #[serde(default)]
    pub text: String,

    /// Hidden comparable values (option codes, dates)
    #[serde(default)]
    pub values: Vec<String>,

    /// Outlier checkbox state
    #[serde(default)]
    pub checked: bool,

    /// Set when a filter rejected this cell in the last pass
    #[serde(default)]
    pub excluded: bool,
}

impl Cell {
    /// A cell that only carries displayed text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// A cell carrying hidden comparable values
    pub fn values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// An outlier checkbox cell
    pub fn checkbox(checked: bool) -> Self {
        Self {
            checked,
            ..Default::default()
        }
    }

    /// First hidden value, or "" when the cell has none
    pub fn first_value(&self) -> &str {
        self.values.first().map(String::as_str).unwrap_or("")
    }
}

/// A table row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,

    /// Cells keyed by filter id
    #[serde(default)]
    pub cells: HashMap<FilterId, Cell>,

    /// Set when any of this row's cells is excluded
    #[serde(default)]
    pub excluded: bool,
}

impl Row {
    /// Create an empty row
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            cells: HashMap::new(),
            excluded: false,
        }
    }

    /// Builder-style cell insertion
    pub fn with_cell(mut self, filter_id: impl Into<FilterId>, cell: Cell) -> Self {
        self.cells.insert(filter_id.into(), cell);
        self
    }

    /// Filter ids whose cells are currently excluded, sorted
    pub fn excluded_by(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .cells
            .iter()
            .filter(|(_, cell)| cell.excluded)
            .map(|(id, _)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }
}
