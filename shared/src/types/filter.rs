//! Filter state definitions
//!
//! These types hold the raw user input of each filter region. They are
//! mutated by UI events and read by the predicate builders in the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a filterable column ("proj", "task", "date", ...)
pub type FilterId = String;

/// Filter kinds understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Selection,
    Substring,
    DateRange,
    NumericRange,
    Outlier,
}

impl FilterKind {
    /// Kind used for a column id when the page does not say otherwise.
    ///
    /// Five ids have dedicated builders; every other column is numeric.
    pub fn for_id(id: &str) -> Self {
        match id {
            "proj" | "label" => FilterKind::Selection,
            "task" => FilterKind::Substring,
            "date" => FilterKind::DateRange,
            "outlier" => FilterKind::Outlier,
            _ => FilterKind::NumericRange,
        }
    }

    /// Empty criteria of this kind
    pub fn empty_criteria(self) -> Criteria {
        match self {
            FilterKind::Selection => Criteria::Selection {
                logic: None,
                selected: Vec::new(),
            },
            FilterKind::Substring => Criteria::Substring {
                include: String::new(),
                exclude: String::new(),
            },
            FilterKind::DateRange => Criteria::DateRange {
                before: String::new(),
                after: String::new(),
            },
            FilterKind::NumericRange => Criteria::NumericRange {
                min: String::new(),
                max: String::new(),
            },
            FilterKind::Outlier => Criteria::Outlier,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Selection => "selection",
            FilterKind::Substring => "substring",
            FilterKind::DateRange => "date_range",
            FilterKind::NumericRange => "numeric_range",
            FilterKind::Outlier => "outlier",
        };
        f.write_str(name)
    }
}

/// Raw input values of one filter, exactly as the user entered them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Criteria {
    /// Checked option values plus the include/exclude radio
    Selection {
        /// "include" selects include mode; anything else (or nothing) excludes
        #[serde(default)]
        logic: Option<String>,
        #[serde(default)]
        selected: Vec<String>,
    },

    /// Comma-separated include and exclude terms
    Substring {
        #[serde(default)]
        include: String,
        #[serde(default)]
        exclude: String,
    },

    /// Lexicographically compared date boundaries
    DateRange {
        #[serde(default)]
        before: String,
        #[serde(default)]
        after: String,
    },

    /// Locale-formatted numeric boundaries
    NumericRange {
        #[serde(default)]
        min: String,
        #[serde(default)]
        max: String,
    },

    /// The outlier filter has no inputs of its own
    Outlier,
}

impl Criteria {
    /// Kind of filter these criteria belong to
    pub fn kind(&self) -> FilterKind {
        match self {
            Criteria::Selection { .. } => FilterKind::Selection,
            Criteria::Substring { .. } => FilterKind::Substring,
            Criteria::DateRange { .. } => FilterKind::DateRange,
            Criteria::NumericRange { .. } => FilterKind::NumericRange,
            Criteria::Outlier => FilterKind::Outlier,
        }
    }

    /// Mutable access to a named text field, if this kind has one by that name
    pub fn text_field_mut(&mut self, field: &str) -> Option<&mut String> {
        match (self, field) {
            (Criteria::Substring { include, .. }, "include") => Some(include),
            (Criteria::Substring { exclude, .. }, "exclude") => Some(exclude),
            (Criteria::DateRange { before, .. }, "before") => Some(before),
            (Criteria::DateRange { after, .. }, "after") => Some(after),
            (Criteria::NumericRange { min, .. }, "min") => Some(min),
            (Criteria::NumericRange { max, .. }, "max") => Some(max),
            _ => None,
        }
    }
}

/// Current state of one filter region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Whether the filter takes part in evaluation
    pub enabled: bool,

    /// Raw user input
    pub criteria: Criteria,
}

impl FilterState {
    /// A disabled filter with empty criteria of the given kind
    pub fn new(kind: FilterKind) -> Self {
        Self {
            enabled: false,
            criteria: kind.empty_criteria(),
        }
    }
}
