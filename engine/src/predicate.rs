//! Predicate builders
//!
//! Each filter kind turns its raw criteria into a [`Predicate`]: a pure test
//! over one cell, built from a snapshot of the criteria. Builders that find
//! no usable criteria report [`Derivation::Unfiltered`] so the page can
//! switch the filter off.

use std::collections::HashSet;

use tablesift_shared::utils::split_terms;
use tablesift_shared::{Cell, Criteria, NumberFormat};

/// Cell test produced by a builder
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Accepts every cell
    Accept,

    /// Membership of any hidden value in the selected set
    Selection {
        selected: HashSet<String>,
        exclude: bool,
    },

    /// Lower-cased term matching against the displayed text.
    /// `include` is `None` when no include text was entered.
    Substring {
        include: Option<Vec<String>>,
        exclude: Vec<String>,
    },

    /// Exclusive bounds on the first hidden value
    DateRange {
        before: Option<String>,
        after: Option<String>,
    },

    /// Bounds on the displayed number; `max` is exclusive.
    /// A bound that failed to parse is NaN and never rejects.
    NumericRange {
        min: Option<f64>,
        max: Option<f64>,
        format: NumberFormat,
    },

    /// Rejects cells whose outlier checkbox is checked
    NotOutlier,
}

impl Predicate {
    /// Test one cell
    pub fn accepts(&self, cell: &Cell) -> bool {
        match self {
            Predicate::Accept => true,
            Predicate::Selection { selected, exclude } => {
                let matched = cell.values.iter().any(|v| selected.contains(v));
                // no match in exclude mode, or a match in include mode
                !matched == *exclude
            }
            Predicate::Substring { include, exclude } => {
                let text = cell.text.to_lowercase();
                if exclude
                    .iter()
                    .any(|term| !term.is_empty() && text.contains(term.as_str()))
                {
                    return false;
                }
                match include {
                    None => true,
                    Some(terms) => terms
                        .iter()
                        .any(|term| !term.is_empty() && text.contains(term.as_str())),
                }
            }
            Predicate::DateRange { before, after } => {
                let value = cell.first_value();
                if let Some(before) = before {
                    if before.as_str() <= value {
                        return false;
                    }
                }
                if let Some(after) = after {
                    if after.as_str() >= value {
                        return false;
                    }
                }
                true
            }
            Predicate::NumericRange { min, max, format } => {
                let mut value = format.parse(&cell.text);
                if value.is_nan() {
                    value = 0.0;
                }
                if let Some(min) = min {
                    if value < *min {
                        return false;
                    }
                }
                if let Some(max) = max {
                    if *max <= value {
                        return false;
                    }
                }
                true
            }
            Predicate::NotOutlier => !cell.checked,
        }
    }

    /// Whether this is the no-op predicate
    pub fn is_accept(&self) -> bool {
        matches!(self, Predicate::Accept)
    }
}

/// Outcome of running a builder
#[derive(Debug, Clone, PartialEq)]
pub enum Derivation {
    /// The filter has criteria and produced a predicate
    Active(Predicate),

    /// No usable criteria; the filter should be switched off
    Unfiltered,
}

impl Derivation {
    /// The predicate to evaluate with, `Accept` when unfiltered
    pub fn into_predicate(self) -> Predicate {
        match self {
            Derivation::Active(predicate) => predicate,
            Derivation::Unfiltered => Predicate::Accept,
        }
    }
}

/// Something a predicate can be derived from
pub trait PredicateBuilder {
    /// Build a predicate from the current state
    fn derive(&self, numbers: NumberFormat) -> Derivation;
}

impl PredicateBuilder for Criteria {
    fn derive(&self, numbers: NumberFormat) -> Derivation {
        match self {
            Criteria::Selection { logic, selected } => Derivation::Active(Predicate::Selection {
                selected: selected.iter().cloned().collect(),
                exclude: logic.as_deref() != Some("include"),
            }),
            Criteria::Substring { include, exclude } => {
                let include = include.trim();
                let exclude = exclude.trim();
                if include.is_empty() && exclude.is_empty() {
                    return Derivation::Unfiltered;
                }
                Derivation::Active(Predicate::Substring {
                    include: (!include.is_empty()).then(|| split_terms(include)),
                    exclude: split_terms(exclude),
                })
            }
            Criteria::DateRange { before, after } => {
                let before = non_empty(before);
                let after = non_empty(after);
                if before.is_none() && after.is_none() {
                    return Derivation::Unfiltered;
                }
                Derivation::Active(Predicate::DateRange {
                    before: before.map(str::to_string),
                    after: after.map(str::to_string),
                })
            }
            Criteria::NumericRange { min, max } => {
                let min = non_empty(min);
                let max = non_empty(max);
                if min.is_none() && max.is_none() {
                    return Derivation::Unfiltered;
                }
                Derivation::Active(Predicate::NumericRange {
                    min: min.map(|s| numbers.parse(s)),
                    max: max.map(|s| numbers.parse(s)),
                    format: numbers,
                })
            }
            Criteria::Outlier => Derivation::Active(Predicate::NotOutlier),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}
