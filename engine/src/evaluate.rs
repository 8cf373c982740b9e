//! Evaluation pass
//!
//! Derives one predicate per registered filter and sweeps every row,
//! writing cell and row exclusion markers.

use std::collections::HashMap;

use serde::Serialize;
use tablesift_shared::{FilterId, FilterState, NumberFormat, Row};
use tracing::debug;

use crate::predicate::{Derivation, Predicate, PredicateBuilder};

/// Predicates derived for one pass
#[derive(Debug, Clone, Default)]
pub struct PredicateSet {
    predicates: HashMap<FilterId, Predicate>,

    /// Enabled filters whose builders found no usable criteria
    pub self_disabled: Vec<FilterId>,
}

impl PredicateSet {
    pub fn get(&self, id: &str) -> Option<&Predicate> {
        self.predicates.get(id)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Summary of one evaluation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    pub rows: usize,
    pub visible: usize,
    pub excluded: usize,

    /// Filters switched off during this pass for lack of criteria
    pub self_disabled: Vec<FilterId>,
}

/// Derive the predicate of every filter in `order`.
///
/// Disabled filters get the no-op predicate. Filters without state are
/// skipped and leave their cells untouched.
pub fn derive_predicates<'a, F>(order: &[FilterId], mut state_of: F, numbers: NumberFormat) -> PredicateSet
where
    F: FnMut(&str) -> Option<&'a FilterState>,
{
    let mut set = PredicateSet::default();

    for id in order {
        let Some(state) = state_of(id) else {
            continue;
        };

        let predicate = if state.enabled {
            match state.criteria.derive(numbers) {
                Derivation::Active(predicate) => predicate,
                Derivation::Unfiltered => {
                    set.self_disabled.push(id.clone());
                    Predicate::Accept
                }
            }
        } else {
            Predicate::Accept
        };

        set.predicates.insert(id.clone(), predicate);
    }

    set
}

/// Apply `predicates` to every row, in filter `order`.
///
/// A row's marker is cleared first and set again if any of its cells fails.
pub fn evaluate_rows(order: &[FilterId], predicates: &PredicateSet, rows: &mut [Row]) -> PassReport {
    let mut report = PassReport {
        rows: rows.len(),
        ..Default::default()
    };

    for row in rows.iter_mut() {
        row.excluded = false;
        for id in order {
            let (Some(predicate), Some(cell)) = (predicates.get(id), row.cells.get_mut(id)) else {
                continue;
            };
            cell.excluded = !predicate.accepts(cell);
            if cell.excluded {
                row.excluded = true;
            }
        }

        if row.excluded {
            report.excluded += 1;
        } else {
            report.visible += 1;
        }
    }

    debug!(
        "Evaluated {} rows against {} filters: {} visible, {} excluded",
        report.rows,
        predicates.len(),
        report.visible,
        report.excluded
    );

    report
}
