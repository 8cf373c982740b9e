//! Page snapshot format
//!
//! A snapshot is the serialized form of a rendered report page: its filter
//! regions in document order and its data rows. It is the input the engine
//! is initialized from and the output it can export after a pass.

use serde::{Deserialize, Serialize};

use super::filter::{Criteria, FilterId, FilterKind, FilterState};
use super::table::Row;
use crate::error::Result;

/// One filter region as rendered on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSnapshot {
    pub id: FilterId,

    /// Pre-enabled by the page
    #[serde(default)]
    pub enabled: bool,

    /// Explicit kind; derived from the id when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FilterKind>,

    /// Initial input values; empty criteria of the kind when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Criteria>,
}

impl RegionSnapshot {
    /// Kind of this region: the explicit kind, else the criteria's, else by id
    pub fn resolved_kind(&self) -> FilterKind {
        self.kind
            .or_else(|| self.criteria.as_ref().map(Criteria::kind))
            .unwrap_or_else(|| FilterKind::for_id(&self.id))
    }

    /// Initial filter state of this region
    pub fn initial_state(&self) -> FilterState {
        let kind = self.resolved_kind();
        FilterState {
            enabled: self.enabled,
            criteria: self
                .criteria
                .clone()
                .unwrap_or_else(|| kind.empty_criteria()),
        }
    }
}

/// A whole report page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// Filter regions in document order
    #[serde(default)]
    pub filters: Vec<RegionSnapshot>,

    /// Data rows in table order
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl PageSnapshot {
    /// Parse a snapshot from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the snapshot as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
