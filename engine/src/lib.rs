//! Row filter engine for report pages
//!
//! A report page has one filter region per filterable column. Each region's
//! input values are turned into a cell predicate by its kind's builder, and
//! a row stays visible only while every enabled filter accepts its cell.
//!
//! ```
//! use tablesift_engine::{FilterPage, UiEvent};
//! use tablesift_shared::{NumberFormat, PageSnapshot};
//!
//! let snapshot = PageSnapshot::from_json(r#"{
//!     "filters": [{"id": "size", "criteria": {"type": "numeric_range", "min": "10"}}],
//!     "rows": [
//!         {"id": "r1", "cells": {"size": {"text": "12"}}},
//!         {"id": "r2", "cells": {"size": {"text": "3"}}}
//!     ]
//! }"#).unwrap();
//!
//! let mut page = FilterPage::from_snapshot(snapshot, NumberFormat::POINT).unwrap();
//! page.dispatch(UiEvent::FilterOn { id: "size".to_string() }).unwrap();
//! assert_eq!(page.visible_rows().count(), 1);
//! ```

pub mod config;
pub mod evaluate;
pub mod event;
pub mod page;
pub mod predicate;
pub mod registry;

pub use config::Settings;
pub use evaluate::{derive_predicates, evaluate_rows, PassReport, PredicateSet};
pub use event::UiEvent;
pub use page::{FilterPage, FilterRegion};
pub use predicate::{Derivation, Predicate, PredicateBuilder};
pub use registry::FilterRegistry;
