//! Filterable report page
//!
//! [`FilterPage`] is the bridge between UI events and the evaluation pass.
//! It owns the filter state of every region and the table rows. Every
//! state change is followed by a full pass over all rows, so the exclusion
//! markers always reflect the current filter state.

use std::collections::HashMap;

use tablesift_shared::{
    Criteria, FilterError, FilterId, FilterKind, FilterState, NumberFormat, PageSnapshot,
    RegionSnapshot, Result, Row,
};
use tracing::{debug, info, warn};

use crate::evaluate::{derive_predicates, evaluate_rows, PassReport};
use crate::event::UiEvent;
use crate::registry::FilterRegistry;

/// State of one filter region
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRegion {
    pub state: FilterState,

    /// Popup currently open
    pub active: bool,
}

/// A report page with its filters and rows
#[derive(Debug, Clone)]
pub struct FilterPage {
    registry: FilterRegistry,
    regions: HashMap<FilterId, FilterRegion>,
    rows: Vec<Row>,
    numbers: NumberFormat,
    last_report: PassReport,
}

impl FilterPage {
    /// Create a page with no filters or rows
    pub fn new(numbers: NumberFormat) -> Self {
        Self {
            registry: FilterRegistry::new(),
            regions: HashMap::new(),
            rows: Vec::new(),
            numbers,
            last_report: PassReport::default(),
        }
    }

    /// Build a page from a snapshot and run the initial pass.
    ///
    /// The outlier filter's enabled flag in the snapshot is ignored; it is
    /// recomputed from the rows' outlier checkboxes.
    pub fn from_snapshot(snapshot: PageSnapshot, numbers: NumberFormat) -> Result<Self> {
        let mut page = Self::new(numbers);

        for region in &snapshot.filters {
            page.add_filter(region.id.clone(), region.resolved_kind(), region.initial_state())?;
        }

        for row in snapshot.rows {
            page.add_row(row);
        }

        info!(
            "Loaded page with {} filters and {} rows",
            page.registry.len(),
            page.rows.len()
        );

        page.check_outliers();
        Ok(page)
    }

    /// Register a filter region. No pass is run.
    pub fn add_filter(&mut self, id: impl Into<FilterId>, kind: FilterKind, state: FilterState) -> Result<()> {
        let id = id.into();
        ensure_kind(&id, kind, &state.criteria)?;
        self.registry.register(id.clone(), kind)?;
        self.regions.insert(id, FilterRegion { state, active: false });
        Ok(())
    }

    /// Append a row. No pass is run.
    ///
    /// Markers on cells of unregistered columns are cleared, since no pass
    /// will ever maintain them. The row marker is reset to agree with the
    /// remaining cell markers until the next pass.
    pub fn add_row(&mut self, mut row: Row) {
        for (id, cell) in row.cells.iter_mut() {
            if !self.registry.contains(id) {
                warn!("Row '{}' has a cell for unknown filter '{}'", row.id, id);
                cell.excluded = false;
            }
        }
        row.excluded = row.cells.values().any(|cell| cell.excluded);
        self.rows.push(row);
    }

    /// Derive predicates from the current state and re-evaluate every row
    pub fn apply_filters(&mut self) -> PassReport {
        let set = derive_predicates(
            self.registry.active_filter_ids(),
            |id| self.regions.get(id).map(|region| &region.state),
            self.numbers,
        );

        for id in &set.self_disabled {
            debug!("Filter '{}' has no criteria, switching it off", id);
            if let Some(region) = self.regions.get_mut(id) {
                region.state.enabled = false;
                region.active = false;
            }
        }

        let mut report = evaluate_rows(self.registry.active_filter_ids(), &set, &mut self.rows);
        report.self_disabled = set.self_disabled;
        self.last_report = report.clone();
        report
    }

    /// Report of the most recent pass, including the initial one run by
    /// [`FilterPage::from_snapshot`]
    pub fn last_report(&self) -> &PassReport {
        &self.last_report
    }

    /// Enable a filter and re-evaluate
    pub fn filter_on(&mut self, id: &str) -> Result<PassReport> {
        self.set_enabled(id, true)
    }

    /// Disable a filter and re-evaluate
    pub fn filter_off(&mut self, id: &str) -> Result<PassReport> {
        self.set_enabled(id, false)
    }

    fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<PassReport> {
        let kind = self.kind_of(id)?;
        let region = self.region_mut(id)?;
        region.active = false;

        // the outlier filter follows the checkboxes, not its own toggle
        if kind == FilterKind::Outlier {
            return Ok(self.check_outliers());
        }

        region.state.enabled = enabled;
        Ok(self.apply_filters())
    }

    /// Open a filter's popup, closing any other. Clicking an open popup's
    /// link closes it.
    pub fn toggle_popup(&mut self, id: &str) -> Result<()> {
        let was_active = self.region(id).ok_or_else(|| unknown_filter(id))?.active;
        self.close_popups();
        if !was_active {
            self.region_mut(id)?.active = true;
        }
        Ok(())
    }

    /// Close every open popup
    pub fn close_popups(&mut self) {
        for region in self.regions.values_mut() {
            region.active = false;
        }
    }

    /// Replace a filter's input values and re-evaluate
    pub fn set_criteria(&mut self, id: &str, criteria: Criteria) -> Result<PassReport> {
        let kind = self.kind_of(id)?;
        ensure_kind(id, kind, &criteria)?;
        self.region_mut(id)?.state.criteria = criteria;
        Ok(self.apply_filters())
    }

    /// Empty one text field of a filter. The filter is not re-applied.
    pub fn clear_field(&mut self, id: &str, field: &str) -> Result<()> {
        let region = self.region_mut(id)?;
        match region.state.criteria.text_field_mut(field) {
            Some(value) => {
                value.clear();
                Ok(())
            }
            None => Err(FilterError::UnknownField {
                id: id.to_string(),
                field: field.to_string(),
            }),
        }
    }

    /// Check or uncheck a row's outlier box, then resync the outlier filter
    pub fn set_outlier(&mut self, row_id: &str, checked: bool) -> Result<PassReport> {
        let outlier_ids: Vec<FilterId> = self.registry.ids_of_kind(FilterKind::Outlier).cloned().collect();
        let Some(first) = outlier_ids.first() else {
            return Err(unknown_filter("outlier"));
        };

        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == row_id)
            .ok_or_else(|| FilterError::UnknownRow(row_id.to_string()))?;

        let mut found = false;
        for id in &outlier_ids {
            if let Some(cell) = row.cells.get_mut(id) {
                cell.checked = checked;
                found = true;
            }
        }
        if !found {
            row.cells.entry(first.clone()).or_default().checked = checked;
        }

        Ok(self.check_outliers())
    }

    /// Enable the outlier filter iff any outlier box on the page is checked,
    /// then re-evaluate
    pub fn check_outliers(&mut self) -> PassReport {
        let outlier_ids: Vec<FilterId> = self.registry.ids_of_kind(FilterKind::Outlier).cloned().collect();
        let present = self.rows.iter().any(|row| {
            outlier_ids
                .iter()
                .any(|id| row.cells.get(id).is_some_and(|cell| cell.checked))
        });

        for id in &outlier_ids {
            if let Some(region) = self.regions.get_mut(id) {
                region.state.enabled = present;
                region.active = false;
            }
        }

        self.apply_filters()
    }

    /// Route a UI event. Returns the pass report when the event triggered
    /// a pass.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<Option<PassReport>> {
        debug!("Dispatching {:?}", event);
        match event {
            UiEvent::FilterOn { id } => self.filter_on(&id).map(Some),
            UiEvent::FilterOff { id } => self.filter_off(&id).map(Some),
            UiEvent::TogglePopup { id } => self.toggle_popup(&id).map(|_| None),
            UiEvent::ClosePopups => {
                self.close_popups();
                Ok(None)
            }
            UiEvent::SetCriteria { id, criteria } => self.set_criteria(&id, criteria).map(Some),
            UiEvent::ClearField { id, field } => self.clear_field(&id, &field).map(|_| None),
            UiEvent::SetOutlier { row, checked } => self.set_outlier(&row, checked).map(Some),
        }
    }

    /// Export the current state and markers
    pub fn snapshot(&self) -> PageSnapshot {
        let filters = self
            .registry
            .active_filter_ids()
            .iter()
            .filter_map(|id| {
                let region = self.regions.get(id)?;
                Some(RegionSnapshot {
                    id: id.clone(),
                    enabled: region.state.enabled,
                    kind: self.registry.kind(id),
                    criteria: Some(region.state.criteria.clone()),
                })
            })
            .collect();

        PageSnapshot {
            filters,
            rows: self.rows.clone(),
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Rows not excluded by the last pass
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter().filter(|row| !row.excluded)
    }

    pub fn region(&self, id: &str) -> Option<&FilterRegion> {
        self.regions.get(id)
    }

    /// Whether a filter is currently enabled
    pub fn is_enabled(&self, id: &str) -> bool {
        self.regions.get(id).is_some_and(|region| region.state.enabled)
    }

    /// Filter ids in document order
    pub fn filter_ids(&self) -> &[FilterId] {
        self.registry.active_filter_ids()
    }

    pub fn number_format(&self) -> NumberFormat {
        self.numbers
    }

    fn kind_of(&self, id: &str) -> Result<FilterKind> {
        self.registry.kind(id).ok_or_else(|| unknown_filter(id))
    }

    fn region_mut(&mut self, id: &str) -> Result<&mut FilterRegion> {
        self.regions.get_mut(id).ok_or_else(|| unknown_filter(id))
    }
}

fn unknown_filter(id: &str) -> FilterError {
    FilterError::UnknownFilter(id.to_string())
}

fn ensure_kind(id: &str, expected: FilterKind, criteria: &Criteria) -> Result<()> {
    let actual = criteria.kind();
    if actual != expected {
        return Err(FilterError::KindMismatch {
            id: id.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesift_shared::Cell;

    fn page() -> FilterPage {
        let mut page = FilterPage::new(NumberFormat::POINT);
        page.add_filter("task", FilterKind::Substring, FilterState::new(FilterKind::Substring))
            .unwrap();
        page.add_filter("outlier", FilterKind::Outlier, FilterState::new(FilterKind::Outlier))
            .unwrap();
        page.add_row(
            Row::new("r1")
                .with_cell("task", Cell::text("Code Review"))
                .with_cell("outlier", Cell::checkbox(false)),
        );
        page.add_row(
            Row::new("r2")
                .with_cell("task", Cell::text("Design"))
                .with_cell("outlier", Cell::checkbox(false)),
        );
        page
    }

    #[test]
    fn test_add_filter_kind_mismatch() {
        let mut page = FilterPage::new(NumberFormat::POINT);
        let err = page
            .add_filter("task", FilterKind::Substring, FilterState::new(FilterKind::DateRange))
            .unwrap_err();
        assert!(matches!(err, FilterError::KindMismatch { .. }));
        assert!(page.filter_ids().is_empty());
    }

    #[test]
    fn test_filter_on_without_criteria_self_disables() {
        let mut page = page();
        let report = page.filter_on("task").unwrap();
        assert_eq!(report.self_disabled, vec!["task".to_string()]);
        assert!(!page.is_enabled("task"));
        assert_eq!(report.visible, 2);
    }

    #[test]
    fn test_set_criteria_then_filter_on() {
        let mut page = page();
        page.set_criteria(
            "task",
            Criteria::Substring {
                include: "review".to_string(),
                exclude: String::new(),
            },
        )
        .unwrap();
        // criteria alone do not enable the filter
        assert_eq!(page.visible_rows().count(), 2);

        let report = page.filter_on("task").unwrap();
        assert_eq!(report.visible, 1);
        assert!(page.row("r2").unwrap().excluded);

        page.filter_off("task").unwrap();
        assert_eq!(page.visible_rows().count(), 2);
    }

    #[test]
    fn test_set_criteria_wrong_kind() {
        let mut page = page();
        let err = page
            .set_criteria(
                "task",
                Criteria::NumericRange {
                    min: "1".to_string(),
                    max: String::new(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, FilterError::KindMismatch { .. }));
    }

    #[test]
    fn test_unknown_ids() {
        let mut page = page();
        assert!(matches!(page.filter_on("nope"), Err(FilterError::UnknownFilter(_))));
        assert!(matches!(page.toggle_popup("nope"), Err(FilterError::UnknownFilter(_))));
        assert!(matches!(page.set_outlier("r99", true), Err(FilterError::UnknownRow(_))));
    }

    #[test]
    fn test_toggle_popup() {
        let mut page = page();
        page.toggle_popup("task").unwrap();
        assert!(page.region("task").unwrap().active);

        page.toggle_popup("outlier").unwrap();
        assert!(!page.region("task").unwrap().active);
        assert!(page.region("outlier").unwrap().active);

        page.toggle_popup("outlier").unwrap();
        assert!(!page.region("outlier").unwrap().active);

        page.toggle_popup("task").unwrap();
        page.close_popups();
        assert!(!page.region("task").unwrap().active);
    }

    #[test]
    fn test_filter_on_closes_popup() {
        let mut page = page();
        page.toggle_popup("task").unwrap();
        page.filter_on("task").unwrap();
        assert!(!page.region("task").unwrap().active);
    }

    #[test]
    fn test_clear_field() {
        let mut page = page();
        page.set_criteria(
            "task",
            Criteria::Substring {
                include: "review".to_string(),
                exclude: "draft".to_string(),
            },
        )
        .unwrap();
        page.clear_field("task", "include").unwrap();
        assert_eq!(
            page.region("task").unwrap().state.criteria,
            Criteria::Substring {
                include: String::new(),
                exclude: "draft".to_string(),
            }
        );

        let err = page.clear_field("task", "min").unwrap_err();
        assert!(matches!(err, FilterError::UnknownField { .. }));
        assert!(page.clear_field("outlier", "include").is_err());
    }

    #[test]
    fn test_outlier_follows_checkboxes() {
        let mut page = page();
        assert!(!page.is_enabled("outlier"));

        let report = page.set_outlier("r2", true).unwrap();
        assert!(page.is_enabled("outlier"));
        assert_eq!(report.visible, 1);
        assert!(page.row("r2").unwrap().excluded);

        // manual toggles are overridden by the checkbox state
        page.filter_off("outlier").unwrap();
        assert!(page.is_enabled("outlier"));

        page.set_outlier("r2", false).unwrap();
        assert!(!page.is_enabled("outlier"));
        page.filter_on("outlier").unwrap();
        assert!(!page.is_enabled("outlier"));
        assert_eq!(page.visible_rows().count(), 2);
    }

    #[test]
    fn test_set_outlier_without_filter() {
        let mut page = FilterPage::new(NumberFormat::POINT);
        page.add_row(Row::new("r1"));
        assert!(matches!(page.set_outlier("r1", true), Err(FilterError::UnknownFilter(_))));
    }

    #[test]
    fn test_set_outlier_creates_missing_cell() {
        let mut page = page();
        page.add_row(Row::new("r3"));
        page.set_outlier("r3", true).unwrap();
        assert!(page.row("r3").unwrap().cells["outlier"].checked);
        assert!(page.row("r3").unwrap().excluded);
    }

    #[test]
    fn test_dispatch_routes_events() {
        let mut page = page();
        assert!(page
            .dispatch(UiEvent::TogglePopup { id: "task".to_string() })
            .unwrap()
            .is_none());
        let report = page
            .dispatch(UiEvent::SetOutlier {
                row: "r1".to_string(),
                checked: true,
            })
            .unwrap()
            .unwrap();
        assert_eq!(report.excluded, 1);
        assert!(page.dispatch(UiEvent::ClosePopups).unwrap().is_none());
    }

    #[test]
    fn test_add_row_clears_unknown_markers() {
        let mut page = page();
        let mut stray = Cell::text("x");
        stray.excluded = true;
        page.add_row(Row::new("r3").with_cell("elsewhere", stray));
        assert!(!page.row("r3").unwrap().cells["elsewhere"].excluded);
        assert!(!page.row("r3").unwrap().excluded);
    }

    #[test]
    fn test_add_row_aligns_row_marker_with_cells() {
        let mut page = page();

        let mut clean = Row::new("r3").with_cell("task", Cell::text("Review"));
        clean.excluded = true;
        page.add_row(clean);
        assert!(!page.row("r3").unwrap().excluded);

        let mut marked = Cell::text("Review");
        marked.excluded = true;
        page.add_row(Row::new("r4").with_cell("task", marked));
        assert!(page.row("r4").unwrap().excluded);
    }

    #[test]
    fn test_initial_pass_reports_self_disabled_filters() {
        let snapshot = PageSnapshot::from_json(
            r#"{
                "filters": [{"id": "size", "enabled": true}],
                "rows": [{"id": "r1", "cells": {"size": {"text": "4"}}}]
            }"#,
        )
        .unwrap();

        let page = FilterPage::from_snapshot(snapshot, NumberFormat::POINT).unwrap();
        assert!(!page.is_enabled("size"));
        assert_eq!(page.last_report().self_disabled, vec!["size".to_string()]);
        assert_eq!(page.last_report().visible, 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut page = page();
        page.set_outlier("r1", true).unwrap();

        let snapshot = page.snapshot();
        assert_eq!(snapshot.filters.len(), 2);
        assert_eq!(snapshot.filters[0].id, "task");
        assert_eq!(snapshot.filters[1].kind, Some(FilterKind::Outlier));
        assert!(snapshot.filters[1].enabled);
        assert!(snapshot.rows[0].excluded);
        assert!(snapshot.rows[0].cells["outlier"].excluded);
    }
}
