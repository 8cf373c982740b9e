//! UI events accepted by a [`FilterPage`](crate::page::FilterPage)

use serde::{Deserialize, Serialize};
use tablesift_shared::{Criteria, FilterId, RowId};

/// A user interaction with the report page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// "Apply" button of a filter region
    FilterOn { id: FilterId },

    /// "Remove" button of a filter region
    FilterOff { id: FilterId },

    /// Header link that opens or closes a filter popup
    TogglePopup { id: FilterId },

    /// Click outside the filter row
    ClosePopups,

    /// New input values for a filter
    SetCriteria { id: FilterId, criteria: Criteria },

    /// Clear button next to a text field
    ClearField { id: FilterId, field: String },

    /// Outlier checkbox of a row
    SetOutlier { row: RowId, checked: bool },
}

impl UiEvent {
    /// Parse a JSON array of events
    pub fn list_from_json(json: &str) -> tablesift_shared::Result<Vec<UiEvent>> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_list_json() {
        let json = r#"[
            {"type": "filter_on", "id": "task"},
            {"type": "close_popups"},
            {"type": "set_criteria", "id": "size",
             "criteria": {"type": "numeric_range", "min": "1", "max": "2"}},
            {"type": "clear_field", "id": "task", "field": "include"},
            {"type": "set_outlier", "row": "r7", "checked": true}
        ]"#;

        let events = UiEvent::list_from_json(json).unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], UiEvent::FilterOn { id: "task".to_string() });
        assert_eq!(events[1], UiEvent::ClosePopups);
        assert_eq!(
            events[4],
            UiEvent::SetOutlier {
                row: "r7".to_string(),
                checked: true,
            }
        );
    }

    #[test]
    fn test_unknown_event_type_is_error() {
        assert!(UiEvent::list_from_json(r#"[{"type": "explode"}]"#).is_err());
    }
}
