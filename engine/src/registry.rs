//! Filter registry
//!
//! Records which filters a page has, in document order, and which kind of
//! predicate builder each one uses.

use std::collections::HashMap;

use tablesift_shared::{FilterError, FilterId, FilterKind, Result};

/// Ordered set of registered filters
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    order: Vec<FilterId>,
    kinds: HashMap<FilterId, FilterKind>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filter with an explicit kind
    pub fn register(&mut self, id: impl Into<FilterId>, kind: FilterKind) -> Result<()> {
        let id = id.into();
        if self.kinds.contains_key(&id) {
            return Err(FilterError::DuplicateFilter(id));
        }
        self.kinds.insert(id.clone(), kind);
        self.order.push(id);
        Ok(())
    }

    /// Register a filter using the kind its id maps to
    pub fn register_default(&mut self, id: impl Into<FilterId>) -> Result<FilterKind> {
        let id = id.into();
        let kind = FilterKind::for_id(&id);
        self.register(id, kind)?;
        Ok(kind)
    }

    /// Registered filter ids in registration (document) order
    pub fn active_filter_ids(&self) -> &[FilterId] {
        &self.order
    }

    pub fn kind(&self, id: &str) -> Option<FilterKind> {
        self.kinds.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.kinds.contains_key(id)
    }

    /// Ids of all filters of the given kind, in registration order
    pub fn ids_of_kind(&self, kind: FilterKind) -> impl Iterator<Item = &FilterId> + '_ {
        self.order
            .iter()
            .filter(move |id| self.kinds.get(id.as_str()) == Some(&kind))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order_is_preserved() {
        let mut registry = FilterRegistry::new();
        for id in ["task", "size", "proj", "date"] {
            registry.register_default(id).unwrap();
        }

        assert_eq!(registry.active_filter_ids(), ["task", "size", "proj", "date"]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_default_kinds() {
        let mut registry = FilterRegistry::new();
        assert_eq!(registry.register_default("label").unwrap(), FilterKind::Selection);
        assert_eq!(registry.register_default("hours").unwrap(), FilterKind::NumericRange);
        assert_eq!(registry.kind("label"), Some(FilterKind::Selection));
        assert_eq!(registry.kind("missing"), None);
    }

    #[test]
    fn test_explicit_kind_overrides_default() {
        let mut registry = FilterRegistry::new();
        registry.register("task", FilterKind::NumericRange).unwrap();
        assert_eq!(registry.kind("task"), Some(FilterKind::NumericRange));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = FilterRegistry::new();
        registry.register_default("proj").unwrap();
        let err = registry.register_default("proj").unwrap_err();
        assert!(matches!(err, FilterError::DuplicateFilter(id) if id == "proj"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ids_of_kind() {
        let mut registry = FilterRegistry::new();
        for id in ["proj", "size", "label", "outlier"] {
            registry.register_default(id).unwrap();
        }
        let selections: Vec<&FilterId> = registry.ids_of_kind(FilterKind::Selection).collect();
        assert_eq!(selections, ["proj", "label"]);
        assert!(FilterRegistry::new().is_empty());
    }
}
