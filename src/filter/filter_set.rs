use serde::Serialize;
use serde_json::Value;

use super::filter::{stringify, Filter, FilterValue};

/// An ordered set of per-field filters plus one global free-text filter.
///
/// Holds at most one filter per field: setting a filter for an
/// already-filtered field updates the existing entry in place, preserving
/// its position in iteration (and therefore query-string) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    filters: Vec<Filter>,
    global: String,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update the filter for `filter.field`.
    pub fn set(&mut self, filter: Filter) {
        match self.filters.iter_mut().find(|f| f.field == filter.field) {
            Some(existing) => *existing = filter,
            None => self.filters.push(filter),
        }
    }

    /// Update the value for `field`, keeping its current match mode; new
    /// fields get the default `contains` mode.
    pub fn set_value(&mut self, field: &str, value: impl Into<FilterValue>) {
        match self.filters.iter_mut().find(|f| f.field == field) {
            Some(existing) => existing.value = value.into(),
            None => self.filters.push(Filter::new(field, value)),
        }
    }

    /// Replace all field filters (last-set wins per field). The global
    /// filter is untouched.
    pub fn set_all(&mut self, filters: Vec<Filter>) {
        self.filters.clear();
        for filter in filters {
            self.set(filter);
        }
    }

    /// Remove the filter for `field`. Returns true if one existed.
    pub fn remove(&mut self, field: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.field != field);
        self.filters.len() != before
    }

    /// Clear all field filters, leaving the global filter alone.
    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn set_global(&mut self, needle: impl Into<String>) {
        self.global = needle.into();
    }

    pub fn global(&self) -> &str {
        &self.global
    }

    pub fn clear_global(&mut self) {
        self.global.clear();
    }

    /// Clear field filters and the global filter.
    pub fn clear_all(&mut self) {
        self.filters.clear();
        self.global.clear();
    }

    pub fn get(&self, field: &str) -> Option<&Filter> {
        self.filters.iter().find(|f| f.field == field)
    }

    pub fn value_of(&self, field: &str) -> Option<&FilterValue> {
        self.get(field).map(|f| &f.value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Number of field filters (the global filter is not counted).
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// True when any field filter or a non-empty global filter is active.
    pub fn has_any(&self) -> bool {
        !self.filters.is_empty() || !self.global.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    /// Test one item against every field filter (AND) and the global filter.
    pub fn matches<T: Serialize>(&self, item: &T) -> bool {
        let value = match serde_json::to_value(item) {
            Ok(value) => value,
            Err(_) => return false,
        };
        self.matches_value(&value)
    }

    /// Evaluate the whole set against an in-memory slice, keeping the items
    /// that pass every field filter and the global filter.
    pub fn apply<T: Serialize + Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .filter(|item| self.matches(*item))
            .cloned()
            .collect()
    }

    fn matches_value(&self, item: &Value) -> bool {
        if !self.filters.iter().all(|filter| filter.matches(item)) {
            return false;
        }
        self.matches_global(item)
    }

    fn matches_global(&self, item: &Value) -> bool {
        if self.global.is_empty() {
            return true;
        }
        let needle = self.global.to_lowercase();
        match item {
            Value::Object(map) => map
                .values()
                .filter(|value| !value.is_null())
                .any(|value| stringify(value).to_lowercase().contains(&needle)),
            _ => false,
        }
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for filter in iter {
            set.set(filter);
        }
        set
    }
}
