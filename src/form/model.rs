use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

/// A working copy of a flat record tracked against an original snapshot.
///
/// `is_dirty` is authoritative for "any changes" and is recomputed by
/// structural comparison of the working copy against the snapshot on every
/// mutation. `dirty_fields`/`changes` cover only fields touched through the
/// explicit update API — a field updated back to its original value stays
/// marked, but contributes nothing to `changes`.
#[derive(Debug, Clone, PartialEq)]
pub struct FormModel {
    data: Map<String, Value>,
    original: Map<String, Value>,
    dirty_fields: BTreeSet<String>,
    dirty: bool,
}

impl FormModel {
    pub fn new(initial: Map<String, Value>) -> Self {
        FormModel {
            data: initial.clone(),
            original: initial,
            dirty_fields: BTreeSet::new(),
            dirty: false,
        }
    }

    /// Build a model from any serializable record. Fails if the record does
    /// not serialize to a JSON object.
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(record)? {
            Value::Object(map) => Ok(Self::new(map)),
            other => Err(serde::ser::Error::custom(format!(
                "form records must serialize to objects, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Assign one field in the working copy and mark it dirty.
    pub fn update_field(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        self.data.insert(field.clone(), value.into());
        self.dirty_fields.insert(field);
        self.check_dirty();
    }

    /// Shallow-assign several fields and mark each dirty.
    pub fn update_fields(&mut self, updates: Map<String, Value>) {
        for (field, value) in updates {
            self.dirty_fields.insert(field.clone());
            self.data.insert(field, value);
        }
        self.check_dirty();
    }

    /// Replace the whole working copy without touching dirty markers or the
    /// original snapshot.
    pub fn set_data(&mut self, data: Map<String, Value>) {
        self.data = data;
        self.check_dirty();
    }

    /// Restore the working copy from the original snapshot and clear all
    /// dirty markers.
    pub fn reset(&mut self) {
        self.data = self.original.clone();
        self.dirty_fields.clear();
        self.dirty = false;
    }

    /// Re-baseline: replace both the working copy and the original snapshot
    /// with `data`. Used after a successful save.
    pub fn reset_to(&mut self, data: Map<String, Value>) {
        self.data = data.clone();
        self.original = data;
        self.dirty_fields.clear();
        self.dirty = false;
    }

    /// Restore one field from the original snapshot and unmark it.
    pub fn revert_field(&mut self, field: &str) {
        match self.original.get(field) {
            Some(value) => {
                self.data.insert(field.to_string(), value.clone());
            }
            None => {
                self.data.remove(field);
            }
        }
        self.dirty_fields.remove(field);
        self.check_dirty();
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn original(&self) -> &Map<String, Value> {
        &self.original
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// True when the working copy differs structurally from the snapshot.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Fields touched via the update API since the last reset/rebaseline.
    pub fn dirty_fields(&self) -> Vec<&str> {
        self.dirty_fields.iter().map(String::as_str).collect()
    }

    /// Explicitly-touched fields whose current value differs from the
    /// original.
    pub fn changes(&self) -> Map<String, Value> {
        let mut changes = Map::new();
        for field in &self.dirty_fields {
            let current = self.data.get(field);
            if current != self.original.get(field) {
                if let Some(value) = current {
                    changes.insert(field.clone(), value.clone());
                }
            }
        }
        changes
    }

    /// Structural comparison of one field against the snapshot, independent
    /// of the dirty markers.
    pub fn is_field_dirty(&self, field: &str) -> bool {
        self.data.get(field) != self.original.get(field)
    }

    fn check_dirty(&mut self) {
        self.dirty = self.data != self.original;
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> Map<String, Value> {
        json!({ "name": "Ann", "age": 30 })
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn update_then_reset_restores_original() {
        let mut form = FormModel::new(record());
        form.update_field("name", "Bea");
        assert!(form.is_dirty());

        form.reset();
        assert!(!form.is_dirty());
        assert_eq!(form.data(), &record());
        assert!(form.dirty_fields().is_empty());
    }

    #[test]
    fn updating_back_to_original_clears_is_dirty_but_keeps_marker() {
        let mut form = FormModel::new(record());
        form.update_field("name", "Bea");
        form.update_field("name", "Ann");

        assert!(!form.is_dirty());
        assert_eq!(form.dirty_fields(), vec!["name"]);
        assert!(form.changes().is_empty());
    }

    #[test]
    fn changes_only_cover_touched_fields() {
        let mut form = FormModel::new(record());
        form.update_field("age", 31);
        // set_data bypasses markers entirely.
        let mut data = form.data().clone();
        data.insert("name".to_string(), json!("Bea"));
        form.set_data(data);

        assert!(form.is_dirty());
        assert!(form.is_field_dirty("name"));
        assert_eq!(form.changes(), json!({ "age": 31 }).as_object().cloned().unwrap());
    }

    #[test]
    fn reset_to_rebaselines() {
        let mut form = FormModel::new(record());
        form.update_field("name", "Bea");
        let saved = form.data().clone();
        form.reset_to(saved.clone());

        assert!(!form.is_dirty());
        assert_eq!(form.original(), &saved);
    }

    #[test]
    fn from_record_rejects_non_objects() {
        assert!(FormModel::from_record(&vec![1, 2, 3]).is_err());
    }
}
