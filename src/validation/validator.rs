use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::rule::Rule;
use crate::error::ValidationError;

/// Evaluates a static set of per-field rules and collects the error set.
///
/// Rules keep their registration order — `validate_all` reports errors in
/// that order, with at most one entry per field. The touched set is
/// independent bookkeeping for consumers (e.g. "show errors only after
/// blur") and never affects validation outcomes.
#[derive(Debug, Default)]
pub struct Validator {
    rules: Vec<(String, Rule)>,
    errors: Vec<ValidationError>,
    touched: BTreeSet<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the rule for a field; registering a field twice replaces
    /// the earlier rule in place.
    pub fn rule(mut self, field: impl Into<String>, rule: Rule) -> Self {
        self.add_rule(field, rule);
        self
    }

    pub fn add_rule(&mut self, field: impl Into<String>, rule: Rule) {
        let field = field.into();
        match self.rules.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = rule,
            None => self.rules.push((field, rule)),
        }
    }

    /// Evaluate one field without touching the error set. Returns the
    /// failure message, or `None` when the value passes (or no rule is
    /// registered for the field).
    pub fn check(&self, field: &str, value: &Value) -> Option<String> {
        let (_, rule) = self.rules.iter().find(|(name, _)| name == field)?;
        rule.check(field, value)
    }

    /// Validate one field, replacing any prior error recorded for it.
    pub fn validate_field(&mut self, field: &str, value: &Value) -> bool {
        let message = self.check(field, value);
        self.errors.retain(|e| e.field != field);
        match message {
            Some(message) => {
                self.errors.push(ValidationError::new(field, message));
                false
            }
            None => true,
        }
    }

    /// Validate every configured field against a data object, replacing the
    /// whole error set. Missing fields validate as null.
    pub fn validate_all(&mut self, data: &Map<String, Value>) -> bool {
        self.errors.clear();
        for (field, rule) in &self.rules {
            let value = data.get(field).unwrap_or(&Value::Null);
            if let Some(message) = rule.check(field, value) {
                self.errors.push(ValidationError::new(field, message));
            }
        }
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn has_field_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn touch(&mut self, field: impl Into<String>) {
        self.touched.insert(field.into());
    }

    pub fn untouch(&mut self, field: &str) {
        self.touched.remove(field);
    }

    /// Mark every configured field as touched.
    pub fn touch_all(&mut self) {
        let fields: Vec<String> = self.rules.iter().map(|(name, _)| name.clone()).collect();
        self.touched.extend(fields);
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Clear the error set and the touched set. Rules are kept.
    pub fn reset(&mut self) {
        self.errors.clear();
        self.touched.clear();
    }
}
