use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison strategy for testing a field value against a filter value.
///
/// Serialized in camelCase — the form the query-string wire contract uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchMode {
    StartsWith,
    EndsWith,
    #[default]
    Contains,
    NotContains,
    Equals,
    NotEquals,
    In,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::StartsWith => "startsWith",
            MatchMode::EndsWith => "endsWith",
            MatchMode::Contains => "contains",
            MatchMode::NotContains => "notContains",
            MatchMode::Equals => "equals",
            MatchMode::NotEquals => "notEquals",
            MatchMode::In => "in",
        }
    }
}

/// The value a filter compares against: a single scalar or a membership
/// list (the latter only meaningful with [`MatchMode::In`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    List(Vec<Value>),
    Scalar(Value),
}

impl FilterValue {
    /// The filter value as comparison text: scalars stringified, lists
    /// comma-joined.
    pub fn as_text(&self) -> String {
        match self {
            FilterValue::Scalar(value) => stringify(value),
            FilterValue::List(values) => values
                .iter()
                .map(stringify)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => FilterValue::List(values),
            other => FilterValue::Scalar(other),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Scalar(Value::String(value.to_string()))
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Scalar(Value::String(value))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Scalar(Value::from(value))
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Scalar(Value::Bool(value))
    }
}

impl From<Vec<Value>> for FilterValue {
    fn from(values: Vec<Value>) -> Self {
        FilterValue::List(values)
    }
}

/// A single per-field filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub value: FilterValue,
    #[serde(default)]
    pub match_mode: MatchMode,
}

impl Filter {
    /// A filter with the default `contains` match mode.
    pub fn new(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Filter {
            field: field.into(),
            value: value.into(),
            match_mode: MatchMode::default(),
        }
    }

    pub fn with_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    /// Test this filter against one serialized item.
    ///
    /// An absent or null target field always excludes the item, for every
    /// match mode.
    pub fn matches(&self, item: &Value) -> bool {
        let field_value = match item.get(&self.field) {
            Some(value) if !value.is_null() => value,
            _ => return false,
        };

        if self.match_mode == MatchMode::In {
            // Membership is tested on the raw value, not its stringification.
            return match &self.value {
                FilterValue::List(options) => options.contains(field_value),
                FilterValue::Scalar(_) => false,
            };
        }

        let field_text = stringify(field_value).to_lowercase();
        let filter_text = self.value.as_text().to_lowercase();

        match self.match_mode {
            MatchMode::StartsWith => field_text.starts_with(&filter_text),
            MatchMode::EndsWith => field_text.ends_with(&filter_text),
            MatchMode::Contains => field_text.contains(&filter_text),
            MatchMode::NotContains => !field_text.contains(&filter_text),
            MatchMode::Equals => field_text == filter_text,
            MatchMode::NotEquals => field_text != filter_text,
            MatchMode::In => unreachable!("handled above"),
        }
    }
}

/// JS-style `String(value)` over the JSON value range: strings verbatim,
/// null as `"null"`, arrays comma-joined, everything else via Display.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_string(),
        Value::Array(values) => values
            .iter()
            .map(stringify)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stringify_follows_js_semantics() {
        assert_eq!(stringify(&json!("abc")), "abc");
        assert_eq!(stringify(&json!(30)), "30");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&json!(null)), "null");
        assert_eq!(stringify(&json!([1, "two", 3])), "1,two,3");
    }

    #[test]
    fn missing_field_excludes_for_every_mode() {
        let item = json!({ "name": "Ann" });
        for mode in [
            MatchMode::Contains,
            MatchMode::NotContains,
            MatchMode::NotEquals,
            MatchMode::In,
        ] {
            let filter = Filter::new("age", "x").with_mode(mode);
            assert!(!filter.matches(&item), "mode {:?}", mode);
        }
    }

    #[test]
    fn in_mode_compares_raw_values() {
        let filter = Filter::new("age", json!([25, 30])).with_mode(MatchMode::In);
        assert!(filter.matches(&json!({ "age": 30 })));
        // "30" is not the number 30 — no coercion.
        assert!(!filter.matches(&json!({ "age": "30" })));
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let filter = Filter::new("name", "ANN").with_mode(MatchMode::Equals);
        assert!(filter.matches(&json!({ "name": "ann" })));
    }
}
