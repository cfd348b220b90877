use std::fmt;

use regex::Regex;
use serde_json::Value;

/// Result of a custom check — the tagged replacement for the original
/// `true | string | falsy` convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Valid,
    /// Fail with the rule's (or the default) message.
    Invalid,
    /// Fail with a message supplied by the check itself.
    InvalidWith(String),
}

type CustomCheck = Box<dyn Fn(&Value) -> CheckOutcome + Send + Sync>;

/// Static validation configuration for one field.
///
/// Evaluation order, short-circuiting at the first failure:
/// required → (empty short-circuit) → min/max length → pattern → custom.
/// Length and pattern checks apply to string values only; other value
/// types pass them. A configured `message` overrides every default.
#[derive(Default)]
pub struct Rule {
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
    custom: Option<CustomCheck>,
    message: Option<String>,
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on null, missing, or empty-string values.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> CheckOutcome + Send + Sync + 'static,
    {
        self.custom = Some(Box::new(check));
        self
    }

    /// Override the default failure messages for this rule.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Evaluate the rule against a value. Returns the failure message, or
    /// `None` when the value passes.
    pub fn check(&self, field: &str, value: &Value) -> Option<String> {
        let blank = is_blank(value);

        if self.required && blank {
            return Some(self.message_or(format!("{} is required", field)));
        }

        // Optional fields skip every other check while empty.
        if !self.required && blank {
            return None;
        }

        if let Some(min) = self.min_length {
            if let Value::String(text) = value {
                if text.chars().count() < min {
                    return Some(self.message_or(format!(
                        "{} must be at least {} characters",
                        field, min
                    )));
                }
            }
        }

        if let Some(max) = self.max_length {
            if let Value::String(text) = value {
                if text.chars().count() > max {
                    return Some(self.message_or(format!(
                        "{} must be at most {} characters",
                        field, max
                    )));
                }
            }
        }

        if let Some(pattern) = &self.pattern {
            if let Value::String(text) = value {
                if !pattern.is_match(text) {
                    return Some(self.message_or(format!("{} format is invalid", field)));
                }
            }
        }

        if let Some(custom) = &self.custom {
            match custom(value) {
                CheckOutcome::Valid => {}
                CheckOutcome::Invalid => {
                    return Some(self.message_or(format!("{} is invalid", field)));
                }
                CheckOutcome::InvalidWith(message) => return Some(message),
            }
        }

        None
    }

    fn message_or(&self, default: String) -> String {
        self.message.clone().unwrap_or(default)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("custom", &self.custom.is_some())
            .field("message", &self.message)
            .finish()
    }
}

/// Null, missing, or empty string.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}
