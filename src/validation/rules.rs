//! Ready-made rule constructors for common field shapes.
//!
//! Each constructor returns a [`Rule`] with a sensible default message;
//! chain [`Rule::message`] to override it.

use regex::Regex;
use serde_json::Value;

use super::checks;
use super::rule::{CheckOutcome, Rule};

pub fn required() -> Rule {
    Rule::new().required().message("This field is required")
}

pub fn min_length(min: usize) -> Rule {
    Rule::new()
        .min_length(min)
        .message(format!("Must be at least {} characters", min))
}

pub fn max_length(max: usize) -> Rule {
    Rule::new()
        .max_length(max)
        .message(format!("Must be at most {} characters", max))
}

pub fn email() -> Rule {
    Rule::new()
        .pattern(compile(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"))
        .message("Invalid email address")
}

pub fn url() -> Rule {
    Rule::new()
        .pattern(compile(r"^https?://.+"))
        .message("Invalid URL")
}

pub fn phone() -> Rule {
    Rule::new()
        .pattern(compile(r"^[\d\s\-\+\(\)]+$"))
        .message("Invalid phone number")
}

pub fn numeric() -> Rule {
    Rule::new().pattern(compile(r"^\d+$")).message("Must be numeric")
}

pub fn alphanumeric() -> Rule {
    Rule::new()
        .pattern(compile(r"^[a-zA-Z0-9]+$"))
        .message("Must be alphanumeric")
}

pub fn alphabetic() -> Rule {
    Rule::new()
        .pattern(compile(r"^[a-zA-Z]+$"))
        .message("Must be alphabetic")
}

pub fn min_value(min: f64) -> Rule {
    Rule::new()
        .custom(move |value| outcome(numeric_value(value).map_or(false, |n| n >= min)))
        .message(format!("Must be at least {}", min))
}

pub fn max_value(max: f64) -> Rule {
    Rule::new()
        .custom(move |value| outcome(numeric_value(value).map_or(false, |n| n <= max)))
        .message(format!("Must be at most {}", max))
}

pub fn range(min: f64, max: f64) -> Rule {
    Rule::new()
        .custom(move |value| {
            outcome(numeric_value(value).map_or(false, |n| n >= min && n <= max))
        })
        .message(format!("Must be between {} and {}", min, max))
}

/// At least 8 characters with uppercase, lowercase, and a digit.
pub fn password() -> Rule {
    Rule::new()
        .custom(|value| {
            outcome(as_str(value).map_or(false, |text| {
                text.chars().count() >= 8
                    && text.chars().any(|c| c.is_ascii_lowercase())
                    && text.chars().any(|c| c.is_ascii_uppercase())
                    && text.chars().any(|c| c.is_ascii_digit())
            }))
        })
        .message("Password must be at least 8 characters with uppercase, lowercase, and number")
}

/// [`password`] plus a special character.
pub fn strong_password() -> Rule {
    Rule::new()
        .custom(|value| outcome(as_str(value).map_or(false, checks::is_strong_password)))
        .message(
            "Password must be at least 8 characters with uppercase, lowercase, number, and special character",
        )
}

/// Luhn-checked card number; separators are tolerated.
pub fn credit_card() -> Rule {
    Rule::new()
        .custom(|value| outcome(as_str(value).map_or(false, checks::is_credit_card)))
        .message("Invalid credit card number")
}

pub fn zip_code() -> Rule {
    Rule::new()
        .pattern(compile(r"^\d{5}(-\d{4})?$"))
        .message("Invalid ZIP code")
}

pub fn ssn() -> Rule {
    Rule::new()
        .pattern(compile(r"^\d{3}-\d{2}-\d{4}$"))
        .message("Invalid SSN (format: XXX-XX-XXXX)")
}

/// Structural equality against another field's value (e.g. password
/// confirmation).
pub fn match_value(field_name: &str, expected: Value) -> Rule {
    Rule::new()
        .custom(move |value| outcome(value == &expected))
        .message(format!("Must match {}", field_name))
}

pub fn date() -> Rule {
    Rule::new()
        .custom(|value| outcome(as_str(value).map_or(false, checks::is_date)))
        .message("Invalid date")
}

pub fn future_date() -> Rule {
    Rule::new()
        .custom(|value| outcome(as_str(value).map_or(false, checks::is_future_date)))
        .message("Date must be in the future")
}

pub fn past_date() -> Rule {
    Rule::new()
        .custom(|value| outcome(as_str(value).map_or(false, checks::is_past_date)))
        .message("Date must be in the past")
}

fn outcome(valid: bool) -> CheckOutcome {
    if valid {
        CheckOutcome::Valid
    } else {
        CheckOutcome::Invalid
    }
}

fn as_str(value: &Value) -> Option<&str> {
    value.as_str()
}

/// Coerce numbers and numeric strings, the way the original's `Number()`
/// coercion did.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn compile(pattern: &str) -> Regex {
    // All call sites pass library constants.
    Regex::new(pattern).expect("static validation pattern")
}
