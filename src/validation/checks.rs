//! Standalone format predicates used by the rule constructors and usable
//! directly.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;
use serde_json::Value;

/// Postal code country variants supported by [`is_postal_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Country {
    Us,
    Ca,
    Uk,
}

pub fn is_email(value: &str) -> bool {
    matches_pattern(value, r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
}

/// True when the value parses as an absolute URL.
pub fn is_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

pub fn is_phone(value: &str) -> bool {
    matches_pattern(value, r"^[\d\s\-\+\(\)]{10,}$")
}

/// True when the value parses as a finite number.
pub fn is_numeric(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(f64::is_finite)
        .unwrap_or(false)
}

pub fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn is_alphabetic(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
}

/// Null, blank string, empty array, or empty object.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(values) => values.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

pub fn is_not_empty(value: &Value) -> bool {
    !is_empty(value)
}

pub fn is_in_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

pub fn is_length(value: &str, min: usize, max: Option<usize>) -> bool {
    let length = value.chars().count();
    match max {
        Some(max) => length >= min && length <= max,
        None => length >= min,
    }
}

/// Luhn check over the digits of the value (non-digits are stripped).
/// Accepts 13–19 digit numbers.
pub fn is_credit_card(value: &str) -> bool {
    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }

    let mut sum = 0;
    let mut double = false;
    for &digit in digits.iter().rev() {
        let mut digit = digit;
        if double {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
        double = !double;
    }

    sum % 10 == 0
}

/// Dotted-quad IPv4 with each octet in 0–255.
pub fn is_ipv4(value: &str) -> bool {
    let parts: Vec<&str> = value.split('.').collect();
    parts.len() == 4
        && parts.iter().all(|part| {
            !part.is_empty()
                && part.len() <= 3
                && part.chars().all(|c| c.is_ascii_digit())
                && part.parse::<u16>().map(|n| n <= 255).unwrap_or(false)
        })
}

/// Full-form IPv6 (eight colon-separated hex groups, no `::` shorthand).
pub fn is_ipv6(value: &str) -> bool {
    let groups: Vec<&str> = value.split(':').collect();
    groups.len() == 8
        && groups.iter().all(|group| {
            !group.is_empty()
                && group.len() <= 4
                && group.chars().all(|c| c.is_ascii_hexdigit())
        })
}

/// `#rgb` or `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(rest) => {
            (rest.len() == 3 || rest.len() == 6)
                && rest.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

pub fn is_uuid(value: &str) -> bool {
    matches_pattern(
        &value.to_lowercase(),
        r"^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$",
    )
}

pub fn is_slug(value: &str) -> bool {
    matches_pattern(value, r"^[a-z0-9]+(?:-[a-z0-9]+)*$")
}

pub fn is_base64(value: &str) -> bool {
    matches_pattern(value, r"^[A-Za-z0-9+/]*={0,2}$")
}

pub fn is_mac_address(value: &str) -> bool {
    matches_pattern(value, r"^([0-9A-Fa-f]{2}[:-]){5}([0-9A-Fa-f]{2})$")
}

pub fn is_postal_code(value: &str, country: Country) -> bool {
    let pattern = match country {
        Country::Us => r"^\d{5}(-\d{4})?$",
        Country::Ca => r"^[A-Z]\d[A-Z] \d[A-Z]\d$",
        Country::Uk => r"^[A-Z]{1,2}\d{1,2} \d[A-Z]{2}$",
    };
    matches_pattern(value, pattern)
}

pub fn is_json(value: &str) -> bool {
    serde_json::from_str::<Value>(value).is_ok()
}

/// At least 8 characters with lowercase, uppercase, digit, and one of
/// `@$!%*?&`.
pub fn is_strong_password(value: &str) -> bool {
    value.chars().count() >= 8
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| "@$!%*?&".contains(c))
}

pub fn is_weak_password(value: &str) -> bool {
    value.chars().count() < 8
}

/// RFC 3339 timestamps or `YYYY-MM-DD` dates.
pub fn is_date(value: &str) -> bool {
    parse_date(value).is_some()
}

pub fn is_future_date(value: &str) -> bool {
    parse_date(value).map(|date| date > Utc::now()).unwrap_or(false)
}

pub fn is_past_date(value: &str) -> bool {
    parse_date(value).map(|date| date < Utc::now()).unwrap_or(false)
}

pub(crate) fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }
    None
}

fn matches_pattern(value: &str, pattern: &str) -> bool {
    Regex::new(pattern)
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}
