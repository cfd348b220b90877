use std::fmt;

use serde_json::Value;

/// An entity identifier — remote APIs key collections by strings or
/// integers, so both are accepted wherever an id is taken.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityId {
    Int(i64),
    Str(String),
}

impl EntityId {
    /// Strict comparison against a serialized identity field: no coercion
    /// between numeric and string forms.
    pub(crate) fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (EntityId::Int(id), Value::Number(number)) => number.as_i64() == Some(*id),
            (EntityId::Str(id), Value::String(text)) => id == text,
            _ => false,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(id) => write!(f, "{}", id),
            EntityId::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        EntityId::Int(id)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId::Int(id.into())
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        EntityId::Str(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        EntityId::Str(id)
    }
}
