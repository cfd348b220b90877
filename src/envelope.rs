//! Response envelope — the wrapper every remote endpoint answers with.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// The `{ success, data, message, errors }` wrapper around every remote
/// response.
///
/// `data` defaults to `null` so failure envelopes that omit it still decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationError>>,
}

impl Envelope {
    /// Build a success envelope carrying `data`.
    pub fn ok(data: Value) -> Self {
        Envelope {
            success: true,
            data,
            message: None,
            errors: None,
        }
    }

    /// Build a failure envelope carrying a message.
    pub fn fail(message: impl Into<String>) -> Self {
        Envelope {
            success: false,
            data: Value::Null,
            message: Some(message.into()),
            errors: None,
        }
    }

    /// Collapse the success flag into a tagged result: `Ok(data)` on
    /// success, otherwise `Err` with the server message or `fallback`.
    pub fn into_result(self, fallback: &str) -> Result<Value, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.message.unwrap_or_else(|| fallback.to_string()))
        }
    }
}

/// One page of a server-paginated collection, decoded from envelope `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}
