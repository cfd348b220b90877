//! Error types for CRUD and pagination operations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error type for remote collection operations.
///
/// Each variant carries the entity-scoped message: the server's envelope
/// message when one was given, otherwise a generic per-operation fallback.
/// Transport and decode failures are folded into the variant of the
/// operation that issued the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrudError {
    /// A fetch (full collection, by id, or paginated page) failed.
    Fetch(String),
    /// A create submission failed.
    Create(String),
    /// An update submission failed.
    Update(String),
    /// A delete submission failed.
    Delete(String),
}

impl CrudError {
    /// The failure message, as shown to passive UI consumers.
    pub fn message(&self) -> &str {
        match self {
            CrudError::Fetch(msg)
            | CrudError::Create(msg)
            | CrudError::Update(msg)
            | CrudError::Delete(msg) => msg,
        }
    }

    /// Short name of the failed operation kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CrudError::Fetch(_) => "fetch",
            CrudError::Create(_) => "create",
            CrudError::Update(_) => "update",
            CrudError::Delete(_) => "delete",
        }
    }
}

impl fmt::Display for CrudError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CrudError {}

/// A field-level validation failure.
///
/// Carried as data in envelopes and validator error sets — never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
