use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Error type for key-value store operations.
///
/// Surfaced by [`KeyValueStore`] implementations, but swallowed (and
/// logged) by [`PersistedList`](super::PersistedList).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backing store rejected the operation.
    Backend(String),
    /// Stored data could not be serialized or deserialized.
    Serde(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Backend(msg) => write!(f, "storage backend error: {}", msg),
            StorageError::Serde(msg) => write!(f, "storage serde error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// A string-valued key-value store (local storage, session storage, …).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store backed by a HashMap. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::Backend("lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Backend("lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Backend("lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}
