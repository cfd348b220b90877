use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::store::KeyValueStore;

/// Persists a whole list as one serialized value under a fixed key.
///
/// Saving is explicit — call [`save`](PersistedList::save) after each
/// mutation of the tracked list. Every store or serialization failure is
/// logged and swallowed; the methods report success as booleans instead of
/// errors.
pub struct PersistedList<T> {
    store: Box<dyn KeyValueStore>,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PersistedList<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        PersistedList {
            store: Box::new(store),
            key: key.into(),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialize and store the list. Returns false on any failure.
    pub fn save(&self, items: &[T]) -> bool {
        let serialized = match serde_json::to_string(items) {
            Ok(serialized) => serialized,
            Err(error) => {
                warn!(key = %self.key, %error, "failed to serialize list for storage");
                return false;
            }
        };
        match self.store.set(&self.key, &serialized) {
            Ok(()) => true,
            Err(error) => {
                warn!(key = %self.key, %error, "failed to save list to storage");
                false
            }
        }
    }

    /// Load and decode the stored list. Returns `None` when nothing is
    /// stored or on any failure.
    pub fn restore(&self) -> Option<Vec<T>> {
        let stored = match self.store.get(&self.key) {
            Ok(stored) => stored?,
            Err(error) => {
                warn!(key = %self.key, %error, "failed to read list from storage");
                return None;
            }
        };
        match serde_json::from_str(&stored) {
            Ok(items) => Some(items),
            Err(error) => {
                warn!(key = %self.key, %error, "failed to decode stored list");
                None
            }
        }
    }

    /// Remove the stored value. Returns false on failure.
    pub fn clear(&self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => true,
            Err(error) => {
                warn!(key = %self.key, %error, "failed to clear stored list");
                false
            }
        }
    }

    pub fn has_stored(&self) -> bool {
        matches!(self.store.get(&self.key), Ok(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StorageError};

    #[test]
    fn save_restore_clear_roundtrip() {
        let store = MemoryStore::new();
        let list: PersistedList<u32> = PersistedList::new(store, "numbers");

        assert!(!list.has_stored());
        assert!(list.save(&[1, 2, 3]));
        assert!(list.has_stored());
        assert_eq!(list.restore(), Some(vec![1, 2, 3]));

        assert!(list.clear());
        assert!(!list.has_stored());
        assert_eq!(list.restore(), None);
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Backend("quota exceeded".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".into()))
        }
        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".into()))
        }
    }

    #[test]
    fn failures_are_swallowed() {
        let list: PersistedList<u32> = PersistedList::new(FailingStore, "numbers");
        assert!(!list.save(&[1]));
        assert_eq!(list.restore(), None);
        assert!(!list.clear());
        assert!(!list.has_stored());
    }
}
