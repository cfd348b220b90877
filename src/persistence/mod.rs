//! Persistence - Snapshot a tracked list into a pluggable key-value store.
//!
//! The store collaborator is deliberately tiny (get/set/remove of strings);
//! browsers map it onto local/session storage, servers onto whatever fits.
//! Store failures are logged and swallowed — persistence is a convenience,
//! never a reason to fail the caller.

mod persisted_list;
mod store;

pub use persisted_list::PersistedList;
pub use store::{KeyValueStore, MemoryStore, StorageError};
