use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::config::CrudConfig;
use super::id::EntityId;
use crate::envelope::Envelope;
use crate::error::CrudError;
use crate::transport::{HttpClient, HttpRequest};

struct State<T> {
    items: Vec<T>,
    current: Option<T>,
    loading: bool,
    error: Option<String>,
    fetch_seq: u64,
}

impl<T> Default for State<T> {
    fn default() -> Self {
        State {
            items: Vec::new(),
            current: None,
            loading: false,
            error: None,
            fetch_seq: 0,
        }
    }
}

/// Synchronizes a local collection with a remote one addressed by a base
/// endpoint.
///
/// The manager is `Clone`; clones share state, so several views can observe
/// the same collection. The `loading` and `error` fields are shared across
/// all five operations with last-write-wins semantics — the manager is not
/// reentrant-safe, and callers that need accurate flags under concurrent
/// calls must serialize them. Fetches carry a monotonic sequence number:
/// a fetch response that resolves after a newer fetch was issued leaves the
/// shared state untouched.
pub struct CrudManager<T> {
    config: CrudConfig,
    client: Arc<dyn HttpClient>,
    state: Arc<RwLock<State<T>>>,
}

impl<T> Clone for CrudManager<T> {
    fn clone(&self) -> Self {
        CrudManager {
            config: self.config.clone(),
            client: Arc::clone(&self.client),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> CrudManager<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    pub fn new(config: CrudConfig, client: Arc<dyn HttpClient>) -> Self {
        CrudManager {
            config,
            client,
            state: Arc::new(RwLock::new(State::default())),
        }
    }

    pub fn config(&self) -> &CrudConfig {
        &self.config
    }

    /// Fetch the full remote collection, replacing the local one.
    ///
    /// On failure the previous collection stays visible to callers.
    pub async fn fetch_all(&self) -> Result<Vec<T>, CrudError> {
        let seq = self.begin_fetch();

        let outcome = self.request_collection().await;

        let mut state = self.write();
        state.loading = false;
        match outcome {
            Ok(items) => {
                if seq == state.fetch_seq {
                    state.items = items.clone();
                } else {
                    debug!(entity = %self.config.entity_name, "discarding stale fetch_all response");
                }
                Ok(items)
            }
            Err(error) => {
                state.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Fetch one entity and make it the current item.
    pub async fn fetch_by_id(&self, id: impl Into<EntityId>) -> Result<T, CrudError> {
        let id = id.into();
        let seq = self.begin_fetch();

        let url = format!("{}/{}", self.config.endpoint, id);
        let outcome = self
            .send(HttpRequest::get(url), CrudError::Fetch, "fetch")
            .await
            .and_then(|data| self.decode(data, CrudError::Fetch));

        let mut state = self.write();
        state.loading = false;
        match outcome {
            Ok(entity) => {
                if seq == state.fetch_seq {
                    state.current = Some(entity.clone());
                } else {
                    debug!(entity = %self.config.entity_name, "discarding stale fetch_by_id response");
                }
                Ok(entity)
            }
            Err(error) => {
                state.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Submit a new entity. The server's canonical version is appended to
    /// the collection and becomes the current item.
    pub async fn create(&self, payload: Value) -> Result<T, CrudError> {
        self.begin();

        let request = HttpRequest::post(self.config.endpoint.clone(), payload);
        let outcome = self
            .send(request, CrudError::Create, "create")
            .await
            .and_then(|data| self.decode(data, CrudError::Create));

        let mut state = self.write();
        state.loading = false;
        match outcome {
            Ok(entity) => {
                // A canonical entity reusing an existing identity supersedes
                // the old entry, keeping identity values unique.
                if let Some(identity) = self.identity_of(&entity) {
                    state
                        .items
                        .retain(|item| self.identity_of(item).as_ref() != Some(&identity));
                }
                state.items.push(entity.clone());
                state.current = Some(entity.clone());
                Ok(entity)
            }
            Err(error) => {
                state.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Submit a partial update. The returned canonical entity replaces the
    /// matching collection entry in place (a no-op if none matches) and
    /// becomes the current item.
    pub async fn update(&self, id: impl Into<EntityId>, payload: Value) -> Result<T, CrudError> {
        let id = id.into();
        self.begin();

        let url = format!("{}/{}", self.config.endpoint, id);
        let outcome = self
            .send(HttpRequest::put(url, payload), CrudError::Update, "update")
            .await
            .and_then(|data| self.decode(data, CrudError::Update));

        let mut state = self.write();
        state.loading = false;
        match outcome {
            Ok(entity) => {
                if let Some(index) = self.position_of(&state.items, &id) {
                    state.items[index] = entity.clone();
                }
                state.current = Some(entity.clone());
                Ok(entity)
            }
            Err(error) => {
                state.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Submit a delete. On success the matching entry is removed and the
    /// current item is cleared if it held that identity.
    pub async fn remove(&self, id: impl Into<EntityId>) -> Result<(), CrudError> {
        let id = id.into();
        self.begin();

        let url = format!("{}/{}", self.config.endpoint, id);
        let outcome = self
            .send(HttpRequest::delete(url), CrudError::Delete, "delete")
            .await;

        let mut state = self.write();
        state.loading = false;
        match outcome {
            Ok(_) => {
                if let Some(index) = self.position_of(&state.items, &id) {
                    state.items.remove(index);
                }
                let current_matches = state
                    .current
                    .as_ref()
                    .and_then(|item| self.identity_of(item))
                    .map(|identity| id.matches(&identity))
                    .unwrap_or(false);
                if current_matches {
                    state.current = None;
                }
                Ok(())
            }
            Err(error) => {
                state.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Alias for [`CrudManager::remove`].
    pub async fn delete(&self, id: impl Into<EntityId>) -> Result<(), CrudError> {
        self.remove(id).await
    }

    /// Snapshot of the local collection.
    pub fn items(&self) -> Vec<T> {
        self.read().items.clone()
    }

    pub fn current_item(&self) -> Option<T> {
        self.read().current.clone()
    }

    /// True while any operation is in flight.
    pub fn loading(&self) -> bool {
        self.read().loading
    }

    /// The last operation's failure message; cleared when a new operation
    /// starts.
    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    pub fn has_items(&self) -> bool {
        !self.read().items.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    async fn request_collection(&self) -> Result<Vec<T>, CrudError> {
        let request = HttpRequest::get(self.config.endpoint.clone());
        let data = self.send(request, CrudError::Fetch, "fetch").await?;
        serde_json::from_value(data).map_err(|e| CrudError::Fetch(e.to_string()))
    }

    async fn send(
        &self,
        request: HttpRequest,
        wrap: fn(String) -> CrudError,
        verb: &str,
    ) -> Result<Value, CrudError> {
        let fallback = format!("Failed to {} {}", verb, self.config.entity_name);
        let envelope: Envelope = self
            .client
            .request(request)
            .await
            .map_err(|e| wrap(e.to_string()))?;
        envelope.into_result(&fallback).map_err(wrap)
    }

    fn decode(&self, data: Value, wrap: fn(String) -> CrudError) -> Result<T, CrudError> {
        serde_json::from_value(data).map_err(|e| wrap(e.to_string()))
    }

    fn identity_of(&self, item: &T) -> Option<Value> {
        serde_json::to_value(item)
            .ok()
            .and_then(|value| value.get(&self.config.id_field).cloned())
    }

    fn position_of(&self, items: &[T], id: &EntityId) -> Option<usize> {
        items.iter().position(|item| {
            self.identity_of(item)
                .map(|identity| id.matches(&identity))
                .unwrap_or(false)
        })
    }

    fn begin(&self) {
        let mut state = self.write();
        state.loading = true;
        state.error = None;
    }

    fn begin_fetch(&self) -> u64 {
        let mut state = self.write();
        state.loading = true;
        state.error = None;
        state.fetch_seq += 1;
        state.fetch_seq
    }

    // Poisoning only happens if a panic unwinds while a guard is held; the
    // state is still structurally valid, so recover instead of propagating.
    fn read(&self) -> RwLockReadGuard<'_, State<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
