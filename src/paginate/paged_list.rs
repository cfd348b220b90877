use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use tracing::debug;

use super::config::PageConfig;
use super::query::build_query;
use super::state::{total_pages_for, PaginationState, Sort, SortOrder};
use crate::envelope::Page;
use crate::error::CrudError;
use crate::filter::{Filter, FilterSet, FilterValue};
use crate::transport::{HttpClient, HttpRequest};

struct State<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    page: u64,
    page_size: u64,
    total: u64,
    total_pages: u64,
    sort: Option<Sort>,
    filters: FilterSet,
    fetch_seq: u64,
}

/// Server-driven list state: one page of a remote collection plus the
/// page/size/sort/filter state that addresses it.
///
/// Clones share state. In lazy mode every mutator refetches; page-reset
/// rules follow the original wire behavior — any sort/filter/page-size
/// change resets to page 1, pure page navigation does not. Responses
/// resolving after a newer fetch was issued are discarded, so the list
/// always reflects the most recently issued query. `loading`/`error` are
/// shared last-write-wins flags, as on [`CrudManager`](crate::CrudManager).
pub struct PagedList<T> {
    config: PageConfig,
    client: Arc<dyn HttpClient>,
    state: Arc<RwLock<State<T>>>,
}

impl<T> Clone for PagedList<T> {
    fn clone(&self) -> Self {
        PagedList {
            config: self.config.clone(),
            client: Arc::clone(&self.client),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> PagedList<T>
where
    T: DeserializeOwned + Clone + Send + Sync,
{
    pub fn new(config: PageConfig, client: Arc<dyn HttpClient>) -> Self {
        let state = State {
            items: Vec::new(),
            loading: false,
            error: None,
            page: config.initial_page.max(1),
            page_size: config.initial_page_size.max(1),
            total: 0,
            total_pages: 0,
            sort: None,
            filters: FilterSet::new(),
            fetch_seq: 0,
        };
        PagedList {
            config,
            client,
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Fetch the page addressed by the current state.
    pub async fn fetch(&self) -> Result<(), CrudError> {
        let (seq, url) = {
            let mut state = self.write();
            state.loading = true;
            state.error = None;
            state.fetch_seq += 1;
            let query = build_query(
                state.page,
                state.page_size,
                state.sort.as_ref(),
                &state.filters,
            );
            (
                state.fetch_seq,
                format!("{}?{}", self.config.endpoint, query),
            )
        };

        let outcome = self.request_page(url).await;

        let mut state = self.write();
        state.loading = false;
        match outcome {
            Ok(page) => {
                if seq == state.fetch_seq {
                    state.items = page.items;
                    state.total = page.total;
                    state.total_pages = total_pages_for(page.total, state.page_size);
                } else {
                    debug!(endpoint = %self.config.endpoint, "discarding stale page response");
                }
                Ok(())
            }
            Err(error) => {
                state.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Refetch with the current state, regardless of lazy mode.
    pub async fn refresh(&self) -> Result<(), CrudError> {
        self.fetch().await
    }

    /// Restore construction defaults (page, size, sort, filters) and
    /// refetch in lazy mode.
    pub async fn reset(&self) -> Result<(), CrudError> {
        {
            let mut state = self.write();
            state.page = self.config.initial_page.max(1);
            state.page_size = self.config.initial_page_size.max(1);
            state.sort = None;
            state.filters.clear_all();
        }
        self.maybe_fetch().await
    }

    /// Navigate to a page; a no-op outside `[1, total_pages]`. Does not
    /// reset the page counter.
    pub async fn go_to_page(&self, page: u64) -> Result<(), CrudError> {
        {
            let mut state = self.write();
            if page < 1 || page > state.total_pages {
                return Ok(());
            }
            state.page = page;
        }
        self.maybe_fetch().await
    }

    pub async fn next_page(&self) -> Result<(), CrudError> {
        let target = {
            let state = self.read();
            (state.page < state.total_pages).then_some(state.page + 1)
        };
        match target {
            Some(page) => self.go_to_page(page).await,
            None => Ok(()),
        }
    }

    pub async fn previous_page(&self) -> Result<(), CrudError> {
        let target = {
            let state = self.read();
            (state.page > 1).then_some(state.page - 1)
        };
        match target {
            Some(page) => self.go_to_page(page).await,
            None => Ok(()),
        }
    }

    /// Change the page size and reset to page 1. A size of 0 is rejected
    /// (no-op).
    pub async fn change_page_size(&self, page_size: u64) -> Result<(), CrudError> {
        if page_size == 0 {
            return Ok(());
        }
        {
            let mut state = self.write();
            state.page_size = page_size;
            state.page = 1;
        }
        self.maybe_fetch().await
    }

    /// Sort by a field and reset to page 1.
    pub async fn set_sort(
        &self,
        field: impl Into<String>,
        order: SortOrder,
    ) -> Result<(), CrudError> {
        {
            let mut state = self.write();
            state.sort = Some(Sort::new(field, order));
            state.page = 1;
        }
        self.maybe_fetch().await
    }

    /// Cycle the sort: ascending→descending on the already-sorted field,
    /// ascending on any other. Resets to page 1.
    pub async fn toggle_sort(&self, field: impl Into<String>) -> Result<(), CrudError> {
        let field = field.into();
        {
            let mut state = self.write();
            state.sort = match state.sort.take() {
                Some(sort) if sort.field == field => {
                    Some(Sort::new(field, sort.order.toggled()))
                }
                _ => Some(Sort::new(field, SortOrder::Asc)),
            };
            state.page = 1;
        }
        self.maybe_fetch().await
    }

    /// Drop the sort. The page counter is left alone.
    pub async fn clear_sort(&self) -> Result<(), CrudError> {
        {
            let mut state = self.write();
            state.sort = None;
        }
        self.maybe_fetch().await
    }

    /// Replace all field filters (last-set wins per field) and reset to
    /// page 1.
    pub async fn set_filters(&self, filters: Vec<Filter>) -> Result<(), CrudError> {
        {
            let mut state = self.write();
            state.filters.set_all(filters);
            state.page = 1;
        }
        self.maybe_fetch().await
    }

    /// Add a filter, updating in place when the field is already filtered.
    /// Resets to page 1.
    pub async fn add_filter(&self, filter: Filter) -> Result<(), CrudError> {
        {
            let mut state = self.write();
            state.filters.set(filter);
            state.page = 1;
        }
        self.maybe_fetch().await
    }

    pub async fn remove_filter(&self, field: &str) -> Result<(), CrudError> {
        {
            let mut state = self.write();
            state.filters.remove(field);
            state.page = 1;
        }
        self.maybe_fetch().await
    }

    /// Clear field filters and the global filter, resetting to page 1.
    pub async fn clear_filters(&self) -> Result<(), CrudError> {
        {
            let mut state = self.write();
            state.filters.clear_all();
            state.page = 1;
        }
        self.maybe_fetch().await
    }

    pub async fn set_global_filter(&self, needle: impl Into<String>) -> Result<(), CrudError> {
        {
            let mut state = self.write();
            state.filters.set_global(needle);
            state.page = 1;
        }
        self.maybe_fetch().await
    }

    pub fn items(&self) -> Vec<T> {
        self.read().items.clone()
    }

    pub fn loading(&self) -> bool {
        self.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    pub fn page(&self) -> u64 {
        self.read().page
    }

    pub fn page_size(&self) -> u64 {
        self.read().page_size
    }

    pub fn total(&self) -> u64 {
        self.read().total
    }

    pub fn total_pages(&self) -> u64 {
        self.read().total_pages
    }

    pub fn pagination(&self) -> PaginationState {
        let state = self.read();
        PaginationState {
            page: state.page,
            page_size: state.page_size,
            total: state.total,
            total_pages: state.total_pages,
        }
    }

    pub fn sort(&self) -> Option<Sort> {
        self.read().sort.clone()
    }

    pub fn has_next_page(&self) -> bool {
        let state = self.read();
        state.page < state.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.read().page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    pub fn filters(&self) -> FilterSet {
        self.read().filters.clone()
    }

    pub fn filter_value(&self, field: &str) -> Option<FilterValue> {
        self.read().filters.value_of(field).cloned()
    }

    pub fn global_filter(&self) -> String {
        self.read().filters.global().to_string()
    }

    /// The query string the current state would produce — the wire contract
    /// consumers depend on for server compatibility.
    pub fn query_string(&self) -> String {
        let state = self.read();
        build_query(
            state.page,
            state.page_size,
            state.sort.as_ref(),
            &state.filters,
        )
    }

    async fn request_page(&self, url: String) -> Result<Page<T>, CrudError> {
        let envelope = self
            .client
            .request(HttpRequest::get(url))
            .await
            .map_err(|e| CrudError::Fetch(e.to_string()))?;
        let data = envelope
            .into_result("Failed to fetch data")
            .map_err(CrudError::Fetch)?;
        serde_json::from_value(data).map_err(|e| CrudError::Fetch(e.to_string()))
    }

    async fn maybe_fetch(&self) -> Result<(), CrudError> {
        if self.config.lazy {
            self.fetch().await
        } else {
            Ok(())
        }
    }

    // Same poisoning stance as the CRUD manager: recover, the state is
    // still structurally valid.
    fn read(&self) -> RwLockReadGuard<'_, State<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
