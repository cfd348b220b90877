/// Configuration for a [`PagedList`](super::PagedList).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    /// Endpoint answering paginated queries (`{endpoint}?page=…`).
    pub endpoint: String,
    pub initial_page: u64,
    pub initial_page_size: u64,
    /// In lazy mode every state mutator refetches the current page.
    pub lazy: bool,
}

impl PageConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        PageConfig {
            endpoint: endpoint.into(),
            initial_page: 1,
            initial_page_size: 10,
            lazy: true,
        }
    }

    pub fn initial_page(mut self, page: u64) -> Self {
        self.initial_page = page.max(1);
        self
    }

    /// Sizes below 1 are clamped — `total_pages` math requires a nonzero
    /// divisor.
    pub fn initial_page_size(mut self, page_size: u64) -> Self {
        self.initial_page_size = page_size.max(1);
        self
    }

    /// Disable automatic refetching; mutators only update local state.
    pub fn eager(mut self) -> Self {
        self.lazy = false;
        self
    }
}
