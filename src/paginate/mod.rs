//! Pagination/Query Controller - Server-driven list state.
//!
//! A [`PagedList`] owns page/size/sort/filter state and mirrors one page of
//! a remote collection. In lazy mode (the default) every state mutator
//! triggers a refetch of the current page; the query string it produces is
//! a wire contract (`page`, `pageSize`, `sortField`, `sortOrder`, `search`,
//! `filters[i][…]` in that order).

mod config;
mod paged_list;
mod query;
mod state;

pub use config::PageConfig;
pub use paged_list::PagedList;
pub use state::{PaginationState, Sort, SortOrder};
