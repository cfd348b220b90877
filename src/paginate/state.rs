use serde::{Deserialize, Serialize};

/// Snapshot of the pagination counters.
///
/// `total_pages` is always `ceil(total / page_size)` after a successful
/// fetch; `page` may exceed it only transiently while a request is in
/// flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Sort direction, serialized as `asc`/`desc` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Active sort; absence means unsorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Sort {
            field: field.into(),
            order,
        }
    }
}

/// `ceil(total / page_size)`; callers guarantee `page_size >= 1`.
pub(crate) fn total_pages_for(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size)
}
