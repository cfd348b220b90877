//! Filter Engine - Match-mode predicates over in-memory collections.
//!
//! A [`FilterSet`] holds at most one [`Filter`] per field plus a free-text
//! global filter. It is evaluated client-side via [`FilterSet::apply`] (no
//! I/O) and serialized into the query string by the pagination controller.

mod filter;
mod filter_set;

pub use filter::{Filter, FilterValue, MatchMode};
pub use filter_set::FilterSet;
