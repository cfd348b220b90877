mod crud;
mod envelope;
mod error;
mod filter;
mod form;
mod paginate;
mod persistence;
mod transport;
mod validation;

pub use crud::{CrudConfig, CrudManager, EntityId};
pub use envelope::{Envelope, Page};
pub use error::{CrudError, ValidationError};
pub use filter::{Filter, FilterSet, FilterValue, MatchMode};
pub use form::FormModel;
pub use paginate::{PageConfig, PagedList, PaginationState, Sort, SortOrder};
pub use persistence::{KeyValueStore, MemoryStore, PersistedList, StorageError};
pub use transport::{HttpClient, HttpRequest, Method, TransportError};
pub use validation::{checks, rules, CheckOutcome, Rule, Validator};
