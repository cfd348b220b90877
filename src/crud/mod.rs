//! CRUD Resource Manager - Keeps a local collection in sync with a remote
//! one through the response envelope contract.
//!
//! ## Example
//!
//! ```ignore
//! use crudkit::{CrudConfig, CrudManager};
//!
//! let users: CrudManager<User> =
//!     CrudManager::new(CrudConfig::new("users", "/api/users"), client);
//!
//! users.fetch_all().await?;
//! let created = users.create(serde_json::json!({ "name": "Ann" })).await?;
//! users.remove(created_id).await?;
//! ```

mod config;
mod id;
mod manager;

pub use config::CrudConfig;
pub use id::EntityId;
pub use manager::CrudManager;
