/// Configuration for a [`CrudManager`](super::CrudManager).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrudConfig {
    /// Human-readable entity name used in fallback error messages
    /// (e.g. `"users"` → `Failed to fetch users`).
    pub entity_name: String,
    /// Base endpoint of the remote collection (e.g. `/api/users`).
    pub endpoint: String,
    /// JSON field holding the identity of each entity.
    pub id_field: String,
}

impl CrudConfig {
    pub fn new(entity_name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        CrudConfig {
            entity_name: entity_name.into(),
            endpoint: endpoint.into(),
            id_field: "id".to_string(),
        }
    }

    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }
}
