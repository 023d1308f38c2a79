use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a tenant-scoped portion size (for example `Small`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Size {
    /// Unique identifier of the size.
    pub id: i32,
    /// Owning tenant identifier.
    pub tenant_id: i32,
    /// Human-readable name of the size.
    pub name: String,
    /// Timestamp for when the size record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the size record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new size for a tenant.
#[derive(Debug, Clone)]
pub struct NewSize {
    /// Owning tenant identifier.
    pub tenant_id: i32,
    /// Human-readable name of the size.
    pub name: String,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewSize {
    /// Build a new size payload with the supplied name and current timestamp.
    pub fn new(tenant_id: i32, name: impl Into<String>) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            tenant_id,
            name: name.into(),
            updated_at: now,
        }
    }
}
