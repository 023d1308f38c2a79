use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a tenant-scoped menu product.
///
/// The base price is the lowest-precedence price source; branch and size
/// overrides take priority when present.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Owning tenant identifier.
    pub tenant_id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Base price in cents; overridden by branch and size prices.
    pub base_price_cents: i64,
    /// Whether the product is active on the tenant's menu.
    pub is_active: bool,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product for a tenant.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Owning tenant identifier.
    pub tenant_id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Base price in cents.
    pub base_price_cents: i64,
    /// Whether the product is active on the tenant's menu.
    pub is_active: bool,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new active product payload with the current timestamp.
    pub fn new(tenant_id: i32, name: impl Into<String>, base_price_cents: i64) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            tenant_id,
            name: name.into(),
            base_price_cents,
            is_active: true,
            updated_at: now,
        }
    }
}
