use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of an optional add-on with a fixed price.
///
/// Modifiers are never discounted; their cost is added on top of the resolved
/// unit price of the line they are attached to.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Modifier {
    /// Unique identifier of the modifier.
    pub id: i32,
    /// Owning tenant identifier.
    pub tenant_id: i32,
    /// Human-readable name of the modifier.
    pub name: String,
    /// Fixed price in cents added per line unit.
    pub price_cents: i64,
    /// Whether the modifier can currently be ordered.
    pub is_available: bool,
    /// Timestamp for when the modifier record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the modifier record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new modifier for a tenant.
#[derive(Debug, Clone)]
pub struct NewModifier {
    /// Owning tenant identifier.
    pub tenant_id: i32,
    /// Human-readable name of the modifier.
    pub name: String,
    /// Fixed price in cents added per line unit.
    pub price_cents: i64,
    /// Whether the modifier can currently be ordered.
    pub is_available: bool,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewModifier {
    /// Build a new available modifier payload with the current timestamp.
    pub fn new(tenant_id: i32, name: impl Into<String>, price_cents: i64) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            tenant_id,
            name: name.into(),
            price_cents,
            is_available: true,
            updated_at: now,
        }
    }

    /// Mark the modifier as unavailable.
    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }
}
