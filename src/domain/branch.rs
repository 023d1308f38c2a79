use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a physical restaurant location owned by a tenant.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Branch {
    /// Unique identifier of the branch.
    pub id: i32,
    /// Owning tenant identifier.
    pub tenant_id: i32,
    /// Human-readable name of the branch.
    pub name: String,
    /// Tax rate applied to taxable order amounts, in percent.
    pub tax_rate: f64,
    /// Whether tax is charged at this branch.
    pub tax_is_active: bool,
    /// Display name of the tax (for example `VAT`).
    pub tax_name: String,
    /// Timestamp for when the branch record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the branch record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new branch for a tenant.
#[derive(Debug, Clone)]
pub struct NewBranch {
    /// Owning tenant identifier.
    pub tenant_id: i32,
    /// Human-readable name of the branch.
    pub name: String,
    /// Tax rate applied to taxable order amounts, in percent.
    pub tax_rate: f64,
    /// Whether tax is charged at this branch.
    pub tax_is_active: bool,
    /// Display name of the tax.
    pub tax_name: String,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewBranch {
    /// Build a new branch payload with tax disabled and the current timestamp.
    pub fn new(tenant_id: i32, name: impl Into<String>) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            tenant_id,
            name: name.into(),
            tax_rate: 0.0,
            tax_is_active: false,
            tax_name: "VAT".to_string(),
            updated_at: now,
        }
    }

    /// Enable tax at this branch with the given rate and display name.
    pub fn with_tax(mut self, rate: f64, name: impl Into<String>) -> Self {
        self.tax_rate = rate;
        self.tax_is_active = true;
        self.tax_name = name.into();
        self
    }
}

/// Domain representation of a QR-coded dining table at a branch.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RestaurantTable {
    /// Unique identifier of the table.
    pub id: i32,
    /// Branch this table belongs to.
    pub branch_id: i32,
    /// Human-readable table name (for example `T4`).
    pub name: String,
    /// Opaque token embedded in the table's QR code.
    pub token: String,
    /// Timestamp for when the table record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the table record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new table at a branch.
#[derive(Debug, Clone)]
pub struct NewRestaurantTable {
    /// Branch this table belongs to.
    pub branch_id: i32,
    /// Human-readable table name.
    pub name: String,
    /// Opaque token embedded in the table's QR code. Unique across branches.
    pub token: String,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewRestaurantTable {
    /// Build a new table payload with the supplied details and current timestamp.
    pub fn new(branch_id: i32, name: impl Into<String>, token: impl Into<String>) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            branch_id,
            name: name.into(),
            token: token.into(),
            updated_at: now,
        }
    }
}
