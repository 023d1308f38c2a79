use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Branch-level customization of a product's price, discount and availability.
///
/// One record exists per `(branch, product)` pair. A `None` branch price means
/// the product's base price applies; an explicit price overrides it, zero
/// included.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BranchProduct {
    /// Unique identifier of the override record.
    pub id: i32,
    /// Branch this override belongs to.
    pub branch_id: i32,
    /// Product being customized.
    pub product_id: i32,
    /// Optional branch price in cents overriding the product base price.
    pub branch_price_cents: Option<i64>,
    /// Discount percentage applied when [`Self::has_active_discount`] is set.
    pub discount_percentage: f64,
    /// Whether the branch-level discount is currently active.
    pub has_active_discount: bool,
    /// Whether the product can be ordered at this branch.
    pub is_available: bool,
    /// Timestamp for when the override record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the override record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a branch-product override.
#[derive(Debug, Clone)]
pub struct NewBranchProduct {
    /// Branch this override belongs to.
    pub branch_id: i32,
    /// Product being customized.
    pub product_id: i32,
    /// Optional branch price in cents overriding the product base price.
    pub branch_price_cents: Option<i64>,
    /// Discount percentage applied when `has_active_discount` is set.
    pub discount_percentage: f64,
    /// Whether the branch-level discount is currently active.
    pub has_active_discount: bool,
    /// Whether the product can be ordered at this branch.
    pub is_available: bool,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewBranchProduct {
    /// Build an available override with no price or discount customization.
    pub fn new(branch_id: i32, product_id: i32) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            branch_id,
            product_id,
            branch_price_cents: None,
            discount_percentage: 0.0,
            has_active_discount: false,
            is_available: true,
            updated_at: now,
        }
    }

    /// Override the product base price at this branch.
    pub fn with_branch_price(mut self, price_cents: i64) -> Self {
        self.branch_price_cents = Some(price_cents);
        self
    }

    /// Attach a branch-level discount.
    pub fn with_discount(mut self, percentage: f64, active: bool) -> Self {
        self.discount_percentage = percentage;
        self.has_active_discount = active;
        self
    }

    /// Mark the product as unavailable at this branch.
    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }
}

/// Size-level customization layered on top of a [`BranchProduct`].
///
/// At most one record exists per `(branch_product, size)` pair. When present,
/// its discount state fully replaces the branch-level discount for that line,
/// even when the size-level flag is inactive.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BranchProductSize {
    /// Unique identifier of the override record.
    pub id: i32,
    /// Branch-product override this record refines.
    pub branch_product_id: i32,
    /// Size being customized.
    pub size_id: i32,
    /// Optional size price in cents overriding branch and base prices.
    pub branch_size_price_cents: Option<i64>,
    /// Discount percentage applied when [`Self::is_discount_active`] is set.
    pub discount_percentage: f64,
    /// Whether the size-level discount is currently active.
    pub is_discount_active: bool,
    /// Whether this size can be ordered at this branch.
    pub is_available: bool,
    /// Timestamp for when the override record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the override record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a branch-product-size override.
#[derive(Debug, Clone)]
pub struct NewBranchProductSize {
    /// Branch-product override this record refines.
    pub branch_product_id: i32,
    /// Size being customized.
    pub size_id: i32,
    /// Optional size price in cents overriding branch and base prices.
    pub branch_size_price_cents: Option<i64>,
    /// Discount percentage applied when `is_discount_active` is set.
    pub discount_percentage: f64,
    /// Whether the size-level discount is currently active.
    pub is_discount_active: bool,
    /// Whether this size can be ordered at this branch.
    pub is_available: bool,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewBranchProductSize {
    /// Build an available size override with no price or discount customization.
    pub fn new(branch_product_id: i32, size_id: i32) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            branch_product_id,
            size_id,
            branch_size_price_cents: None,
            discount_percentage: 0.0,
            is_discount_active: false,
            is_available: true,
            updated_at: now,
        }
    }

    /// Override the price for this size at this branch.
    pub fn with_size_price(mut self, price_cents: i64) -> Self {
        self.branch_size_price_cents = Some(price_cents);
        self
    }

    /// Attach a size-level discount state.
    pub fn with_discount(mut self, percentage: f64, active: bool) -> Self {
        self.discount_percentage = percentage;
        self.is_discount_active = active;
        self
    }

    /// Mark this size as unavailable at this branch.
    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }
}
