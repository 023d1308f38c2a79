//! Effective price and discount resolution across the override cascade.

use rust_decimal::Decimal;

use crate::domain::branch_product::{BranchProduct, BranchProductSize};
use crate::domain::order::DiscountSource;
use crate::domain::product::Product;
use crate::pricing::{cents_to_decimal, percentage};

/// Discount state contributed by one override layer.
#[derive(Debug, Clone, Copy)]
struct DiscountState {
    percentage: f64,
    active: bool,
}

/// One tier of the price/discount cascade.
///
/// Layers are evaluated in fixed precedence order (size → branch-product →
/// product base). A layer may contribute an explicit price, a discount state,
/// both, or neither; the first contribution of each kind wins independently.
/// A size-override record always contributes a discount state, so an inactive
/// size-level flag suppresses the branch-level discount instead of falling
/// back to it.
struct OverrideLayer {
    source: DiscountSource,
    price_cents: Option<i64>,
    discount: Option<DiscountState>,
}

/// Outcome of resolving one product/size against the override cascade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPrice {
    /// Effective unit price in cents after the price cascade.
    pub effective_price_cents: i64,
    /// Discount percentage of the winning discount layer.
    pub discount_percentage: f64,
    /// Whether the winning discount layer is active.
    pub discount_active: bool,
    /// Layer the winning discount state came from.
    pub discount_source: DiscountSource,
}

impl ResolvedPrice {
    /// Whether a non-zero discount actually applies.
    pub fn discount_applies(&self) -> bool {
        self.discount_active && self.discount_percentage > 0.0
    }

    /// Per-unit discount amount at full precision.
    pub fn unit_discount(&self) -> Decimal {
        if self.discount_applies() {
            cents_to_decimal(self.effective_price_cents) * percentage(self.discount_percentage)
        } else {
            Decimal::ZERO
        }
    }

    /// Discount percentage as recorded on the order item: zero unless applied.
    pub fn applied_percentage(&self) -> f64 {
        if self.discount_applies() {
            self.discount_percentage
        } else {
            0.0
        }
    }

    /// Discount source as recorded on the order item: none unless applied.
    pub fn applied_source(&self) -> DiscountSource {
        if self.discount_applies() {
            self.discount_source
        } else {
            DiscountSource::None
        }
    }
}

/// Resolve the effective unit price and discount state for one line.
///
/// Price precedence, highest first: explicit size price → explicit branch
/// price → product base price. An explicit zero is a valid override. The
/// discount cascade is evaluated independently of the price cascade.
///
/// Pure function: callers are responsible for availability checks.
pub fn resolve(
    product: &Product,
    branch_product: &BranchProduct,
    size_override: Option<&BranchProductSize>,
) -> ResolvedPrice {
    let mut layers: Vec<OverrideLayer> = Vec::with_capacity(3);
    if let Some(size) = size_override {
        layers.push(OverrideLayer {
            source: DiscountSource::Size,
            price_cents: size.branch_size_price_cents,
            discount: Some(DiscountState {
                percentage: size.discount_percentage,
                active: size.is_discount_active,
            }),
        });
    }
    layers.push(OverrideLayer {
        source: DiscountSource::BranchProduct,
        price_cents: branch_product.branch_price_cents,
        discount: Some(DiscountState {
            percentage: branch_product.discount_percentage,
            active: branch_product.has_active_discount,
        }),
    });
    layers.push(OverrideLayer {
        source: DiscountSource::None,
        price_cents: Some(product.base_price_cents),
        discount: None,
    });

    let effective_price_cents = layers
        .iter()
        .find_map(|layer| layer.price_cents)
        .unwrap_or(product.base_price_cents);

    let (discount_percentage, discount_active, discount_source) = layers
        .iter()
        .find_map(|layer| {
            layer
                .discount
                .map(|state| (state.percentage, state.active, layer.source))
        })
        .unwrap_or((0.0, false, DiscountSource::None));

    ResolvedPrice {
        effective_price_cents,
        discount_percentage,
        discount_active,
        discount_source,
    }
}
