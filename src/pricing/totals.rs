//! Order-level aggregation of priced lines.

use serde::{Deserialize, Serialize};

use crate::domain::branch::Branch;
use crate::domain::order::NewOrderItem;
use crate::pricing::{cents_to_decimal, decimal_to_cents, percentage};

/// Computed order-level amounts, all in cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of pre-discount line subtotals.
    pub subtotal_cents: i64,
    /// Sum of per-line discounts.
    pub item_discount_cents: i64,
    /// Order-level discount input.
    pub order_discount_cents: i64,
    /// Delivery-partner discount input.
    pub partner_discount_cents: i64,
    /// Tax rate in percent, snapshotted from the branch.
    pub tax_rate: f64,
    /// Tax charged on the taxable amount.
    pub tax_amount_cents: i64,
}

impl OrderTotals {
    /// Amount subject to tax: subtotal minus every discount.
    pub fn taxable_cents(&self) -> i64 {
        self.subtotal_cents
            - self.item_discount_cents
            - self.order_discount_cents
            - self.partner_discount_cents
    }

    /// Grand total: taxable amount plus tax.
    pub fn total_cents(&self) -> i64 {
        self.taxable_cents() + self.tax_amount_cents
    }
}

/// Fold priced lines into order totals under the branch's tax configuration.
///
/// The order-level and partner discounts are caller inputs; the walk-in flow
/// passes zero for both. Tax is charged only when the branch has tax enabled;
/// the rate is snapshotted either way so later branch edits cannot change how
/// this order was priced.
pub fn aggregate(
    items: &[NewOrderItem],
    branch: &Branch,
    order_discount_cents: i64,
    partner_discount_cents: i64,
) -> OrderTotals {
    let subtotal_cents: i64 = items.iter().map(NewOrderItem::line_subtotal_cents).sum();
    let item_discount_cents: i64 = items.iter().map(|item| item.item_discount_cents).sum();

    let taxable_cents =
        subtotal_cents - item_discount_cents - order_discount_cents - partner_discount_cents;
    let tax_amount_cents = if branch.tax_is_active {
        decimal_to_cents(cents_to_decimal(taxable_cents) * percentage(branch.tax_rate))
    } else {
        0
    };

    OrderTotals {
        subtotal_cents,
        item_discount_cents,
        order_discount_cents,
        partner_discount_cents,
        tax_rate: branch.tax_rate,
        tax_amount_cents,
    }
}
