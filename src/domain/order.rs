use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Possible lifecycle states for an order placed at a branch.
///
/// Transitions only move forward through the kitchen workflow; skipping a
/// state is allowed, going back is not. `Paid` and `Cancelled` are terminal,
/// and `Cancelled` is reachable from every non-terminal state.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been created but not yet acknowledged by staff.
    Pending,
    /// Order has been accepted by the branch.
    Confirmed,
    /// Kitchen has started preparing the order.
    Cooking,
    /// All items are ready to be served.
    Ready,
    /// Order has been brought to the table.
    InService,
    /// Order has been paid and closed.
    Paid,
    /// Order was cancelled before payment.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl OrderStatus {
    /// Position of the state in the forward workflow.
    fn ordinal(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Confirmed => 1,
            Self::Cooking => 2,
            Self::Ready => 3,
            Self::InService => 4,
            Self::Paid => 5,
            Self::Cancelled => 6,
        }
    }

    /// Whether no further transitions are allowed out of this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }

    /// Whether a transition from `self` to `to` is legal.
    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match to {
            Self::Cancelled => true,
            _ => to.ordinal() > self.ordinal(),
        }
    }
}

impl From<OrderStatus> for &'static str {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cooking => "cooking",
            OrderStatus::Ready => "ready",
            OrderStatus::InService => "in_service",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value {
            "confirmed" => Self::Confirmed,
            "cooking" => Self::Cooking,
            "ready" => Self::Ready,
            "in_service" => Self::InService,
            "paid" => Self::Paid,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }
}

/// How an order reached the branch.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Placed at a table inside the restaurant.
    WalkIn,
    /// Placed through a delivery partner.
    Delivery,
    /// Picked up at the counter.
    Takeaway,
}

impl Default for OrderType {
    fn default() -> Self {
        Self::WalkIn
    }
}

impl From<OrderType> for &'static str {
    fn from(value: OrderType) -> Self {
        match value {
            OrderType::WalkIn => "walk_in",
            OrderType::Delivery => "delivery",
            OrderType::Takeaway => "takeaway",
        }
    }
}

impl From<&str> for OrderType {
    fn from(value: &str) -> Self {
        match value {
            "delivery" => Self::Delivery,
            "takeaway" => Self::Takeaway,
            _ => Self::WalkIn,
        }
    }
}

/// Which override layer supplied the discount applied to a line.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscountSource {
    /// No discount was applied.
    None,
    /// Discount came from the branch-product override.
    BranchProduct,
    /// Discount came from the branch-product-size override.
    Size,
}

impl Default for DiscountSource {
    fn default() -> Self {
        Self::None
    }
}

impl From<DiscountSource> for &'static str {
    fn from(value: DiscountSource) -> Self {
        match value {
            DiscountSource::None => "none",
            DiscountSource::BranchProduct => "branch_product",
            DiscountSource::Size => "size",
        }
    }
}

impl From<&str> for DiscountSource {
    fn from(value: &str) -> Self {
        match value {
            "branch_product" => Self::BranchProduct,
            "size" => Self::Size,
            _ => Self::None,
        }
    }
}

/// Frozen snapshot of a modifier the moment a line was built.
///
/// Stored as-is on the order item and never re-resolved, so later edits to
/// the modifier record cannot alter historical orders.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SelectedModifier {
    /// Identifier of the modifier at snapshot time.
    pub id: i32,
    /// Name of the modifier at snapshot time.
    pub name: String,
    /// Price in cents at snapshot time.
    pub price_cents: i64,
}

/// One committed order line with its frozen pricing snapshot.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrderItem {
    /// Unique identifier of the order item.
    pub id: i32,
    /// Order this item belongs to.
    pub order_id: i32,
    /// Product that was ordered.
    pub product_id: i32,
    /// Product name at order time.
    pub product_name: String,
    /// Selected size, if any.
    pub size_id: Option<i32>,
    /// Size name at order time, if a size was selected.
    pub size_name: Option<String>,
    /// Size override record the price was resolved from, if one existed.
    pub branch_product_size_id: Option<i32>,
    /// Resolved effective unit price in cents, before discount and modifiers.
    pub base_price_cents: i64,
    /// Product base price in cents before any branch override, kept for audit.
    pub original_price_cents: i64,
    /// Per-unit modifier cost in cents.
    pub modifier_total_cents: i64,
    /// Total discount for the line in cents.
    pub item_discount_cents: i64,
    /// Discount percentage that was applied.
    pub discount_percentage: f64,
    /// Override layer the discount came from.
    pub discount_source: DiscountSource,
    /// Final per-unit price in cents after modifiers and discount.
    pub final_unit_price_cents: i64,
    /// Number of units ordered.
    pub quantity: i32,
    /// Modifier snapshots in selection order.
    pub selected_modifiers: Vec<SelectedModifier>,
    /// Composed customization remark, if any.
    pub remark: Option<String>,
    /// Timestamp for when the item record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the item record.
    pub updated_at: NaiveDateTime,
}

impl OrderItem {
    /// Pre-discount line subtotal in cents.
    pub fn line_subtotal_cents(&self) -> i64 {
        (self.base_price_cents + self.modifier_total_cents) * i64::from(self.quantity)
    }
}

/// Payload for one order line, produced by the line item builder.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewOrderItem {
    /// Product that was ordered.
    pub product_id: i32,
    /// Product name at order time.
    pub product_name: String,
    /// Selected size, if any.
    pub size_id: Option<i32>,
    /// Size name at order time, if a size was selected.
    pub size_name: Option<String>,
    /// Size override record the price was resolved from, if one existed.
    pub branch_product_size_id: Option<i32>,
    /// Resolved effective unit price in cents, before discount and modifiers.
    pub base_price_cents: i64,
    /// Product base price in cents before any branch override.
    pub original_price_cents: i64,
    /// Per-unit modifier cost in cents.
    pub modifier_total_cents: i64,
    /// Total discount for the line in cents.
    pub item_discount_cents: i64,
    /// Discount percentage that was applied.
    pub discount_percentage: f64,
    /// Override layer the discount came from.
    pub discount_source: DiscountSource,
    /// Final per-unit price in cents after modifiers and discount.
    pub final_unit_price_cents: i64,
    /// Number of units ordered.
    pub quantity: i32,
    /// Modifier snapshots in selection order.
    pub selected_modifiers: Vec<SelectedModifier>,
    /// Composed customization remark, if any.
    pub remark: Option<String>,
}

impl NewOrderItem {
    /// Pre-discount line subtotal in cents.
    pub fn line_subtotal_cents(&self) -> i64 {
        (self.base_price_cents + self.modifier_total_cents) * i64::from(self.quantity)
    }
}

/// Domain representation of a committed order with its items.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Order {
    /// Unique identifier of the order.
    pub id: i32,
    /// Branch the order was placed at.
    pub branch_id: i32,
    /// Table the order originated from, if any.
    pub table_id: Option<i32>,
    /// Identifier of the user who placed the order, if known.
    pub placed_by: Option<i32>,
    /// How the order reached the branch.
    pub order_type: OrderType,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Human-readable code, unique per branch per calendar day.
    pub order_code: String,
    /// Calendar day the order code is scoped to.
    pub order_date: NaiveDate,
    /// Sum of pre-discount line subtotals in cents.
    pub subtotal_cents: i64,
    /// Sum of per-line discounts in cents.
    pub item_discount_cents: i64,
    /// Order-level discount in cents; reserved for a future promotion engine.
    pub order_discount_cents: i64,
    /// Delivery-partner discount in cents; reserved for a future promotion engine.
    pub partner_discount_cents: i64,
    /// Tax rate in percent, snapshotted from the branch at creation.
    pub tax_rate: f64,
    /// Tax charged on the taxable amount, in cents.
    pub tax_amount_cents: i64,
    /// When the kitchen started cooking, if it has.
    pub cooking_started_at: Option<NaiveDateTime>,
    /// When the order became ready, if it has.
    pub ready_at: Option<NaiveDateTime>,
    /// Seconds between cooking start and ready, once both are known.
    pub actual_prep_seconds: Option<i64>,
    /// Committed order lines.
    pub items: Vec<OrderItem>,
    /// Timestamp for when the order record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the order record.
    pub updated_at: NaiveDateTime,
}

impl Order {
    /// Amount subject to tax: subtotal minus every discount, in cents.
    pub fn taxable_cents(&self) -> i64 {
        self.subtotal_cents
            - self.item_discount_cents
            - self.order_discount_cents
            - self.partner_discount_cents
    }

    /// Grand total in cents. Derived, never stored.
    pub fn total_cents(&self) -> i64 {
        self.taxable_cents() + self.tax_amount_cents
    }

    /// Sum of all discounts applied to the order, in cents.
    pub fn order_discount_amount_cents(&self) -> i64 {
        self.item_discount_cents + self.order_discount_cents + self.partner_discount_cents
    }
}

/// Payload required to insert a new order with its items.
///
/// Totals are expected to come from the pricing aggregator; the repository
/// assigns the order code and persists everything in one transaction.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Branch the order is placed at.
    pub branch_id: i32,
    /// Table the order originates from, if any.
    pub table_id: Option<i32>,
    /// Identifier of the user placing the order, if known.
    pub placed_by: Option<i32>,
    /// How the order reached the branch.
    pub order_type: OrderType,
    /// Sum of pre-discount line subtotals in cents.
    pub subtotal_cents: i64,
    /// Sum of per-line discounts in cents.
    pub item_discount_cents: i64,
    /// Order-level discount in cents.
    pub order_discount_cents: i64,
    /// Delivery-partner discount in cents.
    pub partner_discount_cents: i64,
    /// Tax rate in percent, snapshotted from the branch.
    pub tax_rate: f64,
    /// Tax charged on the taxable amount, in cents.
    pub tax_amount_cents: i64,
    /// Priced order lines.
    pub items: Vec<NewOrderItem>,
    /// Timestamp the order is placed at; also scopes the order code day.
    pub placed_at: NaiveDateTime,
}

impl NewOrder {
    /// Build an order payload with zeroed totals and the current timestamp.
    pub fn new(branch_id: i32, order_type: OrderType) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            branch_id,
            table_id: None,
            placed_by: None,
            order_type,
            subtotal_cents: 0,
            item_discount_cents: 0,
            order_discount_cents: 0,
            partner_discount_cents: 0,
            tax_rate: 0.0,
            tax_amount_cents: 0,
            items: Vec::new(),
            placed_at: now,
        }
    }

    /// Attach the originating table.
    pub fn with_table(mut self, table_id: i32) -> Self {
        self.table_id = Some(table_id);
        self
    }

    /// Attach the identifier of the user placing the order.
    pub fn with_placed_by(mut self, user_id: i32) -> Self {
        self.placed_by = Some(user_id);
        self
    }

    /// Override the placement timestamp, mainly useful in tests.
    pub fn placed_at(mut self, placed_at: NaiveDateTime) -> Self {
        self.placed_at = placed_at;
        self
    }
}

/// One recorded status transition of an order.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrderStatusEvent {
    /// Unique identifier of the event.
    pub id: i32,
    /// Order the transition belongs to.
    pub order_id: i32,
    /// State the order left.
    pub from_status: OrderStatus,
    /// State the order entered.
    pub to_status: OrderStatus,
    /// Staff member or system that triggered the transition, if known.
    pub actor: Option<String>,
    /// Free-text note, for example a cancellation reason.
    pub note: Option<String>,
    /// Timestamp for when the transition was recorded.
    pub created_at: NaiveDateTime,
}

/// Requested status transition applied to an order.
#[derive(Debug, Clone)]
pub struct StatusTransition {
    /// Target state.
    pub to: OrderStatus,
    /// Staff member or system requesting the transition.
    pub actor: Option<String>,
    /// Optional note recorded with the transition.
    pub note: Option<String>,
}

impl StatusTransition {
    /// Build a transition to `to` with no actor or note.
    pub fn to(to: OrderStatus) -> Self {
        Self {
            to,
            actor: None,
            note: None,
        }
    }

    /// Attach the acting staff member.
    pub fn actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Attach a note to the transition.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Query definition used to list orders for a branch.
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    /// Branch whose orders are listed.
    pub branch_id: i32,
    /// Optional status filter.
    pub status: Option<OrderStatus>,
    /// Optional table filter.
    pub table_id: Option<i32>,
    /// Optional calendar-day filter.
    pub day: Option<NaiveDate>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    /// Construct a query that targets all orders belonging to `branch_id`.
    pub fn new(branch_id: i32) -> Self {
        Self {
            branch_id,
            status: None,
            table_id: None,
            day: None,
            pagination: None,
        }
    }

    /// Filter the results by the provided status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter the results by originating table.
    pub fn table_id(mut self, table_id: i32) -> Self {
        self.table_id = Some(table_id);
        self
    }

    /// Filter the results to orders placed on `day`.
    pub fn day(mut self, day: NaiveDate) -> Self {
        self.day = Some(day);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Format the human-readable order code for `date` and a daily sequence.
///
/// Layout: last digit of the year, a letter `A`-`L` for the month, the
/// two-digit day of month and a zero-padded three-digit sequence, wrapped in
/// parentheses. Feb 19 of a year ending in 6, third order: `(6B19003)`.
pub fn format_order_code(date: NaiveDate, sequence: u32) -> String {
    let year_digit = date.year().rem_euclid(10);
    let month_letter = (b'A' + (date.month0() as u8)) as char;
    format!(
        "({year_digit}{month_letter}{:02}{sequence:03})",
        date.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn order_code_matches_documented_layout() {
        assert_eq!(format_order_code(date(2026, 2, 19), 3), "(6B19003)");
        assert_eq!(format_order_code(date(2025, 1, 1), 1), "(5A01001)");
        assert_eq!(format_order_code(date(2030, 12, 31), 999), "(0L31999)");
    }

    #[test]
    fn order_code_sequence_is_zero_padded_and_grows() {
        let d = date(2026, 7, 4);
        assert_eq!(format_order_code(d, 1), "(6G04001)");
        assert_eq!(format_order_code(d, 42), "(6G04042)");
        assert_eq!(format_order_code(d, 1000), "(6G041000)");
    }

    #[test]
    fn forward_transitions_are_allowed_including_skips() {
        use OrderStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cooking));
        assert!(Confirmed.can_transition_to(Ready));
        assert!(Ready.can_transition_to(InService));
        assert!(InService.can_transition_to(Paid));
    }

    #[test]
    fn backward_transitions_are_rejected() {
        use OrderStatus::*;
        assert!(!Cooking.can_transition_to(Pending));
        assert!(!Ready.can_transition_to(Cooking));
        assert!(!InService.can_transition_to(Confirmed));
        assert!(!Paid.can_transition_to(Pending));
    }

    #[test]
    fn cancel_is_reachable_from_every_non_terminal_state() {
        use OrderStatus::*;
        for from in [Pending, Confirmed, Cooking, Ready, InService] {
            assert!(from.can_transition_to(Cancelled), "{from:?}");
        }
        assert!(!Paid.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn terminal_states_allow_nothing() {
        use OrderStatus::*;
        for to in [Pending, Confirmed, Cooking, Ready, InService, Paid] {
            assert!(!Paid.can_transition_to(to));
            assert!(!Cancelled.can_transition_to(to));
        }
    }

    #[test]
    fn status_round_trips_through_strings() {
        use OrderStatus::*;
        for status in [Pending, Confirmed, Cooking, Ready, InService, Paid, Cancelled] {
            let text: &'static str = status.into();
            assert_eq!(OrderStatus::from(text), status);
        }
    }

    #[test]
    fn derived_totals_follow_the_identity() {
        let order = Order {
            id: 1,
            branch_id: 1,
            table_id: None,
            placed_by: None,
            order_type: OrderType::WalkIn,
            status: OrderStatus::Pending,
            order_code: "(6B19001)".into(),
            order_date: date(2026, 2, 19),
            subtotal_cents: 1800,
            item_discount_cents: 160,
            order_discount_cents: 0,
            partner_discount_cents: 0,
            tax_rate: 10.0,
            tax_amount_cents: 164,
            cooking_started_at: None,
            ready_at: None,
            actual_prep_seconds: None,
            items: Vec::new(),
            created_at: date(2026, 2, 19).and_hms_opt(12, 0, 0).unwrap(),
            updated_at: date(2026, 2, 19).and_hms_opt(12, 0, 0).unwrap(),
        };
        assert_eq!(order.taxable_cents(), 1640);
        assert_eq!(order.total_cents(), 1804);
        assert_eq!(order.order_discount_amount_cents(), 160);
    }
}
