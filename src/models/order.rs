use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::order::{
    NewOrderItem as DomainNewOrderItem, Order as DomainOrder, OrderItem as DomainOrderItem,
    OrderStatusEvent as DomainOrderStatusEvent, SelectedModifier,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub branch_id: i32,
    pub table_id: Option<i32>,
    pub placed_by: Option<i32>,
    pub order_type: String,
    pub status: String,
    pub order_code: String,
    pub order_date: NaiveDate,
    pub subtotal_cents: i64,
    pub item_discount_cents: i64,
    pub order_discount_cents: i64,
    pub partner_discount_cents: i64,
    pub tax_rate: f64,
    pub tax_amount_cents: i64,
    pub cooking_started_at: Option<NaiveDateTime>,
    pub ready_at: Option<NaiveDateTime>,
    pub actual_prep_seconds: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub size_id: Option<i32>,
    pub size_name: Option<String>,
    pub branch_product_size_id: Option<i32>,
    pub base_price_cents: i64,
    pub original_price_cents: i64,
    pub modifier_total_cents: i64,
    pub item_discount_cents: i64,
    pub discount_percentage: f64,
    pub discount_source: String,
    pub final_unit_price_cents: i64,
    pub quantity: i32,
    pub selected_modifiers: String,
    pub remark: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable order row. The code, day and timestamps are assigned by the
/// repository inside the placement transaction.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub branch_id: i32,
    pub table_id: Option<i32>,
    pub placed_by: Option<i32>,
    pub order_type: &'a str,
    pub status: &'a str,
    pub order_code: &'a str,
    pub order_date: NaiveDate,
    pub subtotal_cents: i64,
    pub item_discount_cents: i64,
    pub order_discount_cents: i64,
    pub partner_discount_cents: i64,
    pub tax_rate: f64,
    pub tax_amount_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem<'a> {
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: &'a str,
    pub size_id: Option<i32>,
    pub size_name: Option<&'a str>,
    pub branch_product_size_id: Option<i32>,
    pub base_price_cents: i64,
    pub original_price_cents: i64,
    pub modifier_total_cents: i64,
    pub item_discount_cents: i64,
    pub discount_percentage: f64,
    pub discount_source: &'a str,
    pub final_unit_price_cents: i64,
    pub quantity: i32,
    pub selected_modifiers: String,
    pub remark: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Changeset applied when an order advances through the status machine.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::orders)]
pub struct OrderStatusChangeset<'a> {
    pub status: &'a str,
    pub cooking_started_at: Option<NaiveDateTime>,
    pub ready_at: Option<NaiveDateTime>,
    pub actual_prep_seconds: Option<i64>,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_status_events)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderStatusEvent {
    pub id: i32,
    pub order_id: i32,
    pub from_status: String,
    pub to_status: String,
    pub actor: Option<String>,
    pub note: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_status_events)]
pub struct NewOrderStatusEvent<'a> {
    pub order_id: i32,
    pub from_status: &'a str,
    pub to_status: &'a str,
    pub actor: Option<&'a str>,
    pub note: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

impl Order {
    pub fn into_domain(self, items: Vec<OrderItem>) -> DomainOrder {
        DomainOrder {
            id: self.id,
            branch_id: self.branch_id,
            table_id: self.table_id,
            placed_by: self.placed_by,
            order_type: self.order_type.as_str().into(),
            status: self.status.as_str().into(),
            order_code: self.order_code,
            order_date: self.order_date,
            subtotal_cents: self.subtotal_cents,
            item_discount_cents: self.item_discount_cents,
            order_discount_cents: self.order_discount_cents,
            partner_discount_cents: self.partner_discount_cents,
            tax_rate: self.tax_rate,
            tax_amount_cents: self.tax_amount_cents,
            cooking_started_at: self.cooking_started_at,
            ready_at: self.ready_at,
            actual_prep_seconds: self.actual_prep_seconds,
            items: items.into_iter().map(OrderItem::into_domain).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<(Order, Vec<OrderItem>)> for DomainOrder {
    fn from(value: (Order, Vec<OrderItem>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl OrderItem {
    pub fn into_domain(self) -> DomainOrderItem {
        // The snapshot column is written by this crate; a malformed value is
        // decoded as an empty list rather than failing the whole read.
        let selected_modifiers: Vec<SelectedModifier> =
            serde_json::from_str(&self.selected_modifiers).unwrap_or_default();
        DomainOrderItem {
            id: self.id,
            order_id: self.order_id,
            product_id: self.product_id,
            product_name: self.product_name,
            size_id: self.size_id,
            size_name: self.size_name,
            branch_product_size_id: self.branch_product_size_id,
            base_price_cents: self.base_price_cents,
            original_price_cents: self.original_price_cents,
            modifier_total_cents: self.modifier_total_cents,
            item_discount_cents: self.item_discount_cents,
            discount_percentage: self.discount_percentage,
            discount_source: self.discount_source.as_str().into(),
            final_unit_price_cents: self.final_unit_price_cents,
            quantity: self.quantity,
            selected_modifiers,
            remark: self.remark,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl<'a> NewOrderItem<'a> {
    pub fn from_domain(order_id: i32, value: &'a DomainNewOrderItem, now: NaiveDateTime) -> Self {
        let selected_modifiers =
            serde_json::to_string(&value.selected_modifiers).unwrap_or_else(|_| "[]".to_string());
        Self {
            order_id,
            product_id: value.product_id,
            product_name: value.product_name.as_str(),
            size_id: value.size_id,
            size_name: value.size_name.as_deref(),
            branch_product_size_id: value.branch_product_size_id,
            base_price_cents: value.base_price_cents,
            original_price_cents: value.original_price_cents,
            modifier_total_cents: value.modifier_total_cents,
            item_discount_cents: value.item_discount_cents,
            discount_percentage: value.discount_percentage,
            discount_source: value.discount_source.into(),
            final_unit_price_cents: value.final_unit_price_cents,
            quantity: value.quantity,
            selected_modifiers,
            remark: value.remark.as_deref(),
            updated_at: now,
        }
    }
}

impl OrderStatusEvent {
    pub fn into_domain(self) -> DomainOrderStatusEvent {
        DomainOrderStatusEvent {
            id: self.id,
            order_id: self.order_id,
            from_status: self.from_status.as_str().into(),
            to_status: self.to_status.as_str().into(),
            actor: self.actor,
            note: self.note,
            created_at: self.created_at,
        }
    }
}

impl From<OrderStatusEvent> for DomainOrderStatusEvent {
    fn from(value: OrderStatusEvent) -> Self {
        value.into_domain()
    }
}
