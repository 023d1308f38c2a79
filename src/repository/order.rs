use std::collections::HashMap;

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::{
    db::DbConnection,
    domain::order::{
        NewOrder as DomainNewOrder, Order as DomainOrder, OrderListQuery, OrderStatus,
        OrderStatusEvent as DomainOrderStatusEvent, StatusTransition, format_order_code,
    },
    models::order::{
        NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem,
        NewOrderStatusEvent as DbNewOrderStatusEvent, Order as DbOrder, OrderItem as DbOrderItem,
        OrderStatusChangeset, OrderStatusEvent as DbOrderStatusEvent,
    },
    repository::{
        DieselRepository, OrderReader, OrderWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// Upper bound on candidate codes probed within one placement transaction.
const MAX_CODE_ATTEMPTS: u32 = 1000;
/// Retries of the whole transaction when a concurrent writer wins the race
/// to a probed code and the unique index rejects the insert.
const CODE_CONFLICT_RETRIES: u32 = 5;

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32, branch_id: i32) -> RepositoryResult<Option<DomainOrder>> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .filter(orders::branch_id.eq(branch_id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = order_items::table
            .filter(order_items::order_id.eq(order.id))
            .order(order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?;

        Ok(Some(DomainOrder::from((order, items))))
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<DomainOrder>)> {
        use crate::schema::{order_items, orders};

        let mut conn = self.conn()?;

        let OrderListQuery {
            branch_id,
            status,
            table_id,
            day,
            pagination,
        } = query;

        let status_filter: Option<&'static str> = status.map(Into::into);

        let mut count_query = orders::table
            .filter(orders::branch_id.eq(branch_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status_value) = status_filter {
            count_query = count_query.filter(orders::status.eq(status_value));
        }

        if let Some(table) = table_id {
            count_query = count_query.filter(orders::table_id.eq(Some(table)));
        }

        if let Some(order_day) = day {
            count_query = count_query.filter(orders::order_date.eq(order_day));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items_query = orders::table
            .filter(orders::branch_id.eq(branch_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(status_value) = status_filter {
            items_query = items_query.filter(orders::status.eq(status_value));
        }

        if let Some(table) = table_id {
            items_query = items_query.filter(orders::table_id.eq(Some(table)));
        }

        if let Some(order_day) = day {
            items_query = items_query.filter(orders::order_date.eq(order_day));
        }

        items_query = items_query.order(orders::created_at.desc());

        if let Some(pagination) = pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items_query = items_query.offset(offset).limit(limit);
        }

        let db_orders = items_query.load::<DbOrder>(&mut conn)?;
        if db_orders.is_empty() {
            return Ok((total, Vec::new()));
        }

        let order_ids: Vec<i32> = db_orders.iter().map(|order| order.id).collect();

        let mut items_by_order: HashMap<i32, Vec<DbOrderItem>> = HashMap::new();
        let rows = order_items::table
            .filter(order_items::order_id.eq_any(&order_ids))
            .order(order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?;

        for item in rows {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let orders = db_orders
            .into_iter()
            .map(|order| {
                let order_id = order.id;
                let items = items_by_order.remove(&order_id).unwrap_or_default();
                DomainOrder::from((order, items))
            })
            .collect();

        Ok((total, orders))
    }

    fn list_status_events(&self, order_id: i32) -> RepositoryResult<Vec<DomainOrderStatusEvent>> {
        use crate::schema::order_status_events;

        let mut conn = self.conn()?;
        let rows = order_status_events::table
            .filter(order_status_events::order_id.eq(order_id))
            .order(order_status_events::id.asc())
            .load::<DbOrderStatusEvent>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl OrderWriter for DieselRepository {
    fn create_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        let mut conn = self.conn()?;

        // The probe below makes duplicate codes unlikely but cannot rule them
        // out under concurrent writers; the unique index on
        // (branch_id, order_date, order_code) is the authority. A losing
        // writer re-enters with fresh state instead of failing the placement.
        for _ in 0..CODE_CONFLICT_RETRIES {
            match Self::try_create_order(&mut conn, new_order) {
                Err(RepositoryError::Database(DieselError::DatabaseError(
                    DatabaseErrorKind::UniqueViolation,
                    _,
                ))) => continue,
                other => return other,
            }
        }

        Err(RepositoryError::CodeGenerationExhausted)
    }

    fn advance_status(
        &self,
        order_id: i32,
        branch_id: i32,
        transition: &StatusTransition,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::{order_items, order_status_events, orders};

        let mut conn = self.conn()?;

        conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let current = orders::table
                .filter(orders::id.eq(order_id))
                .filter(orders::branch_id.eq(branch_id))
                .first::<DbOrder>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let from: OrderStatus = current.status.as_str().into();
            if !from.can_transition_to(transition.to) {
                return Err(RepositoryError::InvalidStatusTransition {
                    from: <&'static str>::from(from).to_string(),
                    to: <&'static str>::from(transition.to).to_string(),
                });
            }

            let now = chrono::Local::now().naive_utc();
            let cooking_started_at = match transition.to {
                OrderStatus::Cooking if current.cooking_started_at.is_none() => Some(now),
                _ => None,
            };
            let ready_at = match transition.to {
                OrderStatus::Ready if current.ready_at.is_none() => Some(now),
                _ => None,
            };
            let actual_prep_seconds = match (ready_at, current.cooking_started_at) {
                (Some(ready), Some(started)) => Some((ready - started).num_seconds()),
                _ => None,
            };

            let updated = diesel::update(
                orders::table
                    .filter(orders::id.eq(order_id))
                    .filter(orders::branch_id.eq(branch_id)),
            )
            .set(&OrderStatusChangeset {
                status: transition.to.into(),
                cooking_started_at,
                ready_at,
                actual_prep_seconds,
                updated_at: now,
            })
            .get_result::<DbOrder>(conn)?;

            diesel::insert_into(order_status_events::table)
                .values(&DbNewOrderStatusEvent {
                    order_id,
                    from_status: from.into(),
                    to_status: transition.to.into(),
                    actor: transition.actor.as_deref(),
                    note: transition.note.as_deref(),
                    created_at: now,
                })
                .execute(conn)?;

            let items = order_items::table
                .filter(order_items::order_id.eq(order_id))
                .order(order_items::id.asc())
                .load::<DbOrderItem>(conn)?;

            Ok(DomainOrder::from((updated, items)))
        })
    }
}

impl DieselRepository {
    /// One placement attempt: generate a code, then write the order and its
    /// items inside a single transaction.
    fn try_create_order(
        conn: &mut DbConnection,
        new_order: &DomainNewOrder,
    ) -> RepositoryResult<DomainOrder> {
        use crate::schema::{order_items, orders};

        conn.transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let day = new_order.placed_at.date();
            let order_code = Self::next_order_code(conn, new_order.branch_id, day)?;

            let db_new = DbNewOrder {
                branch_id: new_order.branch_id,
                table_id: new_order.table_id,
                placed_by: new_order.placed_by,
                order_type: new_order.order_type.into(),
                status: OrderStatus::Pending.into(),
                order_code: &order_code,
                order_date: day,
                subtotal_cents: new_order.subtotal_cents,
                item_discount_cents: new_order.item_discount_cents,
                order_discount_cents: new_order.order_discount_cents,
                partner_discount_cents: new_order.partner_discount_cents,
                tax_rate: new_order.tax_rate,
                tax_amount_cents: new_order.tax_amount_cents,
                created_at: new_order.placed_at,
                updated_at: new_order.placed_at,
            };

            let created = diesel::insert_into(orders::table)
                .values(&db_new)
                .get_result::<DbOrder>(conn)?;

            let order_id = created.id;

            if !new_order.items.is_empty() {
                let payload: Vec<DbNewOrderItem> = new_order
                    .items
                    .iter()
                    .map(|item| DbNewOrderItem::from_domain(order_id, item, new_order.placed_at))
                    .collect();

                diesel::insert_into(order_items::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            let items = order_items::table
                .filter(order_items::order_id.eq(order_id))
                .order(order_items::id.asc())
                .load::<DbOrderItem>(conn)?;

            Ok(DomainOrder::from((created, items)))
        })
    }

    /// Derive the next free order code for `(branch_id, day)`.
    ///
    /// The candidate sequence starts at today's order count plus one and is
    /// bumped past any code already taken, bounded by [`MAX_CODE_ATTEMPTS`].
    fn next_order_code(
        conn: &mut DbConnection,
        branch_id: i32,
        day: NaiveDate,
    ) -> RepositoryResult<String> {
        use crate::schema::orders;

        let today_count = orders::table
            .filter(orders::branch_id.eq(branch_id))
            .filter(orders::order_date.eq(day))
            .count()
            .get_result::<i64>(conn)? as u32;

        let mut sequence = today_count + 1;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let candidate = format_order_code(day, sequence);

            let taken = orders::table
                .filter(orders::branch_id.eq(branch_id))
                .filter(orders::order_date.eq(day))
                .filter(orders::order_code.eq(&candidate))
                .count()
                .get_result::<i64>(conn)?
                > 0;

            if !taken {
                return Ok(candidate);
            }
            sequence += 1;
        }

        Err(RepositoryError::CodeGenerationExhausted)
    }
}
