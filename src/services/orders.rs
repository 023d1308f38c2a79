//! Order placement, pricing preview and status workflow.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::branch::Branch;
use crate::domain::modifier::Modifier;
use crate::domain::order::{
    NewOrder, NewOrderItem, Order, OrderListQuery, OrderStatusEvent, OrderType, StatusTransition,
};
use crate::pricing::{self, LineRequest, OrderTotals};
use crate::repository::{BranchReader, CatalogReader, OrderReader, OrderWriter};
use crate::services::{ServiceError, ServiceResult};

/// One requested order line, as received from the ordering client.
#[derive(Debug, Clone)]
pub struct OrderLineRequest {
    /// Product to order.
    pub product_id: i32,
    /// Number of units; at least 1, enforced by the form layer.
    pub quantity: i32,
    /// Selected size, if any.
    pub size_id: Option<i32>,
    /// Requested modifiers in selection order.
    pub modifier_ids: Vec<i32>,
    /// Free-text customer remark.
    pub remark: Option<String>,
}

/// A full placement request resolved from a table's QR token.
#[derive(Debug, Clone)]
pub struct PlaceOrderRequest {
    /// Opaque token identifying the table (and through it the branch).
    pub table_token: String,
    /// How the order reached the branch.
    pub order_type: OrderType,
    /// Identifier of the ordering user, if known.
    pub placed_by: Option<i32>,
    /// Requested lines; at least one, enforced by the form layer.
    pub lines: Vec<OrderLineRequest>,
    /// Order-level discount in cents; zero in the walk-in flow.
    pub order_discount_cents: i64,
    /// Delivery-partner discount in cents; zero in the walk-in flow.
    pub partner_discount_cents: i64,
}

/// Priced but unpersisted placement, as returned by the preview endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OrderQuote {
    /// Branch the quote was priced against.
    pub branch_id: i32,
    /// Table the request came from.
    pub table_id: i32,
    /// Priced lines.
    pub items: Vec<NewOrderItem>,
    /// Aggregated order-level amounts.
    pub totals: OrderTotals,
}

impl OrderQuote {
    /// Grand total of the quote in cents.
    pub fn total_cents(&self) -> i64 {
        self.totals.total_cents()
    }
}

/// Price a placement request without persisting anything.
///
/// Safe to call any number of times; the committed order produced by
/// [`place_order`] for the same request prices identically.
pub fn preview_order<R>(repo: &R, request: &PlaceOrderRequest) -> ServiceResult<OrderQuote>
where
    R: BranchReader + CatalogReader + ?Sized,
{
    let (branch, table_id) = resolve_table(repo, &request.table_token)?;
    let items = price_lines(repo, &branch, &request.lines)?;
    let totals = pricing::aggregate(
        &items,
        &branch,
        request.order_discount_cents,
        request.partner_discount_cents,
    );

    Ok(OrderQuote {
        branch_id: branch.id,
        table_id,
        items,
        totals,
    })
}

/// Place an order: price every requested line, aggregate totals and persist
/// the order with its items in one transaction.
///
/// Any line failing validation rejects the whole placement; nothing is
/// persisted in that case.
pub fn place_order<R>(repo: &R, request: &PlaceOrderRequest) -> ServiceResult<Order>
where
    R: BranchReader + CatalogReader + OrderWriter + ?Sized,
{
    let (branch, table_id) = resolve_table(repo, &request.table_token)?;
    let items = price_lines(repo, &branch, &request.lines)?;
    let totals = pricing::aggregate(
        &items,
        &branch,
        request.order_discount_cents,
        request.partner_discount_cents,
    );

    let mut new_order = NewOrder::new(branch.id, request.order_type).with_table(table_id);
    if let Some(user_id) = request.placed_by {
        new_order = new_order.with_placed_by(user_id);
    }
    new_order.subtotal_cents = totals.subtotal_cents;
    new_order.item_discount_cents = totals.item_discount_cents;
    new_order.order_discount_cents = totals.order_discount_cents;
    new_order.partner_discount_cents = totals.partner_discount_cents;
    new_order.tax_rate = totals.tax_rate;
    new_order.tax_amount_cents = totals.tax_amount_cents;
    new_order.items = items;

    repo.create_order(&new_order).map_err(ServiceError::from)
}

/// Load one order with its status history.
pub fn load_order<R>(
    repo: &R,
    order_id: i32,
    branch_id: i32,
) -> ServiceResult<(Order, Vec<OrderStatusEvent>)>
where
    R: OrderReader + ?Sized,
{
    let order = repo
        .get_order_by_id(order_id, branch_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::OrderNotFound)?;
    let events = repo
        .list_status_events(order_id)
        .map_err(ServiceError::from)?;
    Ok((order, events))
}

/// List orders for a branch, for example for the kitchen display.
pub fn list_orders<R>(repo: &R, query: OrderListQuery) -> ServiceResult<(usize, Vec<Order>)>
where
    R: OrderReader + ?Sized,
{
    repo.list_orders(query).map_err(ServiceError::from)
}

/// Advance an order through the status workflow, recording a history event.
pub fn advance_order_status<R>(
    repo: &R,
    order_id: i32,
    branch_id: i32,
    transition: StatusTransition,
) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    match repo.advance_status(order_id, branch_id, &transition) {
        Err(crate::repository::errors::RepositoryError::NotFound) => {
            Err(ServiceError::OrderNotFound)
        }
        other => other.map_err(ServiceError::from),
    }
}

/// Resolve a QR token to its table and branch.
fn resolve_table<R>(repo: &R, token: &str) -> ServiceResult<(Branch, i32)>
where
    R: BranchReader + ?Sized,
{
    let table = repo
        .get_table_by_token(token)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::TableNotFound)?;
    let branch = repo
        .get_branch_by_id(table.branch_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::BranchNotFound)?;
    Ok((branch, table.id))
}

/// Validate and price every requested line against the override cascade.
fn price_lines<R>(
    repo: &R,
    branch: &Branch,
    lines: &[OrderLineRequest],
) -> ServiceResult<Vec<NewOrderItem>>
where
    R: CatalogReader + ?Sized,
{
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        items.push(price_line(repo, branch, line)?);
    }
    Ok(items)
}

fn price_line<R>(
    repo: &R,
    branch: &Branch,
    line: &OrderLineRequest,
) -> ServiceResult<NewOrderItem>
where
    R: CatalogReader + ?Sized,
{
    let product = repo
        .get_product_by_id(line.product_id, branch.tenant_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::ProductNotFound {
            product_id: line.product_id,
        })?;

    if !product.is_active {
        return Err(ServiceError::ProductUnavailable {
            name: product.name,
        });
    }

    let branch_product = repo
        .get_branch_product(branch.id, product.id)
        .map_err(ServiceError::from)?
        .filter(|bp| bp.is_available)
        .ok_or_else(|| ServiceError::ProductUnavailable {
            name: product.name.clone(),
        })?;

    let size = match line.size_id {
        Some(size_id) => Some(
            repo.get_size_by_id(size_id, branch.tenant_id)
                .map_err(ServiceError::from)?
                .ok_or_else(|| ServiceError::SizeUnavailable {
                    product: product.name.clone(),
                    size: format!("#{size_id}"),
                })?,
        ),
        None => None,
    };

    // A missing override record is a legal fallback to the branch price; an
    // existing record marked unavailable rejects the line.
    let size_override = match size.as_ref() {
        Some(size) => {
            let so = repo
                .get_branch_product_size(branch_product.id, size.id)
                .map_err(ServiceError::from)?;
            if let Some(ref record) = so {
                if !record.is_available {
                    return Err(ServiceError::SizeUnavailable {
                        product: product.name.clone(),
                        size: size.name.clone(),
                    });
                }
            }
            so
        }
        None => None,
    };

    // Stale or foreign modifier references are skipped, not fatal; the
    // builder additionally drops unavailable ones.
    let loaded = repo
        .list_modifiers_by_ids(&line.modifier_ids, branch.tenant_id)
        .map_err(ServiceError::from)?;
    let by_id: HashMap<i32, Modifier> = loaded
        .into_iter()
        .map(|modifier| (modifier.id, modifier))
        .collect();
    let modifiers: Vec<Modifier> = line
        .modifier_ids
        .iter()
        .filter_map(|id| by_id.get(id).cloned())
        .collect();

    Ok(pricing::build_line(LineRequest {
        product: &product,
        branch_product: &branch_product,
        size: size.as_ref(),
        size_override: size_override.as_ref(),
        modifiers: &modifiers,
        quantity: line.quantity,
        remark: line.remark.as_deref(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::branch::RestaurantTable;
    use crate::domain::branch_product::BranchProduct;
    use crate::domain::product::Product;
    use crate::repository::mock::MockOrdersRepository;
    use mockall::predicate::eq;

    fn now() -> chrono::NaiveDateTime {
        chrono::Local::now().naive_utc()
    }

    fn branch() -> Branch {
        Branch {
            id: 1,
            tenant_id: 7,
            name: "Downtown".into(),
            tax_rate: 10.0,
            tax_is_active: true,
            tax_name: "VAT".into(),
            created_at: now(),
            updated_at: now(),
        }
    }

    fn table() -> RestaurantTable {
        RestaurantTable {
            id: 4,
            branch_id: 1,
            name: "T4".into(),
            token: "tok-t4".into(),
            created_at: now(),
            updated_at: now(),
        }
    }

    fn product(id: i32, name: &str, base_cents: i64, active: bool) -> Product {
        Product {
            id,
            tenant_id: 7,
            name: name.into(),
            base_price_cents: base_cents,
            is_active: active,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn branch_product(id: i32, product_id: i32, available: bool) -> BranchProduct {
        BranchProduct {
            id,
            branch_id: 1,
            product_id,
            branch_price_cents: Some(800),
            discount_percentage: 10.0,
            has_active_discount: true,
            is_available: available,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn request(lines: Vec<OrderLineRequest>) -> PlaceOrderRequest {
        PlaceOrderRequest {
            table_token: "tok-t4".into(),
            order_type: OrderType::WalkIn,
            placed_by: None,
            lines,
            order_discount_cents: 0,
            partner_discount_cents: 0,
        }
    }

    fn line(product_id: i32) -> OrderLineRequest {
        OrderLineRequest {
            product_id,
            quantity: 2,
            size_id: None,
            modifier_ids: Vec::new(),
            remark: None,
        }
    }

    fn expect_table_resolution(repo: &mut MockOrdersRepository) {
        repo.expect_get_table_by_token()
            .with(eq("tok-t4"))
            .returning(|_| Ok(Some(table())));
        repo.expect_get_branch_by_id()
            .with(eq(1))
            .returning(|_| Ok(Some(branch())));
    }

    #[test]
    fn unknown_table_token_is_rejected() {
        let mut repo = MockOrdersRepository::new();
        repo.expect_get_table_by_token()
            .returning(|_| Ok(None));

        let err = preview_order(&repo, &request(vec![line(1)])).unwrap_err();
        assert!(matches!(err, ServiceError::TableNotFound));
    }

    #[test]
    fn missing_product_rejects_the_placement() {
        let mut repo = MockOrdersRepository::new();
        expect_table_resolution(&mut repo);
        repo.expect_get_product_by_id()
            .with(eq(42), eq(7))
            .returning(|_, _| Ok(None));

        let err = preview_order(&repo, &request(vec![line(42)])).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::ProductNotFound { product_id: 42 }
        ));
    }

    #[test]
    fn unavailable_branch_product_names_the_product() {
        let mut repo = MockOrdersRepository::new();
        expect_table_resolution(&mut repo);
        repo.expect_get_product_by_id()
            .returning(|id, _| Ok(Some(product(id, "Margherita", 1000, true))));
        repo.expect_get_branch_product()
            .returning(|_, product_id| Ok(Some(branch_product(10, product_id, false))));

        let err = preview_order(&repo, &request(vec![line(1)])).unwrap_err();
        assert_eq!(err.to_string(), "Product Margherita is not available");
    }

    #[test]
    fn inactive_product_is_treated_as_unavailable() {
        let mut repo = MockOrdersRepository::new();
        expect_table_resolution(&mut repo);
        repo.expect_get_product_by_id()
            .returning(|id, _| Ok(Some(product(id, "Calzone", 1000, false))));

        let err = preview_order(&repo, &request(vec![line(1)])).unwrap_err();
        assert!(matches!(err, ServiceError::ProductUnavailable { .. }));
    }

    #[test]
    fn preview_prices_without_touching_the_order_writer() {
        // MockOrdersRepository would panic on an unexpected create_order call.
        let mut repo = MockOrdersRepository::new();
        expect_table_resolution(&mut repo);
        repo.expect_get_product_by_id()
            .returning(|id, _| Ok(Some(product(id, "Margherita", 1000, true))));
        repo.expect_get_branch_product()
            .returning(|_, product_id| Ok(Some(branch_product(10, product_id, true))));
        repo.expect_list_modifiers_by_ids()
            .returning(|_, _| Ok(Vec::new()));

        let quote = preview_order(&repo, &request(vec![line(1)])).unwrap();
        assert_eq!(quote.branch_id, 1);
        assert_eq!(quote.table_id, 4);
        assert_eq!(quote.totals.subtotal_cents, 1600);
        assert_eq!(quote.totals.item_discount_cents, 160);
        assert_eq!(quote.totals.tax_amount_cents, 144);
        assert_eq!(quote.total_cents(), 1584);
    }

    #[test]
    fn placement_forwards_totals_and_items_to_the_writer() {
        let mut repo = MockOrdersRepository::new();
        expect_table_resolution(&mut repo);
        repo.expect_get_product_by_id()
            .returning(|id, _| Ok(Some(product(id, "Margherita", 1000, true))));
        repo.expect_get_branch_product()
            .returning(|_, product_id| Ok(Some(branch_product(10, product_id, true))));
        repo.expect_list_modifiers_by_ids()
            .returning(|_, _| Ok(Vec::new()));
        repo.expect_create_order()
            .withf(|new_order| {
                new_order.branch_id == 1
                    && new_order.table_id == Some(4)
                    && new_order.items.len() == 1
                    && new_order.subtotal_cents == 1600
                    && new_order.item_discount_cents == 160
                    && new_order.tax_amount_cents == 144
            })
            .returning(|_| Err(crate::repository::errors::RepositoryError::NotFound));

        // The writer is a mock; we only assert what reached it.
        let err = place_order(&repo, &request(vec![line(1)])).unwrap_err();
        assert!(matches!(err, ServiceError::Repository(_)));
    }

    #[test]
    fn code_exhaustion_maps_to_a_retryable_error() {
        let mut repo = MockOrdersRepository::new();
        expect_table_resolution(&mut repo);
        repo.expect_get_product_by_id()
            .returning(|id, _| Ok(Some(product(id, "Margherita", 1000, true))));
        repo.expect_get_branch_product()
            .returning(|_, product_id| Ok(Some(branch_product(10, product_id, true))));
        repo.expect_list_modifiers_by_ids()
            .returning(|_, _| Ok(Vec::new()));
        repo.expect_create_order().returning(|_| {
            Err(crate::repository::errors::RepositoryError::CodeGenerationExhausted)
        });

        let err = place_order(&repo, &request(vec![line(1)])).unwrap_err();
        assert!(matches!(err, ServiceError::CodeGenerationExhausted));
    }
}
