use actix_web::{HttpResponse, Responder, get, post, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::domain::order::{Order, OrderListQuery, OrderStatus};
use crate::forms::orders::{PlaceOrderForm, UpdateStatusForm};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, orders as order_service};

/// Query parameters accepted by the order list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    /// Optional status filter.
    pub status: Option<OrderStatus>,
    /// Optional table filter.
    pub table_id: Option<i32>,
    /// Optional calendar-day filter.
    pub day: Option<NaiveDate>,
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
}

/// Serialize an order together with its derived amounts.
fn order_json(order: &Order) -> serde_json::Value {
    let mut value = serde_json::to_value(order).unwrap_or_default();
    if let serde_json::Value::Object(ref mut map) = value {
        map.insert("taxable_cents".into(), order.taxable_cents().into());
        map.insert("total_cents".into(), order.total_cents().into());
    }
    value
}

fn error_response(err: ServiceError) -> HttpResponse {
    match &err {
        ServiceError::TableNotFound
        | ServiceError::BranchNotFound
        | ServiceError::OrderNotFound
        | ServiceError::ProductNotFound { .. } => {
            HttpResponse::NotFound().json(json!({ "error": err.to_string() }))
        }
        ServiceError::ProductUnavailable { .. }
        | ServiceError::SizeUnavailable { .. }
        | ServiceError::InvalidStatusTransition { .. }
        | ServiceError::Form(_) => {
            HttpResponse::UnprocessableEntity().json(json!({ "error": err.to_string() }))
        }
        ServiceError::CodeGenerationExhausted => {
            log::warn!("order code generation exhausted");
            HttpResponse::ServiceUnavailable().json(json!({ "error": err.to_string() }))
        }
        ServiceError::Repository(inner) => {
            log::error!("order request failed: {inner}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/v1/orders")]
/// Place an order for a table identified by its QR token.
///
/// Rejections carry the reason in the response body, for example which
/// product is unavailable; nothing is persisted on rejection.
pub async fn place_order(
    payload: web::Json<PlaceOrderForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let request = match payload.into_inner().into_request() {
        Ok(request) => request,
        Err(err) => {
            return HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        }
    };

    match order_service::place_order(repo.get_ref(), &request) {
        Ok(order) => HttpResponse::Created().json(order_json(&order)),
        Err(err) => error_response(err),
    }
}

#[post("/v1/orders/preview")]
/// Price an order without persisting it.
pub async fn preview_order(
    payload: web::Json<PlaceOrderForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let request = match payload.into_inner().into_request() {
        Ok(request) => request,
        Err(err) => {
            return HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        }
    };

    match order_service::preview_order(repo.get_ref(), &request) {
        Ok(quote) => HttpResponse::Ok().json(json!({
            "branch_id": quote.branch_id,
            "table_id": quote.table_id,
            "items": quote.items,
            "totals": quote.totals,
            "total_cents": quote.total_cents(),
        })),
        Err(err) => error_response(err),
    }
}

#[get("/v1/branches/{branch_id}/orders")]
/// Return a JSON list of orders for a branch, newest first.
pub async fn list_orders(
    path: web::Path<i32>,
    params: web::Query<OrdersQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let branch_id = path.into_inner();
    let OrdersQuery {
        status,
        table_id,
        day,
        page,
    } = params.into_inner();

    let mut query =
        OrderListQuery::new(branch_id).paginate(page.unwrap_or(1), DEFAULT_ITEMS_PER_PAGE);
    if let Some(status) = status {
        query = query.status(status);
    }
    if let Some(table_id) = table_id {
        query = query.table_id(table_id);
    }
    if let Some(day) = day {
        query = query.day(day);
    }

    match order_service::list_orders(repo.get_ref(), query) {
        Ok((total, orders)) => HttpResponse::Ok().json(json!({
            "total": total,
            "orders": orders.iter().map(order_json).collect::<Vec<_>>(),
        })),
        Err(err) => error_response(err),
    }
}

#[get("/v1/branches/{branch_id}/orders/{order_id}")]
/// Return one order with its status history.
pub async fn get_order(
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (branch_id, order_id) = path.into_inner();

    match order_service::load_order(repo.get_ref(), order_id, branch_id) {
        Ok((order, events)) => HttpResponse::Ok().json(json!({
            "order": order_json(&order),
            "events": events,
        })),
        Err(err) => error_response(err),
    }
}

#[post("/v1/branches/{branch_id}/orders/{order_id}/status")]
/// Advance an order through the kitchen workflow.
pub async fn update_order_status(
    path: web::Path<(i32, i32)>,
    payload: web::Json<UpdateStatusForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (branch_id, order_id) = path.into_inner();

    let transition = match payload.into_inner().into_transition() {
        Ok(transition) => transition,
        Err(err) => {
            return HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        }
    };

    match order_service::advance_order_status(repo.get_ref(), order_id, branch_id, transition) {
        Ok(order) => HttpResponse::Ok().json(order_json(&order)),
        Err(err) => error_response(err),
    }
}
