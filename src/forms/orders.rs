use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::order::{OrderStatus, OrderType, StatusTransition};
use crate::services::orders::{OrderLineRequest, PlaceOrderRequest};

/// Maximum length of a free-text line remark.
const REMARK_MAX_LEN: usize = 500;
const REMARK_MAX_LEN_VALIDATOR: u64 = REMARK_MAX_LEN as u64;

/// Maximum length of a table token.
const TOKEN_MAX_LEN: usize = 128;
const TOKEN_MAX_LEN_VALIDATOR: u64 = TOKEN_MAX_LEN as u64;

/// Maximum units per line.
const QUANTITY_MAX: i32 = 999;

/// Result type returned by the order form helpers.
pub type OrderFormResult<T> = Result<T, OrderFormError>;

/// Errors that can occur while processing order forms.
#[derive(Debug, Error)]
pub enum OrderFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// One requested line in a placement payload.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct OrderLineForm {
    /// Product to order.
    pub product_id: i32,
    /// Number of units.
    #[validate(range(min = 1, max = QUANTITY_MAX))]
    pub quantity: i32,
    /// Selected size, if any.
    pub size_id: Option<i32>,
    /// Requested modifiers in selection order.
    #[serde(default)]
    pub modifier_ids: Vec<i32>,
    /// Free-text customer remark.
    #[validate(length(max = REMARK_MAX_LEN_VALIDATOR))]
    pub remark: Option<String>,
}

/// Payload submitted when a table places an order.
#[derive(Debug, Deserialize, Validate)]
pub struct PlaceOrderForm {
    /// Opaque token from the table's QR code.
    #[validate(length(min = 1, max = TOKEN_MAX_LEN_VALIDATOR))]
    pub table_token: String,
    /// How the order reached the branch; defaults to walk-in.
    #[serde(default)]
    pub order_type: OrderType,
    /// Identifier of the ordering user, if known.
    pub placed_by: Option<i32>,
    /// Requested lines.
    #[validate(length(min = 1), nested)]
    pub lines: Vec<OrderLineForm>,
    /// Order-level discount in cents; reserved, defaults to zero.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub order_discount_cents: i64,
    /// Delivery-partner discount in cents; reserved, defaults to zero.
    #[serde(default)]
    #[validate(range(min = 0))]
    pub partner_discount_cents: i64,
}

impl PlaceOrderForm {
    /// Validates and sanitizes the payload into a service request.
    pub fn into_request(self) -> OrderFormResult<PlaceOrderRequest> {
        self.validate()?;

        let lines = self
            .lines
            .into_iter()
            .map(|line| OrderLineRequest {
                product_id: line.product_id,
                quantity: line.quantity,
                size_id: line.size_id,
                modifier_ids: line.modifier_ids,
                remark: line
                    .remark
                    .as_deref()
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(ToString::to_string),
            })
            .collect();

        Ok(PlaceOrderRequest {
            table_token: self.table_token,
            order_type: self.order_type,
            placed_by: self.placed_by,
            lines,
            order_discount_cents: self.order_discount_cents,
            partner_discount_cents: self.partner_discount_cents,
        })
    }
}

/// Payload submitted when staff advance an order through the workflow.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusForm {
    /// Target state.
    pub status: OrderStatus,
    /// Acting staff member.
    #[validate(length(max = 128))]
    pub actor: Option<String>,
    /// Optional note, for example a cancellation reason.
    #[validate(length(max = REMARK_MAX_LEN_VALIDATOR))]
    pub note: Option<String>,
}

impl UpdateStatusForm {
    /// Validates and sanitizes the payload into a status transition.
    pub fn into_transition(self) -> OrderFormResult<StatusTransition> {
        self.validate()?;

        let mut transition = StatusTransition::to(self.status);
        if let Some(actor) = self
            .actor
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            transition = transition.actor(actor);
        }
        if let Some(note) = self
            .note
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            transition = transition.note(note);
        }
        Ok(transition)
    }
}
