use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod orders;

/// Result type returned by all service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced to the request layer.
///
/// Placement rejections carry a message suitable for direct relay to the
/// ordering client; everything else maps to a generic failure response.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No table matches the supplied QR token.
    #[error("table not found")]
    TableNotFound,
    /// The table's branch no longer exists.
    #[error("branch not found")]
    BranchNotFound,
    /// A requested product does not exist for this tenant.
    #[error("product {product_id} not found")]
    ProductNotFound { product_id: i32 },
    /// The product exists but cannot be ordered at this branch.
    #[error("Product {name} is not available")]
    ProductUnavailable { name: String },
    /// The requested size cannot be ordered at this branch.
    #[error("Size {size} of product {product} is not available")]
    SizeUnavailable { product: String, size: String },
    /// The targeted order does not exist at this branch.
    #[error("order not found")]
    OrderNotFound,
    /// The requested status change violates the order state machine.
    #[error("cannot transition order from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
    /// Order-code generation ran out of attempts; safe to retry the placement.
    #[error("could not allocate an order code, please retry")]
    CodeGenerationExhausted,
    /// Request payload failed validation.
    #[error("{0}")]
    Form(String),
    /// Any other persistence failure; the transaction has been rolled back.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::CodeGenerationExhausted => Self::CodeGenerationExhausted,
            RepositoryError::InvalidStatusTransition { from, to } => {
                Self::InvalidStatusTransition { from, to }
            }
            other => Self::Repository(other),
        }
    }
}
