use thiserror::Error;

/// Result type returned by all repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The targeted record does not exist (or belongs to another scope).
    #[error("record not found")]
    NotFound,
    /// The bounded order-code retry loop ran out of attempts.
    #[error("order code generation exhausted")]
    CodeGenerationExhausted,
    /// The requested status change violates the order state machine.
    #[error("cannot transition order from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },
    /// Failed to check a connection out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// Any other diesel-level failure.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
}
