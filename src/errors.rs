//! Error types for the lease pool

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("failed to create a new pooled instance: {0}")]
    CreationFailed(crate::lifecycle::HookError),

    #[error("maximum number of outstanding leases reached")]
    MaxLeasesReached,

    #[error("checkout timed out after {0:?}")]
    CheckoutTimeout(std::time::Duration),

    #[error("circuit breaker is open - too many creation failures")]
    CircuitBreakerOpen,

    #[error("operation was cancelled")]
    Cancelled,
}

pub type PoolResult<T> = Result<T, PoolError>;
