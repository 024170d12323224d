//! # leasepool
//!
//! Thread-safe object pool with caller-supplied lifecycle hooks and lazy,
//! checkout-driven expiration.
//!
//! ## Features
//!
//! - Exclusive, validated access: one lock over the available and leased
//!   sets, so no instance is ever handed to two callers
//! - Lifecycle hooks per pooled type: create from a seed, validate before
//!   handing out, expire on retirement
//! - Lazy staleness: idle instances age out during checkout scans, never
//!   from a background thread
//! - Creation on demand: checkout never waits for an instance
//! - Automatic check-in via RAII (Drop trait)
//! - Optional lease cap with an async bounded wait
//! - Pool warm-up and drain
//! - Metrics, health reporting, and Prometheus export
//! - Circuit breaker over creation failures
//!
//! ## Quick Start
//!
//! ```rust
//! use leasepool::{CloneFromSeed, Pool, PoolConfiguration};
//!
//! let pool = Pool::new(42u32, CloneFromSeed, PoolConfiguration::default());
//! {
//!     let lease = pool.check_out().unwrap();
//!     println!("Got: {}", *lease);
//!     // Instance automatically checked in when `lease` goes out of scope
//! }
//! ```

mod circuit_breaker;
mod config;
mod errors;
mod expiration;
mod health;
mod lifecycle;
mod metrics;
mod pool;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerState};
pub use config::PoolConfiguration;
pub use errors::{PoolError, PoolResult};
pub use expiration::{DEFAULT_IDLE_TIMEOUT, ExpirationPolicy};
pub use health::HealthStatus;
pub use lifecycle::{CloneFromSeed, HookError, Lifecycle, LifecycleFns};
pub use metrics::{MetricsExporter, PoolMetrics};
pub use pool::{Lease, Pool};
