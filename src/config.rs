//! Pool configuration options

use crate::expiration::ExpirationPolicy;
use std::time::Duration;

/// Configuration for pool behavior
///
/// # Examples
///
/// ```
/// use leasepool::PoolConfiguration;
/// use std::time::Duration;
///
/// let config = PoolConfiguration::new()
///     .with_idle_timeout(Duration::from_secs(60))
///     .with_max_leases(16)
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.max_leases, Some(16));
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfiguration {
    /// When idle instances are considered stale. Defaults to a 30 second
    /// idle timeout.
    pub expiration: ExpirationPolicy,

    /// Maximum number of leases outstanding at once. `None` (the default)
    /// leaves checkout unbounded: it always falls back to creation.
    pub max_leases: Option<usize>,

    /// How long the async checkout is willing to wait for capacity.
    pub operation_timeout: Option<Duration>,

    /// Fail checkouts fast after repeated creation failures.
    pub enable_circuit_breaker: bool,

    /// Creation failures tolerated before the circuit opens.
    pub circuit_breaker_threshold: usize,

    /// How long the circuit stays open before probing again.
    pub circuit_breaker_timeout: Duration,
}

impl Default for PoolConfiguration {
    fn default() -> Self {
        Self {
            expiration: ExpirationPolicy::default(),
            max_leases: None,
            operation_timeout: Some(Duration::from_secs(30)),
            enable_circuit_breaker: false,
            circuit_breaker_threshold: 5,
            circuit_breaker_timeout: Duration::from_secs(60),
        }
    }
}

impl PoolConfiguration {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expiration policy applied during checkout scans
    pub fn with_expiration(mut self, policy: ExpirationPolicy) -> Self {
        self.expiration = policy;
        self
    }

    /// Shorthand for an idle-timeout expiration policy
    ///
    /// # Examples
    ///
    /// ```
    /// use leasepool::{ExpirationPolicy, PoolConfiguration};
    /// use std::time::Duration;
    ///
    /// let config = PoolConfiguration::new()
    ///     .with_idle_timeout(Duration::from_secs(10));
    ///
    /// assert!(matches!(config.expiration, ExpirationPolicy::IdleTimeout(_)));
    /// ```
    pub fn with_idle_timeout(mut self, threshold: Duration) -> Self {
        self.expiration = ExpirationPolicy::IdleTimeout(threshold);
        self
    }

    /// Shorthand for a time-to-live expiration policy
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.expiration = ExpirationPolicy::TimeToLive(ttl);
        self
    }

    /// Bound the number of simultaneously outstanding leases
    pub fn with_max_leases(mut self, count: usize) -> Self {
        self.max_leases = Some(count);
        self
    }

    /// Set the async checkout timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Enable the creation-failure circuit breaker
    ///
    /// # Examples
    ///
    /// ```
    /// use leasepool::PoolConfiguration;
    /// use std::time::Duration;
    ///
    /// let config = PoolConfiguration::new()
    ///     .with_circuit_breaker(3, Duration::from_secs(60));
    ///
    /// assert!(config.enable_circuit_breaker);
    /// assert_eq!(config.circuit_breaker_threshold, 3);
    /// ```
    pub fn with_circuit_breaker(mut self, threshold: usize, timeout: Duration) -> Self {
        self.enable_circuit_breaker = true;
        self.circuit_breaker_threshold = threshold;
        self.circuit_breaker_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiration::DEFAULT_IDLE_TIMEOUT;

    #[test]
    fn default_expiration_matches_reference_threshold() {
        let config = PoolConfiguration::default();
        match config.expiration {
            ExpirationPolicy::IdleTimeout(threshold) => {
                assert_eq!(threshold, DEFAULT_IDLE_TIMEOUT);
            }
            other => panic!("unexpected default policy: {other:?}"),
        }
        assert_eq!(config.max_leases, None);
        assert!(!config.enable_circuit_breaker);
    }
}
