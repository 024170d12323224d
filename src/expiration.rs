//! Expiration policies applied to idle instances during the checkout scan

use std::time::{Duration, Instant};

/// Idle threshold used when no policy is configured explicitly.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// When an idle instance is considered stale.
///
/// Staleness is only assessed lazily, by the scan inside
/// [`Pool::check_out`](crate::Pool::check_out); nothing runs in the
/// background.
///
/// # Examples
///
/// ```
/// use leasepool::{ExpirationPolicy, PoolConfiguration};
/// use std::time::Duration;
///
/// let config = PoolConfiguration::new()
///     .with_expiration(ExpirationPolicy::Combined {
///         ttl: Duration::from_secs(3600),
///         idle_timeout: Duration::from_secs(30),
///     });
/// ```
#[derive(Debug, Clone)]
pub enum ExpirationPolicy {
    /// Idle instances never go stale.
    None,

    /// Stale once the instance has sat in the available set longer than
    /// the threshold. This is the classic checkout-driven aging policy.
    IdleTimeout(Duration),

    /// Stale once the instance has existed longer than the threshold,
    /// counted from creation and unaffected by checkout/check-in cycles.
    TimeToLive(Duration),

    /// Stale when either bound is exceeded.
    Combined {
        ttl: Duration,
        idle_timeout: Duration,
    },
}

impl Default for ExpirationPolicy {
    fn default() -> Self {
        ExpirationPolicy::IdleTimeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl ExpirationPolicy {
    pub(crate) fn is_expired(&self, created_at: Instant, idle_since: Instant, now: Instant) -> bool {
        match self {
            ExpirationPolicy::None => false,
            ExpirationPolicy::IdleTimeout(threshold) => {
                now.duration_since(idle_since) > *threshold
            }
            ExpirationPolicy::TimeToLive(ttl) => now.duration_since(created_at) > *ttl,
            ExpirationPolicy::Combined { ttl, idle_timeout } => {
                now.duration_since(created_at) > *ttl
                    || now.duration_since(idle_since) > *idle_timeout
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_thirty_second_idle_timeout() {
        match ExpirationPolicy::default() {
            ExpirationPolicy::IdleTimeout(threshold) => {
                assert_eq!(threshold, Duration::from_secs(30));
            }
            other => panic!("unexpected default policy: {other:?}"),
        }
    }

    #[test]
    fn idle_timeout_compares_against_idle_stamp() {
        let policy = ExpirationPolicy::IdleTimeout(Duration::from_secs(30));
        let base = Instant::now();

        assert!(!policy.is_expired(base, base, base + Duration::from_secs(30)));
        assert!(policy.is_expired(base, base, base + Duration::from_secs(31)));
    }

    #[test]
    fn ttl_counts_from_creation() {
        let policy = ExpirationPolicy::TimeToLive(Duration::from_secs(60));
        let created = Instant::now();
        let idle = created + Duration::from_secs(59);

        // Fresh idle stamp does not rescue an instance past its lifetime.
        assert!(policy.is_expired(created, idle, created + Duration::from_secs(61)));
        assert!(!policy.is_expired(created, idle, created + Duration::from_secs(60)));
    }

    #[test]
    fn combined_expires_on_either_bound() {
        let policy = ExpirationPolicy::Combined {
            ttl: Duration::from_secs(100),
            idle_timeout: Duration::from_secs(10),
        };
        let created = Instant::now();

        let idle = created + Duration::from_secs(50);
        assert!(policy.is_expired(created, idle, idle + Duration::from_secs(11)));
        assert!(policy.is_expired(created, idle, created + Duration::from_secs(101)));
        assert!(!policy.is_expired(created, idle, idle + Duration::from_secs(5)));
    }

    #[test]
    fn none_never_expires() {
        let base = Instant::now();
        let policy = ExpirationPolicy::None;
        assert!(!policy.is_expired(base, base, base + Duration::from_secs(1_000_000)));
    }
}
