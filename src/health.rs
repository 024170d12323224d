//! Health reporting for pools

use std::time::Duration;

/// Point-in-time health of a pool
///
/// # Examples
///
/// ```
/// use leasepool::{CloneFromSeed, Pool, PoolConfiguration};
///
/// let pool = Pool::new(1u32, CloneFromSeed, PoolConfiguration::default());
/// pool.warm_up(3).unwrap();
///
/// let health = pool.health_status();
/// assert!(health.is_healthy());
/// assert_eq!(health.idle_instances, 3);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HealthStatus {
    /// Whether the pool is considered healthy
    pub is_healthy: bool,

    /// Number of warnings detected
    pub warning_count: usize,

    /// Leased count against the lease cap, 0.0 when uncapped
    pub utilization: f64,

    /// Instances currently idle in the available set
    pub idle_instances: usize,

    /// Instances currently leased out
    pub leased_instances: usize,

    /// Configured lease cap, if any
    pub max_leases: Option<usize>,

    /// Age of the oldest outstanding lease
    pub longest_lease_age: Option<Duration>,

    /// Warning messages
    pub warnings: Vec<String>,
}

impl HealthStatus {
    pub(crate) fn new(
        idle: usize,
        leased: usize,
        max_leases: Option<usize>,
        longest_lease_age: Option<Duration>,
    ) -> Self {
        let utilization = match max_leases {
            Some(max) if max > 0 => leased as f64 / max as f64,
            _ => 0.0,
        };

        let mut warnings = Vec::new();
        let mut is_healthy = true;

        if max_leases.is_some() && utilization > 0.9 {
            warnings.push(format!("High utilization: {:.1}%", utilization * 100.0));
            is_healthy = false;
        }

        if idle == 0 && leased > 0 {
            warnings.push("No idle instances; next checkout will create".to_string());
        }

        Self {
            is_healthy,
            warning_count: warnings.len(),
            utilization,
            idle_instances: idle,
            leased_instances: leased,
            max_leases,
            longest_lease_age,
            warnings,
        }
    }

    /// Check if the pool is healthy
    pub fn is_healthy(&self) -> bool {
        self.is_healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_pool_is_healthy_at_any_lease_count() {
        let health = HealthStatus::new(0, 50, None, Some(Duration::from_secs(1)));
        assert!(health.is_healthy());
        assert_eq!(health.utilization, 0.0);
        assert_eq!(health.warning_count, 1);
    }

    #[test]
    fn high_utilization_flags_unhealthy() {
        let health = HealthStatus::new(0, 10, Some(10), None);
        assert!(!health.is_healthy());
        assert!(health.warnings.iter().any(|w| w.contains("High utilization")));
    }

    #[test]
    fn idle_pool_has_no_warnings() {
        let health = HealthStatus::new(4, 0, Some(10), None);
        assert!(health.is_healthy());
        assert!(health.warnings.is_empty());
        assert_eq!(health.longest_lease_age, None);
    }
}
