//! Metrics collection and export

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Point-in-time metrics snapshot for a pool
///
/// # Examples
///
/// ```
/// use leasepool::{CloneFromSeed, Pool, PoolConfiguration};
///
/// let pool = Pool::new(1u32, CloneFromSeed, PoolConfiguration::default());
///
/// let lease = pool.check_out().unwrap();
/// let metrics = pool.metrics();
/// assert_eq!(metrics.checked_out, 1);
/// assert_eq!(metrics.created, 1);
/// assert_eq!(metrics.leased_instances, 1);
/// drop(lease);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PoolMetrics {
    /// Leases handed out, whether reused or freshly created
    pub checked_out: usize,

    /// Instances returned to the available set
    pub checked_in: usize,

    /// Instances manufactured by the create hook
    pub created: usize,

    /// Idle instances retired for exceeding the expiration policy
    pub expired: usize,

    /// Idle instances retired for failing validation
    pub validation_failures: usize,

    /// Create hook invocations that failed
    pub creation_failures: usize,

    /// Instances currently leased out
    pub leased_instances: usize,

    /// Instances currently idle in the available set
    pub idle_instances: usize,

    /// Configured lease cap, if any
    pub max_leases: Option<usize>,

    /// Leased count against the cap, 0.0 when uncapped
    pub utilization: f64,
}

impl PoolMetrics {
    /// Export metrics as a string map
    pub fn export(&self) -> HashMap<String, String> {
        let mut metrics = HashMap::new();
        metrics.insert("checked_out".to_string(), self.checked_out.to_string());
        metrics.insert("checked_in".to_string(), self.checked_in.to_string());
        metrics.insert("created".to_string(), self.created.to_string());
        metrics.insert("expired".to_string(), self.expired.to_string());
        metrics.insert(
            "validation_failures".to_string(),
            self.validation_failures.to_string(),
        );
        metrics.insert(
            "creation_failures".to_string(),
            self.creation_failures.to_string(),
        );
        metrics.insert(
            "leased_instances".to_string(),
            self.leased_instances.to_string(),
        );
        metrics.insert("idle_instances".to_string(), self.idle_instances.to_string());
        metrics.insert("utilization".to_string(), format!("{:.2}", self.utilization));
        metrics
    }
}

/// Metrics exporter for Prometheus exposition format
pub struct MetricsExporter;

impl MetricsExporter {
    /// Export metrics in Prometheus exposition format
    ///
    /// # Examples
    ///
    /// ```
    /// use leasepool::{CloneFromSeed, Pool, PoolConfiguration};
    /// use std::collections::HashMap;
    ///
    /// let pool = Pool::new(1u32, CloneFromSeed, PoolConfiguration::default());
    ///
    /// let mut tags = HashMap::new();
    /// tags.insert("service".to_string(), "api".to_string());
    ///
    /// let output = pool.export_metrics_prometheus("connections", Some(&tags));
    /// assert!(output.contains("leasepool_instances_leased"));
    /// assert!(output.contains("service=\"api\""));
    /// ```
    pub fn export_prometheus(
        metrics: &PoolMetrics,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        let mut output = String::new();
        let labels = Self::format_labels(pool_name, tags);

        // Gauge metrics
        output.push_str("# HELP leasepool_instances_leased Instances currently leased out\n");
        output.push_str("# TYPE leasepool_instances_leased gauge\n");
        output.push_str(&format!(
            "leasepool_instances_leased{{{}}} {}\n",
            labels, metrics.leased_instances
        ));

        output.push_str("# HELP leasepool_instances_idle Instances currently idle\n");
        output.push_str("# TYPE leasepool_instances_idle gauge\n");
        output.push_str(&format!(
            "leasepool_instances_idle{{{}}} {}\n",
            labels, metrics.idle_instances
        ));

        output.push_str("# HELP leasepool_utilization Leased count against the lease cap\n");
        output.push_str("# TYPE leasepool_utilization gauge\n");
        output.push_str(&format!(
            "leasepool_utilization{{{}}} {:.2}\n",
            labels, metrics.utilization
        ));

        // Counter metrics
        output.push_str("# HELP leasepool_checked_out_total Leases handed out\n");
        output.push_str("# TYPE leasepool_checked_out_total counter\n");
        output.push_str(&format!(
            "leasepool_checked_out_total{{{}}} {}\n",
            labels, metrics.checked_out
        ));

        output.push_str("# HELP leasepool_checked_in_total Instances returned to the pool\n");
        output.push_str("# TYPE leasepool_checked_in_total counter\n");
        output.push_str(&format!(
            "leasepool_checked_in_total{{{}}} {}\n",
            labels, metrics.checked_in
        ));

        output.push_str("# HELP leasepool_created_total Instances manufactured\n");
        output.push_str("# TYPE leasepool_created_total counter\n");
        output.push_str(&format!(
            "leasepool_created_total{{{}}} {}\n",
            labels, metrics.created
        ));

        output.push_str("# HELP leasepool_expired_total Idle instances retired as stale\n");
        output.push_str("# TYPE leasepool_expired_total counter\n");
        output.push_str(&format!(
            "leasepool_expired_total{{{}}} {}\n",
            labels, metrics.expired
        ));

        output.push_str("# HELP leasepool_validation_failures_total Instances retired on failed validation\n");
        output.push_str("# TYPE leasepool_validation_failures_total counter\n");
        output.push_str(&format!(
            "leasepool_validation_failures_total{{{}}} {}\n",
            labels, metrics.validation_failures
        ));

        output.push_str("# HELP leasepool_creation_failures_total Create hook failures\n");
        output.push_str("# TYPE leasepool_creation_failures_total counter\n");
        output.push_str(&format!(
            "leasepool_creation_failures_total{{{}}} {}\n",
            labels, metrics.creation_failures
        ));

        output
    }

    fn format_labels(pool_name: &str, tags: Option<&HashMap<String, String>>) -> String {
        let mut labels = vec![format!("pool=\"{}\"", pool_name)];

        if let Some(tags) = tags {
            for (key, value) in tags {
                labels.push(format!("{}=\"{}\"", key, value));
            }
        }

        labels.join(",")
    }
}

/// Internal counter set, bumped under the pool lock or via relaxed atomics
pub(crate) struct MetricsTracker {
    pub checked_out: AtomicUsize,
    pub checked_in: AtomicUsize,
    pub created: AtomicUsize,
    pub expired: AtomicUsize,
    pub validation_failures: AtomicUsize,
    pub creation_failures: AtomicUsize,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self {
            checked_out: AtomicUsize::new(0),
            checked_in: AtomicUsize::new(0),
            created: AtomicUsize::new(0),
            expired: AtomicUsize::new(0),
            validation_failures: AtomicUsize::new(0),
            creation_failures: AtomicUsize::new(0),
        }
    }

    pub fn snapshot(
        &self,
        leased: usize,
        idle: usize,
        max_leases: Option<usize>,
    ) -> PoolMetrics {
        let utilization = match max_leases {
            Some(max) if max > 0 => leased as f64 / max as f64,
            _ => 0.0,
        };

        PoolMetrics {
            checked_out: self.checked_out.load(Ordering::Relaxed),
            checked_in: self.checked_in.load(Ordering::Relaxed),
            created: self.created.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            creation_failures: self.creation_failures.load(Ordering::Relaxed),
            leased_instances: leased,
            idle_instances: idle,
            max_leases,
            utilization,
        }
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}
