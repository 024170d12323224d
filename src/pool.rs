//! Core pool manager: exclusive, validated access to reusable instances

use crate::circuit_breaker::CircuitBreaker;
use crate::config::PoolConfiguration;
use crate::errors::{PoolError, PoolResult};
use crate::health::HealthStatus;
use crate::lifecycle::Lifecycle;
use crate::metrics::{MetricsExporter, MetricsTracker, PoolMetrics};

use parking_lot::Mutex;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// An idle instance together with its stamps. `idle_since` is set at the
/// moment the instance enters the available map and is the basis for the
/// idle-timeout staleness check.
struct IdleSlot<T> {
    value: T,
    created_at: Instant,
    idle_since: Instant,
}

/// Bookkeeping for an instance currently out on lease. `created_at` is
/// carried across the lease so time-to-live keeps counting from creation.
struct LeaseStamp {
    checked_out_at: Instant,
    created_at: Instant,
}

/// The one unit of shared mutable state. An id is present in exactly one
/// of the two maps, or in neither once retired.
struct PoolState<T> {
    available: HashMap<usize, IdleSlot<T>>,
    leased: HashMap<usize, LeaseStamp>,
}

struct PoolInner<T> {
    state: Mutex<PoolState<T>>,
    lifecycle: Box<dyn Lifecycle<T>>,
    seed: T,
    config: PoolConfiguration,
    metrics: MetricsTracker,
    breaker: Option<CircuitBreaker>,
    next_id: AtomicUsize,
}

impl<T: Send> PoolInner<T> {
    fn check_in_value(&self, id: usize, value: T) {
        let now = Instant::now();
        let mut state = self.state.lock();
        let created_at = state
            .leased
            .remove(&id)
            .map(|stamp| stamp.created_at)
            .unwrap_or(now);
        state.available.insert(
            id,
            IdleSlot {
                value,
                created_at,
                idle_since: now,
            },
        );
        self.metrics.checked_in.fetch_add(1, Ordering::Relaxed);
        trace!(id, "instance checked in");
    }
}

/// A leased instance that returns to the pool when dropped
///
/// Only the pool mints leases, and a lease is move-only, so an instance
/// cannot be checked in twice or handed to the pool by a stranger.
pub struct Lease<T: Send> {
    value: Option<T>,
    id: usize,
    inner: Arc<PoolInner<T>>,
}

impl<T: Send> Lease<T> {
    /// Take the inner value out of pool management entirely. The pool
    /// forgets the instance; the expire hook is not invoked.
    pub fn detach(mut self) -> T {
        let value = self.value.take().expect("value already taken");
        self.inner.state.lock().leased.remove(&self.id);
        trace!(id = self.id, "instance detached from pool");
        value
    }
}

impl<T: Send> Deref for Lease<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value.as_ref().expect("value already taken")
    }
}

impl<T: Send> DerefMut for Lease<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value.as_mut().expect("value already taken")
    }
}

impl<T: Send> Drop for Lease<T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.inner.check_in_value(self.id, value);
        }
    }
}

/// Thread-safe pool of reusable instances with caller-supplied lifecycle
/// hooks and lazy, checkout-driven expiration
///
/// Both maps (available and leased) sit behind a single exclusive lock;
/// `check_out` and `check_in` hold it for their entire body, so every
/// caller observes the two sets in a mutually consistent snapshot.
///
/// # Examples
///
/// ```
/// use leasepool::{CloneFromSeed, Pool, PoolConfiguration};
///
/// let pool = Pool::new(String::from("conn"), CloneFromSeed, PoolConfiguration::default());
///
/// let lease = pool.check_out().unwrap();
/// assert_eq!(*lease, "conn");
/// drop(lease);
///
/// assert_eq!(pool.idle_count(), 1);
/// ```
pub struct Pool<T: Send> {
    inner: Arc<PoolInner<T>>,
}

impl<T: Send> Clone for Pool<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + Sync + 'static> Pool<T> {
    /// Create a pool from a seed value, a hook set, and a configuration.
    ///
    /// The seed is the template handed to the create hook; the pool never
    /// mutates it. The pool starts empty: the first checkout manufactures
    /// the first instance unless [`warm_up`](Self::warm_up) ran first.
    pub fn new(seed: T, lifecycle: impl Lifecycle<T> + 'static, config: PoolConfiguration) -> Self {
        let breaker = config.enable_circuit_breaker.then(|| {
            CircuitBreaker::new(config.circuit_breaker_threshold, config.circuit_breaker_timeout)
        });

        Self {
            inner: Arc::new(PoolInner {
                state: Mutex::new(PoolState {
                    available: HashMap::new(),
                    leased: HashMap::new(),
                }),
                lifecycle: Box::new(lifecycle),
                seed,
                config,
                metrics: MetricsTracker::new(),
                breaker,
                next_id: AtomicUsize::new(0),
            }),
        }
    }

    /// Lease an instance, reusing an idle one when possible.
    ///
    /// Scans the available set once: stale candidates are retired, the
    /// first candidate that passes validation wins, and candidates that
    /// fail validation are retired. If the scan comes up empty the create
    /// hook manufactures a new instance from the seed. Never blocks
    /// waiting for an instance.
    pub fn check_out(&self) -> PoolResult<Lease<T>> {
        let inner = &self.inner;
        let now = Instant::now();
        let mut state = inner.state.lock();

        if let Some(max) = inner.config.max_leases
            && state.leased.len() >= max
        {
            return Err(PoolError::MaxLeasesReached);
        }

        // Snapshot the ids first: the scan removes entries as it goes, and
        // each entry present at the start must be visited exactly once.
        let candidates: Vec<usize> = state.available.keys().copied().collect();
        for id in candidates {
            let Some(slot) = state.available.remove(&id) else {
                continue;
            };

            if inner
                .config
                .expiration
                .is_expired(slot.created_at, slot.idle_since, now)
            {
                inner.metrics.expired.fetch_add(1, Ordering::Relaxed);
                debug!(id, "retiring stale instance");
                inner.lifecycle.expire(slot.value);
                continue;
            }

            if inner.lifecycle.validate(&slot.value) {
                state.leased.insert(
                    id,
                    LeaseStamp {
                        checked_out_at: now,
                        created_at: slot.created_at,
                    },
                );
                inner.metrics.checked_out.fetch_add(1, Ordering::Relaxed);
                trace!(id, "instance checked out");
                return Ok(Lease {
                    value: Some(slot.value),
                    id,
                    inner: Arc::clone(inner),
                });
            }

            inner.metrics.validation_failures.fetch_add(1, Ordering::Relaxed);
            debug!(id, "retiring instance that failed validation");
            inner.lifecycle.expire(slot.value);
        }

        // Scan exhausted; manufacture a new instance from the seed.
        if let Some(breaker) = &inner.breaker
            && !breaker.allow_request()
        {
            return Err(PoolError::CircuitBreakerOpen);
        }

        match inner.lifecycle.create(&inner.seed) {
            Ok(value) => {
                if let Some(breaker) = &inner.breaker {
                    breaker.record_success();
                }
                let id = inner.next_id.fetch_add(1, Ordering::Relaxed);
                state.leased.insert(
                    id,
                    LeaseStamp {
                        checked_out_at: now,
                        created_at: now,
                    },
                );
                inner.metrics.created.fetch_add(1, Ordering::Relaxed);
                inner.metrics.checked_out.fetch_add(1, Ordering::Relaxed);
                debug!(id, "created new instance");
                Ok(Lease {
                    value: Some(value),
                    id,
                    inner: Arc::clone(inner),
                })
            }
            Err(source) => {
                if let Some(breaker) = &inner.breaker {
                    breaker.record_failure();
                }
                inner.metrics.creation_failures.fetch_add(1, Ordering::Relaxed);
                Err(PoolError::CreationFailed(source))
            }
        }
    }

    /// Lease an instance, `None` on failure
    pub fn try_check_out(&self) -> Option<Lease<T>> {
        self.check_out().ok()
    }

    /// Return a leased instance to the available set with a fresh idle
    /// stamp. Equivalent to dropping the lease; provided as the explicit
    /// spelling. No validation runs here: staleness and validity are
    /// assessed lazily by the next checkout scan.
    pub fn check_in(&self, lease: Lease<T>) {
        drop(lease);
    }

    /// Lease an instance, waiting for capacity if the pool is capped or
    /// the circuit breaker is open. Fails with
    /// [`PoolError::CheckoutTimeout`] once the operation timeout elapses;
    /// other errors propagate immediately.
    pub async fn check_out_async(&self) -> PoolResult<Lease<T>> {
        let timeout = self
            .inner
            .config
            .operation_timeout
            .unwrap_or(Duration::from_secs(30));

        tokio::time::timeout(timeout, async {
            loop {
                match self.check_out() {
                    Ok(lease) => return Ok(lease),
                    Err(PoolError::MaxLeasesReached) | Err(PoolError::CircuitBreakerOpen) => {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    }
                    Err(other) => return Err(other),
                }
            }
        })
        .await
        .map_err(|_| PoolError::CheckoutTimeout(timeout))?
    }

    /// Pre-populate the available set by running the create hook `count`
    /// times. Stops at the first creation failure, keeping instances
    /// created so far.
    pub fn warm_up(&self, count: usize) -> PoolResult<()> {
        let inner = &self.inner;
        let now = Instant::now();
        let mut state = inner.state.lock();

        for _ in 0..count {
            let value = inner.lifecycle.create(&inner.seed).map_err(|source| {
                inner.metrics.creation_failures.fetch_add(1, Ordering::Relaxed);
                PoolError::CreationFailed(source)
            })?;
            let id = inner.next_id.fetch_add(1, Ordering::Relaxed);
            state.available.insert(
                id,
                IdleSlot {
                    value,
                    created_at: now,
                    idle_since: now,
                },
            );
            inner.metrics.created.fetch_add(1, Ordering::Relaxed);
        }

        debug!(count, "warmed up pool");
        Ok(())
    }

    /// Warm up on a blocking thread, for create hooks that do real I/O
    pub async fn warm_up_async(&self, count: usize) -> PoolResult<()> {
        let pool = self.clone();
        tokio::task::spawn_blocking(move || pool.warm_up(count))
            .await
            .map_err(|_| PoolError::Cancelled)?
    }

    /// Retire every idle instance through the expire hook and report how
    /// many were retired. Outstanding leases are unaffected and check back
    /// in normally afterwards.
    pub fn drain(&self) -> usize {
        let inner = &self.inner;
        let mut state = inner.state.lock();
        let drained = std::mem::take(&mut state.available);
        let count = drained.len();

        for (id, slot) in drained {
            trace!(id, "draining idle instance");
            inner.lifecycle.expire(slot.value);
        }

        if count > 0 {
            debug!(count, "drained idle instances");
        }
        count
    }

    /// Number of instances idle in the available set
    pub fn idle_count(&self) -> usize {
        self.inner.state.lock().available.len()
    }

    /// Number of instances currently out on lease
    pub fn leased_count(&self) -> usize {
        self.inner.state.lock().leased.len()
    }

    /// Get a point-in-time health report
    pub fn health_status(&self) -> HealthStatus {
        let state = self.inner.state.lock();
        let longest_lease_age = state
            .leased
            .values()
            .map(|stamp| stamp.checked_out_at.elapsed())
            .max();
        HealthStatus::new(
            state.available.len(),
            state.leased.len(),
            self.inner.config.max_leases,
            longest_lease_age,
        )
    }

    /// Get a metrics snapshot
    pub fn metrics(&self) -> PoolMetrics {
        let (leased, idle) = {
            let state = self.inner.state.lock();
            (state.leased.len(), state.available.len())
        };
        self.inner
            .metrics
            .snapshot(leased, idle, self.inner.config.max_leases)
    }

    /// Export metrics as a string map
    pub fn export_metrics(&self) -> HashMap<String, String> {
        self.metrics().export()
    }

    /// Export metrics in Prometheus exposition format
    pub fn export_metrics_prometheus(
        &self,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        MetricsExporter::export_prometheus(&self.metrics(), pool_name, tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiration::ExpirationPolicy;
    use crate::lifecycle::{CloneFromSeed, LifecycleFns};
    use std::collections::HashSet;
    use std::sync::atomic::Ordering::SeqCst;
    use std::thread;

    /// Hooks whose create yields 0, 1, 2, ... so instances are
    /// distinguishable, with retired values recorded in order.
    fn counting_hooks() -> (
        LifecycleFns<u64>,
        Arc<AtomicUsize>,
        Arc<Mutex<Vec<u64>>>,
    ) {
        let created = Arc::new(AtomicUsize::new(0));
        let expired = Arc::new(Mutex::new(Vec::new()));
        let created_in_hook = Arc::clone(&created);
        let expired_in_hook = Arc::clone(&expired);

        let hooks = LifecycleFns::new(move |_seed: &u64| {
            Ok(created_in_hook.fetch_add(1, SeqCst) as u64)
        })
        .with_expire(move |value| expired_in_hook.lock().push(value));

        (hooks, created, expired)
    }

    #[test]
    fn first_checkout_on_empty_pool_creates_from_seed() {
        let created = Arc::new(AtomicUsize::new(0));
        let created_in_hook = Arc::clone(&created);
        let hooks = LifecycleFns::new(move |seed: &u32| {
            created_in_hook.fetch_add(1, SeqCst);
            Ok(*seed)
        });

        let pool = Pool::new(9, hooks, PoolConfiguration::default());
        let lease = pool.check_out().unwrap();

        assert_eq!(*lease, 9);
        assert_eq!(created.load(SeqCst), 1);
        assert_eq!(pool.leased_count(), 1);
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn checkout_within_threshold_reuses_the_checked_in_instance() {
        let (hooks, created, expired) = counting_hooks();
        let pool = Pool::new(0, hooks, PoolConfiguration::default());

        let lease = pool.check_out().unwrap();
        let first = *lease;
        pool.check_in(lease);
        assert_eq!(pool.idle_count(), 1);

        let lease = pool.check_out().unwrap();
        assert_eq!(*lease, first);
        assert_eq!(created.load(SeqCst), 1);
        assert!(expired.lock().is_empty());
    }

    #[test]
    fn stale_instance_is_replaced_and_expired_exactly_once() {
        let (hooks, created, expired) = counting_hooks();
        let config = PoolConfiguration::new().with_idle_timeout(Duration::from_millis(50));
        let pool = Pool::new(0, hooks, config);

        let lease = pool.check_out().unwrap();
        let first = *lease;
        pool.check_in(lease);

        thread::sleep(Duration::from_millis(120));

        let lease = pool.check_out().unwrap();
        assert_ne!(*lease, first);
        assert_eq!(created.load(SeqCst), 2);
        assert_eq!(*expired.lock(), vec![first]);
        assert_eq!(pool.metrics().expired, 1);
    }

    #[test]
    fn failed_validation_retires_the_candidate_and_creates_fresh() {
        let (hooks, created, expired) = counting_hooks();
        let hooks = hooks.with_validate(|_| false);
        let pool = Pool::new(0, hooks, PoolConfiguration::default());

        let lease = pool.check_out().unwrap();
        let first = *lease;
        pool.check_in(lease);

        let lease = pool.check_out().unwrap();
        assert_ne!(*lease, first);
        assert_eq!(created.load(SeqCst), 2);
        assert_eq!(*expired.lock(), vec![first]);
        assert_eq!(pool.metrics().validation_failures, 1);
    }

    #[test]
    fn second_checkout_never_returns_the_outstanding_instance() {
        let (hooks, created, _expired) = counting_hooks();
        let pool = Pool::new(0, hooks, PoolConfiguration::default());

        let first = pool.check_out().unwrap();
        let second = pool.check_out().unwrap();

        assert_ne!(*first, *second);
        assert_eq!(created.load(SeqCst), 2);
        assert_eq!(pool.leased_count(), 2);
    }

    #[test]
    fn available_and_leased_never_share_an_id() {
        let (hooks, _created, _expired) = counting_hooks();
        let pool = Pool::new(0, hooks, PoolConfiguration::default());
        pool.warm_up(3).unwrap();

        let a = pool.check_out().unwrap();
        let b = pool.check_out().unwrap();
        pool.check_in(a);
        let c = pool.check_out().unwrap();

        {
            let state = pool.inner.state.lock();
            assert!(
                state
                    .available
                    .keys()
                    .all(|id| !state.leased.contains_key(id))
            );
            assert_eq!(state.available.len() + state.leased.len(), 3);
        }

        drop(b);
        drop(c);
    }

    #[test]
    fn no_instance_is_leased_to_two_threads_at_once() {
        let (hooks, _created, _expired) = counting_hooks();
        let pool = Pool::new(0, hooks, PoolConfiguration::default());
        pool.warm_up(4).unwrap();

        let held: Arc<Mutex<HashSet<u64>>> = Arc::new(Mutex::new(HashSet::new()));
        let wg = crossbeam::sync::WaitGroup::new();

        for _ in 0..8 {
            let pool = pool.clone();
            let held = Arc::clone(&held);
            let wg = wg.clone();

            thread::spawn(move || {
                for _ in 0..200 {
                    let lease = pool.check_out().unwrap();
                    assert!(held.lock().insert(*lease), "instance leased twice");
                    thread::yield_now();
                    held.lock().remove(&*lease);
                    drop(lease);
                }
                drop(wg);
            });
        }

        wg.wait();
    }

    #[test]
    fn lease_cap_limits_outstanding_leases() {
        let (hooks, _created, _expired) = counting_hooks();
        let config = PoolConfiguration::new().with_max_leases(1);
        let pool = Pool::new(0, hooks, config);

        let lease = pool.check_out().unwrap();
        assert!(matches!(
            pool.check_out(),
            Err(PoolError::MaxLeasesReached)
        ));
        assert!(pool.try_check_out().is_none());

        drop(lease);
        assert!(pool.check_out().is_ok());
    }

    #[test]
    fn drain_retires_idle_instances_exactly_once() {
        let (hooks, _created, expired) = counting_hooks();
        let pool = Pool::new(0, hooks, PoolConfiguration::default());
        pool.warm_up(3).unwrap();

        assert_eq!(pool.drain(), 3);
        assert_eq!(pool.idle_count(), 0);
        assert_eq!(expired.lock().len(), 3);

        // Nothing left to drain.
        assert_eq!(pool.drain(), 0);
        assert_eq!(expired.lock().len(), 3);
    }

    #[test]
    fn lease_survives_drain_and_rejoins_the_pool() {
        let (hooks, _created, expired) = counting_hooks();
        let pool = Pool::new(0, hooks, PoolConfiguration::default());

        let lease = pool.check_out().unwrap();
        assert_eq!(pool.drain(), 0);

        pool.check_in(lease);
        assert_eq!(pool.idle_count(), 1);
        assert!(expired.lock().is_empty());
    }

    #[test]
    fn detach_withdraws_the_instance_from_management() {
        let (hooks, _created, expired) = counting_hooks();
        let pool = Pool::new(0, hooks, PoolConfiguration::default());

        let lease = pool.check_out().unwrap();
        let value = lease.detach();

        assert_eq!(value, 0);
        assert_eq!(pool.leased_count(), 0);
        assert_eq!(pool.idle_count(), 0);
        assert!(expired.lock().is_empty());
    }

    #[test]
    fn creation_failure_surfaces_and_leaves_state_unchanged() {
        let hooks = LifecycleFns::new(|_: &u64| Err::<u64, _>("backend down".into()));
        let pool = Pool::new(0, hooks, PoolConfiguration::default());

        assert!(matches!(
            pool.check_out(),
            Err(PoolError::CreationFailed(_))
        ));
        assert_eq!(pool.leased_count(), 0);
        assert_eq!(pool.idle_count(), 0);
        assert_eq!(pool.metrics().creation_failures, 1);
    }

    #[test]
    fn breaker_opens_after_repeated_creation_failures() {
        let hooks = LifecycleFns::new(|_: &u64| Err::<u64, _>("backend down".into()));
        let config =
            PoolConfiguration::new().with_circuit_breaker(2, Duration::from_secs(60));
        let pool = Pool::new(0, hooks, config);

        assert!(matches!(pool.check_out(), Err(PoolError::CreationFailed(_))));
        assert!(matches!(pool.check_out(), Err(PoolError::CreationFailed(_))));
        assert!(matches!(pool.check_out(), Err(PoolError::CircuitBreakerOpen)));
        assert_eq!(pool.metrics().creation_failures, 2);
    }

    #[test]
    fn ttl_expires_across_lease_cycles() {
        let (hooks, created, expired) = counting_hooks();
        let config = PoolConfiguration::new()
            .with_expiration(ExpirationPolicy::TimeToLive(Duration::from_millis(50)));
        let pool = Pool::new(0, hooks, config);

        let lease = pool.check_out().unwrap();
        let first = *lease;
        pool.check_in(lease);

        // Within its lifetime the instance is reusable.
        let lease = pool.check_out().unwrap();
        assert_eq!(*lease, first);
        pool.check_in(lease);

        thread::sleep(Duration::from_millis(120));

        // A fresh idle stamp does not rescue it past the lifetime.
        let lease = pool.check_out().unwrap();
        assert_ne!(*lease, first);
        assert_eq!(created.load(SeqCst), 2);
        assert_eq!(*expired.lock(), vec![first]);
    }

    #[test]
    fn warm_up_fills_the_available_set() {
        let (hooks, created, _expired) = counting_hooks();
        let pool = Pool::new(0, hooks, PoolConfiguration::default());

        pool.warm_up(5).unwrap();
        assert_eq!(pool.idle_count(), 5);
        assert_eq!(created.load(SeqCst), 5);

        // Checkout is served from the warm set, not the create hook.
        let lease = pool.check_out().unwrap();
        assert_eq!(created.load(SeqCst), 5);
        drop(lease);
    }

    #[test]
    fn clone_from_seed_pool_round_trip() {
        let pool = Pool::new(
            String::from("template"),
            CloneFromSeed,
            PoolConfiguration::default(),
        );

        let mut lease = pool.check_out().unwrap();
        lease.push_str("-used");
        assert_eq!(*lease, "template-used");
        pool.check_in(lease);

        // Check-in does not validate or reset; the mutated value comes back.
        let lease = pool.check_out().unwrap();
        assert_eq!(*lease, "template-used");
    }

    #[test]
    fn health_reports_longest_outstanding_lease() {
        let (hooks, _created, _expired) = counting_hooks();
        let config = PoolConfiguration::new().with_max_leases(2);
        let pool = Pool::new(0, hooks, config);

        let _lease = pool.check_out().unwrap();
        thread::sleep(Duration::from_millis(20));

        let health = pool.health_status();
        assert_eq!(health.leased_instances, 1);
        assert!(health.longest_lease_age.unwrap() >= Duration::from_millis(20));
        assert!((health.utilization - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn async_checkout_waits_for_capacity() {
        let (hooks, _created, _expired) = counting_hooks();
        let config = PoolConfiguration::new()
            .with_max_leases(1)
            .with_timeout(Duration::from_secs(2));
        let pool = Pool::new(0, hooks, config);

        let lease = pool.check_out().unwrap();

        let waiter = pool.clone();
        let handle = tokio::spawn(async move { waiter.check_out_async().await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(lease);

        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn async_checkout_times_out_when_capacity_never_frees() {
        let (hooks, _created, _expired) = counting_hooks();
        let config = PoolConfiguration::new()
            .with_max_leases(1)
            .with_timeout(Duration::from_millis(50));
        let pool = Pool::new(0, hooks, config);

        let _lease = pool.check_out().unwrap();

        match pool.check_out_async().await {
            Err(PoolError::CheckoutTimeout(timeout)) => {
                assert_eq!(timeout, Duration::from_millis(50));
            }
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("expected timeout"),
        }
    }

    #[tokio::test]
    async fn async_warm_up_fills_the_pool() {
        let (hooks, _created, _expired) = counting_hooks();
        let pool = Pool::new(0, hooks, PoolConfiguration::default());

        pool.warm_up_async(4).await.unwrap();
        assert_eq!(pool.idle_count(), 4);
    }
}
