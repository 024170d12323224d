//! Circuit breaker guarding the creation fallback

use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Successes required in half-open state before the circuit closes again.
const HALF_OPEN_CLOSE_THRESHOLD: usize = 3;

/// Circuit breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitBreakerState {
    /// Normal operation.
    Closed,

    /// Failing fast; creation is not attempted.
    Open,

    /// Probing whether creation has recovered.
    HalfOpen,
}

/// Tracks consecutive creation failures and fails checkouts fast once a
/// threshold is crossed, instead of hammering a broken `create` hook.
///
/// # Examples
///
/// ```
/// use leasepool::CircuitBreaker;
/// use std::time::Duration;
///
/// let breaker = CircuitBreaker::new(3, Duration::from_secs(60));
///
/// breaker.record_failure();
/// breaker.record_failure();
/// breaker.record_failure();
///
/// assert!(!breaker.allow_request());
/// ```
pub struct CircuitBreaker {
    state: Mutex<CircuitBreakerState>,
    failure_count: AtomicUsize,
    success_count: AtomicUsize,
    failure_threshold: usize,
    timeout: Duration,
    last_failure_time: Mutex<Option<Instant>>,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: usize, timeout: Duration) -> Self {
        Self {
            state: Mutex::new(CircuitBreakerState::Closed),
            failure_count: AtomicUsize::new(0),
            success_count: AtomicUsize::new(0),
            failure_threshold,
            timeout,
            last_failure_time: Mutex::new(None),
        }
    }

    pub fn state(&self) -> CircuitBreakerState {
        *self.state.lock()
    }

    /// Whether a creation attempt may proceed. Transitions open → half-open
    /// once the reset timeout has elapsed.
    pub fn allow_request(&self) -> bool {
        match self.state() {
            CircuitBreakerState::Closed => true,
            CircuitBreakerState::Open => {
                let timed_out = match *self.last_failure_time.lock() {
                    Some(at) => at.elapsed() > self.timeout,
                    None => true,
                };
                if timed_out {
                    self.transition_to_half_open();
                    return true;
                }
                false
            }
            CircuitBreakerState::HalfOpen => true,
        }
    }

    /// Record a successful creation.
    pub fn record_success(&self) {
        self.success_count.fetch_add(1, Ordering::Relaxed);

        if self.state() == CircuitBreakerState::HalfOpen
            && self.success_count.load(Ordering::Relaxed) >= HALF_OPEN_CLOSE_THRESHOLD
        {
            self.transition_to_closed();
        }
    }

    /// Record a failed creation.
    pub fn record_failure(&self) {
        let count = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        *self.last_failure_time.lock() = Some(Instant::now());

        match self.state() {
            CircuitBreakerState::Closed => {
                if count >= self.failure_threshold {
                    self.transition_to_open();
                }
            }
            // A failed probe reopens the circuit immediately.
            CircuitBreakerState::HalfOpen => self.transition_to_open(),
            CircuitBreakerState::Open => {}
        }
    }

    /// Force the breaker back to closed.
    pub fn reset(&self) {
        self.transition_to_closed();
    }

    fn transition_to_open(&self) {
        *self.state.lock() = CircuitBreakerState::Open;
    }

    fn transition_to_half_open(&self) {
        *self.state.lock() = CircuitBreakerState::HalfOpen;
        self.success_count.store(0, Ordering::Relaxed);
    }

    fn transition_to_closed(&self) {
        *self.state.lock() = CircuitBreakerState::Closed;
        self.failure_count.store(0, Ordering::Relaxed);
        self.success_count.store(0, Ordering::Relaxed);
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(60))
    }
}
