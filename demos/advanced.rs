//! Advanced features: expiration, circuit breaker, Prometheus export

use leasepool::{
    ExpirationPolicy, LifecycleFns, Pool, PoolConfiguration, PoolError,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

#[derive(Debug)]
struct Session {
    id: u64,
    open: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== leasepool - Advanced Features ===\n");

    expiration();
    validation();
    circuit_breaker();
    prometheus_export();
}

fn session_hooks() -> LifecycleFns<Session> {
    let next_id = Arc::new(AtomicU64::new(0));
    LifecycleFns::new(move |_seed: &Session| {
        Ok(Session {
            id: next_id.fetch_add(1, Ordering::Relaxed),
            open: true,
        })
    })
    .with_validate(|session: &Session| session.open)
    .with_expire(|session| println!("   closing session {}", session.id))
}

fn expiration() {
    println!("1. Idle Expiration:");

    let config = PoolConfiguration::new()
        .with_expiration(ExpirationPolicy::IdleTimeout(Duration::from_millis(50)));
    let pool = Pool::new(Session { id: 0, open: true }, session_hooks(), config);

    let lease = pool.check_out().unwrap();
    println!("   leased session {}", lease.id);
    pool.check_in(lease);

    thread::sleep(Duration::from_millis(120));

    // The idle session aged out; this checkout creates a fresh one.
    let lease = pool.check_out().unwrap();
    println!("   after idling past the threshold, leased session {}", lease.id);
    println!("   expired so far: {}\n", pool.metrics().expired);
}

fn validation() {
    println!("2. Validation Gating:");

    let broken = Arc::new(AtomicBool::new(false));
    let broken_in_hook = Arc::clone(&broken);

    let next_id = Arc::new(AtomicU64::new(0));
    let hooks = LifecycleFns::new(move |_seed: &Session| {
        Ok(Session {
            id: next_id.fetch_add(1, Ordering::Relaxed),
            open: true,
        })
    })
    .with_validate(move |_session: &Session| !broken_in_hook.load(Ordering::Relaxed))
    .with_expire(|session| println!("   retired session {}", session.id));

    let pool = Pool::new(Session { id: 0, open: true }, hooks, PoolConfiguration::default());

    let lease = pool.check_out().unwrap();
    pool.check_in(lease);

    // Simulate the backing resource going bad while idle. The next scan
    // retires the candidate and falls back to creation.
    broken.store(true, Ordering::Relaxed);

    let lease = pool.check_out().unwrap();
    println!("   idle session failed validation; leased fresh session {}", lease.id);
    println!("   validation failures: {}\n", pool.metrics().validation_failures);
}

fn circuit_breaker() {
    println!("3. Circuit Breaker:");

    let hooks = LifecycleFns::new(|_seed: &Session| Err::<Session, _>("backend down".into()));
    let config = PoolConfiguration::new().with_circuit_breaker(2, Duration::from_secs(60));
    let pool = Pool::new(Session { id: 0, open: true }, hooks, config);

    for attempt in 1..=3 {
        match pool.check_out() {
            Err(PoolError::CreationFailed(_)) => println!("   attempt {attempt}: creation failed"),
            Err(PoolError::CircuitBreakerOpen) => println!("   attempt {attempt}: circuit open"),
            Err(other) => println!("   attempt {attempt}: {other}"),
            Ok(_) => println!("   attempt {attempt}: leased"),
        }
    }
    println!();
}

fn prometheus_export() {
    println!("4. Prometheus Export:");

    let pool = Pool::new(
        Session { id: 0, open: true },
        session_hooks(),
        PoolConfiguration::new().with_max_leases(4),
    );
    pool.warm_up(2).unwrap();
    let _lease = pool.check_out().unwrap();

    let mut tags = HashMap::new();
    tags.insert("service".to_string(), "api".to_string());

    let output = pool.export_metrics_prometheus("sessions", Some(&tags));
    println!("{output}");
}
