//! Basic usage examples for leasepool

use leasepool::{CloneFromSeed, LifecycleFns, Pool, PoolConfiguration};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== leasepool - Basic Examples ===\n");

    // Example 1: Simple pool seeded with a template value
    simple_pool();

    // Example 2: Pool with lifecycle hooks
    lifecycle_hooks();

    // Example 3: Warm-up and counts
    warm_up();

    // Example 4: Metrics and health
    metrics_and_health();
}

fn simple_pool() {
    println!("1. Simple Pool:");
    let pool = Pool::new(42u32, CloneFromSeed, PoolConfiguration::default());

    {
        let lease = pool.check_out().unwrap();
        println!("   Leased: {}", *lease);
        // Instance automatically checked in when dropped
    }

    println!("   Idle after check-in: {}\n", pool.idle_count());
}

fn lifecycle_hooks() {
    println!("2. Lifecycle Hooks:");

    let hooks = LifecycleFns::new(|seed: &String| Ok(format!("{seed}-instance")))
        .with_validate(|value: &String| !value.is_empty())
        .with_expire(|value| println!("   expired: {value}"));

    let pool = Pool::new(String::from("conn"), hooks, PoolConfiguration::default());

    let lease = pool.check_out().unwrap();
    println!("   Leased: {}", *lease);
    pool.check_in(lease);

    println!("   Leased again: {}\n", *pool.check_out().unwrap());
}

fn warm_up() {
    println!("3. Warm-up:");
    let pool = Pool::new(0u64, CloneFromSeed, PoolConfiguration::default());

    pool.warm_up(5).unwrap();
    println!("   Idle after warm-up: {}", pool.idle_count());

    let a = pool.check_out().unwrap();
    let b = pool.check_out().unwrap();
    println!("   Leased: {}", pool.leased_count());
    println!("   Idle: {}", pool.idle_count());

    drop(a);
    drop(b);
    println!("   Idle after check-ins: {}\n", pool.idle_count());
}

fn metrics_and_health() {
    println!("4. Metrics and Health:");
    let pool = Pool::new(1u32, CloneFromSeed, PoolConfiguration::new().with_max_leases(8));
    pool.warm_up(4).unwrap();

    for _ in 0..3 {
        let lease = pool.check_out().unwrap();
        drop(lease);
    }
    let _held = pool.check_out().unwrap();

    let metrics = pool.metrics();
    println!("   Checked out: {}", metrics.checked_out);
    println!("   Checked in: {}", metrics.checked_in);
    println!("   Created: {}", metrics.created);

    let health = pool.health_status();
    println!("   Healthy: {}", health.is_healthy());
    println!("   Utilization: {:.0}%", health.utilization * 100.0);
}
