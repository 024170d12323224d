//! Async checkout with a lease cap and bounded waits

use leasepool::{LifecycleFns, Pool, PoolConfiguration, PoolError};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug)]
struct Connection {
    id: u64,
}

fn connection_hooks() -> LifecycleFns<Connection> {
    let next_id = Arc::new(AtomicU64::new(0));
    LifecycleFns::new(move |_seed: &Connection| {
        Ok(Connection {
            id: next_id.fetch_add(1, Ordering::Relaxed),
        })
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== leasepool - Async Examples ===\n");

    bounded_wait().await;
    checkout_timeout().await;
}

/// Tasks compete for a capped pool; the async checkout waits for capacity.
async fn bounded_wait() {
    println!("1. Bounded Wait:");

    let config = PoolConfiguration::new()
        .with_max_leases(2)
        .with_timeout(Duration::from_secs(5));
    let pool = Pool::new(Connection { id: 0 }, connection_hooks(), config);

    let mut handles = Vec::new();
    for task in 0..4 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            let lease = pool.check_out_async().await.unwrap();
            println!("   task {task} leased connection {}", lease.id);
            tokio::time::sleep(Duration::from_millis(50)).await;
            // lease drops here, freeing capacity for the next task
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }
    println!("   Idle after all tasks: {}\n", pool.idle_count());
}

/// A held lease exhausts the cap; the waiter times out.
async fn checkout_timeout() {
    println!("2. Checkout Timeout:");

    let config = PoolConfiguration::new()
        .with_max_leases(1)
        .with_timeout(Duration::from_millis(100));
    let pool = Pool::new(Connection { id: 0 }, connection_hooks(), config);

    let _held = pool.check_out().unwrap();

    match pool.check_out_async().await {
        Err(PoolError::CheckoutTimeout(timeout)) => {
            println!("   timed out after {timeout:?}, as expected");
        }
        Err(other) => println!("   unexpected error: {other}"),
        Ok(_) => println!("   unexpectedly got a lease"),
    }
}
