// leasepool - thread-safe object pool with lifecycle hooks
// This is just a binary wrapper - the actual library is in lib.rs
// Run demos with: cargo run --example basic

use leasepool::{CloneFromSeed, Pool, PoolConfiguration};

fn main() {
    println!("=== leasepool ===");
    println!("See demos/ directory for usage examples");
    println!("Run: cargo run --example basic");
    println!();

    // Quick demo
    println!("Quick Demo:");
    let pool = Pool::new(String::from("widget"), CloneFromSeed, PoolConfiguration::default());

    {
        let lease = pool.check_out().unwrap();
        println!("  Leased: {}", *lease);
    }

    println!("  Idle after check-in: {}", pool.idle_count());
}
