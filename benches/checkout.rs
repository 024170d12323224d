use criterion::{Criterion, criterion_group, criterion_main};
use leasepool::{CloneFromSeed, LifecycleFns, Pool, PoolConfiguration};
use std::hint::black_box;

fn checkout_checkin(c: &mut Criterion) {
    let pool = Pool::new(vec![0u8; 4096], CloneFromSeed, PoolConfiguration::default());
    pool.warm_up(1).unwrap();

    c.bench_function("checkout_checkin_hot_path", |b| {
        b.iter(|| {
            let lease = pool.check_out().unwrap();
            black_box(&*lease);
            drop(lease);
        })
    });
}

fn checkout_all_invalid(c: &mut Criterion) {
    // Every idle candidate fails validation, so each iteration scans,
    // retires, and falls back to creation.
    let hooks = LifecycleFns::new(|seed: &u64| Ok(*seed)).with_validate(|_| false);
    let pool = Pool::new(0u64, hooks, PoolConfiguration::default());

    c.bench_function("checkout_all_invalid", |b| {
        b.iter(|| {
            let lease = pool.check_out().unwrap();
            black_box(&*lease);
            drop(lease);
        })
    });
}

criterion_group!(benches, checkout_checkin, checkout_all_invalid);
criterion_main!(benches);
