//! Benchmarks for the ledger and its read cache.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use inventory_ledger::{Cache, CacheConfig, InventoryLedger};
use std::time::Duration;

/// Cached vs uncached snapshot reads.
fn bench_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("reads");

    let ledger = InventoryLedger::demo();
    // Warm the cache so get_item_cached measures the hit path.
    let _ = ledger.get_item(1001);

    group.bench_function("get_item_cached", |b| {
        b.iter(|| black_box(ledger.get_item(1001)));
    });

    group.bench_function("get_item_after_invalidation", |b| {
        b.iter(|| {
            // Each adjustment invalidates, forcing a refill on read.
            ledger.adjust_inventory(1002, 1, "bench churn").unwrap();
            black_box(ledger.get_item(1002))
        });
    });

    group.bench_function("check_availability", |b| {
        b.iter(|| black_box(ledger.check_availability(1001, 10)));
    });

    group.bench_function("low_stock_report", |b| {
        b.iter(|| black_box(ledger.get_low_stock_items(50)));
    });

    group.finish();
}

/// Full reserve/release cycles, single-threaded.
fn bench_reservation_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("reservation_cycle");

    let ledger = InventoryLedger::demo();

    group.bench_function("reserve_release_one_item", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let order = format!("bench-{i}");
            ledger.reserve_items(&order, &[(1002, 1)]).unwrap();
            ledger.release_reservation(&order).unwrap();
            i += 1;
        });
    });

    group.bench_function("reserve_release_three_items", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let order = format!("bench3-{i}");
            ledger
                .reserve_items(&order, &[(1002, 1), (1004, 1), (1007, 1)])
                .unwrap();
            ledger.release_reservation(&order).unwrap();
            i += 1;
        });
    });

    group.finish();
}

/// Contended mixed workloads across threads.
fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");

    for num_threads in [2, 4, 8].iter() {
        let ledger = InventoryLedger::demo();

        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(
            BenchmarkId::new("mixed_ops", num_threads),
            num_threads,
            |b, &num_threads| {
                b.iter(|| {
                    let handles: Vec<_> = (0..num_threads)
                        .map(|t| {
                            let ledger = ledger.clone();
                            std::thread::spawn(move || {
                                for i in 0..1000u64 {
                                    match i % 5 {
                                        0 => {
                                            let order = format!("bench-{t}-{i}");
                                            if ledger
                                                .reserve_items(&order, &[(1002, 1)])
                                                .is_ok()
                                            {
                                                let _ = ledger.release_reservation(&order);
                                            }
                                        }
                                        1 => {
                                            let _ = ledger.check_availability(1001, 10);
                                        }
                                        _ => {
                                            let _ = black_box(ledger.get_item(1001));
                                        }
                                    }
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

/// Raw cache operations, independent of the ledger.
fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache");

    let cache: Cache<String> = Cache::new(CacheConfig::new().max_capacity(100_000).build());
    for i in 0..10_000 {
        cache.set(format!("key_{i}"), format!("value_{i}"));
    }

    group.bench_function("get_existing", |b| {
        let mut i = 0;
        b.iter(|| {
            let key = format!("key_{}", i % 10_000);
            black_box(cache.get(&key));
            i += 1;
        });
    });

    group.bench_function("get_missing", |b| {
        let mut i = 0;
        b.iter(|| {
            let key = format!("missing_{i}");
            black_box(cache.get(&key));
            i += 1;
        });
    });

    group.bench_function("set_with_ttl", |b| {
        let mut i = 0;
        b.iter(|| {
            cache.set_with_ttl(format!("ttl_{i}"), "value".to_string(), Duration::from_secs(60));
            i += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_reads,
    bench_reservation_cycle,
    bench_contention,
    bench_cache,
);
criterion_main!(benches);
