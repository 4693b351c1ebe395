//! Benchmarks for ClockCache.
//!
//! Run with: `cargo bench --bench clock`

mod common;

use std::sync::Arc;
use std::time::Instant;

use common::workload::{KeyStream, PinPolicy, Workload, run_buffer_pool};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use framecache::policy::clock::ClockCache;

fn filled(capacity: u64) -> ClockCache<u64, Arc<u64>> {
    let mut cache = ClockCache::new(capacity as usize).unwrap();
    for i in 0..capacity {
        cache.set(i, Arc::new(i)).unwrap();
    }
    cache
}

// ============================================================================
// Set + Get benchmarks (mixed operations)
// ============================================================================

fn bench_clock_set_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("clock_policy");
    let ops_per_iter = 1024u64 * 2;
    group.throughput(Throughput::Elements(ops_per_iter));

    group.bench_function("set_get", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    let _ = cache.set(std::hint::black_box(i + 10_000), Arc::new(i));
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// Eviction churn (continuous eviction pressure)
// ============================================================================

fn bench_clock_eviction_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("clock_policy");
    group.throughput(Throughput::Elements(4096));

    group.bench_function("eviction_churn", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = cache.set(std::hint::black_box(10_000 + i), Arc::new(i));
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// Pinned pressure (sweep must skip a pinned majority)
// ============================================================================

fn bench_clock_pinned_pressure(c: &mut Criterion) {
    let mut group = c.benchmark_group("clock_pinned");
    group.throughput(Throughput::Elements(1024));

    for pinned_pct in [0u64, 50, 90, 99] {
        group.bench_function(format!("pinned_{pinned_pct}pct"), |b| {
            b.iter_batched(
                || {
                    let capacity = 1024u64;
                    let mut cache = filled(capacity);
                    for key in 0..capacity * pinned_pct / 100 {
                        cache.pin(&key).unwrap();
                    }
                    cache
                },
                |mut cache| {
                    for i in 0..1024u64 {
                        let _ = cache.set(std::hint::black_box(10_000 + i), Arc::new(i));
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_clock_exhausted_ns(c: &mut Criterion) {
    c.bench_function("clock_set_exhausted_ns", |b| {
        b.iter_custom(|iters| {
            let capacity = 4096u64;
            let mut cache = filled(capacity);
            for key in 0..capacity {
                cache.pin(&key).unwrap();
            }
            let value = Arc::new(0);
            let start = Instant::now();
            for i in 0..iters {
                let _ = std::hint::black_box(cache.set(capacity + i, value.clone()));
            }
            start.elapsed()
        })
    });
}

// ============================================================================
// Get hit (pure read performance)
// ============================================================================

fn bench_clock_get_hit_ns(c: &mut Criterion) {
    c.bench_function("clock_get_hit_ns", |b| {
        b.iter_custom(|iters| {
            let capacity = 16_384u64;
            let mut cache = filled(capacity);
            let start = Instant::now();
            for idx in 0..iters {
                let key = idx % capacity;
                let _ = std::hint::black_box(cache.get(&key));
            }
            start.elapsed()
        })
    });
}

// ============================================================================
// Set full (eviction on every insert)
// ============================================================================

fn bench_clock_set_full_ns(c: &mut Criterion) {
    c.bench_function("clock_set_full_ns", |b| {
        b.iter_custom(|iters| {
            let capacity = 4096u64;
            let mut cache = filled(capacity);
            let values: Vec<_> = (0..1024u64).map(Arc::new).collect();
            let start = Instant::now();
            for i in 0..iters {
                let key = capacity + i;
                let value = values[(i as usize) % values.len()].clone();
                let _ = cache.set(std::hint::black_box(key), value);
            }
            start.elapsed()
        })
    });
}

// ============================================================================
// Warmup (filling free frames)
// ============================================================================

fn bench_clock_warmup_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("clock_policy");
    let capacity = 4096usize;
    group.throughput(Throughput::Elements(capacity as u64));

    group.bench_function("warmup_set", |b| {
        b.iter_batched(
            || ClockCache::<u64, u64>::new(capacity).unwrap(),
            |mut cache| {
                for i in 0..capacity as u64 {
                    let _ = cache.set(std::hint::black_box(i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

// ============================================================================
// Buffer-pool hit rate (distribution x pin policy)
// ============================================================================

fn bench_clock_workload_hit_rate(c: &mut Criterion) {
    let mut group = c.benchmark_group("clock_workload_hit_rate");
    let operations = 200_000usize;
    group.throughput(Throughput::Elements(operations as u64));

    let workloads = [
        ("uniform", Workload::Uniform),
        (
            "hotset_90_10",
            Workload::Hotset {
                hot_fraction: 0.1,
                hot_prob: 0.9,
            },
        ),
        ("scan", Workload::Scan),
        ("zipfian_0.99", Workload::Zipfian { theta: 0.99 }),
    ];
    let policies = [
        ("unpinned", PinPolicy::Unpinned),
        ("pinned_hot_512", PinPolicy::PinnedHotSet { pages: 512 }),
        ("window_64", PinPolicy::Window { depth: 64 }),
    ];

    for (workload_name, workload) in workloads {
        for (policy_name, policy) in policies {
            group.bench_function(format!("{workload_name}/{policy_name}"), |b| {
                b.iter_custom(|iters| {
                    let mut total = std::time::Duration::default();
                    for _ in 0..iters {
                        let mut cache = ClockCache::new(4096).unwrap();
                        let mut stream = KeyStream::new(16_384, workload, 42);
                        let start = Instant::now();
                        let stats =
                            run_buffer_pool(&mut cache, &mut stream, policy, operations, Arc::new);
                        let _ = std::hint::black_box((stats.hit_rate(), stats.exhausted));
                        total += start.elapsed();
                    }
                    total
                })
            });
        }
    }

    group.finish();
}

// Window deeper than the pool: measures how often loads hit exhaustion.
fn bench_clock_pin_window_saturation(c: &mut Criterion) {
    let mut group = c.benchmark_group("clock_pin_window");
    let operations = 50_000usize;
    group.throughput(Throughput::Elements(operations as u64));

    for depth in [16usize, 60, 64, 128] {
        group.bench_function(format!("depth_{depth}"), |b| {
            b.iter_custom(|iters| {
                let mut total = std::time::Duration::default();
                for _ in 0..iters {
                    let mut cache = ClockCache::new(64).unwrap();
                    let mut stream = KeyStream::new(1024, Workload::Zipfian { theta: 0.9 }, 7);
                    let start = Instant::now();
                    let stats = run_buffer_pool(
                        &mut cache,
                        &mut stream,
                        PinPolicy::Window { depth },
                        operations,
                        Arc::new,
                    );
                    let _ = std::hint::black_box(stats.exhausted);
                    total += start.elapsed();
                }
                total
            })
        });
    }

    group.finish();
}

criterion_group!(end_to_end, bench_clock_set_get, bench_clock_eviction_churn);
criterion_group!(
    micro_ops,
    bench_clock_get_hit_ns,
    bench_clock_set_full_ns,
    bench_clock_exhausted_ns
);
criterion_group!(policy_level, bench_clock_warmup_set, bench_clock_pinned_pressure);
criterion_group!(
    workloads,
    bench_clock_workload_hit_rate,
    bench_clock_pin_window_saturation
);
criterion_main!(end_to_end, micro_ops, policy_level, workloads);
