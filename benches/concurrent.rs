//! Concurrent update benchmarks.
//!
//! Measures throughput of `add` from multiple threads on one shared metric, comparing
//! the lock-free counter against the mutex-based kinds.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use metricraft::prelude::*;
use std::sync::Arc;
use std::thread;

fn run_threads<M: Metric + 'static>(metric: Arc<M>, threads: usize, ops_per_thread: usize) {
    let mut handles = vec![];

    for t in 0..threads {
        let metric_clone = Arc::clone(&metric);
        let start = t * ops_per_thread;
        let end = start + ops_per_thread;

        let handle = thread::spawn(move || {
            for i in start..end {
                metric_clone.add(black_box((i % 1_000) as f64));
            }
        });

        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

/// Benchmark concurrent adds with different thread counts.
fn bench_concurrent_adds(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_adds");

    let ops_per_thread = 10_000;
    let thread_counts = [1, 2, 4, 8];

    for &threads in &thread_counts {
        group.throughput(Throughput::Elements((ops_per_thread * threads) as u64));

        group.bench_with_input(BenchmarkId::new("counter", threads), &threads, |b, &threads| {
            b.iter_batched(
                || Arc::new(Counter::new()),
                |counter| run_threads(counter, threads, ops_per_thread),
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("gauge", threads), &threads, |b, &threads| {
            b.iter_batched(
                || Arc::new(Gauge::new()),
                |gauge| run_threads(gauge, threads, ops_per_thread),
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_with_input(
            BenchmarkId::new("histogram", threads),
            &threads,
            |b, &threads| {
                b.iter_batched(
                    || Arc::new(Histogram::new()),
                    |histogram| run_threads(histogram, threads, ops_per_thread),
                    criterion::BatchSize::LargeInput,
                );
            },
        );

        group.bench_with_input(
            BenchmarkId::new("windowed_counter", threads),
            &threads,
            |b, &threads| {
                b.iter_batched(
                    || Arc::new(metricraft::counter(&["60s1s"])),
                    |meter| run_threads(meter, threads, ops_per_thread),
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_concurrent_adds);
criterion_main!(benches);
