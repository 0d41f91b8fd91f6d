//! Benchmarks for the streaming combinators.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flowta_helper::{duplicate, from_vec, map, max_since, moving_sum, operate, to_vec};
use tokio::runtime::Runtime;

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime")
}

fn benchmark_map(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("map");

    for size in [1000, 10000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("double", size), &data, |b, data| {
            b.iter(|| {
                rt.block_on(async {
                    let output = map(from_vec(black_box(data.clone())), |v| v * 2.0);
                    to_vec(output).await
                })
            })
        });
    }

    group.finish();
}

fn benchmark_moving_sum(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("moving_sum");

    for size in [1000, 10000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("period_20", size), &data, |b, data| {
            b.iter(|| {
                rt.block_on(async {
                    to_vec(moving_sum(from_vec(black_box(data.clone())), 20)).await
                })
            })
        });
    }

    group.finish();
}

fn benchmark_duplicate_operate(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("duplicate_operate");

    for size in [1000, 10000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("fork_join", size), &data, |b, data| {
            b.iter(|| {
                rt.block_on(async {
                    let mut forks = duplicate(from_vec(black_box(data.clone())), 2);
                    let right = forks.pop().unwrap();
                    let left = forks.pop().unwrap();
                    to_vec(operate(left, right, |a, b| a - b)).await
                })
            })
        });
    }

    group.finish();
}

fn benchmark_max_since(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("max_since");

    for size in [1000, 10000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("window_25", size), &data, |b, data| {
            b.iter(|| {
                rt.block_on(async {
                    to_vec(max_since(from_vec(black_box(data.clone())), 25)).await
                })
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_map,
    benchmark_moving_sum,
    benchmark_duplicate_operate,
    benchmark_max_since
);
criterion_main!(benches);
