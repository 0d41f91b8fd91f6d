//! Benchmarks for indicator pipelines.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flowta_core::traits::Indicator;
use flowta_helper::{from_vec, to_vec};
use flowta_indicators::{BollingerBands, Ema, Macd, Rsi, Sma};
use tokio::runtime::Runtime;

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn bench_indicator<I>(c: &mut Criterion, group_name: &str, indicator: I)
where
    I: Indicator,
    I::Output: Send + 'static,
{
    let runtime = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group(group_name);

    for size in [1000, 10000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("stream", size), &data, |b, data| {
            b.iter(|| {
                runtime.block_on(async {
                    let output = indicator.compute(from_vec(black_box(data.clone())));
                    black_box(to_vec(output).await)
                })
            })
        });
    }

    group.finish();
}

fn benchmark_sma(c: &mut Criterion) {
    bench_indicator(c, "SMA", Sma::new(20));
}

fn benchmark_ema(c: &mut Criterion) {
    bench_indicator(c, "EMA", Ema::new(20));
}

fn benchmark_rsi(c: &mut Criterion) {
    bench_indicator(c, "RSI", Rsi::new(14));
}

fn benchmark_macd(c: &mut Criterion) {
    bench_indicator(c, "MACD", Macd::default());
}

fn benchmark_bollinger(c: &mut Criterion) {
    bench_indicator(c, "Bollinger", BollingerBands::default());
}

criterion_group!(
    benches,
    benchmark_sma,
    benchmark_ema,
    benchmark_rsi,
    benchmark_macd,
    benchmark_bollinger
);
criterion_main!(benches);
