//! Criterion benchmarks for the Monte Carlo and closed-form pricers.
//!
//! Compares sequential and partitioned Monte Carlo throughput across trial
//! counts, with the analytic formula as a baseline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pricer_core::types::OptionContract;
use pricer_models::analytical::price_analytic;
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloPricer};

fn reference_contract() -> OptionContract<f64> {
    OptionContract::call(100.0, 105.0, 1.0, 0.05, 0.2).unwrap()
}

/// Benchmark the closed-form formula.
fn bench_analytic(c: &mut Criterion) {
    let contract = reference_contract();
    c.bench_function("analytic_call", |b| {
        b.iter(|| price_analytic(black_box(&contract)).unwrap());
    });
}

/// Benchmark Monte Carlo pricing, sequential vs partitioned.
fn bench_monte_carlo(c: &mut Criterion) {
    let contract = reference_contract();
    let mut group = c.benchmark_group("monte_carlo");
    group.sample_size(20);

    for n_trials in [10_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(n_trials as u64));

        for parallel in [false, true] {
            let config = MonteCarloConfig::builder()
                .n_trials(n_trials)
                .seed(42)
                .parallel(parallel)
                .build()
                .unwrap();
            let pricer = MonteCarloPricer::new(config).unwrap();
            let label = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(BenchmarkId::new(label, n_trials), &pricer, |b, pricer| {
                b.iter(|| pricer.price(black_box(&contract)).unwrap());
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_analytic, bench_monte_carlo);
criterion_main!(benches);
