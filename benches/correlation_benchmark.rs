//! Benchmark for complete-observation correlation
//!
//! Run with: cargo bench --bench correlation_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand::SeedableRng;

use listscope::pipeline::complete_case_correlation;

/// Generate synthetic columns with a fixed share of missing cells
fn generate_columns(
    n_rows: usize,
    n_cols: usize,
    missing_rate: f64,
    seed: u64,
) -> (Vec<String>, Vec<Vec<Option<f64>>>) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let names = (0..n_cols).map(|i| format!("column_{}", i)).collect();
    let data = (0..n_cols)
        .map(|i| {
            (0..n_rows)
                .map(|row| {
                    if rng.gen::<f64>() < missing_rate {
                        None
                    } else if i % 3 == 2 {
                        // Loosely tied to the row index, creating correlated columns
                        Some(row as f64 + rng.gen::<f64>() * 50.0)
                    } else {
                        Some(rng.gen::<f64>() * 100.0)
                    }
                })
                .collect()
        })
        .collect();

    (names, data)
}

/// Listing-sized exports with the default eleven correlation columns
fn benchmark_correlation_by_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_by_rows");
    group.sample_size(30);

    let n_cols = 11;
    let row_counts = [1_000, 3_000, 10_000, 50_000];

    for n_rows in row_counts {
        let (names, data) = generate_columns(n_rows, n_cols, 0.02, 42);

        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::new("complete_case", n_rows), &data, |b, data| {
            b.iter(|| {
                let _ = complete_case_correlation(black_box(names.clone()), black_box(data));
            });
        });
    }

    group.finish();
}

/// Effect of missingness on the complete-row filter
fn benchmark_correlation_by_missing_rate(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_by_missing_rate");
    group.sample_size(30);

    let n_rows = 10_000;
    let n_cols = 11;

    for rate in [0.0, 0.05, 0.2] {
        let (names, data) = generate_columns(n_rows, n_cols, rate, 7);

        group.bench_with_input(
            BenchmarkId::new("complete_case", format!("{:.0}%", rate * 100.0)),
            &data,
            |b, data| {
                b.iter(|| {
                    let _ = complete_case_correlation(black_box(names.clone()), black_box(data));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_correlation_by_rows,
    benchmark_correlation_by_missing_rate
);
criterion_main!(benches);
