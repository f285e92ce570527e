//! Benchmarks for attribution summarization and the preprocessing pipeline
//!
//! Run with: cargo bench --bench summary_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use faer::Mat;
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use oncolens::explain::{summarize_with_names, Attribution};
use oncolens::pipeline::{preprocess_frame, PreprocessConfig};

/// Attribution matrix with values centered on zero
fn generate_attributions(n_samples: usize, n_features: usize, seed: u64) -> Mat<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let values: Vec<f64> = (0..n_samples * n_features)
        .map(|_| rng.gen::<f64>() - 0.5)
        .collect();
    Mat::from_fn(n_samples, n_features, |i, j| values[i * n_features + j])
}

fn feature_names(n_features: usize) -> Vec<String> {
    (0..n_features).map(|i| format!("feature_{}", i)).collect()
}

/// Diagnosis dataset with roughly 37% malignant rows
fn generate_dataset(n_rows: usize, n_features: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let diagnosis: Vec<&str> = (0..n_rows)
        .map(|_| if rng.gen::<f64>() < 0.37 { "M" } else { "B" })
        .collect();
    let mut columns = vec![Column::new("diagnosis".into(), diagnosis)];
    for i in 0..n_features {
        let values: Vec<f64> = (0..n_rows).map(|_| rng.gen::<f64>() * 100.0).collect();
        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }

    DataFrame::new(columns).expect("Failed to create DataFrame")
}

/// Summarize throughput for varying sample counts
fn benchmark_summarize_by_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_by_samples");
    group.sample_size(30);

    let n_features = 30;
    let names = feature_names(n_features);

    for n_samples in [500, 5_000, 50_000] {
        let matrix = generate_attributions(n_samples, n_features, 42);
        group.throughput(Throughput::Elements((n_samples * n_features) as u64));

        group.bench_with_input(
            BenchmarkId::new("single_class", n_samples),
            &matrix,
            |b, matrix| {
                b.iter(|| {
                    let raw = Attribution::SingleClass(matrix.clone());
                    let _ = summarize_with_names(black_box(raw), black_box(&names), black_box(10));
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("two_class", n_samples),
            &matrix,
            |b, matrix| {
                b.iter(|| {
                    let raw = Attribution::TwoClass {
                        negative: matrix.clone(),
                        positive: matrix.clone(),
                    };
                    let _ = summarize_with_names(black_box(raw), black_box(&names), black_box(10));
                });
            },
        );
    }

    group.finish();
}

/// Summarize for varying feature counts (ranking dominates at the wide end)
fn benchmark_summarize_by_features(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_by_features");
    group.sample_size(30);

    let n_samples = 1_000;

    for n_features in [10, 100, 1_000] {
        let matrix = generate_attributions(n_samples, n_features, 7);
        let names = feature_names(n_features);
        group.throughput(Throughput::Elements(n_features as u64));

        group.bench_with_input(
            BenchmarkId::new("top_5", n_features),
            &(&matrix, &names),
            |b, (matrix, names)| {
                b.iter(|| {
                    let raw = Attribution::SingleClass((*matrix).clone());
                    let _ = summarize_with_names(black_box(raw), black_box(*names), black_box(5));
                });
            },
        );
    }

    group.finish();
}

/// Clean, partition and scale an in-memory dataset
fn benchmark_preprocess(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocess");
    group.sample_size(20);

    let config = PreprocessConfig::new("diagnosis", 0.2, 42);

    for n_rows in [569, 10_000, 100_000] {
        let df = generate_dataset(n_rows, 30, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::new("rows", n_rows), &df, |b, df| {
            b.iter(|| {
                let _ = preprocess_frame(black_box(df), black_box(&config));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_summarize_by_samples,
    benchmark_summarize_by_features,
    benchmark_preprocess
);
criterion_main!(benches);
