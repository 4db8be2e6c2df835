//! Benchmarks for SMOTE resampling and skewness measurement

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hotelprep::pipeline::{skewness, Smote};
use rand::prelude::*;

/// Two-class data with `rows` samples, 10% minority
fn imbalanced(rows: usize, features: usize) -> (Vec<Vec<f64>>, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(7);
    let x = (0..rows)
        .map(|_| (0..features).map(|_| rng.gen::<f64>()).collect())
        .collect();
    let y = (0..rows).map(|i| u8::from(i % 10 == 0)).collect();
    (x, y)
}

fn bench_smote(c: &mut Criterion) {
    let mut group = c.benchmark_group("smote_fit_resample");
    group.sample_size(20);

    for rows in [1_000usize, 5_000, 20_000] {
        let (x, y) = imbalanced(rows, 17);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| Smote::new().fit_resample(black_box(&x), black_box(&y)))
        });
    }

    group.finish();
}

fn bench_skewness(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let values: Vec<f64> = (0..100_000).map(|_| rng.gen::<f64>().powi(3)).collect();

    c.bench_function("skewness_100k", |b| b.iter(|| skewness(black_box(&values))));
}

criterion_group!(benches, bench_smote, bench_skewness);
criterion_main!(benches);
