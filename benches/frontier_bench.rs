//! Frontier scan throughput on synthetic point clouds.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use firebreak::catalogue::Rng;
use firebreak::tradespace::{pareto_2d_min, ParetoPoint};

fn synthetic_points(count: usize, seed: u64) -> Vec<ParetoPoint> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| ParetoPoint {
            cost: rng.range_i64(60_000, 2_000_000) as f64,
            load: rng.range_i64(500, 7_000) as f64,
            time: rng.range_i64(6, 60) as f64,
        })
        .collect()
}

fn bench_frontier(c: &mut Criterion) {
    let mut group = c.benchmark_group("frontier");
    group.sample_size(100);

    for &count in &[100usize, 1_000, 10_000] {
        let points = synthetic_points(count, 7);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &points, |b, points| {
            b.iter(|| pareto_2d_min(black_box(points)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_frontier);
criterion_main!(benches);
