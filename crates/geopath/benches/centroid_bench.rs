//! Criterion benchmarks for the Monte Carlo centroid.
//! Focus sizes: ring vertex counts in {16, 128, 1024}.
//!   cargo bench -p geopath --bench centroid_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use geopath::centroid::{centroid, CentroidCfg};
use geopath::Point;
use nalgebra::Vector2;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Star-shaped ring around (0, 0) spanning ~60° of longitude.
fn jagged_ring(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pts: Vec<Point> = (0..n)
        .map(|k| {
            let th = k as f64 / n as f64 * std::f64::consts::TAU;
            let r = rng.gen_range(20.0..30.0);
            Vector2::new(th.cos() * r, th.sin() * r)
        })
        .collect();
    pts.push(pts[0]);
    pts
}

fn bench_centroid(c: &mut Criterion) {
    let mut group = c.benchmark_group("centroid");
    for &n in &[16usize, 128, 1024] {
        let ring = jagged_ring(n, 17);
        group.bench_with_input(BenchmarkId::new("monte_carlo", n), &ring, |b, ring| {
            let mut rng = StdRng::seed_from_u64(5);
            b.iter(|| centroid(ring, &[0], &CentroidCfg::default(), &mut rng))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_centroid);
criterion_main!(benches);
