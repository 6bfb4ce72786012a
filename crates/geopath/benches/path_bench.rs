//! Criterion benchmarks for path serialization and edge lengthening.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use geopath::edges::{lengthen_edges, EdgeCfg};
use geopath::path::{path_commands, PathOpts};
use geopath::{Point, Shape};
use nalgebra::Vector2;

fn coastline(n: usize) -> Vec<Point> {
    (0..n)
        .map(|k| {
            let t = k as f64 * 0.37;
            Vector2::new(-180.0 + (k as f64 * 360.0 / n as f64), -70.0 + 5.0 * t.sin())
        })
        .collect()
}

fn frame(n: usize) -> Shape {
    let mut pts = vec![Vector2::new(-180.0, -60.0)];
    for k in 0..n {
        let y = if k % 2 == 0 { -90.0 } else { -60.0 };
        pts.push(Vector2::new(-180.0 + 360.0 * (k + 1) as f64 / n as f64, y));
        pts.push(Vector2::new(-180.0 + 360.0 * (k + 1) as f64 / n as f64, -75.0));
    }
    Shape::from_points(pts)
}

fn bench_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("path");
    for &n in &[100usize, 1_000, 10_000] {
        let pts = coastline(n);
        group.bench_with_input(BenchmarkId::new("serialize", n), &pts, |b, pts| {
            b.iter(|| path_commands(pts, &[0], PathOpts::default()).to_string())
        });
        group.bench_with_input(BenchmarkId::new("lengthen", n), &n, |b, &n| {
            b.iter_batched(
                || frame(n / 10),
                |shape| lengthen_edges(shape, &EdgeCfg::default()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_path);
criterion_main!(benches);
