//! Benchmarks for affine-to-affine resampling.
//!
//! Run with: cargo bench --package grid-processor --bench reproject_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grid_processor::{reproject, AffineTransform, GridAxes, InterpolationMethod, Raster};
use rand::Rng;

/// Global north-up raster with noisy geoid-like values.
fn generate_source(width: usize, height: usize) -> Raster {
    let mut rng = rand::thread_rng();
    let dx = 360.0 / width as f64;
    let dy = 180.0 / height as f64;
    let data = (0..width * height)
        .map(|i| {
            let lat = 90.0 - ((i / width) as f64 + 0.5) * dy;
            (50.0 * lat.to_radians().sin()) as f32 + rng.gen_range(-2.0..2.0)
        })
        .collect();
    Raster::new(
        data,
        width,
        height,
        AffineTransform::new(dx, 0.0, -180.0, 0.0, -dy, 90.0),
    )
}

fn bench_downsample(c: &mut Criterion) {
    let mut group = c.benchmark_group("reproject");
    let src = generate_source(4320, 2160);

    for resolution in [2.0, 1.0, 0.5] {
        let nlat = (180.0 / resolution) as usize;
        let nlon = (360.0 / resolution) as usize;
        let axes = GridAxes::regular(
            -90.0 + resolution / 2.0,
            resolution,
            nlat,
            resolution / 2.0,
            resolution,
            nlon,
        )
        .unwrap();
        let dst = axes.transform();

        group.throughput(Throughput::Elements((nlat * nlon) as u64));
        for method in [InterpolationMethod::Nearest, InterpolationMethod::Bilinear] {
            group.bench_with_input(
                BenchmarkId::new(method.to_string(), format!("{}deg", resolution)),
                &dst,
                |b, dst| {
                    b.iter(|| reproject(black_box(&src), dst, nlon, nlat, method).unwrap())
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_downsample);
criterion_main!(benches);
