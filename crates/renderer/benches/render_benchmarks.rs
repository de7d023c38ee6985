//! Benchmarks for the renderer crate: field painting and PNG encoding.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use renderer::map::MapFrame;
use renderer::{png, render_grid, Canvas, Color, StyleConfig, ValueRange};
use test_utils::generators::{grace_mascon_axes, synthetic_lwe_frames};

/// LWE-like field with noise, in cm.
fn generate_lwe_grid(width: usize, height: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    let mut data = vec![0.0f32; width * height];
    for y in 0..height {
        let lat = (y as f32 / height as f32 - 0.5) * std::f32::consts::PI;
        for x in 0..width {
            let lon = x as f32 / width as f32 * std::f32::consts::TAU;
            data[y * width + x] = 20.0 * lat.cos() * lon.sin() + rng.gen_range(-3.0..3.0);
        }
    }
    data
}

fn bench_render_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_grid");
    let rdbu = StyleConfig::builtin().unwrap().colormap("RdBu").unwrap();

    for (w, h) in [(256, 128), (720, 360), (1440, 720)] {
        let data = generate_lwe_grid(w, h);
        let range = ValueRange::from_data(&data).unwrap().symmetric();
        group.throughput(Throughput::Elements((w * h) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(format!("{}x{}", w, h)), &data, |b, data| {
            b.iter(|| render_grid(black_box(data), w, h, &rdbu, range))
        });
    }
    group.finish();
}

fn bench_draw_field(c: &mut Criterion) {
    let axes = grace_mascon_axes();
    let values = synthetic_lwe_frames(&axes, 1);
    let range = ValueRange::from_data(&values).unwrap().symmetric();
    let puor = StyleConfig::builtin().unwrap().colormap("PuOr").unwrap();

    c.bench_function("draw_field_1000x500", |b| {
        b.iter(|| {
            let mut canvas = Canvas::new(1100, 600).unwrap();
            canvas.fill(Color::WHITE);
            let frame = MapFrame::new(50.0, 50.0, 1000.0, 500.0);
            frame
                .draw_field(&mut canvas, &axes, black_box(&values), &puor, range)
                .unwrap();
            canvas
        })
    });
}

fn bench_png_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encoding");
    let terrain = StyleConfig::builtin().unwrap().colormap("terrain").unwrap();

    for (w, h) in [(256, 256), (1200, 600)] {
        let data = generate_lwe_grid(w, h);
        let range = ValueRange::from_data(&data).unwrap();
        let pixels = render_grid(&data, w, h, &terrain, range);
        group.throughput(Throughput::Bytes(pixels.len() as u64));

        group.bench_with_input(BenchmarkId::new("auto", format!("{}x{}", w, h)), &pixels, |b, px| {
            b.iter(|| png::create_png_auto(black_box(px), w, h).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("rgba", format!("{}x{}", w, h)), &pixels, |b, px| {
            b.iter(|| png::create_png(black_box(px), w, h).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render_grid, bench_draw_field, bench_png_encoding);
criterion_main!(benches);
