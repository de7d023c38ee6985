//! Tests for PNG encoding of rendered figures.

use renderer::png::{create_png, create_png_auto, create_png_indexed, write_canvas_png, write_png};
use renderer::{Canvas, Color, Colormap, StyleConfig, ValueRange};
use test_utils::generators::create_test_grid;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Color type byte from the IHDR chunk.
fn color_type(png: &[u8]) -> u8 {
    png[25]
}

fn ihdr_size(png: &[u8]) -> (u32, u32) {
    let w = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
    let h = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
    (w, h)
}

fn cubehelix() -> Colormap {
    StyleConfig::builtin().unwrap().colormap("cubehelix").unwrap()
}

#[test]
fn test_create_png_simple() {
    let pixels = [
        255, 0, 0, 255, //
        0, 0, 255, 255, //
        0, 0, 255, 255, //
        255, 0, 0, 255,
    ];
    let png = create_png(&pixels, 2, 2).unwrap();
    assert_eq!(&png[..8], &PNG_SIGNATURE);
    assert_eq!(&png[12..16], b"IHDR");
    assert_eq!(ihdr_size(&png), (2, 2));
    assert_eq!(color_type(&png), 6);
    assert_eq!(&png[png.len() - 8..png.len() - 4], b"IEND");
}

#[test]
fn test_auto_picks_indexed_for_flat_figures() {
    let mut canvas = Canvas::new(120, 60).unwrap();
    canvas.fill(Color::WHITE);
    canvas.rect(10.0, 10.0, 50.0, 20.0, Some(Color::LIGHT_BLUE), None);
    let png = create_png_auto(&canvas.to_rgba(), 120, 60).unwrap();
    assert_eq!(color_type(&png), 3);
    assert!(png.windows(4).any(|w| w == b"PLTE"));
}

#[test]
fn test_auto_falls_back_to_rgba() {
    // a smooth cubehelix ramp with varying alpha has more than 256 colors
    let colormap = cubehelix();
    let pixels: Vec<u8> = (0..64 * 64)
        .flat_map(|i| {
            let c = colormap.sample((i % 64) as f32 / 63.0);
            [c.r, c.g, c.b, 255 - (i / 64) as u8]
        })
        .collect();
    let png = create_png_auto(&pixels, 64, 64).unwrap();
    assert_eq!(color_type(&png), 6);
}

#[test]
fn test_rendered_field_encodes() {
    let data = create_test_grid(64, 32);
    let range = ValueRange::from_data(&data).unwrap();
    let pixels = renderer::render_grid(&data, 64, 32, &cubehelix(), range);
    let png = create_png_auto(&pixels, 64, 32).unwrap();
    assert_eq!(ihdr_size(&png), (64, 32));
}

#[test]
fn test_indexed_rejects_bad_input() {
    assert!(create_png_indexed(2, 2, &[], &[0; 4]).is_err());
    assert!(create_png_indexed(2, 2, &[(0, 0, 0, 255)], &[0; 3]).is_err());
}

#[test]
fn test_indexed_smaller_than_rgba() {
    let mut canvas = Canvas::new(256, 128).unwrap();
    canvas.fill(Color::LIGHT_BLUE);
    canvas.rect(40.0, 20.0, 100.0, 60.0, Some(Color::LIGHT_GRAY), None);
    let rgba = canvas.to_rgba();
    let indexed = create_png_auto(&rgba, 256, 128).unwrap();
    let full = create_png(&rgba, 256, 128).unwrap();
    assert!(indexed.len() < full.len());
}

#[test]
fn test_write_png_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Assets").join("nested").join("plot.png");
    let bytes = write_png(&path, &[0, 0, 0, 255], 1, 1).unwrap();
    let written = std::fs::read(&path).unwrap();
    assert_eq!(written.len(), bytes);
    assert_eq!(&written[..8], &PNG_SIGNATURE);
}

#[test]
fn test_write_canvas_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("canvas.png");
    let mut canvas = Canvas::new(30, 20).unwrap();
    canvas.fill(Color::WHITE);
    write_canvas_png(&canvas, &path).unwrap();
    let written = std::fs::read(&path).unwrap();
    assert_eq!(ihdr_size(&written), (30, 20));
}
