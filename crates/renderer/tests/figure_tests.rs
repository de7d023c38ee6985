//! End-to-end figure composition: map frame, field, overlays, colorbar,
//! legend and animation output.

use renderer::legend::{draw_legend, LegendCorner, LegendEntry};
use renderer::map::MapFrame;
use renderer::overlay::Overlay;
use renderer::{
    draw_colorbar, Canvas, Color, ColorbarLayout, GifAnimation, LineStyle, StyleConfig, ValueRange,
};
use test_utils::generators::{grace_axes, synthetic_lwe_frames};

fn blank(width: u32, height: u32) -> Canvas {
    let mut canvas = Canvas::new(width, height).unwrap();
    canvas.fill(Color::WHITE);
    canvas
}

#[test]
fn test_field_lands_in_frame() {
    let axes = grace_axes(2.0);
    let values = vec![1.0f32; axes.nlat() * axes.nlon()];
    let colormap = StyleConfig::builtin().unwrap().colormap("terrain").unwrap();

    let mut canvas = blank(400, 240);
    let frame = MapFrame::new(20.0, 20.0, 360.0, 180.0);
    frame
        .draw_field(&mut canvas, &axes, &values, &colormap, ValueRange::new(0.0, 1.0))
        .unwrap();

    let top = colormap.sample(1.0);
    assert_eq!(canvas.pixel(200, 110), Some(top));
    // outside the frame stays white
    assert_eq!(canvas.pixel(5, 5), Some(Color::WHITE));
    assert_eq!(canvas.pixel(395, 230), Some(Color::WHITE));
}

#[test]
fn test_nan_cells_show_background() {
    let axes = grace_axes(2.0);
    let values = synthetic_lwe_frames(&axes, 1);
    let colormap = StyleConfig::builtin().unwrap().colormap("RdBu").unwrap();

    let mut canvas = blank(400, 240);
    let frame = MapFrame::new(20.0, 20.0, 360.0, 180.0);
    frame.fill_background(&mut canvas, Color::LIGHT_BLUE);
    let range = ValueRange::from_data(&values).unwrap().symmetric();
    frame.draw_field(&mut canvas, &axes, &values, &colormap, range).unwrap();

    // synthetic frames are NaN poleward of 85 degrees
    assert_eq!(canvas.pixel(200, 21), Some(Color::LIGHT_BLUE));
    assert_ne!(canvas.pixel(200, 110), Some(Color::LIGHT_BLUE));
}

#[test]
fn test_antimeridian_polyline_not_drawn_across_map() {
    let mut canvas = blank(400, 220);
    let frame = MapFrame::new(20.0, 20.0, 360.0, 180.0);
    let track = [(170.0, 0.0), (179.0, 0.0), (-179.0, 0.0), (-170.0, 0.0)];
    frame.draw_polyline_lonlat(&mut canvas, &track, Color::BLACK, 2.0, LineStyle::Solid);

    let (x_mid, y_mid) = frame.to_pixel(0.0, 0.0);
    assert_eq!(canvas.pixel(x_mid as u32, y_mid as u32), Some(Color::WHITE));
    let (x_east, y) = frame.to_pixel(175.0, 0.0);
    assert_ne!(canvas.pixel(x_east as u32, y as u32), Some(Color::WHITE));
}

#[test]
fn test_overlay_polygons_fill() {
    let overlay = Overlay::from_geojson(
        r#"{"type": "Polygon", "coordinates": [[[-20,-20],[20,-20],[20,20],[-20,20],[-20,-20]]]}"#,
    )
    .unwrap();
    let mut canvas = blank(400, 220);
    let frame = MapFrame::new(20.0, 20.0, 360.0, 180.0);
    frame.fill_polygons(&mut canvas, &overlay.polygons, Color::LIGHT_GRAY);
    frame.draw_lines(&mut canvas, &overlay.lines, Color::BLACK, 1.0);

    let (x, y) = frame.to_pixel(0.0, 0.0);
    assert_eq!(canvas.pixel(x as u32, y as u32), Some(Color::LIGHT_GRAY));
}

#[test]
fn test_colorbar_and_legend_draw() {
    let colormap = StyleConfig::builtin().unwrap().colormap("PuOr").unwrap();
    let mut canvas = blank(300, 300);
    let layout = ColorbarLayout {
        left: 240.0,
        top: 20.0,
        width: 16.0,
        height: 200.0,
    };
    draw_colorbar(
        &mut canvas,
        layout,
        &colormap,
        ValueRange::new(-0.02, 0.02),
        Some("Δg (mGal)"),
        6,
    )
    .unwrap();
    // top of the bar is the maximum; rows sample at their centers
    assert_eq!(canvas.pixel(248, 22), Some(colormap.sample(1.0 - 2.5 / 200.0)));
    assert_eq!(canvas.pixel(248, 218), Some(colormap.sample(1.0 - 198.5 / 200.0)));

    let entries = [LegendEntry::line("GRACE-FO 1", Color::PURPLE)];
    let (x, y, w, h) = draw_legend(&mut canvas, &entries, (0.0, 0.0, 200.0, 300.0), LegendCorner::UpperLeft, 10.0);
    assert!(x + w <= 200.0 && y + h <= 300.0);
}

#[test]
fn test_animation_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Assets").join("anim.gif");
    let mut anim = GifAnimation::create(&path, 40, 30, 15).unwrap();
    for i in 0..4 {
        let mut canvas = blank(40, 30);
        canvas.circle(5.0 + 8.0 * i as f32, 15.0, 4.0, Color::RED);
        anim.push_canvas(&canvas).unwrap();
    }
    assert_eq!(anim.finish().unwrap(), 4);

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");
    assert_eq!(u16::from_le_bytes([bytes[6], bytes[7]]), 40);
    assert_eq!(u16::from_le_bytes([bytes[8], bytes[9]]), 30);
    // NETSCAPE2.0 looping extension
    assert!(bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));
}
