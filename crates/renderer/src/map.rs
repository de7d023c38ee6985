//! Plate carrée map frame: lon/lat to pixels, fields, graticule and
//! vector overlays.

use geo_common::{BoundingBox, GridAxes};
use rayon::prelude::*;
use tracing::debug;

use crate::canvas::{Canvas, LineStyle};
use crate::error::RenderResult;
use crate::glyphs::{draw_text, Align, TextStyle};
use crate::gradient::Color;
use crate::style::{Colormap, ValueRange};

/// The plotted rectangle of a map and the geographic extent it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub extent: BoundingBox,
}

impl MapFrame {
    /// A global frame (−180..180 x −90..90).
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
            extent: BoundingBox::global(),
        }
    }

    /// The largest 2:1 global frame that fits in the given box, centered.
    pub fn fit(left: f32, top: f32, max_width: f32, max_height: f32) -> Self {
        let width = max_width.min(max_height * 2.0).floor();
        let height = (width / 2.0).floor();
        Self::new(
            (left + (max_width - width) / 2.0).round(),
            (top + (max_height - height) / 2.0).round(),
            width,
            height,
        )
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Longitude folded into the extent when it lies a whole turn outside.
    fn fold_lon(&self, lon: f64) -> f64 {
        if lon > self.extent.max_x {
            lon - 360.0 * ((lon - self.extent.max_x) / 360.0).ceil()
        } else if lon < self.extent.min_x {
            lon + 360.0 * ((self.extent.min_x - lon) / 360.0).ceil()
        } else {
            lon
        }
    }

    pub fn to_pixel(&self, lon: f64, lat: f64) -> (f32, f32) {
        let e = &self.extent;
        let lon = self.fold_lon(lon);
        let x = self.left as f64 + (lon - e.min_x) / e.width() * self.width as f64;
        let y = self.top as f64 + (e.max_y - lat) / e.height() * self.height as f64;
        (x as f32, y as f32)
    }

    pub fn to_lonlat(&self, x: f32, y: f32) -> (f64, f64) {
        let e = &self.extent;
        let lon = e.min_x + (x - self.left) as f64 / self.width as f64 * e.width();
        let lat = e.max_y - (y - self.top) as f64 / self.height as f64 * e.height();
        (lon, lat)
    }

    pub fn fill_background(&self, canvas: &mut Canvas, color: Color) {
        canvas.rect(self.left, self.top, self.width, self.height, Some(color), None);
    }

    pub fn draw_border(&self, canvas: &mut Canvas) {
        canvas.rect(
            self.left,
            self.top,
            self.width,
            self.height,
            None,
            Some((Color::BLACK, 1.0)),
        );
    }

    /// Paint a gridded field by nearest-cell lookup through `axes`.
    ///
    /// `values` is row-major in the order of `axes.lat` x `axes.lon`.
    /// `NaN` cells and pixels outside the grid stay transparent.
    pub fn draw_field(
        &self,
        canvas: &mut Canvas,
        axes: &GridAxes,
        values: &[f32],
        colormap: &Colormap,
        range: ValueRange,
    ) -> RenderResult<()> {
        let x0 = self.left.round() as i32;
        let y0 = self.top.round() as i32;
        let w = self.width.round().max(1.0) as usize;
        let h = self.height.round().max(1.0) as usize;
        let nlon = axes.nlon();

        let mut block = vec![0u8; w * h * 4];
        block
            .par_chunks_mut(w * 4)
            .enumerate()
            .for_each(|(row, pixels)| {
                let py = y0 as f32 + row as f32 + 0.5;
                for (col, px) in pixels.chunks_exact_mut(4).enumerate() {
                    let (lon, lat) = self.to_lonlat(x0 as f32 + col as f32 + 0.5, py);
                    let value = axes
                        .locate(lon, lat)
                        .and_then(|(r, c)| values.get(r * nlon + c).copied())
                        .unwrap_or(f32::NAN);
                    let color = colormap.color_for(value, range);
                    px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
                }
            });

        debug!(width = w, height = h, colormap = %colormap.name, "Painted field");
        canvas.put_rgba_block(x0, y0, w as u32, h as u32, &block)
    }

    /// Graticule lines every `step` degrees, with degree labels along the
    /// bottom and left edges when `labels` is set.
    pub fn draw_graticule(&self, canvas: &mut Canvas, lon_step: f64, lat_step: f64, labels: bool) {
        let line = Color::GRAY.with_alpha(0.5);
        let text = TextStyle::new(10.0, Color::BLACK);
        let e = self.extent;

        for lon in ticks(e.min_x, e.max_x, lon_step) {
            let (x, _) = self.to_pixel(lon, 0.0);
            canvas.polyline(&[(x, self.top), (x, self.bottom())], line, 0.8, LineStyle::Dashed);
            if labels {
                draw_text(canvas, x, self.bottom() + 6.0, &lon_label(lon), &text.align(Align::Center));
            }
        }
        for lat in ticks(e.min_y, e.max_y, lat_step) {
            let (_, y) = self.to_pixel(0.0, lat);
            canvas.polyline(&[(self.left, y), (self.right(), y)], line, 0.8, LineStyle::Dashed);
            if labels {
                draw_text(canvas, self.left - 6.0, y - 5.0, &lat_label(lat), &text.align(Align::Right));
            }
        }
    }

    /// Lines along every `every`-th latitude and longitude of `axes`.
    pub fn draw_grid_overlay(&self, canvas: &mut Canvas, axes: &GridAxes, every: usize, color: Color) {
        let every = every.max(1);
        let bounds = axes.bounds();

        for &lon in axes.lon.iter().step_by(every) {
            let pts = [(lon, bounds.min_y), (lon, bounds.max_y)];
            self.draw_polyline_lonlat(canvas, &pts, color, 0.5, LineStyle::Solid);
        }
        for &lat in axes.lat.iter().step_by(every) {
            let pts: Vec<(f64, f64)> = axes.lon.iter().map(|&lon| (lon, lat)).collect();
            self.draw_polyline_lonlat(canvas, &pts, color, 0.5, LineStyle::Solid);
        }
    }

    /// Draw a lon/lat polyline, breaking it wherever consecutive points are
    /// more than 180° of longitude apart.
    pub fn draw_polyline_lonlat(
        &self,
        canvas: &mut Canvas,
        points: &[(f64, f64)],
        color: Color,
        width: f32,
        style: LineStyle,
    ) {
        let mut piece: Vec<(f32, f32)> = Vec::with_capacity(points.len());
        let mut prev: Option<f64> = None;

        for &(lon, lat) in points {
            let lon = self.fold_lon(lon);
            if let Some(p) = prev {
                if (lon - p).abs() > 180.0 {
                    canvas.polyline(&piece, color, width, style);
                    piece.clear();
                }
            }
            piece.push(self.to_pixel(lon, lat));
            prev = Some(lon);
        }
        canvas.polyline(&piece, color, width, style);
    }

    /// Arrow at `(lon, lat)` pointing along the unit direction `(u, v)`
    /// (east, north), `length` pixels long.
    pub fn draw_arrow_lonlat(
        &self,
        canvas: &mut Canvas,
        lon: f64,
        lat: f64,
        (u, v): (f64, f64),
        length: f32,
        color: Color,
    ) {
        let (x, y) = self.to_pixel(lon, lat);
        let (dx, dy) = (u as f32 * length, -(v as f32) * length);
        canvas.arrow(x - dx / 2.0, y - dy / 2.0, dx, dy, color, 1.6);
    }

    /// Polylines from an overlay (coastlines, borders).
    pub fn draw_lines(&self, canvas: &mut Canvas, lines: &[Vec<(f64, f64)>], color: Color, width: f32) {
        for line in lines {
            self.draw_polyline_lonlat(canvas, line, color, width, LineStyle::Solid);
        }
    }

    /// Filled polygons from an overlay (land masses).
    pub fn fill_polygons(&self, canvas: &mut Canvas, rings: &[Vec<(f64, f64)>], color: Color) {
        for ring in rings {
            let pts: Vec<(f32, f32)> = ring.iter().map(|&(lon, lat)| self.to_pixel(lon, lat)).collect();
            canvas.polygon(&pts, color);
        }
    }

    /// Title centered above the frame.
    pub fn draw_title(&self, canvas: &mut Canvas, title: &str, size: f32) {
        let style = TextStyle::new(size, Color::BLACK).align(Align::Center);
        draw_text(canvas, self.left + self.width / 2.0, self.top - size - 10.0, title, &style);
    }
}

/// Multiples of `step` within `[lo, hi]`.
fn ticks(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 {
        return Vec::new();
    }
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

pub fn lon_label(lon: f64) -> String {
    let lon = if lon > 180.0 { lon - 360.0 } else { lon };
    match lon {
        l if l.abs() < 1e-9 || (l.abs() - 180.0).abs() < 1e-9 => format!("{}°", l.abs().round()),
        l if l < 0.0 => format!("{}°W", (-l).round()),
        l => format!("{}°E", l.round()),
    }
}

pub fn lat_label(lat: f64) -> String {
    match lat {
        l if l.abs() < 1e-9 => "0°".to_string(),
        l if l < 0.0 => format!("{}°S", (-l).round()),
        l => format!("{}°N", l.round()),
    }
}
