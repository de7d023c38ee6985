//! RGBA drawing surface over a `tiny_skia::Pixmap`.
//!
//! Coordinates are pixels with the origin at the top-left corner.

use tiny_skia::{
    FillRule, IntSize, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Rect,
    Stroke, StrokeDash, Transform,
};

use crate::error::{RenderError, RenderResult};
use crate::gradient::Color;

/// Dash pattern for stroked lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Marker shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Star,
}

pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            RenderError::InvalidCanvas(format!("cannot allocate {}x{} canvas", width, height))
        })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn fill(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        paint
    }

    fn stroke(width: f32, style: LineStyle) -> Stroke {
        let mut stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        stroke.dash = match style {
            LineStyle::Solid => None,
            LineStyle::Dashed => StrokeDash::new(vec![width * 3.7, width * 1.6], 0.0),
            LineStyle::Dotted => StrokeDash::new(vec![width, width * 1.65], 0.0),
        };
        if style == LineStyle::Dotted {
            stroke.line_cap = LineCap::Butt;
        }
        stroke
    }

    /// Stroke an arbitrary path; used by the glyph renderer.
    pub(crate) fn stroke_path(&mut self, path: &Path, color: Color, width: f32, transform: Transform) {
        let paint = Self::paint(color);
        let stroke = Self::stroke(width, LineStyle::Solid);
        self.pixmap.stroke_path(path, &paint, &stroke, transform, None);
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let paint = Self::paint(color);
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    pub fn polyline(&mut self, points: &[(f32, f32)], color: Color, width: f32, style: LineStyle) {
        let Some(path) = polyline_path(points, false) else {
            return;
        };
        let paint = Self::paint(color);
        let stroke = Self::stroke(width, style);
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
        self.polyline(&[from, to], color, width, LineStyle::Solid);
    }

    pub fn polygon(&mut self, points: &[(f32, f32)], color: Color) {
        if let Some(path) = polyline_path(points, true) {
            self.fill_path(&path, color);
        }
    }

    pub fn circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
            self.fill_path(&path, color);
        }
    }

    /// Axis-aligned rectangle, filled and/or outlined.
    pub fn rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        outline: Option<(Color, f32)>,
    ) {
        let Some(rect) = Rect::from_xywh(x, y, width, height) else {
            return;
        };
        if let Some(color) = fill {
            self.pixmap
                .fill_rect(rect, &Self::paint(color), Transform::identity(), None);
        }
        if let Some((color, line_width)) = outline {
            let path = PathBuilder::from_rect(rect);
            self.pixmap.stroke_path(
                &path,
                &Self::paint(color),
                &Self::stroke(line_width, LineStyle::Solid),
                Transform::identity(),
                None,
            );
        }
    }

    /// Filled marker of the given radius centered on `(cx, cy)`.
    pub fn marker(&mut self, shape: Marker, cx: f32, cy: f32, radius: f32, color: Color) {
        match shape {
            Marker::Circle => self.circle(cx, cy, radius, color),
            Marker::Square => {
                self.rect(cx - radius, cy - radius, 2.0 * radius, 2.0 * radius, Some(color), None)
            }
            Marker::Star => {
                let points: Vec<(f32, f32)> = (0..10)
                    .map(|i| {
                        let r = if i % 2 == 0 { radius } else { radius * 0.4 };
                        let angle = -std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / 5.0;
                        (cx + r * angle.cos(), cy + r * angle.sin())
                    })
                    .collect();
                self.polygon(&points, color);
            }
        }
    }

    /// Arrow from `(x, y)` along `(dx, dy)` with a filled head.
    pub fn arrow(&mut self, x: f32, y: f32, dx: f32, dy: f32, color: Color, width: f32) {
        let len = dx.hypot(dy);
        if len == 0.0 || !len.is_finite() {
            return;
        }
        let (ux, uy) = (dx / len, dy / len);
        let head = (width * 4.5).min(len * 0.6);
        let half = head * 0.5;

        let tip = (x + dx, y + dy);
        let base = (tip.0 - ux * head, tip.1 - uy * head);
        self.line((x, y), base, color, width);
        self.polygon(
            &[
                tip,
                (base.0 - uy * half, base.1 + ux * half),
                (base.0 + uy * half, base.1 - ux * half),
            ],
            color,
        );
    }

    /// Composite an RGBA block (straight alpha, `w * h * 4` bytes) with its
    /// top-left corner at `(x, y)`.
    pub fn put_rgba_block(&mut self, x: i32, y: i32, w: u32, h: u32, rgba: &[u8]) -> RenderResult<()> {
        if rgba.len() != (w as usize) * (h as usize) * 4 {
            return Err(RenderError::InvalidCanvas(format!(
                "block of {} bytes does not match {}x{}",
                rgba.len(),
                w,
                h
            )));
        }
        let size = IntSize::from_wh(w, h)
            .ok_or_else(|| RenderError::InvalidCanvas(format!("empty block {}x{}", w, h)))?;

        let premultiplied: Vec<u8> = rgba
            .chunks_exact(4)
            .flat_map(|px| {
                let a = px[3] as u16;
                let pm = |c: u8| ((c as u16 * a + 127) / 255) as u8;
                [pm(px[0]), pm(px[1]), pm(px[2]), px[3]]
            })
            .collect();

        let block = Pixmap::from_vec(premultiplied, size)
            .ok_or_else(|| RenderError::InvalidCanvas("block pixmap".to_string()))?;
        self.pixmap.draw_pixmap(
            x,
            y,
            block.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }

    /// Straight-alpha color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let p = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::new(p.red(), p.green(), p.blue(), p.alpha()))
    }

    /// Straight-alpha RGBA bytes, row-major.
    pub fn into_rgba(self) -> Vec<u8> {
        self.to_rgba()
    }

    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }
}

fn polyline_path(points: &[(f32, f32)], close: bool) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(first.0, first.1);
    for &(x, y) in rest {
        pb.line_to(x, y);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_and_read_back() {
        let mut canvas = Canvas::new(4, 3).unwrap();
        canvas.fill(Color::WHITE);
        let rgba = canvas.into_rgba();
        assert_eq!(rgba.len(), 4 * 3 * 4);
        assert!(rgba.iter().all(|&b| b == 255));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(Canvas::new(0, 10), Err(RenderError::InvalidCanvas(_))));
    }

    #[test]
    fn test_put_block_composites() {
        let mut canvas = Canvas::new(3, 1).unwrap();
        canvas.fill(Color::WHITE);
        let block = [255, 0, 0, 255, 0, 0, 0, 0];
        canvas.put_rgba_block(1, 0, 2, 1, &block).unwrap();
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(1, 0), Some(Color::RED));
        assert_eq!(canvas.pixel(2, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_put_block_size_mismatch() {
        let mut canvas = Canvas::new(3, 3).unwrap();
        assert!(canvas.put_rgba_block(0, 0, 2, 2, &[0; 4]).is_err());
    }

    #[test]
    fn test_marker_paints_center() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        canvas.fill(Color::WHITE);
        canvas.marker(Marker::Star, 10.0, 10.0, 6.0, Color::RED);
        canvas.marker(Marker::Square, 3.0, 3.0, 2.0, Color::BLUE);
        assert_eq!(canvas.pixel(10, 10), Some(Color::RED));
        assert_eq!(canvas.pixel(3, 3), Some(Color::BLUE));
    }
}
