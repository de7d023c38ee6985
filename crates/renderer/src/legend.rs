//! Boxed legends.

use crate::canvas::{Canvas, LineStyle};
use crate::glyphs::{draw_text, text_width, TextStyle};
use crate::gradient::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendSymbol {
    Line(Color),
    Patch(Color),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub symbol: LegendSymbol,
}

impl LegendEntry {
    pub fn line(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            symbol: LegendSymbol::Line(color),
        }
    }

    pub fn patch(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            symbol: LegendSymbol::Patch(color),
        }
    }
}

/// Corner of the plot area the legend is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendCorner {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// Draw `entries` inside the rectangle `(left, top, width, height)`,
/// pinned to `corner`. Returns the legend box as `(x, y, w, h)`.
pub fn draw_legend(
    canvas: &mut Canvas,
    entries: &[LegendEntry],
    area: (f32, f32, f32, f32),
    corner: LegendCorner,
    text_size: f32,
) -> (f32, f32, f32, f32) {
    let pad = text_size * 0.8;
    let swatch = text_size * 2.2;
    let row_h = text_size * 1.9;
    let label_w = entries
        .iter()
        .map(|e| text_width(&e.label, text_size))
        .fold(0.0f32, f32::max);

    let w = pad * 3.0 + swatch + label_w;
    let h = pad * 2.0 + row_h * entries.len() as f32 - (row_h - text_size);

    let (left, top, width, height) = area;
    let margin = text_size;
    let x = match corner {
        LegendCorner::UpperLeft | LegendCorner::LowerLeft => left + margin,
        LegendCorner::UpperRight | LegendCorner::LowerRight => left + width - margin - w,
    };
    let y = match corner {
        LegendCorner::UpperLeft | LegendCorner::UpperRight => top + margin,
        LegendCorner::LowerLeft | LegendCorner::LowerRight => top + height - margin - h,
    };

    if entries.is_empty() {
        return (x, y, 0.0, 0.0);
    }

    canvas.rect(
        x,
        y,
        w,
        h,
        Some(Color::WHITE.with_alpha(0.8)),
        Some((Color::LIGHT_GRAY, 1.0)),
    );

    let text = TextStyle::new(text_size, Color::BLACK);
    for (i, entry) in entries.iter().enumerate() {
        let row_top = y + pad + i as f32 * row_h;
        let mid = row_top + text_size / 2.0;
        let sx = x + pad;
        match entry.symbol {
            LegendSymbol::Line(color) => {
                canvas.polyline(&[(sx, mid), (sx + swatch, mid)], color, 2.0, LineStyle::Solid)
            }
            LegendSymbol::Patch(color) => {
                canvas.rect(sx, row_top - 1.0, swatch, text_size + 2.0, Some(color), None)
            }
        }
        draw_text(canvas, sx + swatch + pad, row_top, &entry.label, &text);
    }

    (x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_placement() {
        let mut canvas = Canvas::new(400, 300).unwrap();
        let entries = vec![
            LegendEntry::line("GRACE-FO 1", Color::PURPLE),
            LegendEntry::line("ICESAT-2", Color::DARK_GREEN),
        ];

        let (x, y, w, h) = draw_legend(&mut canvas, &entries, (0.0, 0.0, 400.0, 300.0), LegendCorner::UpperLeft, 10.0);
        assert_eq!((x, y), (10.0, 10.0));
        assert!(w > 0.0 && h > 0.0);

        let (x, y, w, h) = draw_legend(&mut canvas, &entries, (0.0, 0.0, 400.0, 300.0), LegendCorner::LowerRight, 10.0);
        assert!((x + w - 390.0).abs() < 1e-3);
        assert!((y + h - 290.0).abs() < 1e-3);
    }
}
