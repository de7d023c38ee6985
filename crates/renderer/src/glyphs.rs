//! A small stroke font.
//!
//! Glyphs are polylines on a 4 x 6 grid (x right, y down, cap height 6,
//! baseline at y = 6). Lower-case letters are drawn as small capitals.

use tiny_skia::{PathBuilder, Transform};

use crate::canvas::Canvas;
use crate::gradient::Color;

type Stroke = &'static [(f32, f32)];
type Glyph = &'static [Stroke];

const CAP: f32 = 6.0;
const ADVANCE: f32 = 5.2;
const SPACE_ADVANCE: f32 = 3.6;
const SMALL_CAP_SCALE: f32 = 0.72;

/// Outline of the box drawn for characters without a glyph.
const MISSING: Glyph = &[&[(0.5, 0.0), (3.5, 0.0), (3.5, 6.0), (0.5, 6.0), (0.5, 0.0)]];

const RING: Stroke = &[
    (1.0, 0.0),
    (3.0, 0.0),
    (4.0, 1.0),
    (4.0, 5.0),
    (3.0, 6.0),
    (1.0, 6.0),
    (0.0, 5.0),
    (0.0, 1.0),
    (1.0, 0.0),
];

fn glyph(ch: char) -> Option<Glyph> {
    let g: Glyph = match ch {
        'A' => &[&[(0.0, 6.0), (2.0, 0.0), (4.0, 6.0)], &[(0.7, 4.0), (3.3, 4.0)]],
        'B' => &[
            &[(0.0, 3.0), (3.0, 3.0), (4.0, 4.0), (4.0, 5.0), (3.0, 6.0), (0.0, 6.0), (0.0, 0.0), (3.0, 0.0), (4.0, 1.0), (4.0, 2.0), (3.0, 3.0)],
        ],
        'C' => &[&[(4.0, 1.0), (3.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 5.0), (1.0, 6.0), (3.0, 6.0), (4.0, 5.0)]],
        'D' => &[&[(0.0, 0.0), (0.0, 6.0), (2.5, 6.0), (4.0, 4.5), (4.0, 1.5), (2.5, 0.0), (0.0, 0.0)]],
        'E' => &[&[(4.0, 0.0), (0.0, 0.0), (0.0, 6.0), (4.0, 6.0)], &[(0.0, 3.0), (3.0, 3.0)]],
        'F' => &[&[(4.0, 0.0), (0.0, 0.0), (0.0, 6.0)], &[(0.0, 3.0), (3.0, 3.0)]],
        'G' => &[&[(4.0, 1.0), (3.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 5.0), (1.0, 6.0), (3.0, 6.0), (4.0, 5.0), (4.0, 3.0), (2.0, 3.0)]],
        'H' => &[&[(0.0, 0.0), (0.0, 6.0)], &[(4.0, 0.0), (4.0, 6.0)], &[(0.0, 3.0), (4.0, 3.0)]],
        'I' => &[&[(1.0, 0.0), (3.0, 0.0)], &[(2.0, 0.0), (2.0, 6.0)], &[(1.0, 6.0), (3.0, 6.0)]],
        'J' => &[&[(1.0, 0.0), (4.0, 0.0)], &[(3.0, 0.0), (3.0, 5.0), (2.0, 6.0), (1.0, 6.0), (0.0, 5.0)]],
        'K' => &[&[(0.0, 0.0), (0.0, 6.0)], &[(4.0, 0.0), (0.0, 3.5)], &[(1.3, 2.4), (4.0, 6.0)]],
        'L' => &[&[(0.0, 0.0), (0.0, 6.0), (4.0, 6.0)]],
        'M' => &[&[(0.0, 6.0), (0.0, 0.0), (2.0, 3.0), (4.0, 0.0), (4.0, 6.0)]],
        'N' => &[&[(0.0, 6.0), (0.0, 0.0), (4.0, 6.0), (4.0, 0.0)]],
        'O' => &[RING],
        'P' => &[&[(0.0, 6.0), (0.0, 0.0), (3.0, 0.0), (4.0, 1.0), (4.0, 2.0), (3.0, 3.0), (0.0, 3.0)]],
        'Q' => &[RING, &[(2.5, 4.5), (4.0, 6.5)]],
        'R' => &[&[(0.0, 6.0), (0.0, 0.0), (3.0, 0.0), (4.0, 1.0), (4.0, 2.0), (3.0, 3.0), (0.0, 3.0)], &[(2.0, 3.0), (4.0, 6.0)]],
        'S' => &[&[(4.0, 1.0), (3.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 2.0), (1.0, 3.0), (3.0, 3.0), (4.0, 4.0), (4.0, 5.0), (3.0, 6.0), (1.0, 6.0), (0.0, 5.0)]],
        'T' => &[&[(0.0, 0.0), (4.0, 0.0)], &[(2.0, 0.0), (2.0, 6.0)]],
        'U' => &[&[(0.0, 0.0), (0.0, 5.0), (1.0, 6.0), (3.0, 6.0), (4.0, 5.0), (4.0, 0.0)]],
        'V' => &[&[(0.0, 0.0), (2.0, 6.0), (4.0, 0.0)]],
        'W' => &[&[(0.0, 0.0), (1.0, 6.0), (2.0, 3.0), (3.0, 6.0), (4.0, 0.0)]],
        'X' => &[&[(0.0, 0.0), (4.0, 6.0)], &[(4.0, 0.0), (0.0, 6.0)]],
        'Y' => &[&[(0.0, 0.0), (2.0, 3.0), (4.0, 0.0)], &[(2.0, 3.0), (2.0, 6.0)]],
        'Z' => &[&[(0.0, 0.0), (4.0, 0.0), (0.0, 6.0), (4.0, 6.0)]],

        '0' => &[RING, &[(3.5, 0.8), (0.5, 5.2)]],
        '1' => &[&[(1.0, 1.0), (2.0, 0.0), (2.0, 6.0)], &[(1.0, 6.0), (3.0, 6.0)]],
        '2' => &[&[(0.0, 1.0), (1.0, 0.0), (3.0, 0.0), (4.0, 1.0), (4.0, 2.0), (0.0, 6.0), (4.0, 6.0)]],
        '3' => &[
            &[(0.0, 1.0), (1.0, 0.0), (3.0, 0.0), (4.0, 1.0), (4.0, 2.0), (3.0, 3.0), (4.0, 4.0), (4.0, 5.0), (3.0, 6.0), (1.0, 6.0), (0.0, 5.0)],
            &[(1.5, 3.0), (3.0, 3.0)],
        ],
        '4' => &[&[(3.0, 6.0), (3.0, 0.0), (0.0, 4.0), (4.0, 4.0)]],
        '5' => &[&[(4.0, 0.0), (0.0, 0.0), (0.0, 3.0), (3.0, 3.0), (4.0, 4.0), (4.0, 5.0), (3.0, 6.0), (1.0, 6.0), (0.0, 5.0)]],
        '6' => &[&[(3.5, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 5.0), (1.0, 6.0), (3.0, 6.0), (4.0, 5.0), (4.0, 4.0), (3.0, 3.0), (0.0, 3.0)]],
        '7' => &[&[(0.0, 0.0), (4.0, 0.0), (1.5, 6.0)]],
        '8' => &[&[
            (1.0, 3.0), (0.0, 2.0), (0.0, 1.0), (1.0, 0.0), (3.0, 0.0), (4.0, 1.0), (4.0, 2.0), (3.0, 3.0),
            (1.0, 3.0), (0.0, 4.0), (0.0, 5.0), (1.0, 6.0), (3.0, 6.0), (4.0, 5.0), (4.0, 4.0), (3.0, 3.0),
        ]],
        '9' => &[&[(4.0, 3.0), (1.0, 3.0), (0.0, 2.0), (0.0, 1.0), (1.0, 0.0), (3.0, 0.0), (4.0, 1.0), (4.0, 5.0), (3.0, 6.0), (0.5, 6.0)]],

        '.' => &[&[(2.0, 5.6), (2.0, 6.0)]],
        ',' => &[&[(2.0, 5.4), (2.0, 6.0), (1.4, 7.0)]],
        ':' => &[&[(2.0, 1.8), (2.0, 2.2)], &[(2.0, 5.6), (2.0, 6.0)]],
        ';' => &[&[(2.0, 1.8), (2.0, 2.2)], &[(2.0, 5.4), (2.0, 6.0), (1.4, 7.0)]],
        '-' | '−' => &[&[(0.5, 3.0), (3.5, 3.0)]],
        '+' => &[&[(0.5, 3.0), (3.5, 3.0)], &[(2.0, 1.5), (2.0, 4.5)]],
        '=' => &[&[(0.5, 2.2), (3.5, 2.2)], &[(0.5, 3.8), (3.5, 3.8)]],
        '(' => &[&[(3.0, -0.5), (2.0, 0.7), (1.5, 3.0), (2.0, 5.3), (3.0, 6.5)]],
        ')' => &[&[(1.0, -0.5), (2.0, 0.7), (2.5, 3.0), (2.0, 5.3), (1.0, 6.5)]],
        '[' => &[&[(3.0, -0.5), (1.5, -0.5), (1.5, 6.5), (3.0, 6.5)]],
        ']' => &[&[(1.0, -0.5), (2.5, -0.5), (2.5, 6.5), (1.0, 6.5)]],
        '/' => &[&[(4.0, -0.5), (0.0, 6.5)]],
        '|' => &[&[(2.0, -0.5), (2.0, 6.5)]],
        '_' => &[&[(0.0, 6.5), (4.0, 6.5)]],
        '\'' => &[&[(2.0, 0.0), (2.0, 1.5)]],
        '"' => &[&[(1.3, 0.0), (1.3, 1.5)], &[(2.7, 0.0), (2.7, 1.5)]],
        '!' => &[&[(2.0, 0.0), (2.0, 4.0)], &[(2.0, 5.6), (2.0, 6.0)]],
        '?' => &[&[(0.0, 1.0), (1.0, 0.0), (3.0, 0.0), (4.0, 1.0), (4.0, 2.0), (2.0, 3.5), (2.0, 4.3)], &[(2.0, 5.6), (2.0, 6.0)]],
        '*' => &[&[(2.0, 1.0), (2.0, 5.0)], &[(0.5, 2.0), (3.5, 4.0)], &[(0.5, 4.0), (3.5, 2.0)]],
        '<' => &[&[(3.5, 1.0), (0.5, 3.0), (3.5, 5.0)]],
        '>' => &[&[(0.5, 1.0), (3.5, 3.0), (0.5, 5.0)]],
        '%' => &[
            &[(0.0, 6.0), (4.0, 0.0)],
            &[(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5), (0.5, 0.5)],
            &[(2.5, 4.5), (3.5, 4.5), (3.5, 5.5), (2.5, 5.5), (2.5, 4.5)],
        ],
        '°' => &[&[(1.5, 0.0), (2.5, 0.0), (3.0, 0.5), (3.0, 1.5), (2.5, 2.0), (1.5, 2.0), (1.0, 1.5), (1.0, 0.5), (1.5, 0.0)]],
        'Δ' => &[&[(2.0, 0.0), (4.0, 6.0), (0.0, 6.0), (2.0, 0.0)]],
        'ν' => &[&[(0.2, 2.2), (0.8, 2.0), (2.0, 6.0), (3.3, 3.0), (3.5, 2.0)]],
        _ => return None,
    };
    Some(g)
}

/// Horizontal anchoring of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// How a text run is drawn.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    /// Cap height in pixels.
    pub size: f32,
    pub color: Color,
    pub align: Align,
    /// Filled box behind the text.
    pub background: Option<Color>,
    /// Box outline.
    pub border: Option<Color>,
    /// Clockwise rotation in degrees about the anchor.
    pub rotation: f32,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            align: Align::Left,
            background: None,
            border: None,
            rotation: 0.0,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn boxed(mut self, background: Color, border: Option<Color>) -> Self {
        self.background = Some(background);
        self.border = border;
        self
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

fn advance(ch: char) -> f32 {
    if ch == ' ' {
        SPACE_ADVANCE
    } else {
        ADVANCE
    }
}

/// Rendered width of `text` at cap height `size`.
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: f32 = text.chars().map(advance).sum();
    // no trailing gap after the last glyph
    let trailing = if text.is_empty() { 0.0 } else { ADVANCE - 4.0 };
    (units - trailing).max(0.0) * size / CAP
}

/// Draw `text` with its top edge at `y`; `x` is the left edge, center or
/// right edge depending on the alignment.
pub fn draw_text(canvas: &mut Canvas, x: f32, y: f32, text: &str, style: &TextStyle) {
    let scale = style.size / CAP;
    let width = text_width(text, style.size);
    let left = match style.align {
        Align::Left => 0.0,
        Align::Center => -width / 2.0,
        Align::Right => -width,
    };

    let transform = Transform::from_rotate(style.rotation).post_translate(x, y);

    if style.background.is_some() || style.border.is_some() {
        let pad = style.size * 0.45;
        let corners = [
            (left - pad, -pad),
            (left + width + pad, -pad),
            (left + width + pad, style.size + pad),
            (left - pad, style.size + pad),
        ];
        let mapped: Vec<(f32, f32)> = corners
            .iter()
            .map(|&(px, py)| {
                let mut p = [tiny_skia::Point::from_xy(px, py)];
                transform.map_points(&mut p);
                (p[0].x, p[0].y)
            })
            .collect();
        if let Some(bg) = style.background {
            canvas.polygon(&mapped, bg);
        }
        if let Some(border) = style.border {
            let mut closed = mapped.clone();
            closed.push(mapped[0]);
            canvas.polyline(&closed, border, (style.size * 0.08).max(0.8), Default::default());
        }
    }

    let mut pb = PathBuilder::new();
    let mut pen = left;
    for ch in text.chars() {
        let (g, small) = match glyph(ch) {
            Some(g) => (g, false),
            None if ch.is_ascii_lowercase() => {
                (glyph(ch.to_ascii_uppercase()).unwrap_or(MISSING), true)
            }
            None if ch == ' ' => (&[][..], false),
            None => (MISSING, false),
        };

        for stroke in g {
            for (i, &(gx, gy)) in stroke.iter().enumerate() {
                let (gx, gy) = if small {
                    (
                        0.4 + gx * 0.8,
                        CAP - (CAP - gy) * SMALL_CAP_SCALE,
                    )
                } else {
                    (gx, gy)
                };
                let (px, py) = (pen + gx * scale, gy * scale);
                if i == 0 {
                    pb.move_to(px, py);
                } else {
                    pb.line_to(px, py);
                }
            }
        }
        pen += advance(ch) * scale;
    }

    if let Some(path) = pb.finish() {
        let stroke_width = (style.size * 0.13).max(1.0);
        canvas.stroke_path(&path, style.color, stroke_width, transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_glyphs_present() {
        for ch in "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ.,:-+()/|°Δν%=".chars() {
            assert!(glyph(ch).is_some(), "missing glyph {:?}", ch);
        }
    }

    #[test]
    fn test_text_width_scales() {
        let w12 = text_width("M = 10°", 12.0);
        let w24 = text_width("M = 10°", 24.0);
        assert!((w24 - 2.0 * w12).abs() < 1e-4);
        assert_eq!(text_width("", 12.0), 0.0);
        assert!(text_width("a b", 12.0) < text_width("abc", 12.0));
    }

    #[test]
    fn test_draw_text_marks_pixels() {
        let mut canvas = Canvas::new(80, 30).unwrap();
        canvas.fill(Color::WHITE);
        draw_text(&mut canvas, 40.0, 8.0, "LWE", &TextStyle::new(12.0, Color::BLACK).align(Align::Center));
        let rgba = canvas.into_rgba();
        assert!(rgba.chunks_exact(4).any(|p| p[0] < 128));
    }
}
