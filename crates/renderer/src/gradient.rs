//! Colors and value-to-pixel mapping for gridded fields.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::style::{Colormap, ValueRange};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    pub const DARK_GREEN: Color = Color::rgb(0, 100, 0);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    pub const LIGHT_BLUE: Color = Color::rgb(173, 216, 230);
    pub const GRAY: Color = Color::rgb(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Same color with alpha scaled by `alpha` (0..1).
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (self.a as f32 * alpha.clamp(0.0, 1.0)).round() as u8,
            ..self
        }
    }

    pub fn from_unit_rgb(r: f64, g: f64, b: f64) -> Self {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgb(q(r), q(g), q(b))
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let mix = |a: u8, b: u8| ((a as f32 * t_inv) + (b as f32 * t)).round() as u8;

    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}

/// Map a row-major grid to RGBA pixels through `colormap` over `range`.
///
/// `NaN` cells are fully transparent.
pub fn render_grid(
    data: &[f32],
    width: usize,
    height: usize,
    colormap: &Colormap,
    range: ValueRange,
) -> Vec<u8> {
    let mut pixels = vec![0u8; width * height * 4];

    pixels
        .par_chunks_mut(width * 4)
        .take(height)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let value = data.get(y * width + x).copied().unwrap_or(f32::NAN);
                let color = colormap.color_for(value, range);
                px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
            }
        });

    pixels
}
