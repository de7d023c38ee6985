//! Color styles loaded from JSON and the colormaps built from them.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::gradient::{interpolate_color, Color};

/// Built-in styles shipped with the crate.
const BUILTIN_STYLES: &str = include_str!("../assets/colormaps.json");

/// Number of entries in a colormap lookup table.
pub const LUT_SIZE: usize = 256;

/// Named colormaps, as read from a styles JSON file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StyleConfig {
    pub version: String,
    pub styles: HashMap<String, StyleDefinition>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StyleDefinition {
    pub name: String,
    pub description: Option<String>,
    /// `"gradient"` or `"cubehelix"`.
    #[serde(rename = "type")]
    pub style_type: String,
    #[serde(default)]
    pub stops: Vec<ColorStop>,
    pub cubehelix: Option<CubehelixParams>,
    /// Center the value range on zero when the data crosses it.
    #[serde(default)]
    pub diverging: bool,
}

/// Hex color at `value`; stops are rescaled to span the whole colormap.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColorStop {
    pub value: f32,
    pub color: String,
    pub label: Option<String>,
}

/// Green's cubehelix scheme.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct CubehelixParams {
    #[serde(default = "default_start")]
    pub start: f64,
    #[serde(default = "default_rotations")]
    pub rotations: f64,
    #[serde(default = "default_hue")]
    pub hue: f64,
    #[serde(default = "default_gamma")]
    pub gamma: f64,
}

fn default_start() -> f64 {
    0.5
}
fn default_rotations() -> f64 {
    -1.5
}
fn default_hue() -> f64 {
    1.0
}
fn default_gamma() -> f64 {
    1.0
}

impl Default for CubehelixParams {
    fn default() -> Self {
        Self {
            start: default_start(),
            rotations: default_rotations(),
            hue: default_hue(),
            gamma: default_gamma(),
        }
    }
}

impl CubehelixParams {
    /// Color at fraction `x` in `[0, 1]`.
    pub fn color_at(&self, x: f64) -> Color {
        let xg = x.clamp(0.0, 1.0).powf(self.gamma);
        let amp = self.hue * xg * (1.0 - xg) / 2.0;
        let phi = 2.0 * std::f64::consts::PI * (self.start / 3.0 + self.rotations * x);
        let (sin_phi, cos_phi) = phi.sin_cos();
        let channel = |p0: f64, p1: f64| xg + amp * (p0 * cos_phi + p1 * sin_phi);

        Color::from_unit_rgb(
            channel(-0.14861, 1.78277),
            channel(-0.29227, -0.90649),
            channel(1.97294, 0.0),
        )
    }
}

impl StyleConfig {
    pub fn from_json(json_str: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let config = Self::from_json(&std::fs::read_to_string(path)?)?;
        debug!(path = %path.display(), styles = config.styles.len(), "Loaded style file");
        Ok(config)
    }

    /// The styles compiled into the crate: `RdBu`, `PuOr`, `terrain`,
    /// `cubehelix`.
    pub fn builtin() -> RenderResult<Self> {
        Self::from_json(BUILTIN_STYLES)
    }

    pub fn get_style(&self, name: &str) -> Option<&StyleDefinition> {
        self.styles.get(name)
    }

    /// Build the colormap for `name`.
    pub fn colormap(&self, name: &str) -> RenderResult<Colormap> {
        let style = self
            .get_style(name)
            .ok_or_else(|| RenderError::style(format!("unknown style '{}'", name)))?;
        Colormap::from_style(style)
    }
}

/// `#RRGGBB` (leading `#` optional).
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Inclusive data range mapped onto a colormap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Min/max over the finite values, `None` when there are none.
    pub fn from_data(data: &[f32]) -> Option<Self> {
        let (min, max) = data
            .iter()
            .filter(|v| v.is_finite())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        (min <= max).then_some(Self { min, max })
    }

    /// `[-m, m]` with `m = max(|min|, |max|)`.
    pub fn symmetric(self) -> Self {
        let m = self.min.abs().max(self.max.abs());
        Self { min: -m, max: m }
    }

    pub fn crosses_zero(&self) -> bool {
        self.min < 0.0 && self.max > 0.0
    }

    /// Range for `data` under `style`: symmetric for diverging styles when
    /// the data straddles zero.
    pub fn for_style(data: &[f32], style: &StyleDefinition) -> Option<Self> {
        let range = Self::from_data(data)?;
        Some(if style.diverging && range.crosses_zero() {
            range.symmetric()
        } else {
            range
        })
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Position of `value` in the range; 0.5 for a degenerate range.
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.span();
        if span.abs() < f32::EPSILON {
            0.5
        } else {
            ((value - self.min) / span).clamp(0.0, 1.0)
        }
    }
}

/// A sampled color ramp.
#[derive(Debug, Clone)]
pub struct Colormap {
    pub name: String,
    lut: Vec<Color>,
}

impl Colormap {
    pub fn from_style(style: &StyleDefinition) -> RenderResult<Self> {
        let lut = match style.style_type.as_str() {
            "gradient" => gradient_lut(style)?,
            "cubehelix" => {
                let params = style.cubehelix.unwrap_or_default();
                (0..LUT_SIZE)
                    .map(|i| params.color_at(i as f64 / (LUT_SIZE - 1) as f64))
                    .collect()
            }
            other => {
                return Err(RenderError::style(format!(
                    "style '{}' has unsupported type '{}'",
                    style.name, other
                )))
            }
        };

        Ok(Self {
            name: style.name.clone(),
            lut,
        })
    }

    /// Color at `t` in `[0, 1]` (clamped).
    pub fn sample(&self, t: f32) -> Color {
        if t.is_nan() {
            return Color::transparent();
        }
        let idx = (t.clamp(0.0, 1.0) * (self.lut.len() - 1) as f32).round() as usize;
        self.lut[idx]
    }

    /// Color for a data value; `NaN` is transparent.
    pub fn color_for(&self, value: f32, range: ValueRange) -> Color {
        if value.is_nan() {
            Color::transparent()
        } else {
            self.sample(range.normalize(value))
        }
    }
}

fn gradient_lut(style: &StyleDefinition) -> RenderResult<Vec<Color>> {
    if style.stops.len() < 2 {
        return Err(RenderError::style(format!(
            "gradient style '{}' needs at least two stops",
            style.name
        )));
    }

    let mut stops = style.stops.clone();
    stops.sort_by(|a, b| a.value.total_cmp(&b.value));

    let colors = stops
        .iter()
        .map(|s| {
            Color::from_hex(&s.color).ok_or_else(|| {
                RenderError::style(format!("style '{}': bad color '{}'", style.name, s.color))
            })
        })
        .collect::<RenderResult<Vec<_>>>()?;

    let first = stops[0].value;
    let last = stops[stops.len() - 1].value;
    let span = last - first;
    if span <= 0.0 {
        return Err(RenderError::style(format!(
            "style '{}' stops do not span a range",
            style.name
        )));
    }
    let positions: Vec<f32> = stops.iter().map(|s| (s.value - first) / span).collect();

    Ok((0..LUT_SIZE)
        .map(|i| {
            let t = i as f32 / (LUT_SIZE - 1) as f32;
            let hi = positions.iter().position(|&p| p >= t).unwrap_or(positions.len() - 1);
            if hi == 0 {
                return colors[0];
            }
            let lo = hi - 1;
            let local = (t - positions[lo]) / (positions[hi] - positions[lo]).max(f32::EPSILON);
            interpolate_color(colors[lo], colors[hi], local)
        })
        .collect())
}
