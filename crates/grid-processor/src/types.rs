use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Resampling kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    Nearest,
    #[default]
    Bilinear,
    /// Catmull-Rom over 4x4 samples.
    #[serde(alias = "bicubic")]
    Cubic,
}

impl FromStr for InterpolationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "bilinear" => Ok(Self::Bilinear),
            "cubic" | "bicubic" => Ok(Self::Cubic),
            other => Err(format!(
                "unknown interpolation '{}' (expected nearest, bilinear or cubic)",
                other
            )),
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nearest => "nearest",
            Self::Bilinear => "bilinear",
            Self::Cubic => "cubic",
        })
    }
}

/// Min, max and mean of the finite samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterStats {
    pub min: f32,
    pub max: f32,
    pub mean: f64,
    pub valid_count: usize,
}

impl RasterStats {
    /// `None` when nothing is finite.
    pub fn from_slice(data: &[f32]) -> Option<Self> {
        let finite = data.iter().copied().filter(|v| v.is_finite());
        let (count, min, max, sum) = finite.fold(
            (0usize, f32::INFINITY, f32::NEG_INFINITY, 0.0f64),
            |(n, lo, hi, sum), v| (n + 1, lo.min(v), hi.max(v), sum + v as f64),
        );
        (count > 0).then(|| Self {
            min,
            max,
            mean: sum / count as f64,
            valid_count: count,
        })
    }
}
