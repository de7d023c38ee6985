//! Error types for geographic primitives.

use thiserror::Error;

/// Result type alias using GeoError.
pub type GeoResult<T> = Result<T, GeoError>;

/// Errors raised while building grids, transforms and time axes.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Invalid {axis} axis: {message}")]
    InvalidAxis { axis: &'static str, message: String },

    #[error("Degenerate affine transform: {0}")]
    DegenerateTransform(String),

    #[error("Invalid time units: {0}")]
    InvalidTimeUnits(String),

    #[error("Invalid time value: {0}")]
    InvalidTime(String),
}

impl GeoError {
    pub fn invalid_axis(axis: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidAxis {
            axis,
            message: message.into(),
        }
    }
}
