//! Error types for orbital computations.

use thiserror::Error;

/// Result type for orbit operations.
pub type OrbitResult<T> = Result<T, OrbitError>;

#[derive(Error, Debug)]
pub enum OrbitError {
    #[error("eccentricity {0} is outside [0, 1)")]
    InvalidEccentricity(f64),

    #[error("Kepler solver did not converge for M = {mean_anomaly}, e = {eccentricity} after {iterations} iterations")]
    NoConvergence {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: usize,
    },

    #[error("invalid TLE: {0}")]
    InvalidTle(String),

    #[error("propagation failed: {0}")]
    Propagation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OrbitError {
    pub fn invalid_tle(msg: impl Into<String>) -> Self {
        Self::InvalidTle(msg.into())
    }

    pub fn propagation(msg: impl std::fmt::Display) -> Self {
        Self::Propagation(msg.to_string())
    }
}

impl From<walkdir::Error> for OrbitError {
    fn from(err: walkdir::Error) -> Self {
        match err.into_io_error() {
            Some(io) => OrbitError::Io(io),
            None => OrbitError::Io(std::io::Error::other("directory walk failed")),
        }
    }
}
