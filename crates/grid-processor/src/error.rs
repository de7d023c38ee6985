use thiserror::Error;

#[derive(Error, Debug)]
pub enum GridProcessorError {
    /// Empty or degenerate grid.
    #[error("invalid grid: {0}")]
    InvalidMetadata(String),

    #[error("{width}x{height} raster holds {actual} samples")]
    ShapeMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },

    /// Source transform cannot be inverted.
    #[error("cannot map onto source grid: {0}")]
    ProjectionError(String),
}

impl GridProcessorError {
    pub fn invalid_metadata(msg: impl Into<String>) -> Self {
        Self::InvalidMetadata(msg.into())
    }

    pub fn projection(msg: impl Into<String>) -> Self {
        Self::ProjectionError(msg.into())
    }
}

impl From<geo_common::GeoError> for GridProcessorError {
    fn from(err: geo_common::GeoError) -> Self {
        Self::InvalidMetadata(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GridProcessorError>;
