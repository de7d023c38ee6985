//! Error types for GeoTIFF reading.

use thiserror::Error;

/// Result type for GeoTIFF operations.
pub type GeoTiffResult<T> = Result<T, GeoTiffError>;

#[derive(Error, Debug)]
pub enum GeoTiffError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF decode error: {0}")]
    Decode(String),

    #[error("Missing georeference: {0}")]
    MissingGeoreference(String),

    #[error("Unsupported layout: {0}")]
    UnsupportedLayout(String),

    #[error(transparent)]
    Geo(#[from] geo_common::GeoError),
}

impl From<tiff::TiffError> for GeoTiffError {
    fn from(err: tiff::TiffError) -> Self {
        match err {
            tiff::TiffError::IoError(e) => GeoTiffError::Io(e),
            other => GeoTiffError::Decode(other.to_string()),
        }
    }
}
