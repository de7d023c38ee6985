//! Rendering errors.

use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Style error: {0}")]
    Style(String),

    #[error("Invalid canvas: {0}")]
    InvalidCanvas(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn encode(msg: impl std::fmt::Display) -> Self {
        Self::Encode(msg.to_string())
    }

    pub fn style(msg: impl Into<String>) -> Self {
        Self::Style(msg.into())
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Style(err.to_string())
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Self::Io(io),
            other => Self::Encode(other.to_string()),
        }
    }
}
