//! Raster resampling between affine grids.
//!
//! This crate moves single-band rasters from one affine grid onto another,
//! e.g. the 1-arc-minute ETOPO geoid onto the 0.5 degree GRACE mascon grid.
//!
//! # Pipeline
//!
//! ```text
//! destination pixel center (col + 0.5, row + 0.5)
//!      │
//!      ├─► dst_transform        -> world (lon, lat)
//!      │
//!      ├─► longitude wrap       (global sources only)
//!      │
//!      ├─► src_transform⁻¹      -> fractional source index
//!      │
//!      └─► interpolation kernel -> value or NaN
//! ```
//!
//! Rows are resampled in parallel with rayon.

pub mod downsample;
pub mod error;
pub mod projection;
pub mod types;

// Re-export commonly used types at crate root
pub use downsample::downsample_to_grid;
pub use error::{GridProcessorError, Result};
pub use geo_common::{AffineTransform, GridAxes, Raster};
pub use projection::reproject::reproject;
pub use projection::{bilinear_interpolate, cubic_interpolate, nearest_interpolate};
pub use types::{InterpolationMethod, RasterStats};
