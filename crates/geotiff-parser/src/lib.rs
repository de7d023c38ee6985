//! GeoTIFF reader for single-band rasters such as the ETOPO 2022 geoid.
//!
//! Pixels are decoded with the `tiff` crate and converted to `f32`; the
//! GeoTIFF model tags become an [`AffineTransform`](geo_common::AffineTransform)
//! and the GDAL nodata tag is mapped to `NaN`.

pub mod error;
pub mod reader;

pub use error::{GeoTiffError, GeoTiffResult};
pub use reader::{read_geotiff, read_metadata, GeoTiffMetadata};
