//! Common geographic types shared across the topograv crates.

pub mod affine;
pub mod bbox;
pub mod error;
pub mod grid;
pub mod raster;
pub mod time;

pub use affine::AffineTransform;
pub use bbox::BoundingBox;
pub use error::{GeoError, GeoResult};
pub use grid::GridAxes;
pub use raster::Raster;
pub use time::{date_label, decode_time_axis, parse_time_units, TimeUnit};
