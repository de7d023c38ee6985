//! Downsampling a high-resolution raster onto a coarse lat/lon grid.
//!
//! Both topography tools use the same two steps: build the north-up affine
//! descriptor from the target grid's axes, then resample onto it.

use geo_common::{GridAxes, Raster};
use tracing::info;

use crate::error::Result;
use crate::projection::reproject::reproject;
use crate::types::{InterpolationMethod, RasterStats};

/// Resample `src` onto the grid described by `axes`.
///
/// The result is `axes.nlat()` x `axes.nlon()` with row 0 at the
/// northernmost latitude, regardless of the order of `axes.lat`.
pub fn downsample_to_grid(
    src: &Raster,
    axes: &GridAxes,
    method: InterpolationMethod,
) -> Result<Raster> {
    let dst_transform = axes.transform();
    let out = reproject(src, &dst_transform, axes.nlon(), axes.nlat(), method)?;

    let stats = RasterStats::from_slice(&out.data);
    info!(
        src_width = src.width,
        src_height = src.height,
        dst_width = out.width,
        dst_height = out.height,
        method = %method,
        valid = stats.map(|s| s.valid_count).unwrap_or(0),
        min = stats.map(|s| s.min).unwrap_or(f32::NAN),
        max = stats.map(|s| s.max).unwrap_or(f32::NAN),
        "Downsampled raster to grid"
    );

    Ok(out)
}
