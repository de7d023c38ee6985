//! Resampling a raster from one affine grid onto another.

use std::time::Instant;

use geo_common::{AffineTransform, Raster};
use rayon::prelude::*;
use tracing::debug;

use super::interpolation::GridView;
use crate::error::{GridProcessorError, Result};
use crate::types::InterpolationMethod;

/// Source raster plus the precomputed world -> index mapping.
struct Source<'a> {
    raster: &'a Raster,
    inverse: AffineTransform,
    /// Longitude range to wrap into, when the source covers the globe.
    wrap_from: Option<f64>,
}

impl Source<'_> {
    fn sample(&self, method: InterpolationMethod, lon: f64, lat: f64) -> f32 {
        let lon = match self.wrap_from {
            Some(west) => west + (lon - west).rem_euclid(360.0),
            None => lon,
        };

        let (col, row) = self.inverse.apply(lon, lat);
        // Pixel-center index: integer values land on sample centers
        let x = col - 0.5;
        let y = row - 0.5;

        let (w, h) = (self.raster.width, self.raster.height);
        let grid = GridView::new(&self.raster.data, w, h);

        // Half a pixel beyond the outer centers still lies inside the raster
        if !(y >= -0.5 && y <= h as f64 - 0.5) {
            return f32::NAN;
        }
        let y = y.clamp(0.0, (h - 1) as f64);

        if self.wrap_from.is_some() {
            let x = x.rem_euclid(w as f64);
            let interior = x >= 1.0 && x <= w as f64 - 2.0;
            return match method {
                InterpolationMethod::Nearest => grid.nearest(((x.round() as usize) % w) as f64, y),
                InterpolationMethod::Cubic if interior => grid.cubic(x, y),
                _ => grid.bilinear_wrapped(x, y),
            };
        }

        if !(x >= -0.5 && x <= w as f64 - 0.5) {
            return f32::NAN;
        }
        grid.sample(method, x.clamp(0.0, (w - 1) as f64), y)
    }
}

/// Resample `src` onto a `dst_width` x `dst_height` grid described by
/// `dst_transform`.
///
/// Each destination pixel center `(col + 0.5, row + 0.5)` is mapped to world
/// coordinates, then through the inverse source transform to a fractional
/// source index, and interpolated. Destination cells outside the source are
/// `NaN`. When the source spans 360 degrees of longitude, world longitudes
/// are wrapped into its range first.
pub fn reproject(
    src: &Raster,
    dst_transform: &AffineTransform,
    dst_width: usize,
    dst_height: usize,
    method: InterpolationMethod,
) -> Result<Raster> {
    if src.width == 0 || src.height == 0 {
        return Err(GridProcessorError::invalid_metadata(format!(
            "source raster is {}x{}",
            src.width, src.height
        )));
    }
    if dst_width == 0 || dst_height == 0 {
        return Err(GridProcessorError::invalid_metadata(format!(
            "destination grid is {}x{}",
            dst_width, dst_height
        )));
    }
    if !src.has_consistent_shape() {
        return Err(GridProcessorError::ShapeMismatch {
            width: src.width,
            height: src.height,
            actual: src.data.len(),
        });
    }

    let inverse = src.transform.inverse().ok_or_else(|| {
        GridProcessorError::projection(format!(
            "source transform {:?} is not invertible",
            src.transform
        ))
    })?;

    let src_bounds = src.bounds();
    let wrap_from = (src.transform.is_north_up() && src_bounds.spans_globe())
        .then_some(src_bounds.min_x);

    let source = Source {
        raster: src,
        inverse,
        wrap_from,
    };

    let start = Instant::now();
    let mut output = vec![f32::NAN; dst_width * dst_height];

    output
        .par_chunks_mut(dst_width)
        .enumerate()
        .for_each(|(row, out_row)| {
            for (col, out) in out_row.iter_mut().enumerate() {
                let (lon, lat) = dst_transform.apply(col as f64 + 0.5, row as f64 + 0.5);
                *out = source.sample(method, lon, lat);
            }
        });

    debug!(
        src_width = src.width,
        src_height = src.height,
        dst_width = dst_width,
        dst_height = dst_height,
        method = %method,
        wrap = wrap_from.is_some(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Reprojected raster"
    );

    Ok(Raster::new(output, dst_width, dst_height, *dst_transform).with_nodata(src.nodata))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> Raster {
        let data = (0..height)
            .flat_map(|r| (0..width).map(move |c| (2 * c + r) as f32))
            .collect();
        Raster::new(
            data,
            width,
            height,
            AffineTransform::new(1.0, 0.0, 0.0, 0.0, -1.0, height as f64),
        )
    }

    #[test]
    fn test_identity_reproduces_source() {
        let src = ramp(6, 4);
        let out = reproject(&src, &src.transform, 6, 4, InterpolationMethod::Bilinear).unwrap();
        for (a, b) in src.data.iter().zip(&out.data) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn test_zero_destination_rejected() {
        let src = ramp(2, 2);
        let err = reproject(&src, &src.transform, 0, 2, InterpolationMethod::Nearest).unwrap_err();
        assert!(matches!(err, GridProcessorError::InvalidMetadata(_)));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut src = ramp(2, 2);
        src.data.pop();
        let err = reproject(&src, &src.transform, 2, 2, InterpolationMethod::Nearest).unwrap_err();
        assert!(matches!(err, GridProcessorError::ShapeMismatch { actual: 3, .. }));
    }

    #[test]
    fn test_singular_source_rejected() {
        let mut src = ramp(2, 2);
        src.transform = AffineTransform::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let err = reproject(&src, &AffineTransform::identity(), 2, 2, InterpolationMethod::Nearest)
            .unwrap_err();
        assert!(matches!(err, GridProcessorError::ProjectionError(_)));
    }
}
