//! Affine grid transforms.
//!
//! An [`AffineTransform`] maps a (column, row) grid index to world
//! coordinates using the GDAL/rasterio convention:
//!
//! ```text
//! x = a * col + b * row + c
//! y = d * col + e * row + f
//! ```
//!
//! For a north-up geographic raster `a` is the longitude pixel size, `e` is
//! the negated latitude pixel size, and `(c, f)` is the north-west corner.

use serde::{Deserialize, Serialize};

use crate::error::{GeoError, GeoResult};
use crate::{BoundingBox, GridAxes};

/// Linear mapping from grid indices to geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }

    /// Build the grid descriptor for a regular lat/lon grid.
    ///
    /// The result is `Affine(lon_res, 0, lon_min, 0, -lat_res, lat_max)`:
    /// index (0, 0) lands on `(lon_min, lat_max)` and rows run southward.
    pub fn from_axes(axes: &GridAxes) -> Self {
        let bounds = axes.bounds();
        Self::new(
            axes.lon_resolution(),
            0.0,
            bounds.min_x,
            0.0,
            -axes.lat_resolution(),
            bounds.max_y,
        )
    }

    /// Build from GeoTIFF `ModelTiepoint` and `ModelPixelScale` tags.
    ///
    /// `tiepoint` is `[i, j, k, x, y, z]` and `pixel_scale` is
    /// `[sx, sy, sz]`. Raster space is PixelIsArea, so the tie point refers
    /// to the pixel corner.
    pub fn from_geotiff(tiepoint: &[f64], pixel_scale: &[f64]) -> GeoResult<Self> {
        if tiepoint.len() < 6 {
            return Err(GeoError::DegenerateTransform(format!(
                "ModelTiepoint needs 6 values, got {}",
                tiepoint.len()
            )));
        }
        if pixel_scale.len() < 2 {
            return Err(GeoError::DegenerateTransform(format!(
                "ModelPixelScale needs at least 2 values, got {}",
                pixel_scale.len()
            )));
        }

        let (i, j, x, y) = (tiepoint[0], tiepoint[1], tiepoint[3], tiepoint[4]);
        let (sx, sy) = (pixel_scale[0], pixel_scale[1]);
        if sx == 0.0 || sy == 0.0 {
            return Err(GeoError::DegenerateTransform(
                "ModelPixelScale contains a zero scale".to_string(),
            ));
        }

        Ok(Self::new(sx, 0.0, x - i * sx, 0.0, -sy, y + j * sy))
    }

    /// Build from a row-major 4x4 GeoTIFF `ModelTransformation` matrix.
    pub fn from_model_transformation(matrix: &[f64]) -> GeoResult<Self> {
        if matrix.len() < 16 {
            return Err(GeoError::DegenerateTransform(format!(
                "ModelTransformation needs 16 values, got {}",
                matrix.len()
            )));
        }
        let transform = Self::new(
            matrix[0], matrix[1], matrix[3], matrix[4], matrix[5], matrix[7],
        );
        if transform.determinant().abs() < f64::EPSILON {
            return Err(GeoError::DegenerateTransform(
                "ModelTransformation is singular".to_string(),
            ));
        }
        Ok(transform)
    }

    /// Map a (col, row) grid position to world (x, y).
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    /// Inverse mapping (world -> grid), or `None` for a singular transform.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < f64::MIN_POSITIVE {
            return None;
        }

        let ia = self.e / det;
        let ib = -self.b / det;
        let id = -self.d / det;
        let ie = self.a / det;
        let ic = -(ia * self.c + ib * self.f);
        let if_ = -(id * self.c + ie * self.f);

        Some(Self::new(ia, ib, ic, id, ie, if_))
    }

    /// Pixel size as (width, height), both positive.
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.a.hypot(self.d), self.b.hypot(self.e))
    }

    /// True when there is no rotation and rows run southward.
    pub fn is_north_up(&self) -> bool {
        self.b == 0.0 && self.d == 0.0 && self.a > 0.0 && self.e < 0.0
    }

    /// World bounds covered by a `width` x `height` grid.
    pub fn bounds(&self, width: usize, height: usize) -> BoundingBox {
        let (w, h) = (width as f64, height as f64);
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(w, 0.0),
            self.apply(0.0, h),
            self.apply(w, h),
        ];

        BoundingBox::enclosing(corners).unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_roundtrip() {
        let t = AffineTransform::new(0.5, 0.0, 0.25, 0.0, -0.5, 89.75);
        let inv = t.inverse().unwrap();

        let (x, y) = t.apply(10.0, 20.0);
        let (col, row) = inv.apply(x, y);
        assert!((col - 10.0).abs() < 1e-9);
        assert!((row - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_singular_has_no_inverse() {
        let t = AffineTransform::new(1.0, 2.0, 0.0, 2.0, 4.0, 0.0);
        assert!(t.inverse().is_none());
    }

    #[test]
    fn test_from_geotiff_etopo_like() {
        let t = AffineTransform::from_geotiff(
            &[0.0, 0.0, 0.0, -180.0, 90.0, 0.0],
            &[1.0 / 120.0, 1.0 / 120.0, 0.0],
        )
        .unwrap();

        assert!(t.is_north_up());
        assert_eq!(t.apply(0.0, 0.0), (-180.0, 90.0));
        let bounds = t.bounds(43200, 21600);
        assert!((bounds.max_x - 180.0).abs() < 1e-9);
        assert!((bounds.min_y + 90.0).abs() < 1e-9);
    }
}
