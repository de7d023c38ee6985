//! Georeferenced single-band rasters.

use crate::error::GeoResult;
use crate::{AffineTransform, BoundingBox, GridAxes};

/// A single-band `f32` raster.
///
/// `data` is row-major and row 0 is the row at the transform origin (the
/// northernmost row for a north-up raster). Missing samples are `NaN`;
/// `nodata` records the value they had on disk, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub data: Vec<f32>,
    pub width: usize,
    pub height: usize,
    pub transform: AffineTransform,
    pub nodata: Option<f64>,
}

impl Raster {
    pub fn new(data: Vec<f32>, width: usize, height: usize, transform: AffineTransform) -> Self {
        Self {
            data,
            width,
            height,
            transform,
            nodata: None,
        }
    }

    pub fn with_nodata(mut self, nodata: Option<f64>) -> Self {
        self.nodata = nodata;
        self
    }

    /// Sample at (col, row), or `None` outside the raster.
    pub fn get(&self, col: usize, row: usize) -> Option<f32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    pub fn row(&self, row: usize) -> &[f32] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    pub fn bounds(&self) -> BoundingBox {
        self.transform.bounds(self.width, self.height)
    }

    /// World coordinates of a cell center.
    pub fn cell_center(&self, col: usize, row: usize) -> (f64, f64) {
        self.transform.apply(col as f64 + 0.5, row as f64 + 0.5)
    }

    /// Axes through the cell centers of an axis-aligned raster, in storage
    /// order (descending latitude for a north-up raster).
    pub fn center_axes(&self) -> GeoResult<GridAxes> {
        let lat = (0..self.height).map(|r| self.cell_center(0, r).1).collect();
        let lon = (0..self.width).map(|c| self.cell_center(c, 0).0).collect();
        GridAxes::new(lat, lon)
    }

    pub fn has_consistent_shape(&self) -> bool {
        self.data.len() == self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_row() {
        let raster = Raster::new(
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            3,
            2,
            AffineTransform::new(1.0, 0.0, 0.0, 0.0, -1.0, 2.0),
        );
        assert_eq!(raster.get(2, 1), Some(6.0));
        assert_eq!(raster.get(3, 0), None);
        assert_eq!(raster.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(raster.cell_center(0, 0), (0.5, 1.5));
        assert!(raster.has_consistent_shape());
    }

    #[test]
    fn test_center_axes() {
        let raster = Raster::new(
            vec![0.0; 8],
            4,
            2,
            AffineTransform::new(5.0, 0.0, 2.5, 0.0, -5.0, 87.5),
        );
        let axes = raster.center_axes().unwrap();
        assert_eq!(axes.lon, vec![5.0, 10.0, 15.0, 20.0]);
        assert_eq!(axes.lat, vec![85.0, 80.0]);
    }
}
