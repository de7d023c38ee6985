//! Coordinate axes of regular geographic grids.

use serde::{Deserialize, Serialize};

use crate::error::{GeoError, GeoResult};
use crate::{AffineTransform, BoundingBox};

/// Latitude and longitude axes of a regular grid.
///
/// Values are cell centers in degrees, in the order they are stored in the
/// data array. Latitude may be ascending (GRACE mascons) or descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridAxes {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
}

impl GridAxes {
    pub fn new(lat: Vec<f64>, lon: Vec<f64>) -> GeoResult<Self> {
        check_axis("lat", &lat)?;
        check_axis("lon", &lon)?;
        Ok(Self { lat, lon })
    }

    /// Evenly spaced axes from a start value, step and count.
    pub fn regular(
        lat_start: f64,
        lat_step: f64,
        nlat: usize,
        lon_start: f64,
        lon_step: f64,
        nlon: usize,
    ) -> GeoResult<Self> {
        let lat = (0..nlat).map(|i| lat_start + i as f64 * lat_step).collect();
        let lon = (0..nlon).map(|i| lon_start + i as f64 * lon_step).collect();
        Self::new(lat, lon)
    }

    pub fn nlat(&self) -> usize {
        self.lat.len()
    }

    pub fn nlon(&self) -> usize {
        self.lon.len()
    }

    /// (rows, cols) of the data array.
    pub fn shape(&self) -> (usize, usize) {
        (self.nlat(), self.nlon())
    }

    pub fn lat_resolution(&self) -> f64 {
        (self.lat[1] - self.lat[0]).abs()
    }

    pub fn lon_resolution(&self) -> f64 {
        (self.lon[1] - self.lon[0]).abs()
    }

    pub fn lat_ascending(&self) -> bool {
        self.lat[1] > self.lat[0]
    }

    /// Extent of the axis values (cell centers, not cell edges).
    pub fn bounds(&self) -> BoundingBox {
        let (min_x, max_x) = min_max(&self.lon);
        let (min_y, max_y) = min_max(&self.lat);
        BoundingBox::new(min_x, min_y, max_x, max_y)
    }

    /// Whether the longitude axis covers a full turn.
    pub fn spans_globe(&self) -> bool {
        self.nlon() as f64 * self.lon_resolution() >= 360.0 - 1e-6
    }

    /// Nearest cell to a point, as (row, col) into the stored array.
    pub fn locate(&self, lon: f64, lat: f64) -> Option<(usize, usize)> {
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }

        let dlat = self.lat[1] - self.lat[0];
        let dlon = self.lon[1] - self.lon[0];

        let lon = if self.spans_globe() {
            let west_edge = self.bounds().min_x - self.lon_resolution() / 2.0;
            west_edge + (lon - west_edge).rem_euclid(360.0)
        } else {
            lon
        };

        let row = nearest_index((lat - self.lat[0]) / dlat, self.nlat())?;
        let col = nearest_index((lon - self.lon[0]) / dlon, self.nlon())?;
        Some((row, col))
    }

    /// The north-up affine grid descriptor for these axes.
    pub fn transform(&self) -> AffineTransform {
        AffineTransform::from_axes(self)
    }
}

fn check_axis(name: &'static str, values: &[f64]) -> GeoResult<()> {
    if values.len() < 2 {
        return Err(GeoError::invalid_axis(
            name,
            format!("need at least 2 points, got {}", values.len()),
        ));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(GeoError::invalid_axis(name, "contains non-finite values"));
    }
    if values[1] == values[0] {
        return Err(GeoError::invalid_axis(name, "zero spacing"));
    }
    Ok(())
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

fn nearest_index(fractional: f64, len: usize) -> Option<usize> {
    let idx = fractional.round();
    if idx < 0.0 || idx >= len as f64 {
        None
    } else {
        Some(idx as usize)
    }
}
