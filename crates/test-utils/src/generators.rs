//! Synthetic grids and rasters with predictable values.

use geo_common::{AffineTransform, GridAxes, Raster};

use crate::fixtures::grid;

/// Creates a test grid where each cell is `col * 1000 + row`.
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50);
/// assert_eq!(grid[1], 1000.0); // col=1, row=0
/// assert_eq!(grid[10], 1.0);   // col=0, row=1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// A plane `value = 2 * col + row`; bilinear interpolation reproduces it
/// exactly.
pub fn linear_ramp_raster(width: usize, height: usize, transform: AffineTransform) -> Raster {
    let data = (0..height)
        .flat_map(|row| (0..width).map(move |col| (2 * col + row) as f32))
        .collect();
    Raster::new(data, width, height, transform)
}

/// A north-up global raster (-180..180) whose value is the longitude of
/// each cell center.
pub fn global_longitude_raster(width: usize, height: usize) -> Raster {
    let dx = 360.0 / width as f64;
    let dy = 180.0 / height as f64;
    let transform = AffineTransform::new(dx, 0.0, -180.0, 0.0, -dy, 90.0);
    let data = (0..height)
        .flat_map(|_| (0..width).map(move |col| (-180.0 + (col as f64 + 0.5) * dx) as f32))
        .collect();
    Raster::new(data, width, height, transform)
}

/// A north-up global raster shaped like geoid heights (about -100..+80 m).
pub fn geoid_like_raster(width: usize, height: usize) -> Raster {
    let dx = 360.0 / width as f64;
    let dy = 180.0 / height as f64;
    let transform = AffineTransform::new(dx, 0.0, -180.0, 0.0, -dy, 90.0);
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        let lat = (90.0 - (row as f64 + 0.5) * dy).to_radians();
        for col in 0..width {
            let lon = (-180.0 + (col as f64 + 0.5) * dx).to_radians();
            data.push((60.0 * (2.0 * lat).sin() * lon.cos() - 20.0 * lat.cos()) as f32);
        }
    }
    Raster::new(data, width, height, transform)
}

/// GRACE-style axes at `resolution` degrees: latitude ascending,
/// longitude starting half a cell east of 0.
pub fn grace_axes(resolution: f64) -> GridAxes {
    let nlat = (180.0 / resolution).round() as usize;
    let nlon = (360.0 / resolution).round() as usize;
    GridAxes::regular(
        -90.0 + resolution / 2.0,
        resolution,
        nlat,
        resolution / 2.0,
        resolution,
        nlon,
    )
    .expect("regular axes are valid")
}

/// The full 0.5 degree mascon grid.
pub fn grace_mascon_axes() -> GridAxes {
    GridAxes::regular(
        grid::GRACE_LAT_START,
        grid::GRACE_RESOLUTION,
        grid::GRACE_NLAT,
        grid::GRACE_LON_START,
        grid::GRACE_RESOLUTION,
        grid::GRACE_NLON,
    )
    .expect("regular axes are valid")
}

/// `[time][lat][lon]` LWE frames in cm: an annual cycle scaled by
/// `cos(lat)`, with `NaN` poleward of 85 degrees.
pub fn synthetic_lwe_frames(axes: &GridAxes, n_times: usize) -> Vec<f32> {
    let mut frames = Vec::with_capacity(n_times * axes.nlat() * axes.nlon());
    for t in 0..n_times {
        let season = (2.0 * std::f64::consts::PI * t as f64 / 12.0).sin();
        for &lat in &axes.lat {
            for &lon in &axes.lon {
                if lat.abs() > 85.0 {
                    frames.push(f32::NAN);
                } else {
                    let v = 25.0 * season * lat.to_radians().cos() + 5.0 * lon.to_radians().sin();
                    frames.push(v as f32);
                }
            }
        }
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_longitude_raster_centers() {
        let r = global_longitude_raster(360, 180);
        assert_eq!(r.get(0, 0), Some(-179.5));
        assert_eq!(r.get(359, 179), Some(179.5));
    }

    #[test]
    fn test_grace_axes_shape() {
        let axes = grace_axes(1.0);
        assert_eq!(axes.shape(), (180, 360));
        assert!(axes.spans_globe());
        assert_eq!(grace_mascon_axes().shape(), (360, 720));
    }

    #[test]
    fn test_synthetic_lwe_has_polar_gaps() {
        let axes = grace_axes(5.0);
        let frames = synthetic_lwe_frames(&axes, 2);
        assert_eq!(frames.len(), 2 * 36 * 72);
        assert!(frames[0].is_nan());
        assert!(frames[36 * 72 / 2].is_finite());
    }
}
