//! Sampling kernels for resampling.
//!
//! Positions are fractional `(x, y)` indices into a row-major grid; whole
//! numbers fall exactly on samples. A position outside
//! `[0, width - 1] x [0, height - 1]` samples as `NaN`, as does any kernel
//! footprint touching a `NaN` (cubic drops back to bilinear instead).

use crate::types::InterpolationMethod;

/// Borrowed row-major grid of samples.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    pub data: &'a [f32],
    pub width: usize,
    pub height: usize,
}

impl<'a> GridView<'a> {
    pub fn new(data: &'a [f32], width: usize, height: usize) -> Self {
        Self { data, width, height }
    }

    fn at(&self, col: usize, row: usize) -> f32 {
        self.data[row * self.width + col]
    }

    fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=(self.width - 1) as f64).contains(&x) && (0.0..=(self.height - 1) as f64).contains(&y)
    }

    pub fn sample(&self, method: InterpolationMethod, x: f64, y: f64) -> f32 {
        match method {
            InterpolationMethod::Nearest => self.nearest(x, y),
            InterpolationMethod::Bilinear => self.bilinear(x, y),
            InterpolationMethod::Cubic => self.cubic(x, y),
        }
    }

    pub fn nearest(&self, x: f64, y: f64) -> f32 {
        if self.is_empty() || x < -0.5 || y < -0.5 {
            return f32::NAN;
        }
        let (col, row) = (x.round() as usize, y.round() as usize);
        if col >= self.width || row >= self.height {
            return f32::NAN;
        }
        self.at(col, row)
    }

    pub fn bilinear(&self, x: f64, y: f64) -> f32 {
        if self.is_empty() || !self.contains(x, y) {
            return f32::NAN;
        }
        let (c0, r0) = (x.floor() as usize, y.floor() as usize);
        let c1 = (c0 + 1).min(self.width - 1);
        let r1 = (r0 + 1).min(self.height - 1);
        self.lerp2((c0, c1), (r0, r1), x - c0 as f64, y - r0 as f64)
    }

    /// Bilinear with columns wrapping around, so the last column blends
    /// into the first. For grids spanning 360 degrees of longitude.
    pub fn bilinear_wrapped(&self, x: f64, y: f64) -> f32 {
        let rows = (self.height.max(1) - 1) as f64;
        if self.is_empty() || !x.is_finite() || !(0.0..=rows).contains(&y) {
            return f32::NAN;
        }
        let x = x.rem_euclid(self.width as f64);
        let c0 = (x.floor() as usize).min(self.width - 1);
        let r0 = y.floor() as usize;
        let cols = (c0, (c0 + 1) % self.width);
        let rows = (r0, (r0 + 1).min(self.height - 1));
        self.lerp2(cols, rows, x - c0 as f64, y - r0 as f64)
    }

    fn lerp2(&self, (c0, c1): (usize, usize), (r0, r1): (usize, usize), fx: f64, fy: f64) -> f32 {
        let corners = [self.at(c0, r0), self.at(c1, r0), self.at(c0, r1), self.at(c1, r1)];
        if corners.iter().any(|v| v.is_nan()) {
            return f32::NAN;
        }
        let (fx, fy) = (fx as f32, fy as f32);
        let upper = corners[0] + (corners[1] - corners[0]) * fx;
        let lower = corners[2] + (corners[3] - corners[2]) * fx;
        upper + (lower - upper) * fy
    }

    /// Catmull-Rom bicubic over the 4x4 neighbourhood, edges clamped.
    pub fn cubic(&self, x: f64, y: f64) -> f32 {
        if self.is_empty() || !self.contains(x, y) {
            return f32::NAN;
        }
        let (xi, yi) = (x.floor() as i64, y.floor() as i64);
        let (fx, fy) = ((x - xi as f64) as f32, (y - yi as f64) as f32);
        let clamp_col = |c: i64| c.clamp(0, self.width as i64 - 1) as usize;
        let clamp_row = |r: i64| r.clamp(0, self.height as i64 - 1) as usize;

        let mut rows = [0.0f32; 4];
        for (j, out) in rows.iter_mut().enumerate() {
            let row = clamp_row(yi + j as i64 - 1);
            let mut p = [0.0f32; 4];
            for (i, v) in p.iter_mut().enumerate() {
                *v = self.at(clamp_col(xi + i as i64 - 1), row);
            }
            if p.iter().any(|v| v.is_nan()) {
                return self.bilinear(x, y);
            }
            *out = catmull_rom(p, fx);
        }
        catmull_rom(rows, fy)
    }
}

fn catmull_rom([p0, p1, p2, p3]: [f32; 4], t: f32) -> f32 {
    let a = 0.5 * (-p0 + 3.0 * p1 - 3.0 * p2 + p3);
    let b = p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3;
    let c = 0.5 * (p2 - p0);
    ((a * t + b) * t + c) * t + p1
}

pub fn nearest_interpolate(data: &[f32], width: usize, height: usize, x: f64, y: f64) -> f32 {
    GridView::new(data, width, height).nearest(x, y)
}

pub fn bilinear_interpolate(data: &[f32], width: usize, height: usize, x: f64, y: f64) -> f32 {
    GridView::new(data, width, height).bilinear(x, y)
}

pub fn cubic_interpolate(data: &[f32], width: usize, height: usize, x: f64, y: f64) -> f32 {
    GridView::new(data, width, height).cubic(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_BY_THREE: [f32; 9] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];

    #[test]
    fn test_nearest_rounds_to_sample() {
        let grid = GridView::new(&THREE_BY_THREE, 3, 3);
        assert_eq!(grid.nearest(0.0, 0.0), 1.0);
        assert_eq!(grid.nearest(0.4, 0.4), 1.0);
        assert_eq!(grid.nearest(0.6, 0.6), 5.0);
        assert_eq!(grid.nearest(2.0, 1.0), 6.0);
        assert!(grid.nearest(-0.6, 0.0).is_nan());
        assert!(grid.nearest(3.0, 0.0).is_nan());
    }

    #[test]
    fn test_bilinear_corners_and_center() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let grid = GridView::new(&data, 2, 2);
        assert_eq!(grid.bilinear(0.0, 0.0), 1.0);
        assert_eq!(grid.bilinear(1.0, 0.0), 2.0);
        assert_eq!(grid.bilinear(0.0, 1.0), 3.0);
        assert_eq!(grid.bilinear(1.0, 1.0), 4.0);
        assert!((grid.bilinear(0.5, 0.5) - 2.5).abs() < 1e-6);
        assert!(grid.bilinear(-0.1, 0.0).is_nan());
        assert!(grid.bilinear(0.0, 1.1).is_nan());
    }

    #[test]
    fn test_bilinear_nan_corner() {
        let data = [1.0, f32::NAN, 3.0, 4.0];
        assert!(bilinear_interpolate(&data, 2, 2, 0.5, 0.5).is_nan());
        // exactly on a finite sample still needs the whole footprint
        assert!(bilinear_interpolate(&data, 2, 2, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_wrapped_blends_across_seam() {
        let data = [0.0, 10.0, 20.0, 30.0];
        let grid = GridView::new(&data, 4, 1);
        assert!((grid.bilinear_wrapped(3.5, 0.0) - 15.0).abs() < 1e-5);
        assert!((grid.bilinear_wrapped(-1.0, 0.0) - 30.0).abs() < 1e-5);
        assert!(grid.bilinear_wrapped(0.0, 0.5).is_nan());
    }

    #[test]
    fn test_cubic_exact_on_ramp() {
        let data: Vec<f32> = (0..16).map(|i| (i % 4) as f32).collect();
        assert!((cubic_interpolate(&data, 4, 4, 1.5, 1.5) - 1.5).abs() < 1e-5);
        assert_eq!(cubic_interpolate(&data, 4, 4, 2.0, 0.0), 2.0);
    }

    #[test]
    fn test_cubic_nan_falls_back() {
        let mut data = vec![1.0f32; 16];
        data[0] = f32::NAN;
        let grid = GridView::new(&data, 4, 4);
        // footprint reaches the NaN corner, bilinear footprint does not
        assert_eq!(grid.cubic(1.5, 1.5), 1.0);
        assert!(grid.sample(InterpolationMethod::Nearest, 0.2, 0.2).is_nan());
    }
}
