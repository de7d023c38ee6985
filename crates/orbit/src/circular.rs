//! Kinematics of the rotating-Earth demo: a sphere spinning about z with a
//! satellite on a circular equatorial orbit.

use std::f64::consts::{PI, TAU};

use nalgebra::{Point3, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::ellipse::linspace;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularOrbitScene {
    pub earth_radius_km: f64,
    pub orbit_radius_km: f64,
    /// Satellite angle per frame, as a multiple of the Earth's.
    pub satellite_rate: f64,
}

impl Default for CircularOrbitScene {
    fn default() -> Self {
        Self {
            earth_radius_km: 6378.0,
            orbit_radius_km: 9000.0,
            satellite_rate: 3.0,
        }
    }
}

/// A UV sphere sampled on an `n x n` grid, `points[i * n + j]` at
/// `(u[i], v[j])`.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub n: usize,
    pub points: Vec<Point3<f64>>,
}

impl SphereMesh {
    /// Quads of the grid, taking every `stride`-th row and column.
    pub fn quads(&self, stride: usize) -> Vec<[Point3<f64>; 4]> {
        let stride = stride.max(1);
        let n = self.n;
        if n < 2 {
            return Vec::new();
        }

        let mut idx: Vec<usize> = (0..n).step_by(stride).collect();
        // close the mesh at the last row/column
        if (n - 1) % stride != 0 {
            idx.push(n - 1);
        }

        let mut quads = Vec::new();
        for w in idx.windows(2) {
            for z in idx.windows(2) {
                let (i0, i1, j0, j1) = (w[0], w[1], z[0], z[1]);
                quads.push([
                    self.points[i0 * n + j0],
                    self.points[i0 * n + j1],
                    self.points[i1 * n + j1],
                    self.points[i1 * n + j0],
                ]);
            }
        }
        quads
    }

    pub fn rotated_z(&self, angle: f64) -> SphereMesh {
        SphereMesh {
            n: self.n,
            points: rotate_z(&self.points, angle),
        }
    }
}

impl CircularOrbitScene {
    pub fn satellite_position(&self, theta: f64) -> Point3<f64> {
        let (s, c) = theta.sin_cos();
        Point3::new(self.orbit_radius_km * c, self.orbit_radius_km * s, 0.0)
    }

    /// `u` over `[0, π]`, `v` over `[0, 2π]`:
    /// `(R cos u sin v, R sin u sin v, R cos v)`.
    pub fn earth_mesh(&self, n: usize) -> SphereMesh {
        let r = self.earth_radius_km;
        let us = linspace(0.0, PI, n);
        let vs = linspace(0.0, TAU, n);

        let points = us
            .iter()
            .flat_map(|&u| {
                vs.iter().map(move |&v| {
                    let (su, cu) = u.sin_cos();
                    let (sv, cv) = v.sin_cos();
                    Point3::new(r * cu * sv, r * su * sv, r * cv)
                })
            })
            .collect();

        SphereMesh { n, points }
    }

    /// Earth and satellite angles (radians) for frame `frame`, which is
    /// counted in degrees of Earth rotation.
    pub fn frame_angles(&self, frame: u32) -> (f64, f64) {
        let earth = (frame as f64).to_radians();
        (earth, earth * self.satellite_rate)
    }

    /// Axis half-extent that keeps the whole orbit in view.
    pub fn view_extent(&self) -> f64 {
        self.orbit_radius_km + 500.0
    }
}

/// Rotate points about the z axis.
pub fn rotate_z(points: &[Point3<f64>], angle: f64) -> Vec<Point3<f64>> {
    let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), angle);
    points.iter().map(|p| rotation * p).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satellite_on_orbit_radius() {
        let scene = CircularOrbitScene::default();
        for deg in [0.0f64, 37.0, 181.0, 359.0] {
            let p = scene.satellite_position(deg.to_radians());
            assert!((p.coords.norm() - 9000.0).abs() < 1e-9);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_mesh_points_on_sphere() {
        let scene = CircularOrbitScene::default();
        let mesh = scene.earth_mesh(20);
        assert_eq!(mesh.points.len(), 400);
        assert!(mesh.points.iter().all(|p| (p.coords.norm() - 6378.0).abs() < 1e-6));
    }

    #[test]
    fn test_quads_cover_grid() {
        let mesh = CircularOrbitScene::default().earth_mesh(5);
        assert_eq!(mesh.quads(1).len(), 16);
        assert_eq!(mesh.quads(2).len(), 4);
        // stride 3 over 0..5 takes 0, 3 and closes at 4
        assert_eq!(mesh.quads(3).len(), 4);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let r = rotate_z(&[Point3::new(1.0, 0.0, 0.0)], std::f64::consts::FRAC_PI_2);
        assert!(r[0].x.abs() < 1e-12);
        assert!((r[0].y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_frame_angles() {
        let (earth, sat) = CircularOrbitScene::default().frame_angles(30);
        assert!((earth - 30f64.to_radians()).abs() < 1e-12);
        assert!((sat - 90f64.to_radians()).abs() < 1e-12);
    }
}
