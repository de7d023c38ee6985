//! Geometry of a Keplerian ellipse and its auxiliary circle.
//!
//! Coordinates are in the ellipse-center frame: the center is the origin,
//! the occupied focus sits at `(a·e, 0)` and periapsis lies on the +x axis.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::OrbitResult;
use crate::kepler::{check_eccentricity, eccentric_anomaly_from_mean, true_anomaly_from_eccentric};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitEllipse {
    pub semimajor: f64,
    pub eccentricity: f64,
}

impl OrbitEllipse {
    pub fn new(semimajor: f64, eccentricity: f64) -> OrbitResult<Self> {
        check_eccentricity(eccentricity)?;
        Ok(Self {
            semimajor,
            eccentricity,
        })
    }

    pub fn semiminor(&self) -> f64 {
        self.semimajor * (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }

    /// Distance from the center to the focus.
    pub fn focal_distance(&self) -> f64 {
        self.semimajor * self.eccentricity
    }

    pub fn focus(&self) -> (f64, f64) {
        (self.focal_distance(), 0.0)
    }

    pub fn periapsis_radius(&self) -> f64 {
        self.semimajor * (1.0 - self.eccentricity)
    }

    pub fn apoapsis_radius(&self) -> f64 {
        self.semimajor * (1.0 + self.eccentricity)
    }

    pub fn periapsis(&self) -> (f64, f64) {
        (self.focal_distance() + self.periapsis_radius(), 0.0)
    }

    pub fn apoapsis(&self) -> (f64, f64) {
        (self.focal_distance() - self.apoapsis_radius(), 0.0)
    }

    /// Distance from the focus at true anomaly `nu`.
    pub fn radius_at(&self, nu: f64) -> f64 {
        let e = self.eccentricity;
        self.semimajor * (1.0 - e * e) / (1.0 + e * nu.cos())
    }

    /// Point on the orbit at true anomaly `nu`.
    pub fn position_on_orbit(&self, nu: f64) -> (f64, f64) {
        let r = self.radius_at(nu);
        let (sin_nu, cos_nu) = nu.sin_cos();
        (r * cos_nu + self.focal_distance(), r * sin_nu)
    }

    /// Point on the auxiliary circle (radius `a`, centered on the ellipse).
    pub fn auxiliary_point(&self, angle: f64) -> (f64, f64) {
        let (s, c) = angle.sin_cos();
        (self.semimajor * c, self.semimajor * s)
    }

    /// `n` points around the orbit, traced by true anomaly.
    pub fn outline(&self, n: usize) -> Vec<(f64, f64)> {
        linspace(0.0, TAU, n)
            .into_iter()
            .map(|nu| self.position_on_orbit(nu))
            .collect()
    }

    pub fn auxiliary_circle(&self, n: usize) -> Vec<(f64, f64)> {
        linspace(0.0, TAU, n)
            .into_iter()
            .map(|t| self.auxiliary_point(t))
            .collect()
    }
}

/// The three anomalies at one instant (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyFrame {
    pub mean: f64,
    pub eccentric: f64,
    pub true_anomaly: f64,
}

/// Anomalies over one orbit, sampled uniformly in mean anomaly.
#[derive(Debug, Clone)]
pub struct AnomalySeries {
    pub ellipse: OrbitEllipse,
    pub frames: Vec<AnomalyFrame>,
}

impl AnomalySeries {
    /// Mean anomaly `linspace(0, 2π, frames)` with matching E and ν.
    pub fn uniform(ellipse: OrbitEllipse, frames: usize) -> OrbitResult<Self> {
        let e = ellipse.eccentricity;
        let frames = linspace(0.0, TAU, frames)
            .into_iter()
            .map(|mean| {
                let eccentric = eccentric_anomaly_from_mean(mean, e)?;
                let true_anomaly = true_anomaly_from_eccentric(eccentric, e)?;
                Ok(AnomalyFrame {
                    mean,
                    eccentric,
                    true_anomaly,
                })
            })
            .collect::<OrbitResult<Vec<_>>>()?;

        Ok(Self { ellipse, frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apsides_positions() {
        let ellipse = OrbitEllipse::new(1.0, 0.7).unwrap();
        let (px, _) = ellipse.periapsis();
        let (ax, _) = ellipse.apoapsis();
        assert!((px - 1.0).abs() < 1e-12);
        assert!((ax + 1.0).abs() < 1e-12);
        assert!((ellipse.semiminor() - 0.51f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_orbit_point_matches_eccentric_projection() {
        // x on the orbit equals x on the auxiliary circle at E
        let ellipse = OrbitEllipse::new(2.0, 0.4).unwrap();
        let ea = 1.1;
        let nu = true_anomaly_from_eccentric(ea, 0.4).unwrap();
        let (x_orbit, y_orbit) = ellipse.position_on_orbit(nu);
        let (x_aux, _) = ellipse.auxiliary_point(ea);
        assert!((x_orbit - x_aux).abs() < 1e-12);
        assert!((y_orbit - ellipse.semiminor() * ea.sin()).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_series() {
        let ellipse = OrbitEllipse::new(1.0, 0.7).unwrap();
        let series = AnomalySeries::uniform(ellipse, 200).unwrap();
        assert_eq!(series.len(), 200);
        assert_eq!(series.frames[0].mean, 0.0);
        assert!((series.frames[199].mean - TAU).abs() < 1e-12);
    }

    #[test]
    fn test_linspace_edges() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 5.0, 1), vec![3.0]);
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }
}
