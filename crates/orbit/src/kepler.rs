//! Conversions between mean, eccentric and true anomaly.
//!
//! ```text
//! M ──Kepler's equation──► E ──β formulation──► ν
//! ▲                                             │
//! └─────────────── closed form ─────────────────┘
//! ```
//!
//! All angles are in radians.

use std::f64::consts::{PI, TAU};

use crate::error::{OrbitError, OrbitResult};

/// Newton-Raphson stopping tolerance on |ΔE|.
pub const KEPLER_TOLERANCE: f64 = 1e-12;

/// Newton-Raphson iteration cap.
pub const KEPLER_MAX_ITERATIONS: usize = 100;

pub(crate) fn check_eccentricity(e: f64) -> OrbitResult<()> {
    if (0.0..1.0).contains(&e) {
        Ok(())
    } else {
        Err(OrbitError::InvalidEccentricity(e))
    }
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_two_pi(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Mean anomaly from true anomaly, valid in every quadrant.
///
/// `M = atan2(−√(1−e²)·sin ν, −e − cos ν) + π − e·√(1−e²)·sin ν / (1 + e·cos ν)`
pub fn mean_anomaly_from_true(true_anomaly: f64, e: f64) -> OrbitResult<f64> {
    check_eccentricity(e)?;
    let s = (1.0 - e * e).sqrt();
    let (sin_nu, cos_nu) = true_anomaly.sin_cos();

    Ok((-s * sin_nu).atan2(-e - cos_nu) + PI - e * s * sin_nu / (1.0 + e * cos_nu))
}

/// Solve Kepler's equation `E − e·sin E = M` for E.
pub fn eccentric_anomaly_from_mean(mean_anomaly: f64, e: f64) -> OrbitResult<f64> {
    check_eccentricity(e)?;
    if !mean_anomaly.is_finite() {
        return Err(OrbitError::NoConvergence {
            mean_anomaly,
            eccentricity: e,
            iterations: 0,
        });
    }

    // Start at π for highly eccentric orbits
    let mut ecc_anomaly = if e > 0.8 { PI } else { mean_anomaly };

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let f = ecc_anomaly - e * ecc_anomaly.sin() - mean_anomaly;
        let f_prime = 1.0 - e * ecc_anomaly.cos();
        let delta = f / f_prime;
        ecc_anomaly -= delta;

        if delta.abs() < KEPLER_TOLERANCE {
            return Ok(ecc_anomaly);
        }
    }

    Err(OrbitError::NoConvergence {
        mean_anomaly,
        eccentricity: e,
        iterations: KEPLER_MAX_ITERATIONS,
    })
}

/// True anomaly from eccentric anomaly.
///
/// Uses `ν = E + 2·atan2(β·sin E, 1 − β·cos E)` with
/// `β = e / (1 + √(1−e²))`, which has no singularity at E = π.
pub fn true_anomaly_from_eccentric(ecc_anomaly: f64, e: f64) -> OrbitResult<f64> {
    check_eccentricity(e)?;
    let beta = e / (1.0 + (1.0 - e * e).sqrt());
    let (sin_e, cos_e) = ecc_anomaly.sin_cos();

    Ok(ecc_anomaly + 2.0 * (beta * sin_e).atan2(1.0 - beta * cos_e))
}

/// Mean anomaly straight to true anomaly.
pub fn true_anomaly_from_mean(mean_anomaly: f64, e: f64) -> OrbitResult<f64> {
    let ecc_anomaly = eccentric_anomaly_from_mean(mean_anomaly, e)?;
    true_anomaly_from_eccentric(ecc_anomaly, e)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle_diff(a: f64, b: f64) -> f64 {
        let d = wrap_two_pi(a - b);
        d.min(TAU - d)
    }

    #[test]
    fn test_circular_orbit_all_equal() {
        for m in [0.0, 0.5, 2.0, 4.0, 6.0] {
            let ea = eccentric_anomaly_from_mean(m, 0.0).unwrap();
            let nu = true_anomaly_from_eccentric(ea, 0.0).unwrap();
            assert!((ea - m).abs() < 1e-12);
            assert!(angle_diff(nu, m) < 1e-12);
        }
    }

    #[test]
    fn test_kepler_equation_satisfied() {
        let e = 0.7;
        let m = 1.0;
        let ea = eccentric_anomaly_from_mean(m, e).unwrap();
        assert!((ea - e * ea.sin() - m).abs() < 1e-12);
    }

    #[test]
    fn test_apsides() {
        let e = 0.7;
        assert!(angle_diff(true_anomaly_from_mean(0.0, e).unwrap(), 0.0) < 1e-12);
        assert!(angle_diff(true_anomaly_from_mean(PI, e).unwrap(), PI) < 1e-9);
    }

    #[test]
    fn test_eccentricity_out_of_range() {
        assert!(matches!(
            eccentric_anomaly_from_mean(1.0, 1.0),
            Err(OrbitError::InvalidEccentricity(_))
        ));
        assert!(matches!(
            mean_anomaly_from_true(1.0, -0.1),
            Err(OrbitError::InvalidEccentricity(_))
        ));
    }

    #[test]
    fn test_nan_mean_anomaly() {
        assert!(matches!(
            eccentric_anomaly_from_mean(f64::NAN, 0.3),
            Err(OrbitError::NoConvergence { .. })
        ));
    }
}
