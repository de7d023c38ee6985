//! Gravity anomaly from liquid-water-equivalent (LWE) thickness.
//!
//! Treats a water column of thickness `h` as an infinite Bouguer slab:
//!
//! ```text
//! Δg = 2π · G · ρ_water · h
//! ```
//!
//! with `h` converted from centimetres to metres and the result expressed in
//! milligal (1 mGal = 1e-5 m/s²). One centimetre of water is about
//! 4.19e-4 mGal.

pub mod quantity;

pub use quantity::Quantity;

use rayon::prelude::*;

/// Gravitational constant used by the conversion (m³ kg⁻¹ s⁻²).
pub const G: f64 = 6.67e-11;

/// Density of water (kg/m³).
pub const RHO_WATER: f64 = 1000.0;

/// Centimetres to metres.
pub const CM_TO_M: f64 = 0.01;

/// One milligal in m/s².
pub const MGAL: f64 = 1e-5;

/// Bouguer-slab gravity anomaly in mGal for `h_cm` centimetres of water.
pub fn lwe_to_gravity_mgal(h_cm: f64) -> f64 {
    2.0 * std::f64::consts::PI * G * RHO_WATER * (h_cm * CM_TO_M) / MGAL
}

/// Element-wise conversion of an LWE field; `NaN` stays `NaN`.
pub fn gravity_anomaly_field(lwe_cm: &[f32]) -> Vec<f32> {
    lwe_cm
        .par_iter()
        .map(|&h| lwe_to_gravity_mgal(h as f64) as f32)
        .collect()
}
