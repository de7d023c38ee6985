//! Reference-frame conversions: TEME to Earth-fixed to geodetic.

use chrono::{DateTime, Utc};
use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

/// WGS84 equatorial radius (km).
pub const WGS84_A: f64 = 6378.137;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

const SECONDS_PER_DAY: f64 = 86_400.0;
const JULIAN_UNIX_EPOCH: f64 = 2_440_587.5;
const JULIAN_J2000: f64 = 2_451_545.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Geodetic position on the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geodetic {
    /// Degrees, positive north.
    pub lat_deg: f64,
    /// Degrees in `[-180, 180)`.
    pub lon_deg: f64,
    /// Height above the ellipsoid in km.
    pub alt_km: f64,
}

/// Julian date (UT1 taken as UTC).
pub fn julian_date(time: DateTime<Utc>) -> f64 {
    let seconds = time.timestamp() as f64 + time.timestamp_subsec_nanos() as f64 * 1e-9;
    seconds / SECONDS_PER_DAY + JULIAN_UNIX_EPOCH
}

/// Greenwich mean sidereal time in radians (IAU-82).
pub fn gmst(time: DateTime<Utc>) -> f64 {
    let t = (julian_date(time) - JULIAN_J2000) / DAYS_PER_CENTURY;
    let seconds = 67_310.548_41
        + (876_600.0 * 3600.0 + 8_640_184.812_866) * t
        + 0.093_104 * t * t
        - 6.2e-6 * t * t * t;

    (seconds.rem_euclid(SECONDS_PER_DAY) / 240.0).to_radians()
}

/// Rotate a TEME position into the Earth-fixed frame (polar motion ignored).
pub fn teme_to_ecef(position: Vector3<f64>, time: DateTime<Utc>) -> Vector3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), -gmst(time)) * position
}

/// Earth-fixed cartesian (km) to WGS84 geodetic.
pub fn ecef_to_geodetic(position: Vector3<f64>) -> Geodetic {
    let e2 = WGS84_F * (2.0 - WGS84_F);
    let (x, y, z) = (position.x, position.y, position.z);
    let p = x.hypot(y);

    let mut lat = z.atan2(p * (1.0 - e2));
    for _ in 0..10 {
        let sin_lat = lat.sin();
        let n = WGS84_A / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let next = (z + e2 * n * sin_lat).atan2(p);
        if (next - lat).abs() < 1e-12 {
            lat = next;
            break;
        }
        lat = next;
    }

    let (sin_lat, cos_lat) = lat.sin_cos();
    let alt_km = p * cos_lat + z * sin_lat - WGS84_A * (1.0 - e2 * sin_lat * sin_lat).sqrt();

    Geodetic {
        lat_deg: lat.to_degrees(),
        lon_deg: normalize_longitude(y.atan2(x).to_degrees()),
        alt_km,
    }
}

/// Wrap a longitude into `[-180, 180)`.
pub fn normalize_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}
