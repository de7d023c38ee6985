//! SGP4 propagation of a parsed element set.

use chrono::{DateTime, Utc};
use nalgebra::Vector3;

use crate::error::{OrbitError, OrbitResult};
use crate::frames::{ecef_to_geodetic, teme_to_ecef, Geodetic};
use crate::tle::TleRecord;

/// Wraps the SGP4 constants for one satellite.
pub struct Propagator {
    name: String,
    epoch: DateTime<Utc>,
    constants: sgp4::Constants,
}

impl std::fmt::Debug for Propagator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Propagator")
            .field("name", &self.name)
            .field("epoch", &self.epoch)
            .finish()
    }
}

impl Propagator {
    pub fn new(record: &TleRecord) -> OrbitResult<Self> {
        let elements = sgp4::Elements::from_tle(
            Some(record.name.clone()),
            record.line1.as_bytes(),
            record.line2.as_bytes(),
        )
        .map_err(OrbitError::propagation)?;
        let constants =
            sgp4::Constants::from_elements(&elements).map_err(OrbitError::propagation)?;

        Ok(Self {
            name: record.name.clone(),
            epoch: elements.datetime.and_utc(),
            constants,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    pub fn minutes_since_epoch(&self, time: DateTime<Utc>) -> f64 {
        (time - self.epoch).num_milliseconds() as f64 / 60_000.0
    }

    /// TEME position (km) at `time`.
    pub fn position_at(&self, time: DateTime<Utc>) -> OrbitResult<[f64; 3]> {
        let minutes = self.minutes_since_epoch(time);
        let prediction = self
            .constants
            .propagate(sgp4::MinutesSinceEpoch(minutes))
            .map_err(|e| OrbitError::propagation(format!("{} at {:+.1} min: {}", self.name, minutes, e)))?;

        Ok(prediction.position)
    }

    /// Sub-satellite point and altitude at `time`.
    pub fn geodetic_at(&self, time: DateTime<Utc>) -> OrbitResult<Geodetic> {
        let teme = Vector3::from(self.position_at(time)?);
        Ok(ecef_to_geodetic(teme_to_ecef(teme, time)))
    }
}
