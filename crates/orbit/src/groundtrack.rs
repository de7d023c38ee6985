//! Sub-satellite ground tracks.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OrbitResult;
use crate::propagate::Propagator;
use crate::tle::TleRecord;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSample {
    pub time: DateTime<Utc>,
    pub lat_deg: f64,
    pub lon_deg: f64,
    /// TEME position in km.
    pub position_km: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTrack {
    pub name: String,
    pub samples: Vec<TrackSample>,
}

impl GroundTrack {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn lons(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.lon_deg).collect()
    }

    pub fn lats(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.lat_deg).collect()
    }
}

/// Direction marker at the midpoint of a track segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackArrow {
    pub lon: f64,
    pub lat: f64,
    /// Unit direction, east component.
    pub u: f64,
    /// Unit direction, north component.
    pub v: f64,
}

/// Propagate `record` over `minutes` starting at `start`, one sample every
/// `step_minutes`. The sample count is `minutes / step_minutes`.
pub fn ground_track(
    record: &TleRecord,
    start: DateTime<Utc>,
    minutes: u32,
    step_minutes: u32,
) -> OrbitResult<GroundTrack> {
    let propagator = Propagator::new(record)?;
    let step = step_minutes.max(1);
    let count = (minutes / step) as i64;

    let samples = (0..count)
        .map(|i| {
            let time = start + Duration::minutes(i * step as i64);
            let position_km = propagator.position_at(time)?;
            let geo = propagator.geodetic_at(time)?;
            Ok(TrackSample {
                time,
                lat_deg: geo.lat_deg,
                lon_deg: geo.lon_deg,
                position_km,
            })
        })
        .collect::<OrbitResult<Vec<_>>>()?;

    debug!(
        satellite = %record.name,
        samples = samples.len(),
        start = %start,
        "Computed ground track"
    );

    Ok(GroundTrack {
        name: record.name.clone(),
        samples,
    })
}

/// Wrap a longitude difference into `(-180, 180]`.
fn wrap_delta(dlon: f64) -> f64 {
    let d = dlon.rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Unit direction markers for every `step`-th segment of `track`.
///
/// Segments of zero length are skipped.
pub fn direction_arrows(track: &GroundTrack, step: usize) -> Vec<TrackArrow> {
    let step = step.max(1);
    track
        .samples
        .windows(2)
        .step_by(step)
        .filter_map(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            let dlon = wrap_delta(b.lon_deg - a.lon_deg);
            let dlat = b.lat_deg - a.lat_deg;
            let norm = dlon.hypot(dlat);
            if norm == 0.0 || !norm.is_finite() {
                return None;
            }

            let lon = crate::frames::normalize_longitude(a.lon_deg + dlon / 2.0);
            Some(TrackArrow {
                lon,
                lat: a.lat_deg + dlat / 2.0,
                u: dlon / norm,
                v: dlat / norm,
            })
        })
        .collect()
}

/// Split the track into lon/lat polylines that never jump across ±180°.
///
/// A crossing point is interpolated onto both edges so the pieces meet the
/// map border.
pub fn split_at_antimeridian(track: &GroundTrack) -> Vec<Vec<(f64, f64)>> {
    let points: Vec<(f64, f64)> = track
        .samples
        .iter()
        .map(|s| (s.lon_deg, s.lat_deg))
        .collect();
    split_polyline(&points)
}

pub(crate) fn split_polyline(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    let mut pieces = Vec::new();
    let Some(&first) = points.first() else {
        return pieces;
    };

    let mut current = vec![first];
    for pair in points.windows(2) {
        let (lon0, lat0) = pair[0];
        let (lon1, lat1) = pair[1];
        let raw = lon1 - lon0;
        let wrapped = wrap_delta(raw);

        if (raw - wrapped).abs() > 1e-9 {
            // Crosses the antimeridian: lon0 + wrapped reaches ±180
            let edge = if wrapped > 0.0 { 180.0 } else { -180.0 };
            let t = (edge - lon0) / wrapped;
            let lat_cross = lat0 + t * (lat1 - lat0);

            current.push((edge, lat_cross));
            pieces.push(std::mem::take(&mut current));
            current.push((-edge, lat_cross));
        }
        current.push((lon1, lat1));
    }
    pieces.push(current);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lon: f64, lat: f64) -> TrackSample {
        TrackSample {
            time: DateTime::<Utc>::UNIX_EPOCH,
            lat_deg: lat,
            lon_deg: lon,
            position_km: [0.0; 3],
        }
    }

    fn track(points: &[(f64, f64)]) -> GroundTrack {
        GroundTrack {
            name: "test".to_string(),
            samples: points.iter().map(|&(lon, lat)| sample(lon, lat)).collect(),
        }
    }

    #[test]
    fn test_wrap_delta() {
        assert_eq!(wrap_delta(350.0), -10.0);
        assert_eq!(wrap_delta(-350.0), 10.0);
        assert_eq!(wrap_delta(180.0), 180.0);
        assert_eq!(wrap_delta(-180.0), 180.0);
    }

    #[test]
    fn test_arrows_every_step() {
        let t = track(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)]);
        let arrows = direction_arrows(&t, 2);
        assert_eq!(arrows.len(), 2);
        assert_eq!(arrows[0].lon, 0.5);
        assert_eq!(arrows[1].lon, 2.5);
        assert_eq!((arrows[0].u, arrows[0].v), (1.0, 0.0));
    }

    #[test]
    fn test_zero_length_segment_skipped() {
        let t = track(&[(10.0, 5.0), (10.0, 5.0), (11.0, 5.0)]);
        let arrows = direction_arrows(&t, 1);
        assert_eq!(arrows.len(), 1);
        assert!(arrows.iter().all(|a| a.u.is_finite() && a.v.is_finite()));
    }

    #[test]
    fn test_arrow_across_antimeridian_points_east() {
        let t = track(&[(179.0, 0.0), (-179.0, 0.0)]);
        let arrows = direction_arrows(&t, 1);
        assert_eq!(arrows[0].u, 1.0);
        assert_eq!(arrows[0].lon, -180.0);
    }

    #[test]
    fn test_split_inserts_edge_points() {
        let t = track(&[(170.0, 0.0), (178.0, 2.0), (-176.0, 4.0), (-170.0, 6.0)]);
        let pieces = split_at_antimeridian(&t);
        assert_eq!(pieces.len(), 2);
        let last = *pieces[0].last().unwrap();
        assert_eq!(last.0, 180.0);
        assert!((last.1 - (2.0 + 2.0 / 3.0)).abs() < 1e-12);
        assert_eq!(pieces[1][0], (-180.0, last.1));
    }
}
