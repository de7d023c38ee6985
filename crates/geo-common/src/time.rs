//! CF-convention time axis decoding.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GeoError, GeoResult};

/// Unit of a CF `"<unit> since <epoch>"` time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    pub fn seconds(&self) -> f64 {
        match self {
            TimeUnit::Days => 86_400.0,
            TimeUnit::Hours => 3_600.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Seconds => 1.0,
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "day" | "days" | "d" => Some(TimeUnit::Days),
            "hour" | "hours" | "hr" | "h" => Some(TimeUnit::Hours),
            "minute" | "minutes" | "min" => Some(TimeUnit::Minutes),
            "second" | "seconds" | "sec" | "s" => Some(TimeUnit::Seconds),
            _ => None,
        }
    }
}

/// Split a units attribute such as `days since 2002-01-01T00:00:00Z`.
pub fn parse_time_units(units: &str) -> GeoResult<(TimeUnit, DateTime<Utc>)> {
    let (unit, epoch) = units
        .split_once(" since ")
        .ok_or_else(|| GeoError::InvalidTimeUnits(units.to_string()))?;

    let unit =
        TimeUnit::parse(unit.trim()).ok_or_else(|| GeoError::InvalidTimeUnits(units.to_string()))?;
    let epoch = parse_epoch(epoch.trim())
        .ok_or_else(|| GeoError::InvalidTimeUnits(units.to_string()))?;

    Ok((unit, epoch))
}

fn parse_epoch(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let trimmed = s.trim_end_matches('Z').trim_end_matches(" UTC");
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

/// Convert raw time coordinate values to UTC instants.
pub fn decode_time_axis(values: &[f64], units: &str) -> GeoResult<Vec<DateTime<Utc>>> {
    let (unit, epoch) = parse_time_units(units)?;

    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return Err(GeoError::InvalidTime(format!("{} {}", v, units)));
            }
            let millis = (v * unit.seconds() * 1000.0).round();
            if millis.abs() > i64::MAX as f64 {
                return Err(GeoError::InvalidTime(format!("{} {}", v, units)));
            }
            epoch
                .checked_add_signed(Duration::milliseconds(millis as i64))
                .ok_or_else(|| GeoError::InvalidTime(format!("{} {}", v, units)))
        })
        .collect()
}

/// `YYYY-MM-DD` label used in plot titles.
pub fn date_label(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d").to_string()
}
