//! Two-line element (TLE) parsing.
//!
//! Column layout follows the NORAD format; all slices below are 0-based
//! byte ranges into the 69-character lines.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{OrbitError, OrbitResult};

const LINE_LENGTH: usize = 69;
const MINUTES_PER_DAY: f64 = 1440.0;

/// One parsed element set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TleRecord {
    pub name: String,
    pub line1: String,
    pub line2: String,
    pub catalog_number: u32,
    pub classification: char,
    pub international_designator: String,
    pub epoch: DateTime<Utc>,
    /// First derivative of mean motion / 2 (rev/day²).
    pub mean_motion_dot: f64,
    pub bstar: f64,
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub eccentricity: f64,
    pub arg_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
    pub mean_motion_rev_per_day: f64,
    pub revolution_number: u32,
}

impl TleRecord {
    /// Orbital period from the mean motion.
    pub fn period_minutes(&self) -> f64 {
        MINUTES_PER_DAY / self.mean_motion_rev_per_day
    }

    /// Parse a single element set.
    pub fn parse(name: Option<&str>, line1: &str, line2: &str) -> OrbitResult<Self> {
        let line1 = line1.trim_end();
        let line2 = line2.trim_end();
        check_line(line1, '1')?;
        check_line(line2, '2')?;

        let catalog1: u32 = parse_field(line1, 2..7, "catalog number")?;
        let catalog2: u32 = parse_field(line2, 2..7, "catalog number")?;
        if catalog1 != catalog2 {
            return Err(OrbitError::invalid_tle(format!(
                "catalog numbers differ: {} vs {}",
                catalog1, catalog2
            )));
        }

        let name = name
            .map(|n| n.trim().trim_start_matches("0 ").trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("NORAD {}", catalog1));

        let epoch_year: i32 = parse_field(line1, 18..20, "epoch year")?;
        let epoch_day: f64 = parse_field(line1, 20..32, "epoch day")?;

        Ok(Self {
            name,
            line1: line1.to_string(),
            line2: line2.to_string(),
            catalog_number: catalog1,
            classification: line1[7..8].chars().next().unwrap_or('U'),
            international_designator: line1[9..17].trim().to_string(),
            epoch: epoch_from_parts(epoch_year, epoch_day)?,
            mean_motion_dot: parse_field(line1, 33..43, "mean motion derivative")?,
            bstar: parse_exponent_field(&line1[53..61], "bstar")?,
            inclination_deg: parse_field(line2, 8..16, "inclination")?,
            raan_deg: parse_field(line2, 17..25, "right ascension")?,
            eccentricity: parse_implied_decimal(&line2[26..33], "eccentricity")?,
            arg_perigee_deg: parse_field(line2, 34..42, "argument of perigee")?,
            mean_anomaly_deg: parse_field(line2, 43..51, "mean anomaly")?,
            mean_motion_rev_per_day: parse_field(line2, 52..63, "mean motion")?,
            revolution_number: line2[63..68].trim().parse().unwrap_or(0),
        })
    }
}

/// Modulo-10 checksum over the first 68 columns: digits count their value,
/// minus signs count 1.
pub fn checksum(line: &str) -> u32 {
    line.bytes()
        .take(LINE_LENGTH - 1)
        .map(|b| match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'-' => 1,
            _ => 0,
        })
        .sum::<u32>()
        % 10
}

fn check_line(line: &str, number: char) -> OrbitResult<()> {
    if !line.is_ascii() {
        return Err(OrbitError::invalid_tle(format!("line {} is not ASCII", number)));
    }
    if line.len() != LINE_LENGTH {
        return Err(OrbitError::invalid_tle(format!(
            "line {} has {} columns, expected {}",
            number,
            line.len(),
            LINE_LENGTH
        )));
    }
    if !line.starts_with(number) || line.as_bytes()[1] != b' ' {
        return Err(OrbitError::invalid_tle(format!(
            "line does not start with '{} ': {}",
            number, line
        )));
    }

    let expected = checksum(line);
    let actual = line.as_bytes()[LINE_LENGTH - 1];
    if !actual.is_ascii_digit() || (actual - b'0') as u32 != expected {
        return Err(OrbitError::invalid_tle(format!(
            "line {} checksum is '{}', computed {}",
            number, actual as char, expected
        )));
    }
    Ok(())
}

fn parse_field<T: std::str::FromStr>(
    line: &str,
    range: std::ops::Range<usize>,
    what: &str,
) -> OrbitResult<T> {
    let raw = line[range].trim();
    // ".00001234" style fields
    let normalized = match raw.strip_prefix('-') {
        Some(rest) if rest.starts_with('.') => format!("-0{}", rest),
        _ if raw.starts_with('.') => format!("0{}", raw),
        _ => raw.to_string(),
    };
    normalized
        .parse()
        .map_err(|_| OrbitError::invalid_tle(format!("bad {} field '{}'", what, raw)))
}

/// "0006703" -> 0.0006703
fn parse_implied_decimal(raw: &str, what: &str) -> OrbitResult<f64> {
    format!("0.{}", raw.trim())
        .parse()
        .map_err(|_| OrbitError::invalid_tle(format!("bad {} field '{}'", what, raw)))
}

/// "-11606-4" -> -0.11606e-4
fn parse_exponent_field(raw: &str, what: &str) -> OrbitResult<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    let err = || OrbitError::invalid_tle(format!("bad {} field '{}'", what, raw));

    let (sign, body) = match raw.as_bytes()[0] {
        b'-' => (-1.0, &raw[1..]),
        b'+' => (1.0, &raw[1..]),
        _ => (1.0, raw),
    };
    let split = body.rfind(['-', '+']).ok_or_else(err)?;
    let mantissa: f64 = format!("0.{}", &body[..split]).parse().map_err(|_| err())?;
    let exponent: i32 = body[split..].parse().map_err(|_| err())?;

    Ok(sign * mantissa * 10f64.powi(exponent))
}

fn epoch_from_parts(two_digit_year: i32, day_of_year: f64) -> OrbitResult<DateTime<Utc>> {
    let year = if two_digit_year < 57 {
        2000 + two_digit_year
    } else {
        1900 + two_digit_year
    };

    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| OrbitError::invalid_tle(format!("bad epoch year {}", year)))?;
    if !(1.0..367.0).contains(&day_of_year) {
        return Err(OrbitError::invalid_tle(format!(
            "epoch day {} out of range",
            day_of_year
        )));
    }

    let micros = ((day_of_year - 1.0) * 86_400e6).round() as i64;
    Ok(Utc.from_utc_datetime(&jan1) + Duration::microseconds(micros))
}

/// Parse every element set in `text`.
///
/// Accepts three-line sets (name, line 1, line 2) and bare two-line sets.
/// Blank lines are ignored.
pub fn parse_tle_text(text: &str) -> OrbitResult<Vec<TleRecord>> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect();

    let mut records = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let is_line1 = |s: &str| s.starts_with("1 ");
        let (name, start) = if is_line1(lines[i]) {
            (None, i)
        } else {
            (Some(lines[i]), i + 1)
        };

        if start + 1 >= lines.len() {
            return Err(OrbitError::invalid_tle(format!(
                "incomplete element set starting at '{}'",
                lines[i].trim()
            )));
        }

        records.push(TleRecord::parse(name, lines[start], lines[start + 1])?);
        i = start + 2;
    }

    Ok(records)
}

/// Load every `*.txt` file in `dir`, sorted by file name.
///
/// Files with fewer than three non-blank lines are skipped with a warning.
pub fn load_tle_dir(dir: impl AsRef<Path>) -> OrbitResult<Vec<TleRecord>> {
    let dir = dir.as_ref();
    let mut paths: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let is_txt = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if entry.file_type().is_file() && is_txt {
            paths.push(entry.into_path());
        }
    }
    paths.sort();

    let mut records = Vec::new();
    for path in &paths {
        let text = std::fs::read_to_string(path)?;
        let non_blank = text.lines().filter(|l| !l.trim().is_empty()).count();
        if non_blank < 3 {
            warn!(path = %path.display(), lines = non_blank, "Skipping TLE file with fewer than 3 lines");
            continue;
        }

        let parsed = parse_tle_text(&text).map_err(|e| {
            OrbitError::invalid_tle(format!("{}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), count = parsed.len(), "Parsed TLE file");
        records.extend(parsed);
    }

    info!(dir = %dir.display(), satellites = records.len(), "Loaded TLE sets");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS_1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn test_checksum() {
        assert_eq!(checksum(ISS_1), 7);
        assert_eq!(checksum(ISS_2), 7);
    }

    #[test]
    fn test_parse_iss_fields() {
        let tle = TleRecord::parse(Some("ISS (ZARYA)"), ISS_1, ISS_2).unwrap();
        assert_eq!(tle.name, "ISS (ZARYA)");
        assert_eq!(tle.catalog_number, 25544);
        assert_eq!(tle.classification, 'U');
        assert_eq!(tle.international_designator, "98067A");
        assert!((tle.inclination_deg - 51.6416).abs() < 1e-12);
        assert!((tle.eccentricity - 0.0006703).abs() < 1e-12);
        assert!((tle.mean_motion_dot + 0.00002182).abs() < 1e-12);
        assert!((tle.bstar + 0.11606e-4).abs() < 1e-12);
        assert!((tle.mean_motion_rev_per_day - 15.72125391).abs() < 1e-9);
        assert_eq!(tle.revolution_number, 56353);
        assert_eq!(tle.epoch.format("%Y-%m-%d %H").to_string(), "2008-09-20 12");
    }

    #[test]
    fn test_period() {
        let tle = TleRecord::parse(None, ISS_1, ISS_2).unwrap();
        assert_eq!(tle.name, "NORAD 25544");
        assert!((tle.period_minutes() - 91.596).abs() < 0.01);
    }

    #[test]
    fn test_exponent_field() {
        assert!((parse_exponent_field(" 45678-4", "b").unwrap() - 0.45678e-4).abs() < 1e-15);
        assert_eq!(parse_exponent_field(" 00000-0", "b").unwrap(), 0.0);
        assert!(parse_exponent_field("abc", "b").is_err());
    }

    #[test]
    fn test_short_line_rejected() {
        let err = TleRecord::parse(None, &ISS_1[..60], ISS_2).unwrap_err();
        assert!(matches!(err, OrbitError::InvalidTle(_)));
    }

    #[test]
    fn test_three_line_zero_prefix_name() {
        let text = format!("0 ISS (ZARYA)\n{}\n{}\n", ISS_1, ISS_2);
        let records = parse_tle_text(&text).unwrap();
        assert_eq!(records[0].name, "ISS (ZARYA)");
    }
}
