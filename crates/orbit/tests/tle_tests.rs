//! TLE parsing, propagation and ground tracks from fixture element sets.

use chrono::{Duration, TimeZone, Utc};
use orbit::{
    direction_arrows, ground_track, load_tle_dir, parse_tle_text, split_at_antimeridian,
    OrbitError, Propagator,
};
use test_utils::{assert_approx_eq, tle};

#[test]
fn test_parse_three_line_sets() {
    let text = format!("{}{}", tle::GRACE_FO_1, tle::ICESAT_2);
    let records = parse_tle_text(&text).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "GRACE-FO 1");
    assert_eq!(records[0].catalog_number, 43476);
    assert_grace_epoch(&records[0]);
    assert_approx_eq!(records[0].inclination_deg, 88.995, 1e-9);
    assert_approx_eq!(records[0].eccentricity, 0.0018, 1e-12);
    assert_eq!(records[1].name, "ICESAT-2");
    assert_approx_eq!(records[1].raan_deg, 200.5, 1e-9);
}

fn assert_grace_epoch(record: &orbit::TleRecord) {
    let expected = Utc.with_ymd_and_hms(2024, 4, 9, 12, 0, 0).unwrap();
    assert_eq!(record.epoch, expected);
}

#[test]
fn test_parse_two_line_set() {
    let records = parse_tle_text(tle::ISS_TWO_LINE).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "NORAD 25544");
}

#[test]
fn test_bad_checksum_rejected() {
    let err = parse_tle_text(tle::BAD_CHECKSUM).unwrap_err();
    assert!(matches!(err, OrbitError::InvalidTle(ref msg) if msg.contains("checksum")));
}

#[test]
fn test_mismatched_catalog_rejected() {
    let err = parse_tle_text(tle::MISMATCHED_CATALOG).unwrap_err();
    assert!(matches!(err, OrbitError::InvalidTle(ref msg) if msg.contains("catalog")));
}

#[test]
fn test_incomplete_set_rejected() {
    let text: String = tle::ISS.lines().take(2).collect::<Vec<_>>().join("\n");
    assert!(parse_tle_text(&text).is_err());
}

#[test]
fn test_load_dir_skips_short_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b_icesat.txt"), tle::ICESAT_2).unwrap();
    std::fs::write(dir.path().join("a_grace.txt"), tle::GRACE_FO_1).unwrap();
    std::fs::write(dir.path().join("c_short.txt"), tle::ISS_TWO_LINE).unwrap();
    std::fs::write(dir.path().join("notes.md"), tle::ISS).unwrap();

    let records = load_tle_dir(dir.path()).unwrap();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["GRACE-FO 1", "ICESAT-2"]);
}

#[test]
fn test_iss_propagation_stays_in_leo() {
    let record = parse_tle_text(tle::ISS).unwrap().remove(0);
    let propagator = Propagator::new(&record).unwrap();
    let drift = (propagator.epoch() - record.epoch).num_milliseconds().abs();
    assert!(drift <= 1, "epoch drift {drift} ms");

    for minutes in (0..=180).step_by(15) {
        let t = record.epoch + Duration::minutes(minutes);
        let [x, y, z] = propagator.position_at(t).unwrap();
        let r = (x * x + y * y + z * z).sqrt();
        assert!((6600.0..6800.0).contains(&r), "r = {r} km at +{minutes} min");

        let geo = propagator.geodetic_at(t).unwrap();
        assert!(geo.lat_deg.abs() <= 52.5, "lat {}", geo.lat_deg);
        assert!((250.0..450.0).contains(&geo.alt_km), "alt {}", geo.alt_km);
    }
}

#[test]
fn test_ground_track_shape() {
    let record = parse_tle_text(tle::GRACE_FO_1).unwrap().remove(0);
    let track = ground_track(&record, record.epoch, 95, 1).unwrap();

    assert_eq!(track.len(), 95);
    assert_eq!(track.name, "GRACE-FO 1");
    assert_eq!(track.samples[1].time - track.samples[0].time, Duration::minutes(1));
    assert!(track
        .samples
        .iter()
        .all(|s| (-180.0..180.0).contains(&s.lon_deg) && s.lat_deg.abs() <= 90.0));

    // A near-polar orbit reaches high latitude within one revolution
    let max_lat = track.lats().into_iter().fold(0.0f64, |m, l| m.max(l.abs()));
    assert!(max_lat > 80.0);

    let arrows = direction_arrows(&track, 10);
    assert_eq!(arrows.len(), 10);
    for a in &arrows {
        assert_approx_eq!(a.u.hypot(a.v), 1.0, 1e-12);
    }

    for piece in split_at_antimeridian(&track) {
        for pair in piece.windows(2) {
            assert!((pair[1].0 - pair[0].0).abs() < 180.0);
        }
    }
}
