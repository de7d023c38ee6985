//! Anomaly chain and ellipse geometry.

use std::f64::consts::TAU;

use orbit::{
    eccentric_anomaly_from_mean, linspace, mean_anomaly_from_true, true_anomaly_from_eccentric,
    wrap_two_pi, AnomalySeries, OrbitEllipse,
};
use test_utils::assert_approx_eq;

fn angle_diff(a: f64, b: f64) -> f64 {
    let d = wrap_two_pi(a - b);
    d.min(TAU - d)
}

#[test]
fn test_mean_eccentric_true_round_trip() {
    for e in [0.0, 0.05, 0.3, 0.6, 0.7, 0.8, 0.9, 0.97, 0.999] {
        for m in linspace(0.0, TAU, 73) {
            let ea = eccentric_anomaly_from_mean(m, e).unwrap();
            let nu = true_anomaly_from_eccentric(ea, e).unwrap();
            let back = mean_anomaly_from_true(nu, e).unwrap();
            assert!(
                angle_diff(back, m) < 1e-9,
                "e = {e}, M = {m}: recovered {back}"
            );
        }
    }
}

#[test]
fn test_true_anomaly_leads_mean_after_periapsis() {
    // Between periapsis and apoapsis: M < E < ν
    let e = 0.7;
    for m in linspace(0.1, 3.0, 10) {
        let ea = eccentric_anomaly_from_mean(m, e).unwrap();
        let nu = true_anomaly_from_eccentric(ea, e).unwrap();
        assert!(m < ea && ea < nu, "M = {m}, E = {ea}, nu = {nu}");
    }
}

#[test]
fn test_series_points_lie_on_orbit() {
    let ellipse = OrbitEllipse::new(1.0, 0.7).unwrap();
    let series = AnomalySeries::uniform(ellipse, 200).unwrap();
    let b = ellipse.semiminor();

    for frame in &series.frames {
        let (x, y) = ellipse.position_on_orbit(frame.true_anomaly);
        // (x/a)^2 + (y/b)^2 = 1 in the center frame
        assert_approx_eq!(x * x + (y / b) * (y / b), 1.0, 1e-9);

        // Projection of the auxiliary point at E shares the satellite's x
        let (x_aux, _) = ellipse.auxiliary_point(frame.eccentric);
        assert_approx_eq!(x_aux, x, 1e-9);
    }
}

#[test]
fn test_radius_at_apsides() {
    let ellipse = OrbitEllipse::new(2.0, 0.25).unwrap();
    assert_approx_eq!(ellipse.radius_at(0.0), ellipse.periapsis_radius(), 1e-12);
    assert_approx_eq!(
        ellipse.radius_at(std::f64::consts::PI),
        ellipse.apoapsis_radius(),
        1e-12
    );
}

#[test]
fn test_invalid_ellipse() {
    assert!(OrbitEllipse::new(1.0, 1.0).is_err());
    assert!(OrbitEllipse::new(1.0, -0.01).is_err());
}
