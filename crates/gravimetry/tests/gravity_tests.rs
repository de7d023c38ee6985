//! Properties of the LWE to gravity conversion.

use gravimetry::{gravity_anomaly_field, lwe_to_gravity_mgal, Quantity};
use test_utils::{assert_approx_eq, grace_axes, synthetic_lwe_frames};

#[test]
fn test_linear_in_thickness() {
    let k = lwe_to_gravity_mgal(1.0);
    for h in [-50.0, -1.5, 0.25, 12.0, 300.0] {
        assert_approx_eq!(lwe_to_gravity_mgal(h), k * h, 1e-12);
    }
    assert_approx_eq!(
        lwe_to_gravity_mgal(3.0) + lwe_to_gravity_mgal(4.0),
        lwe_to_gravity_mgal(7.0),
        1e-12
    );
}

#[test]
fn test_field_matches_scalar_and_keeps_gaps() {
    let axes = grace_axes(5.0);
    let lwe = synthetic_lwe_frames(&axes, 1);
    let grav = gravity_anomaly_field(&lwe);

    assert_eq!(grav.len(), lwe.len());
    for (h, g) in lwe.iter().zip(&grav) {
        if h.is_nan() {
            assert!(g.is_nan());
        } else {
            assert_approx_eq!(*g, lwe_to_gravity_mgal(*h as f64), 1e-6);
        }
    }
}

#[test]
fn test_quantity_labels() {
    assert_eq!(Quantity::Lwe.colorbar_label(), "LWE (cm)");
    assert_eq!(Quantity::Gravity.colorbar_label(), "Δg (mGal)");
    assert_eq!(Quantity::Gravity.default_style(), "PuOr");
    assert_eq!("LWE".parse::<Quantity>().unwrap(), Quantity::Lwe);
    assert!("mass".parse::<Quantity>().is_err());
}

#[test]
fn test_quantity_derive() {
    let lwe = vec![10.0f32, f32::NAN];
    assert_eq!(Quantity::Lwe.derive(&lwe)[0], 10.0);
    let g = Quantity::Gravity.derive(&lwe);
    assert_approx_eq!(g[0], lwe_to_gravity_mgal(10.0), 1e-7);
    assert!(g[1].is_nan());
}
