//! Tests for style loading and the colormaps built from them.

use renderer::style::{StyleConfig, ValueRange, LUT_SIZE};
use renderer::{Color, RenderError};

const TWO_STOP: &str = r##"{
    "version": "1.0",
    "styles": {
        "ramp": {
            "name": "ramp",
            "type": "gradient",
            "stops": [
                {"value": 100, "color": "#FFFFFF"},
                {"value": 0, "color": "#000000"}
            ]
        },
        "helix": {
            "name": "helix",
            "type": "cubehelix",
            "cubehelix": {"start": 0.5, "rotations": -1.5}
        },
        "broken": {
            "name": "broken",
            "type": "contour"
        }
    }
}"##;

#[test]
fn test_builtin_styles_present() {
    let config = StyleConfig::builtin().unwrap();
    for name in ["RdBu", "PuOr", "terrain", "cubehelix"] {
        assert!(config.get_style(name).is_some(), "missing {}", name);
        config.colormap(name).unwrap();
    }
    assert!(config.get_style("RdBu").unwrap().diverging);
    assert!(!config.get_style("terrain").unwrap().diverging);
}

#[test]
fn test_rdbu_endpoints_and_midpoint() {
    let rdbu = StyleConfig::builtin().unwrap().colormap("RdBu").unwrap();
    assert_eq!(rdbu.sample(0.0), Color::from_hex("#67001f").unwrap());
    assert_eq!(rdbu.sample(1.0), Color::from_hex("#053061").unwrap());
    // neutral center stays near white
    let mid = rdbu.sample(0.5);
    assert!(mid.r > 230 && mid.g > 230 && mid.b > 230);
}

#[test]
fn test_gradient_stops_sorted() {
    let config = StyleConfig::from_json(TWO_STOP).unwrap();
    let ramp = config.colormap("ramp").unwrap();
    assert_eq!(ramp.sample(0.0), Color::BLACK);
    assert_eq!(ramp.sample(1.0), Color::WHITE);
    assert!(ramp.sample(0.25).r < ramp.sample(0.75).r);
}

#[test]
fn test_cubehelix_brightens_monotonically() {
    let config = StyleConfig::from_json(TWO_STOP).unwrap();
    let helix = config.colormap("helix").unwrap();
    let luma = |c: Color| 0.3 * c.r as f32 + 0.59 * c.g as f32 + 0.11 * c.b as f32;
    let mut prev = -1.0;
    for i in 0..=10 {
        let l = luma(helix.sample(i as f32 / 10.0));
        assert!(l >= prev - 2.0);
        prev = l;
    }
}

#[test]
fn test_unsupported_style_type() {
    let config = StyleConfig::from_json(TWO_STOP).unwrap();
    assert!(matches!(config.colormap("broken"), Err(RenderError::Style(_))));
    assert!(matches!(config.colormap("missing"), Err(RenderError::Style(_))));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(StyleConfig::from_json("{"), Err(RenderError::Style(_))));
}

#[test]
fn test_nan_transparent() {
    let rdbu = StyleConfig::builtin().unwrap().colormap("RdBu").unwrap();
    assert_eq!(rdbu.color_for(f32::NAN, ValueRange::new(-1.0, 1.0)).a, 0);
}

#[test]
fn test_diverging_range_centered_on_zero() {
    let config = StyleConfig::builtin().unwrap();
    let data = [-4.0, 1.0, 12.0, f32::NAN];

    let rdbu = config.get_style("RdBu").unwrap();
    let range = ValueRange::for_style(&data, rdbu).unwrap();
    assert_eq!((range.min, range.max), (-12.0, 12.0));

    let terrain = config.get_style("terrain").unwrap();
    let range = ValueRange::for_style(&data, terrain).unwrap();
    assert_eq!((range.min, range.max), (-4.0, 12.0));

    let positive = [1.0, 3.0];
    let range = ValueRange::for_style(&positive, rdbu).unwrap();
    assert_eq!((range.min, range.max), (1.0, 3.0));
}

#[test]
fn test_style_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("styles.json");
    std::fs::write(&path, TWO_STOP).unwrap();
    let config = StyleConfig::from_file(&path).unwrap();
    assert_eq!(config.styles.len(), 3);
    assert_eq!(LUT_SIZE, 256);
}
