//! Fixtures for the topograv workspace tests: dataset lookup, synthetic
//! grids and rasters, and TLE text with valid checksums.

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Resolves a real dataset via [`find_test_file`], or prints a notice and
/// returns from the calling test when it is absent.
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {
        if let Some(path) = $crate::find_test_file($name) {
            path
        } else {
            eprintln!("skipping: {} not found (data/ or $TEST_DATA_DIR)", $name);
            return;
        }
    };
}

/// `|left - right| <= epsilon`, compared as `f64`.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (l, r, eps) = ($left as f64, $right as f64, $epsilon as f64);
        assert!(
            (l - r).abs() <= eps,
            "approx mismatch: {} vs {} (|diff| {} > {})",
            l,
            r,
            (l - r).abs(),
            eps
        );
    }};
}
