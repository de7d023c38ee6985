//! Orbital mechanics for the topograv tools.
//!
//! - [`kepler`] and [`ellipse`]: the mean/eccentric/true anomaly chain and
//!   the geometry used by the anomaly animation
//! - [`tle`], [`propagate`], [`frames`] and [`groundtrack`]: TLE parsing,
//!   SGP4 propagation and sub-satellite tracks
//! - [`circular`]: the rotating-Earth demo scene

pub mod circular;
pub mod ellipse;
pub mod error;
pub mod frames;
pub mod groundtrack;
pub mod kepler;
pub mod propagate;
pub mod tle;

pub use circular::{rotate_z, CircularOrbitScene, SphereMesh};
pub use ellipse::{linspace, AnomalyFrame, AnomalySeries, OrbitEllipse};
pub use error::{OrbitError, OrbitResult};
pub use frames::{ecef_to_geodetic, gmst, normalize_longitude, teme_to_ecef, Geodetic};
pub use groundtrack::{
    direction_arrows, ground_track, split_at_antimeridian, GroundTrack, TrackArrow, TrackSample,
};
pub use kepler::{
    eccentric_anomaly_from_mean, mean_anomaly_from_true, true_anomaly_from_eccentric,
    true_anomaly_from_mean, wrap_two_pi,
};
pub use propagate::Propagator;
pub use tle::{load_tle_dir, parse_tle_text, TleRecord};
