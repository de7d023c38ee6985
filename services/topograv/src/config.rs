//! Configuration for the topograv tools.
//!
//! Loaded from YAML with `${VAR}` and `${VAR:-default}` environment
//! substitution. Every section and field has a default, so a missing file
//! (or a partial one) still yields a complete configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grid_processor::InterpolationMethod;
use orbit::CircularOrbitScene;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TopogravConfig {
    pub datasets: DatasetsConfig,
    pub output: OutputConfig,
    /// JSON style file replacing the built-in colormaps.
    pub styles: Option<PathBuf>,
    pub logging: LoggingConfig,
    pub etopo: EtopoConfig,
    pub lwe_animation: LweAnimationConfig,
    pub explorer: ExplorerConfig,
    pub groundtrack: GroundTrackConfig,
    pub satellite_orbit: SatelliteOrbitConfig,
    pub anomalies: AnomaliesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetsConfig {
    pub grace: PathBuf,
    pub grace_variable: String,
    pub etopo_geoid: PathBuf,
    pub tle_dir: PathBuf,
    /// Optional GeoJSON with coastlines/borders drawn over the maps.
    pub coastlines: Option<PathBuf>,
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            grace: PathBuf::from("Data/GRACE/GRCTellus.JPL.200204_202503.GLO.RL06.3M.MSCNv04CRI.nc"),
            grace_variable: netcdf_parser::DEFAULT_VARIABLE.to_string(),
            etopo_geoid: PathBuf::from("Data/ETOPO 2022 Geoid Height/ETOPO_2022_v1_30s_N90W180_geoid.tif"),
            tle_dir: PathBuf::from("Data/TLE"),
            coastlines: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub assets_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("Assets"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EtopoConfig {
    pub output: String,
    pub overlay_output: String,
    pub interpolation: InterpolationMethod,
    /// Grid lines drawn on every n-th latitude/longitude of the overlay.
    pub grid_every: usize,
}

impl Default for EtopoConfig {
    fn default() -> Self {
        Self {
            output: "ETOPO_downsample.png".to_string(),
            overlay_output: "ETOPO_grid_overlay.png".to_string(),
            interpolation: InterpolationMethod::Bilinear,
            grid_every: 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LweAnimationConfig {
    /// Written relative to the working directory, not the assets dir.
    pub output: PathBuf,
    pub fps: u32,
}

impl Default for LweAnimationConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("grace_lwe_animation.gif"),
            fps: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub output: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            output: "lwe_explorer.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundTrackConfig {
    pub output: String,
    pub minutes: u32,
    pub step_minutes: u32,
    pub arrow_every: usize,
    /// Line colors cycled over the loaded satellites.
    pub colors: Vec<String>,
}

impl Default for GroundTrackConfig {
    fn default() -> Self {
        Self {
            output: "Satellite Groundtracks.png".to_string(),
            minutes: 95,
            step_minutes: 1,
            arrow_every: 10,
            colors: vec!["#800080".to_string(), "#006400".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SatelliteOrbitConfig {
    pub output: String,
    pub earth_radius_km: f64,
    pub orbit_radius_km: f64,
    pub satellite_rate: f64,
    /// Frames cover `0..360` degrees of Earth rotation in this step.
    pub frame_step_deg: u32,
    pub fps: u32,
    pub mesh_resolution: usize,
    pub mesh_stride: usize,
}

impl Default for SatelliteOrbitConfig {
    fn default() -> Self {
        let scene = CircularOrbitScene::default();
        Self {
            output: "Satellite_orbit.gif".to_string(),
            earth_radius_km: scene.earth_radius_km,
            orbit_radius_km: scene.orbit_radius_km,
            satellite_rate: scene.satellite_rate,
            frame_step_deg: 2,
            fps: 30,
            mesh_resolution: 100,
            mesh_stride: 2,
        }
    }
}

impl SatelliteOrbitConfig {
    pub fn scene(&self) -> CircularOrbitScene {
        CircularOrbitScene {
            earth_radius_km: self.earth_radius_km,
            orbit_radius_km: self.orbit_radius_km,
            satellite_rate: self.satellite_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomaliesConfig {
    pub output: String,
    pub eccentricity: f64,
    pub semimajor: f64,
    pub frames: usize,
    pub fps: u32,
}

impl Default for AnomaliesConfig {
    fn default() -> Self {
        Self {
            output: "Anomalies.gif".to_string(),
            eccentricity: 0.7,
            semimajor: 1.0,
            frames: 200,
            fps: 15,
        }
    }
}

impl TopogravConfig {
    /// Load `path`, or the defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let expanded = expand_env_vars(content)?;
        let config: Self = serde_yaml::from_str(&expanded)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (0.0..1.0).contains(&self.anomalies.eccentricity),
            "anomalies.eccentricity must be in [0, 1), got {}",
            self.anomalies.eccentricity
        );
        anyhow::ensure!(self.anomalies.semimajor > 0.0, "anomalies.semimajor must be positive");
        anyhow::ensure!(self.anomalies.frames >= 2, "anomalies.frames must be at least 2");
        anyhow::ensure!(self.groundtrack.step_minutes > 0, "groundtrack.step_minutes must be positive");
        anyhow::ensure!(self.satellite_orbit.frame_step_deg > 0, "satellite_orbit.frame_step_deg must be positive");
        anyhow::ensure!(
            self.satellite_orbit.orbit_radius_km > 0.0 && self.satellite_orbit.earth_radius_km > 0.0,
            "satellite_orbit radii must be positive"
        );
        for (name, fps) in [
            ("lwe_animation.fps", self.lwe_animation.fps),
            ("satellite_orbit.fps", self.satellite_orbit.fps),
            ("anomalies.fps", self.anomalies.fps),
        ] {
            anyhow::ensure!(fps > 0, "{} must be positive", name);
        }
        anyhow::ensure!(
            matches!(self.logging.format.as_str(), "pretty" | "json"),
            "logging.format must be 'pretty' or 'json', got '{}'",
            self.logging.format
        );
        Ok(())
    }

    /// `name` inside the assets directory.
    pub fn asset(&self, name: &str) -> PathBuf {
        self.output.assets_dir.join(name)
    }
}

/// Substitute `${VAR}` (must be set) and `${VAR:-fallback}` (fallback when
/// unset or empty). A `$` not followed by `{` is copied through.
pub fn expand_env_vars(content: &str) -> Result<String> {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let body = &rest[start + 2..];
        let end = body
            .find('}')
            .with_context(|| format!("Unterminated '${{' in config near '{}'", &rest[start..]))?;
        let reference = &body[..end];

        let value = match reference.split_once(":-") {
            Some((name, fallback)) => std::env::var(name.trim())
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| fallback.to_string()),
            None => std::env::var(reference.trim())
                .with_context(|| format!("Config references unset variable {}", reference))?,
        };
        out.push_str(&value);
        rest = &body[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}
