//! ETOPO geoid heights resampled onto the GRACE grid.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use geo_common::{GridAxes, Raster};
use grid_processor::{downsample_to_grid, InterpolationMethod, RasterStats};
use renderer::{write_canvas_png, Canvas, Overlay, StyleConfig};
use tracing::info;

use crate::config::TopogravConfig;
use crate::plots::{self, FieldPlot, MapBackground};

pub const DOWNSAMPLE_TITLE: &str = "ETOPO 2022 Downsampled to GRACE Resolution";
pub const OVERLAY_TITLE: &str = "ETOPO (downsampled) with GRACE Affine Grid Overlay";
pub const GEOID_LABEL: &str = "Geoid Height (m)";

#[derive(Args, Debug, Clone, Default)]
pub struct EtopoArgs {
    /// ETOPO geoid GeoTIFF (overrides datasets.etopo_geoid)
    #[arg(long)]
    pub geoid: Option<PathBuf>,

    /// GRACE NetCDF providing the target grid (overrides datasets.grace)
    #[arg(long)]
    pub grace: Option<PathBuf>,

    /// Resampling method: nearest, bilinear or cubic
    #[arg(long)]
    pub interpolation: Option<InterpolationMethod>,

    /// Output PNG (default: inside the assets directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Geoid heights on the GRACE grid, row 0 northmost.
pub struct DownsampledGeoid {
    pub raster: Raster,
    /// Axes describing the rows and columns of `raster`.
    pub axes: GridAxes,
}

/// Resample `geoid` onto the cells of `grace_axes`.
pub fn downsample_geoid(
    geoid: &Raster,
    grace_axes: &GridAxes,
    method: InterpolationMethod,
) -> Result<DownsampledGeoid> {
    let raster = downsample_to_grid(geoid, grace_axes, method)?;
    // values sit at the output transform's cell centers, not at the GRACE axes
    let axes = raster.center_axes()?;

    if let Some(stats) = RasterStats::from_slice(&raster.data) {
        info!(
            min_m = stats.min,
            max_m = stats.max,
            mean_m = stats.mean,
            "Geoid height statistics"
        );
    }
    Ok(DownsampledGeoid { raster, axes })
}

fn load(config: &TopogravConfig, args: &EtopoArgs) -> Result<DownsampledGeoid> {
    let geoid_path = args.geoid.as_ref().unwrap_or(&config.datasets.etopo_geoid);
    let grace_path = args.grace.as_ref().unwrap_or(&config.datasets.grace);
    let method = args.interpolation.unwrap_or(config.etopo.interpolation);

    let geoid = geotiff_parser::read_geotiff(geoid_path, 1)
        .with_context(|| format!("Failed to read geoid from {}", geoid_path.display()))?;
    let grace_axes = netcdf_parser::read_grace_axes(grace_path)
        .with_context(|| format!("Failed to read GRACE grid from {}", grace_path.display()))?;

    info!(
        geoid_width = geoid.width,
        geoid_height = geoid.height,
        nlat = grace_axes.nlat(),
        nlon = grace_axes.nlon(),
        lat_res = grace_axes.lat_resolution(),
        lon_res = grace_axes.lon_resolution(),
        "Resampling geoid to GRACE grid"
    );
    downsample_geoid(&geoid, &grace_axes, method)
}

/// The downsampled geoid over land and ocean, in cubehelix.
pub fn render_downsample(
    geoid: &DownsampledGeoid,
    styles: &StyleConfig,
    overlay: Option<&Overlay>,
) -> Result<Canvas> {
    let colormap = styles.colormap("cubehelix")?;
    let range = plots::style_range(styles, "cubehelix", &geoid.raster.data)?;
    let (w, h) = plots::figure_size(12, 6);
    FieldPlot {
        axes: &geoid.axes,
        values: &geoid.raster.data,
        colormap: &colormap,
        range,
        title: DOWNSAMPLE_TITLE,
        colorbar_label: GEOID_LABEL,
        overlay,
        background: MapBackground::LandOcean,
        grid_every: None,
    }
    .render(w, h)
}

/// The downsampled geoid in `terrain` with every `every`-th grid line drawn.
pub fn render_grid_overlay(
    geoid: &DownsampledGeoid,
    styles: &StyleConfig,
    overlay: Option<&Overlay>,
    every: usize,
) -> Result<Canvas> {
    let colormap = styles.colormap("terrain")?;
    let range = plots::style_range(styles, "terrain", &geoid.raster.data)?;
    let (w, h) = plots::figure_size(14, 7);
    FieldPlot {
        axes: &geoid.axes,
        values: &geoid.raster.data,
        colormap: &colormap,
        range,
        title: OVERLAY_TITLE,
        colorbar_label: GEOID_LABEL,
        overlay,
        background: MapBackground::LandOcean,
        grid_every: Some(every),
    }
    .render(w, h)
}

pub fn run_downsample(config: &TopogravConfig, args: &EtopoArgs) -> Result<PathBuf> {
    let geoid = load(config, args)?;
    let styles = plots::load_styles(config)?;
    let overlay = plots::load_overlay(config)?;

    let canvas = render_downsample(&geoid, &styles, overlay.as_ref())?;
    let path = args.output.clone().unwrap_or_else(|| config.asset(&config.etopo.output));
    let bytes = write_canvas_png(&canvas, &path)?;
    info!(path = %path.display(), bytes, "Saved ETOPO downsample plot");
    Ok(path)
}

pub fn run_grid_overlay(config: &TopogravConfig, args: &EtopoArgs) -> Result<PathBuf> {
    let geoid = load(config, args)?;
    let styles = plots::load_styles(config)?;
    let overlay = plots::load_overlay(config)?;

    let canvas = render_grid_overlay(&geoid, &styles, overlay.as_ref(), config.etopo.grid_every)?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| config.asset(&config.etopo.overlay_output));
    let bytes = write_canvas_png(&canvas, &path)?;
    info!(path = %path.display(), bytes, every = config.etopo.grid_every, "Saved grid overlay plot");
    Ok(path)
}
