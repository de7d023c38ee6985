//! GRACE LWE thickness: the monthly animation and the interactive explorer.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use gravimetry::Quantity;
use netcdf_parser::LweDataset;
use renderer::{write_canvas_png, GifAnimation, Overlay, StyleConfig, ValueRange};
use tracing::{debug, info};

use crate::config::TopogravConfig;
use crate::explorer::{run_session, ExplorerState};
use crate::plots::{self, LweFrame};

const ANIMATION_SIZE: (u32, u32) = plots::figure_size(10, 5);
const EXPLORER_SIZE: (u32, u32) = plots::figure_size(12, 6);

#[derive(Args, Debug, Clone, Default)]
pub struct LweAnimateArgs {
    /// Quantity to animate: lwe or gravity
    #[arg(long, default_value_t = Quantity::Lwe)]
    pub mode: Quantity,

    /// GRACE NetCDF (overrides datasets.grace)
    #[arg(long)]
    pub grace: Option<PathBuf>,

    /// Output GIF (overrides lwe_animation.output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only render the first N time steps
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LweExploreArgs {
    /// GRACE NetCDF (overrides datasets.grace)
    #[arg(long)]
    pub grace: Option<PathBuf>,

    /// Image re-rendered on every change (default: inside the assets directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn load_dataset(config: &TopogravConfig, path: Option<&PathBuf>) -> Result<LweDataset> {
    let path = path.unwrap_or(&config.datasets.grace);
    let dataset = netcdf_parser::read_grace_variable(path, &config.datasets.grace_variable)
        .with_context(|| format!("Failed to read GRACE data from {}", path.display()))?;
    anyhow::ensure!(dataset.n_times() > 0, "{} has no time steps", path.display());
    Ok(dataset)
}

/// Frame title for the animation, e.g. `LWE - 2002-04-17`.
pub fn frame_title(quantity: Quantity, label: &str) -> String {
    format!("{} - {}", quantity.tag(), label)
}

/// Write every time step of `quantity` to a GIF at `fps`.
///
/// The color range is fixed by the first frame. Returns the frame count.
pub fn animate(
    dataset: &LweDataset,
    quantity: Quantity,
    styles: &StyleConfig,
    overlay: Option<&Overlay>,
    path: &Path,
    fps: u32,
    limit: Option<usize>,
) -> Result<usize> {
    let style = quantity.default_style();
    let colormap = styles.colormap(style)?;
    let frames = LweFrame {
        dataset,
        quantity,
        colormap: &colormap,
        overlay,
    };
    let range = plots::style_range(styles, style, &frames.values(0))?;
    let labels = dataset.time_labels();
    let count = limit.unwrap_or(labels.len()).min(labels.len());

    info!(
        mode = %quantity,
        frames = count,
        fps,
        vmin = range.min,
        vmax = range.max,
        path = %path.display(),
        "Animating GRACE time series"
    );

    let (w, h) = ANIMATION_SIZE;
    let mut animation = GifAnimation::create(path, w, h, fps)?;
    for (t, label) in labels.iter().enumerate().take(count) {
        let canvas = frames.render(t, range, &frame_title(quantity, label), ANIMATION_SIZE)?;
        animation.push_canvas(&canvas)?;
        debug!(frame = t, date = %label, "Rendered animation frame");
    }
    Ok(animation.finish()?)
}

pub fn run_animate(config: &TopogravConfig, args: &LweAnimateArgs) -> Result<PathBuf> {
    let dataset = load_dataset(config, args.grace.as_ref())?;
    let styles = plots::load_styles(config)?;
    let overlay = plots::load_overlay(config)?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| config.lwe_animation.output.clone());

    let frames = animate(
        &dataset,
        args.mode,
        &styles,
        overlay.as_ref(),
        &path,
        config.lwe_animation.fps,
        args.limit,
    )?;
    info!(path = %path.display(), frames, "Saved GRACE animation");
    Ok(path)
}

/// Renders the explorer figure for a state.
pub struct ExplorerView<'a> {
    pub dataset: &'a LweDataset,
    pub styles: &'a StyleConfig,
    pub overlay: Option<&'a Overlay>,
    pub labels: Vec<String>,
    pub output: PathBuf,
}

impl ExplorerView<'_> {
    pub fn render(&self, state: &ExplorerState) -> Result<()> {
        let quantity = state.choice;
        let style = quantity.default_style();
        let colormap = self.styles.colormap(style)?;
        let frames = LweFrame {
            dataset: self.dataset,
            quantity,
            colormap: &colormap,
            overlay: self.overlay,
        };
        let values = frames.values(state.time_index);
        let range = self
            .styles
            .get_style(style)
            .and_then(|def| ValueRange::for_style(&values, def))
            .unwrap_or_else(|| ValueRange::new(-1.0, 1.0));

        let canvas = frames.render(state.time_index, range, quantity.title(), EXPLORER_SIZE)?;
        write_canvas_png(&canvas, &self.output)?;
        info!(
            choice = %quantity,
            time_index = state.time_index,
            date = self.labels.get(state.time_index).map(String::as_str).unwrap_or(""),
            path = %self.output.display(),
            "Rendered explorer view"
        );
        Ok(())
    }
}

pub fn run_explore(config: &TopogravConfig, args: &LweExploreArgs) -> Result<PathBuf> {
    let dataset = load_dataset(config, args.grace.as_ref())?;
    let styles = plots::load_styles(config)?;
    let overlay = plots::load_overlay(config)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.asset(&config.explorer.output));

    info!(n_times = dataset.n_times(), "Number of monthly timesteps");
    let view = ExplorerView {
        dataset: &dataset,
        styles: &styles,
        overlay: overlay.as_ref(),
        labels: dataset.time_labels(),
        output: output.clone(),
    };

    let mut stdout = io::stdout();
    writeln!(
        stdout,
        "Commands: lwe | gravity | time N | next | prev | show | quit"
    )?;
    explore_with(&view, io::stdin().lock(), &mut stdout)?;
    Ok(output)
}

/// Run the explorer over commands read from `input`, starting on LWE at
/// time index 0. Returns the final state.
pub fn explore_with<R: BufRead, W: Write>(
    view: &ExplorerView<'_>,
    input: R,
    output: &mut W,
) -> Result<ExplorerState> {
    run_session(
        ExplorerState::new(view.dataset.n_times()),
        input,
        output,
        |state| view.render(state),
    )
}
