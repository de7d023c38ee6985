//! Ground tracks of the satellites in a TLE directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use orbit::{direction_arrows, ground_track, split_at_antimeridian, GroundTrack, TleRecord};
use renderer::legend::{draw_legend, LegendCorner, LegendEntry};
use renderer::{write_canvas_png, Canvas, Color, LineStyle, Overlay};
use tracing::info;

use crate::config::{GroundTrackConfig, TopogravConfig};
use crate::plots;

#[derive(Args, Debug, Clone, Default)]
pub struct GroundTrackArgs {
    /// Directory of `.txt` TLE files (overrides datasets.tle_dir)
    #[arg(long)]
    pub tle_dir: Option<PathBuf>,

    /// Track start time, RFC 3339 (default: now)
    #[arg(long)]
    pub start: Option<DateTime<Utc>>,

    /// Track length in minutes (overrides groundtrack.minutes)
    #[arg(long)]
    pub minutes: Option<u32>,

    /// Output PNG (default: inside the assets directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// `"Simulated Groundtracks of A and B satellites over 95 minutes"`.
pub fn title(names: &[&str], minutes: u32) -> String {
    let names = match names {
        [] => "no".to_string(),
        [one] => one.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    };
    format!("Simulated Groundtracks of {} satellites over {} minutes", names, minutes)
}

/// Propagate every record from `start`.
pub fn compute_tracks(
    records: &[TleRecord],
    start: DateTime<Utc>,
    settings: &GroundTrackConfig,
) -> Result<Vec<GroundTrack>> {
    records
        .iter()
        .map(|record| {
            let track = ground_track(record, start, settings.minutes, settings.step_minutes)
                .with_context(|| format!("Failed to propagate {}", record.name))?;
            info!(satellite = %track.name, samples = track.len(), "Computed ground track");
            Ok(track)
        })
        .collect()
}

fn track_colors(settings: &GroundTrackConfig) -> Result<Vec<Color>> {
    let colors = settings
        .colors
        .iter()
        .map(|hex| Color::from_hex(hex).with_context(|| format!("Invalid track color '{}'", hex)))
        .collect::<Result<Vec<_>>>()?;
    anyhow::ensure!(!colors.is_empty(), "groundtrack.colors must not be empty");
    Ok(colors)
}

/// Tracks over a global map with direction arrows and a legend.
pub fn render_tracks(
    tracks: &[GroundTrack],
    settings: &GroundTrackConfig,
    overlay: Option<&Overlay>,
) -> Result<Canvas> {
    let colors = track_colors(settings)?;
    let (w, h) = plots::figure_size(12, 6);
    let mut canvas = plots::blank_figure(w, h)?;
    let (frame, _) = plots::map_layout(w, h, false);

    frame.draw_graticule(&mut canvas, 60.0, 30.0, true);
    if let Some(overlay) = overlay {
        frame.draw_lines(&mut canvas, &overlay.lines, Color::BLACK, 0.8);
    }

    let arrow_len = frame.width / 20.0;
    let mut entries = Vec::with_capacity(tracks.len());
    for (i, track) in tracks.iter().enumerate() {
        let color = colors[i % colors.len()];
        for piece in split_at_antimeridian(track) {
            frame.draw_polyline_lonlat(&mut canvas, &piece, color, 1.5, LineStyle::Solid);
        }
        for arrow in direction_arrows(track, settings.arrow_every) {
            frame.draw_arrow_lonlat(
                &mut canvas,
                arrow.lon,
                arrow.lat,
                (arrow.u, arrow.v),
                arrow_len,
                Color::RED,
            );
        }
        entries.push(LegendEntry::line(track.name.clone(), color));
    }

    frame.draw_border(&mut canvas);
    let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
    frame.draw_title(&mut canvas, &title(&names, settings.minutes), 13.0);
    if !entries.is_empty() {
        draw_legend(
            &mut canvas,
            &entries,
            (frame.left, frame.top, frame.width, frame.height),
            LegendCorner::UpperRight,
            10.0,
        );
    }
    Ok(canvas)
}

pub fn run(config: &TopogravConfig, args: &GroundTrackArgs) -> Result<PathBuf> {
    let mut settings = config.groundtrack.clone();
    if let Some(minutes) = args.minutes {
        settings.minutes = minutes;
    }
    let dir = args.tle_dir.as_ref().unwrap_or(&config.datasets.tle_dir);
    let records = orbit::load_tle_dir(dir)
        .with_context(|| format!("Failed to load TLE files from {}", dir.display()))?;
    info!(count = records.len(), "Loaded satellites");

    let start = args.start.unwrap_or_else(Utc::now);
    let tracks = compute_tracks(&records, start, &settings)?;
    let overlay = plots::load_overlay(config)?;
    let canvas = render_tracks(&tracks, &settings, overlay.as_ref())?;

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| config.asset(&settings.output));
    let bytes = write_canvas_png(&canvas, &path)?;
    info!(path = %path.display(), bytes, start = %start, "Saved ground track plot");
    Ok(path)
}
