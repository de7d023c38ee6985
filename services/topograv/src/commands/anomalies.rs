//! Mean, eccentric and true anomaly of an elliptical orbit, animated over
//! one period.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use orbit::{AnomalyFrame, AnomalySeries, OrbitEllipse};
use renderer::legend::{draw_legend, LegendCorner, LegendEntry};
use renderer::{draw_text, Align, Canvas, Color, GifAnimation, LineStyle, Marker, TextStyle};
use tracing::{debug, info};

use crate::config::{AnomaliesConfig, TopogravConfig};
use crate::plots;

pub const MEAN_COLOR: Color = Color::rgb(0x64, 0x8F, 0xFF);
pub const ECCENTRIC_COLOR: Color = Color::rgb(0xE7, 0x05, 0x72);
pub const TRUE_COLOR: Color = Color::rgb(0xFF, 0xB0, 0x00);

#[derive(Args, Debug, Clone, Default)]
pub struct AnomaliesArgs {
    /// Orbital eccentricity in [0, 1) (overrides anomalies.eccentricity)
    #[arg(long)]
    pub eccentricity: Option<f64>,

    /// Number of frames (overrides anomalies.frames)
    #[arg(long)]
    pub frames: Option<usize>,

    /// Output GIF (default: inside the assets directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Maps orbit-plane coordinates onto the canvas with equal x/y scale.
#[derive(Debug, Clone, Copy)]
struct PlaneView {
    x_min: f64,
    y_max: f64,
    scale: f64,
    left: f32,
    top: f32,
}

impl PlaneView {
    fn fit(x: (f64, f64), y: (f64, f64), size: (u32, u32)) -> Self {
        let (w, h) = (size.0 as f64, size.1 as f64);
        let scale = (w / (x.1 - x.0)).min(h / (y.1 - y.0));
        Self {
            x_min: x.0,
            y_max: y.1,
            scale,
            left: ((w - (x.1 - x.0) * scale) / 2.0) as f32,
            top: ((h - (y.1 - y.0) * scale) / 2.0) as f32,
        }
    }

    fn to_pixel(&self, (x, y): (f64, f64)) -> (f32, f32) {
        (
            self.left + ((x - self.x_min) * self.scale) as f32,
            self.top + ((self.y_max - y) * self.scale) as f32,
        )
    }

    fn path(&self, points: &[(f64, f64)]) -> Vec<(f32, f32)> {
        points.iter().map(|&p| self.to_pixel(p)).collect()
    }
}

/// `M = 90°  |  E = 120°  |  ν = 143°`
pub fn anomaly_label(frame: &AnomalyFrame) -> String {
    format!(
        "M = {:.0}°  |  E = {:.0}°  |  ν = {:.0}°",
        frame.mean.to_degrees(),
        frame.eccentric.to_degrees(),
        frame.true_anomaly.to_degrees()
    )
}

/// Draws frames of the anomaly figure.
pub struct AnomalyView {
    ellipse: OrbitEllipse,
    plane: PlaneView,
    size: (u32, u32),
    /// Pixel sizes relative to a 1400 px wide figure.
    unit: f32,
    outline: Vec<(f32, f32)>,
    circle: Vec<(f32, f32)>,
}

impl AnomalyView {
    pub fn new(ellipse: OrbitEllipse, size: (u32, u32)) -> Self {
        let a = ellipse.semimajor;
        let plane = PlaneView::fit((-1.2 * a, 2.2 * a), (-1.3 * a, 1.3 * a), size);
        Self {
            outline: plane.path(&ellipse.outline(500)),
            circle: plane.path(&ellipse.auxiliary_circle(500)),
            unit: size.0 as f32 / 1400.0,
            ellipse,
            plane,
            size,
        }
    }

    fn draw_static(&self, canvas: &mut Canvas) {
        let u = self.unit;
        let p = |pt| self.plane.to_pixel(pt);
        let focus = self.ellipse.focus();

        canvas.polyline(&self.outline, Color::BLACK, 3.0 * u, LineStyle::Solid);
        canvas.polyline(&self.circle, Color::BLACK.with_alpha(0.6), 1.0 * u, LineStyle::Dashed);

        // zero-angle references toward periapsis
        let refs = [
            (focus, (focus.0 + 0.4, 0.0), TRUE_COLOR),
            ((0.0, 0.0), (0.4, 0.0), ECCENTRIC_COLOR),
            ((0.0, 0.0), (0.5, 0.0), MEAN_COLOR),
        ];
        for (from, to, color) in refs {
            canvas.line(p(from), p(to), color.with_alpha(0.4), 2.0 * u);
        }

        let (px, py) = p(self.ellipse.periapsis());
        canvas.marker(Marker::Square, px, py, 5.0 * u, Color::GREEN.with_alpha(0.7));
        let (ax, ay) = p(self.ellipse.apoapsis());
        canvas.marker(Marker::Square, ax, ay, 5.0 * u, Color::PURPLE.with_alpha(0.7));
    }

    pub fn render(&self, frame: &AnomalyFrame) -> Result<Canvas> {
        let u = self.unit;
        let p = |pt| self.plane.to_pixel(pt);
        let mut canvas = plots::blank_figure(self.size.0, self.size.1)?;
        self.draw_static(&mut canvas);

        let focus = p(self.ellipse.focus());
        let center = p((0.0, 0.0));
        let satellite = p(self.ellipse.position_on_orbit(frame.true_anomaly));
        let eccentric = p(self.ellipse.auxiliary_point(frame.eccentric));
        let mean = p(self.ellipse.auxiliary_point(frame.mean));

        canvas.line(focus, satellite, TRUE_COLOR, 3.0 * u);
        canvas.line(center, eccentric, ECCENTRIC_COLOR, 3.0 * u);
        canvas.polyline(
            &[eccentric, satellite],
            Color::BLACK.with_alpha(0.8),
            2.0 * u,
            LineStyle::Dotted,
        );
        canvas.line(center, mean, MEAN_COLOR, 3.0 * u);

        canvas.marker(Marker::Star, focus.0, focus.1, 10.0 * u, Color::RED);
        canvas.circle(center.0, center.1, 7.0 * u, Color::WHITE);
        canvas.circle(center.0, center.1, 5.5 * u, Color::BLACK);

        canvas.circle(mean.0, mean.1, 8.0 * u, Color::WHITE);
        canvas.circle(mean.0, mean.1, 6.0 * u, MEAN_COLOR);
        canvas.circle(satellite.0, satellite.1, 9.0 * u, Color::WHITE);
        canvas.circle(satellite.0, satellite.1, 7.0 * u, Color::BLACK);

        let (tx, ty) = p((0.0, -1.15 * self.ellipse.semimajor));
        let style = TextStyle::new(12.0 * u, Color::BLACK)
            .align(Align::Center)
            .boxed(Color::WHITE.with_alpha(0.9), Some(Color::BLACK));
        draw_text(&mut canvas, tx, ty, &anomaly_label(frame), &style);

        let entries = [
            LegendEntry::patch("True Anomaly (ν)", TRUE_COLOR),
            LegendEntry::patch("Eccentric Anomaly (E)", ECCENTRIC_COLOR),
            LegendEntry::patch("Mean Anomaly (M)", MEAN_COLOR),
        ];
        draw_legend(
            &mut canvas,
            &entries,
            (0.0, 0.0, self.size.0 as f32, self.size.1 as f32),
            LegendCorner::UpperLeft,
            11.0 * u,
        );
        Ok(canvas)
    }
}

/// Write the animation for `settings` to `path`; returns the frame count.
pub fn animate(settings: &AnomaliesConfig, path: &Path, size: (u32, u32)) -> Result<usize> {
    let ellipse = OrbitEllipse::new(settings.semimajor, settings.eccentricity)?;
    info!(
        eccentricity = ellipse.eccentricity,
        semimajor = ellipse.semimajor,
        semiminor = ellipse.semiminor(),
        focal_distance = ellipse.focal_distance(),
        frames = settings.frames,
        "Orbital parameters"
    );

    let series = AnomalySeries::uniform(ellipse, settings.frames)?;
    let view = AnomalyView::new(ellipse, size);
    let mut animation = GifAnimation::create(path, size.0, size.1, settings.fps)?;
    for (i, frame) in series.frames.iter().enumerate() {
        animation.push_canvas(&view.render(frame)?)?;
        debug!(frame = i, label = %anomaly_label(frame), "Rendered anomaly frame");
    }
    Ok(animation.finish()?)
}

pub fn run(config: &TopogravConfig, args: &AnomaliesArgs) -> Result<PathBuf> {
    let mut settings = config.anomalies.clone();
    if let Some(e) = args.eccentricity {
        settings.eccentricity = e;
    }
    if let Some(frames) = args.frames {
        anyhow::ensure!(frames >= 2, "--frames must be at least 2");
        settings.frames = frames;
    }
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| config.asset(&settings.output));

    let frames = animate(&settings, &path, plots::figure_size(14, 10))?;
    info!(path = %path.display(), frames, "Saved anomaly animation");
    Ok(path)
}
