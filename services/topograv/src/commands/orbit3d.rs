//! Rotating Earth with a satellite on a circular equatorial orbit.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use orbit::{CircularOrbitScene, SphereMesh};
use renderer::{
    draw_axes_box, draw_text, Align, Camera, Canvas, Color, GifAnimation, Scene, TextStyle,
};
use tracing::{debug, info};

use crate::config::{SatelliteOrbitConfig, TopogravConfig};
use crate::plots;

pub const TITLE: &str = "Earth with satellite";
const AXIS_LABELS: [&str; 3] = ["x (km)", "y (km)", "z (km)"];

#[derive(Args, Debug, Clone, Default)]
pub struct Orbit3dArgs {
    /// Render only the first N frames
    #[arg(long)]
    pub frames: Option<usize>,

    /// Output GIF (default: inside the assets directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Frame numbers: degrees of Earth rotation, `0..360` by `step`.
pub fn frame_numbers(step: u32) -> Vec<u32> {
    (0..360).step_by(step.max(1) as usize).collect()
}

/// Draws one frame of the scene.
pub struct OrbitView {
    scene: CircularOrbitScene,
    mesh: SphereMesh,
    stride: usize,
    camera: Camera,
    size: (u32, u32),
}

impl OrbitView {
    pub fn new(settings: &SatelliteOrbitConfig) -> Self {
        let scene = settings.scene();
        let size = plots::figure_size(7, 7);
        let margin = 60.0;
        let viewport = (
            margin,
            margin,
            size.0 as f32 - 2.0 * margin,
            size.1 as f32 - 2.0 * margin,
        );
        Self {
            mesh: scene.earth_mesh(settings.mesh_resolution),
            stride: settings.mesh_stride,
            camera: Camera::fit(viewport, scene.view_extent()),
            scene,
            size,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn render(&self, frame: u32) -> Result<Canvas> {
        let (earth_angle, satellite_angle) = self.scene.frame_angles(frame);
        let mut canvas = plots::blank_figure(self.size.0, self.size.1)?;

        draw_axes_box(&mut canvas, &self.camera, self.scene.view_extent(), AXIS_LABELS);

        let mut scene = Scene::new();
        scene.add_quads(
            self.mesh.rotated_z(earth_angle).quads(self.stride),
            Color::BLUE.with_alpha(0.6),
        );
        scene.add_point(self.scene.satellite_position(satellite_angle), Color::GREEN, 5.0);
        scene.render(&mut canvas, &self.camera);

        let title = TextStyle::new(14.0, Color::BLACK).align(Align::Center);
        draw_text(&mut canvas, self.size.0 as f32 / 2.0, 20.0, TITLE, &title);
        Ok(canvas)
    }
}

/// Write the animation to `path`; returns the frame count.
pub fn animate(settings: &SatelliteOrbitConfig, path: &Path, limit: Option<usize>) -> Result<usize> {
    let view = OrbitView::new(settings);
    let frames = frame_numbers(settings.frame_step_deg);
    let count = limit.unwrap_or(frames.len()).min(frames.len());

    info!(
        earth_radius_km = settings.earth_radius_km,
        orbit_radius_km = settings.orbit_radius_km,
        satellite_rate = settings.satellite_rate,
        frames = count,
        fps = settings.fps,
        "Animating satellite orbit"
    );

    let (w, h) = view.size();
    let mut animation = GifAnimation::create(path, w, h, settings.fps)?;
    for &frame in frames.iter().take(count) {
        animation.push_canvas(&view.render(frame)?)?;
        debug!(frame, "Rendered orbit frame");
    }
    Ok(animation.finish()?)
}

pub fn run(config: &TopogravConfig, args: &Orbit3dArgs) -> Result<PathBuf> {
    let settings = &config.satellite_orbit;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| config.asset(&settings.output));
    let frames = animate(settings, &path, args.frames)?;
    info!(path = %path.display(), frames, "Saved satellite orbit animation");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_numbers() {
        let frames = frame_numbers(2);
        assert_eq!(frames.len(), 180);
        assert_eq!(frames.first(), Some(&0));
        assert_eq!(frames.last(), Some(&358));
    }

    #[test]
    fn test_satellite_drawn_green() {
        let settings = SatelliteOrbitConfig {
            mesh_resolution: 20,
            ..Default::default()
        };
        let view = OrbitView::new(&settings);
        let canvas = view.render(0).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (700, 700));

        // frame 0 puts the satellite on +x, clear of the Earth disk at azim -60
        let p = view.scene.satellite_position(0.0);
        let (x, y) = view.camera.project(&p);
        assert_eq!(canvas.pixel(x as u32, y as u32), Some(Color::GREEN));
    }
}
