//! Figure layout shared by the map commands.
//!
//! Every map is a plate carrée frame with an optional color bar on the
//! right, a title above, and graticule labels below and to the left.

use anyhow::{Context, Result};
use geo_common::GridAxes;
use gravimetry::Quantity;
use netcdf_parser::LweDataset;
use renderer::map::MapFrame;
use renderer::{
    draw_colorbar, load_geojson, Canvas, Color, ColorbarLayout, Colormap, Overlay, StyleConfig,
    ValueRange,
};
use tracing::debug;

use crate::config::TopogravConfig;

const MARGIN_LEFT: f32 = 60.0;
const MARGIN_TOP: f32 = 50.0;
const MARGIN_BOTTOM: f32 = 40.0;
const COLORBAR_AREA: f32 = 130.0;

/// Pixel size of a figure given in inches at 100 dpi.
pub const fn figure_size(width_in: u32, height_in: u32) -> (u32, u32) {
    (width_in * 100, height_in * 100)
}

/// Built-in styles, or the configured style file.
pub fn load_styles(config: &TopogravConfig) -> Result<StyleConfig> {
    match &config.styles {
        Some(path) => StyleConfig::from_file(path)
            .with_context(|| format!("Failed to load styles from {}", path.display())),
        None => Ok(StyleConfig::builtin()?),
    }
}

/// The configured coastline overlay, if any.
pub fn load_overlay(config: &TopogravConfig) -> Result<Option<Overlay>> {
    config
        .datasets
        .coastlines
        .as_deref()
        .map(|path| {
            load_geojson(path)
                .with_context(|| format!("Failed to load coastlines from {}", path.display()))
        })
        .transpose()
}

/// Frame and color bar placement for a `width x height` figure.
pub fn map_layout(width: u32, height: u32, colorbar: bool) -> (MapFrame, Option<ColorbarLayout>) {
    let reserved = if colorbar { COLORBAR_AREA } else { 20.0 };
    let frame = MapFrame::fit(
        MARGIN_LEFT,
        MARGIN_TOP,
        width as f32 - MARGIN_LEFT - reserved,
        height as f32 - MARGIN_TOP - MARGIN_BOTTOM,
    );
    let bar = colorbar.then(|| ColorbarLayout {
        left: frame.right() + 20.0,
        top: frame.top + frame.height * 0.1,
        width: 18.0,
        height: frame.height * 0.8,
    });
    (frame, bar)
}

/// A white canvas of the given size.
pub fn blank_figure(width: u32, height: u32) -> Result<Canvas> {
    let mut canvas = Canvas::new(width, height)?;
    canvas.fill(Color::WHITE);
    Ok(canvas)
}

/// Background drawn under the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapBackground {
    None,
    /// Ocean fill plus land polygons from the overlay.
    LandOcean,
}

/// A gridded field drawn on a global map.
pub struct FieldPlot<'a> {
    pub axes: &'a GridAxes,
    pub values: &'a [f32],
    pub colormap: &'a Colormap,
    pub range: ValueRange,
    pub title: &'a str,
    pub colorbar_label: &'a str,
    pub overlay: Option<&'a Overlay>,
    pub background: MapBackground,
    /// Grid lines on every n-th row and column of `axes`.
    pub grid_every: Option<usize>,
}

impl FieldPlot<'_> {
    pub fn render(&self, width: u32, height: u32) -> Result<Canvas> {
        let mut canvas = blank_figure(width, height)?;
        let (frame, bar) = map_layout(width, height, true);

        if self.background == MapBackground::LandOcean {
            frame.fill_background(&mut canvas, Color::LIGHT_BLUE);
            if let Some(overlay) = self.overlay {
                frame.fill_polygons(&mut canvas, &overlay.polygons, Color::LIGHT_GRAY);
            }
        }

        frame.draw_field(&mut canvas, self.axes, self.values, self.colormap, self.range)?;

        if let Some(every) = self.grid_every {
            frame.draw_grid_overlay(&mut canvas, self.axes, every, Color::BLACK.with_alpha(0.3));
        }
        if let Some(overlay) = self.overlay {
            frame.draw_lines(&mut canvas, &overlay.lines, Color::BLACK, 0.8);
        }
        frame.draw_graticule(&mut canvas, 60.0, 30.0, true);
        frame.draw_border(&mut canvas);
        frame.draw_title(&mut canvas, self.title, 14.0);

        if let Some(layout) = bar {
            draw_colorbar(
                &mut canvas,
                layout,
                self.colormap,
                self.range,
                Some(self.colorbar_label),
                7,
            )?;
        }

        debug!(title = %self.title, width, height, "Rendered field plot");
        Ok(canvas)
    }
}

/// A GRACE quantity at one time step, with the colors it is drawn in.
pub struct LweFrame<'a> {
    pub dataset: &'a LweDataset,
    pub quantity: Quantity,
    pub colormap: &'a Colormap,
    pub overlay: Option<&'a Overlay>,
}

impl LweFrame<'_> {
    /// Values of `quantity` at time index `t`.
    pub fn values(&self, t: usize) -> Vec<f32> {
        self.quantity.derive(self.dataset.frame(t))
    }

    /// Render time index `t` with the given range and title.
    pub fn render(
        &self,
        t: usize,
        range: ValueRange,
        title: &str,
        size: (u32, u32),
    ) -> Result<Canvas> {
        let values = self.values(t);
        FieldPlot {
            axes: &self.dataset.axes,
            values: &values,
            colormap: self.colormap,
            range,
            title,
            colorbar_label: self.quantity.colorbar_label(),
            overlay: self.overlay,
            background: MapBackground::None,
            grid_every: None,
        }
        .render(size.0, size.1)
    }
}

/// Color range for `values` under the named style: symmetric about zero
/// for diverging styles, the data extent otherwise.
pub fn style_range(styles: &StyleConfig, style: &str, values: &[f32]) -> Result<ValueRange> {
    let definition = styles
        .get_style(style)
        .with_context(|| format!("Style '{}' not found", style))?;
    ValueRange::for_style(values, definition)
        .with_context(|| format!("No finite values to scale with style '{}'", style))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_leaves_room_for_colorbar() {
        let (w, h) = figure_size(12, 6);
        let (frame, bar) = map_layout(w, h, true);
        let bar = bar.unwrap();
        assert!(frame.left >= MARGIN_LEFT);
        assert!(bar.left + bar.width < w as f32);
        assert!(frame.bottom() <= h as f32 - MARGIN_BOTTOM + 1.0);
        assert_eq!(frame.width, frame.height * 2.0);
    }
}
