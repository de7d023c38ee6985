//! Figure rendering for topograv.
//!
//! - Color maps from JSON styles (gradients and cubehelix)
//! - Plate carrée map frames with fields, graticules and vector overlays
//! - Stroke-font text, color bars and legends
//! - Orthographic 3D scenes
//! - PNG and looping GIF output

pub mod animation;
pub mod canvas;
pub mod colorbar;
pub mod error;
pub mod glyphs;
pub mod gradient;
pub mod legend;
pub mod map;
pub mod overlay;
pub mod png;
pub mod scene;
pub mod style;

pub use animation::GifAnimation;
pub use canvas::{Canvas, LineStyle, Marker};
pub use colorbar::{draw_colorbar, nice_ticks, ColorbarLayout};
pub use error::{RenderError, RenderResult};
pub use glyphs::{draw_text, text_width, Align, TextStyle};
pub use gradient::{interpolate_color, render_grid, Color};
pub use legend::{draw_legend, LegendCorner, LegendEntry, LegendSymbol};
pub use map::MapFrame;
pub use overlay::{load_geojson, Overlay};
pub use png::{create_png, create_png_auto, write_canvas_png, write_png};
pub use scene::{draw_axes_box, Camera, Scene};
pub use style::{Colormap, StyleConfig, StyleDefinition, ValueRange};
