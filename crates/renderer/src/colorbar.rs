//! Vertical color bar with ticks and a rotated axis label.

use crate::canvas::Canvas;
use crate::error::RenderResult;
use crate::glyphs::{draw_text, text_width, Align, TextStyle};
use crate::gradient::Color;
use crate::style::{Colormap, ValueRange};

const TICK_TEXT: f32 = 10.0;

/// Placement of a color bar on the canvas.
#[derive(Debug, Clone, Copy)]
pub struct ColorbarLayout {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Draw the bar, roughly `max_ticks` tick labels and an optional label.
pub fn draw_colorbar(
    canvas: &mut Canvas,
    layout: ColorbarLayout,
    colormap: &Colormap,
    range: ValueRange,
    label: Option<&str>,
    max_ticks: usize,
) -> RenderResult<()> {
    let w = layout.width.round().max(1.0) as u32;
    let h = layout.height.round().max(1.0) as u32;

    let mut block = Vec::with_capacity((w * h * 4) as usize);
    for row in 0..h {
        // top of the bar is the maximum
        let t = 1.0 - (row as f32 + 0.5) / h as f32;
        let c = colormap.sample(t);
        for _ in 0..w {
            block.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }
    let (x0, y0) = (layout.left.round() as i32, layout.top.round() as i32);
    canvas.put_rgba_block(x0, y0, w, h, &block)?;
    canvas.rect(x0 as f32, y0 as f32, w as f32, h as f32, None, Some((Color::BLACK, 1.0)));

    let right = x0 as f32 + w as f32;
    let text = TextStyle::new(TICK_TEXT, Color::BLACK);
    let ticks = nice_ticks(range, max_ticks);
    let decimals = tick_decimals(&ticks);
    let mut widest = 0.0f32;

    for value in &ticks {
        let t = range.normalize(*value);
        let y = y0 as f32 + (1.0 - t) * h as f32;
        canvas.line((right, y), (right + 4.0, y), Color::BLACK, 1.0);
        let s = format_tick(*value, decimals);
        widest = widest.max(text_width(&s, TICK_TEXT));
        draw_text(canvas, right + 7.0, y - TICK_TEXT / 2.0, &s, &text);
    }

    if let Some(label) = label {
        let x = right + 7.0 + widest + 8.0;
        let y = y0 as f32 + h as f32 / 2.0;
        // reads bottom to top
        let style = TextStyle::new(11.0, Color::BLACK)
            .align(Align::Center)
            .rotated(-90.0);
        draw_text(canvas, x, y, label, &style);
    }

    Ok(())
}

/// Tick values at a 1/2/2.5/5 x 10^k step inside `range`.
pub fn nice_ticks(range: ValueRange, max_ticks: usize) -> Vec<f32> {
    let span = range.span() as f64;
    if !span.is_finite() || span <= 0.0 {
        return vec![range.min];
    }
    let raw = span / max_ticks.max(2) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (range.min as f64 / step).ceil() as i64;
    let last = (range.max as f64 / step).floor() as i64;
    (first..=last).map(|i| (i as f64 * step) as f32).collect()
}

fn tick_decimals(ticks: &[f32]) -> usize {
    let step = match ticks {
        [a, b, ..] => (b - a).abs() as f64,
        _ => return 1,
    };
    (0..6)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-3
        })
        .unwrap_or(6)
}

fn format_tick(value: f32, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    // avoid "-0"
    if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        s.trim_start_matches('-').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_ticks_symmetric() {
        let ticks = nice_ticks(ValueRange::new(-30.0, 30.0), 6);
        assert_eq!(ticks, vec![-30.0, -20.0, -10.0, 0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_nice_ticks_small_range() {
        let ticks = nice_ticks(ValueRange::new(-0.012, 0.012), 6);
        assert!(ticks.contains(&0.0));
        assert!(ticks.len() >= 3);
        assert_eq!(tick_decimals(&ticks), 3);
    }

    #[test]
    fn test_degenerate_range() {
        assert_eq!(nice_ticks(ValueRange::new(5.0, 5.0), 6), vec![5.0]);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(-0.0001, 2), "0.00");
        assert_eq!(format_tick(-12.5, 1), "-12.5");
        assert_eq!(format_tick(40.0, 0), "40");
    }
}
