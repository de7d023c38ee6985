//! Looping GIF output for frame sequences.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::error::{RenderError, RenderResult};

/// Quantization speed passed to the GIF encoder (1 slowest, 30 fastest).
const ENCODER_SPEED: i32 = 10;

/// Frames of one size appended to an infinitely looping GIF.
///
/// The GIF trailer is written by [`GifAnimation::finish`] (or on drop).
pub struct GifAnimation<W: Write> {
    encoder: GifEncoder<W>,
    width: u32,
    height: u32,
    delay: Delay,
    frames: usize,
}

impl GifAnimation<BufWriter<File>> {
    /// Create `path` (and its parent directories) for writing.
    pub fn create(path: &Path, width: u32, height: u32, fps: u32) -> RenderResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        info!(path = %path.display(), width, height, fps, "Writing animation");
        Self::new(BufWriter::new(file), width, height, fps)
    }
}

impl<W: Write> GifAnimation<W> {
    pub fn new(writer: W, width: u32, height: u32, fps: u32) -> RenderResult<Self> {
        if fps == 0 {
            return Err(RenderError::encode("frame rate must be positive"));
        }
        if width == 0 || height == 0 || width > u16::MAX as u32 || height > u16::MAX as u32 {
            return Err(RenderError::encode(format!("unsupported GIF size {}x{}", width, height)));
        }
        let mut encoder = GifEncoder::new_with_speed(writer, ENCODER_SPEED);
        encoder.set_repeat(Repeat::Infinite)?;
        Ok(Self {
            encoder,
            width,
            height,
            delay: Delay::from_numer_denom_ms(1000, fps),
            frames: 0,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn push_canvas(&mut self, canvas: &Canvas) -> RenderResult<()> {
        if canvas.width() != self.width || canvas.height() != self.height {
            return Err(RenderError::encode(format!(
                "frame is {}x{}, animation is {}x{}",
                canvas.width(),
                canvas.height(),
                self.width,
                self.height
            )));
        }
        self.push_rgba(canvas.to_rgba())
    }

    /// Append straight-alpha RGBA bytes of the animation's size.
    pub fn push_rgba(&mut self, rgba: Vec<u8>) -> RenderResult<()> {
        let image = RgbaImage::from_raw(self.width, self.height, rgba).ok_or_else(|| {
            RenderError::encode(format!("frame buffer does not match {}x{}", self.width, self.height))
        })?;
        self.encoder
            .encode_frame(Frame::from_parts(image, 0, 0, self.delay))?;
        self.frames += 1;
        debug!(frame = self.frames, "Encoded GIF frame");
        Ok(())
    }

    /// Flush the animation and return the number of frames written.
    pub fn finish(self) -> RenderResult<usize> {
        let frames = self.frames;
        if frames == 0 {
            return Err(RenderError::encode("animation has no frames"));
        }
        drop(self.encoder);
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::Color;

    #[test]
    fn test_frames_counted() {
        let mut buffer = Vec::new();
        let mut anim = GifAnimation::new(&mut buffer, 8, 6, 5).unwrap();
        for color in [Color::RED, Color::BLUE, Color::WHITE] {
            let mut canvas = Canvas::new(8, 6).unwrap();
            canvas.fill(color);
            anim.push_canvas(&canvas).unwrap();
        }
        assert_eq!(anim.finish().unwrap(), 3);
        assert_eq!(&buffer[..6], b"GIF89a");
        assert_eq!(buffer.last(), Some(&0x3b));
    }

    #[test]
    fn test_wrong_size_frame() {
        let mut anim = GifAnimation::new(Vec::new(), 8, 6, 5).unwrap();
        let canvas = Canvas::new(6, 8).unwrap();
        assert!(anim.push_canvas(&canvas).is_err());
        assert!(anim.push_rgba(vec![0; 10]).is_err());
    }

    #[test]
    fn test_zero_fps_rejected() {
        assert!(GifAnimation::new(Vec::new(), 8, 6, 0).is_err());
    }
}
