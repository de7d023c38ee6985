//! PNG encoding for rendered figures.
//!
//! Figures are flat-colored maps and diagrams, so most of them fit in a
//! 256-entry palette. `create_png_auto` tries an indexed encoding (color
//! type 3) first and falls back to full RGBA (color type 6).

use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::canvas::Canvas;
use crate::error::{RenderError, RenderResult};

const MAX_PALETTE_SIZE: usize = 256;

/// Pixel count above which palette extraction runs on the rayon pool.
const PARALLEL_THRESHOLD: usize = 4096;

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

type Rgba = (u8, u8, u8, u8);

/// Encode RGBA bytes, indexed when the image has at most 256 colors.
pub fn create_png_auto(pixels: &[u8], width: usize, height: usize) -> RenderResult<Vec<u8>> {
    check_len(pixels.len(), width, height, 4)?;

    let palette = if width * height >= PARALLEL_THRESHOLD {
        extract_palette_parallel(pixels)
    } else {
        extract_palette_sequential(pixels)
    };

    match palette {
        Some((palette, indices)) => create_png_indexed(width, height, &palette, &indices),
        None => create_png(pixels, width, height),
    }
}

#[inline(always)]
fn pack(px: &[u8]) -> u32 {
    u32::from_le_bytes([px[0], px[1], px[2], px[3]])
}

#[inline(always)]
fn unpack(packed: u32) -> Rgba {
    let [r, g, b, a] = packed.to_le_bytes();
    (r, g, b, a)
}

fn extract_palette_sequential(pixels: &[u8]) -> Option<(Vec<Rgba>, Vec<u8>)> {
    let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices = Vec::with_capacity(pixels.len() / 4);

    for px in pixels.chunks_exact(4) {
        let key = pack(px);
        let index = match lookup.get(&key) {
            Some(&i) => i,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let i = palette.len() as u8;
                palette.push(unpack(key));
                lookup.insert(key, i);
                i
            }
        };
        indices.push(index);
    }
    Some((palette, indices))
}

/// Collect colors per chunk in parallel, merge, then map pixels to indices
/// in a second parallel pass.
fn extract_palette_parallel(pixels: &[u8]) -> Option<(Vec<Rgba>, Vec<u8>)> {
    let chunk_px = (pixels.len() / 4 / rayon::current_num_threads()).max(256);

    let seen: Vec<HashSet<u32>> = pixels
        .par_chunks(chunk_px * 4)
        .map(|chunk| {
            let mut local = HashSet::with_capacity(MAX_PALETTE_SIZE);
            for px in chunk.chunks_exact(4) {
                local.insert(pack(px));
                if local.len() > MAX_PALETTE_SIZE {
                    break;
                }
            }
            local
        })
        .collect();

    let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette = Vec::with_capacity(MAX_PALETTE_SIZE);
    for key in seen.into_iter().flatten() {
        if lookup.contains_key(&key) {
            continue;
        }
        if palette.len() >= MAX_PALETTE_SIZE {
            return None;
        }
        lookup.insert(key, palette.len() as u8);
        palette.push(unpack(key));
    }

    let indices: Vec<u8> = pixels
        .par_chunks_exact(4)
        .map(|px| lookup.get(&pack(px)).copied().unwrap_or(0))
        .collect();

    Some((palette, indices))
}

/// Indexed PNG from a palette and one index byte per pixel.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[Rgba],
    indices: &[u8],
) -> RenderResult<Vec<u8>> {
    check_len(indices.len(), width, height, 1)?;
    if palette.is_empty() || palette.len() > MAX_PALETTE_SIZE {
        return Err(RenderError::encode(format!(
            "palette of {} entries",
            palette.len()
        )));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let plte: Vec<u8> = palette.iter().flat_map(|&(r, g, b, _)| [r, g, b]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    if palette.iter().any(|&(_, _, _, a)| a < 255) {
        let trns: Vec<u8> = palette.iter().map(|&(_, _, _, a)| a).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    write_chunk(&mut png, b"IDAT", &deflate_scanlines(indices, width, height, 1)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Truecolor-with-alpha PNG.
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> RenderResult<Vec<u8>> {
    check_len(pixels.len(), width, height, 4)?;

    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));
    write_chunk(&mut png, b"IDAT", &deflate_scanlines(pixels, width, height, 4)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Encode a canvas and write it to `path`, creating parent directories.
pub fn write_canvas_png(canvas: &Canvas, path: &Path) -> RenderResult<usize> {
    let rgba = canvas.to_rgba();
    write_png(path, &rgba, canvas.width() as usize, canvas.height() as usize)
}

/// Encode RGBA bytes and write them to `path`. Returns the file size.
pub fn write_png(path: &Path, pixels: &[u8], width: usize, height: usize) -> RenderResult<usize> {
    let png = create_png_auto(pixels, width, height)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &png)?;
    debug!(path = %path.display(), bytes = png.len(), width, height, "Wrote PNG");
    Ok(png.len())
}

fn check_len(len: usize, width: usize, height: usize, bytes_per_pixel: usize) -> RenderResult<()> {
    if width == 0 || height == 0 {
        return Err(RenderError::encode(format!("empty image {}x{}", width, height)));
    }
    if len != width * height * bytes_per_pixel {
        return Err(RenderError::encode(format!(
            "{} bytes for a {}x{} image at {} bytes per pixel",
            len, width, height, bytes_per_pixel
        )));
    }
    Ok(())
}

fn ihdr(width: usize, height: usize, color_type: u8) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[0..4].copy_from_slice(&(width as u32).to_be_bytes());
    data[4..8].copy_from_slice(&(height as u32).to_be_bytes());
    data[8] = 8; // bit depth
    data[9] = color_type;
    // compression, filter and interlace methods stay 0
    data
}

fn write_chunk(png: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(kind);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(kind);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Zlib-compress scanlines, each prefixed with filter type 0.
fn deflate_scanlines(
    data: &[u8],
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> RenderResult<Vec<u8>> {
    let stride = width * bytes_per_pixel;
    let mut raw = Vec::with_capacity(height * (stride + 1));
    for row in data.chunks_exact(stride) {
        raw.push(0);
        raw.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&raw).map_err(RenderError::encode)?;
    encoder.finish().map_err(RenderError::encode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_dedupes() {
        let pixels = [
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 255, 255, //
            255, 0, 0, 255,
        ];
        let (palette, indices) = extract_palette_sequential(&pixels).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(indices, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_palette_overflow() {
        let pixels: Vec<u8> = (0..300u32).flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 0, 255]).collect();
        assert!(extract_palette_sequential(&pixels).is_none());
        assert!(extract_palette_parallel(&pixels).is_none());
    }

    #[test]
    fn test_parallel_matches_sequential_colors() {
        let pixels: Vec<u8> = (0..128 * 128u32)
            .flat_map(|i| [(i % 7) as u8 * 30, (i % 5) as u8 * 40, 0, 255])
            .collect();
        let (seq_palette, seq_idx) = extract_palette_sequential(&pixels).unwrap();
        let (par_palette, par_idx) = extract_palette_parallel(&pixels).unwrap();
        assert_eq!(seq_palette.len(), par_palette.len());
        for i in 0..seq_idx.len() {
            assert_eq!(seq_palette[seq_idx[i] as usize], par_palette[par_idx[i] as usize]);
        }
    }

    #[test]
    fn test_transparent_palette_gets_trns() {
        let png = create_png_indexed(2, 1, &[(255, 0, 0, 255), (0, 0, 0, 0)], &[0, 1]).unwrap();
        assert!(png.windows(4).any(|w| w == b"tRNS"));
    }

    #[test]
    fn test_size_mismatch() {
        assert!(create_png(&[0; 12], 2, 2).is_err());
        assert!(create_png_auto(&[], 0, 0).is_err());
    }
}
