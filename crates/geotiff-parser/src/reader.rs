//! GeoTIFF decoding.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use geo_common::{AffineTransform, Raster};
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;
use tiff::ColorType;
use tracing::{debug, info};

use crate::error::{GeoTiffError, GeoTiffResult};

/// Georeferencing and layout of a GeoTIFF, read without decoding pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoTiffMetadata {
    pub width: usize,
    pub height: usize,
    pub transform: AffineTransform,
    pub nodata: Option<f64>,
    pub color_type: String,
}

/// Read band `band` (1-based) of a GeoTIFF into a [`Raster`].
///
/// Only band 1 of single-sample images is supported.
pub fn read_geotiff(path: impl AsRef<Path>, band: usize) -> GeoTiffResult<Raster> {
    let path = path.as_ref();
    if band != 1 {
        return Err(GeoTiffError::UnsupportedLayout(format!(
            "band {} requested, only band 1 is supported",
            band
        )));
    }

    let mut decoder = open_decoder(path)?;
    let metadata = read_tags(&mut decoder)?;

    let decoded = decoder.read_image()?;
    let mut data = to_f32(decoded);
    if data.len() != metadata.width * metadata.height {
        return Err(GeoTiffError::UnsupportedLayout(format!(
            "decoded {} samples for a {}x{} image",
            data.len(),
            metadata.width,
            metadata.height
        )));
    }

    if let Some(nodata) = metadata.nodata {
        let nodata = nodata as f32;
        let mut masked = 0usize;
        for v in data.iter_mut() {
            if *v == nodata {
                *v = f32::NAN;
                masked += 1;
            }
        }
        debug!(nodata = nodata, masked = masked, "Masked nodata samples");
    }

    info!(
        path = %path.display(),
        width = metadata.width,
        height = metadata.height,
        color_type = %metadata.color_type,
        "Loaded GeoTIFF"
    );

    Ok(Raster::new(data, metadata.width, metadata.height, metadata.transform)
        .with_nodata(metadata.nodata))
}

/// Read size, transform and nodata without decoding the image.
pub fn read_metadata(path: impl AsRef<Path>) -> GeoTiffResult<GeoTiffMetadata> {
    let mut decoder = open_decoder(path.as_ref())?;
    read_tags(&mut decoder)
}

fn open_decoder(path: &Path) -> GeoTiffResult<Decoder<BufReader<File>>> {
    let file = File::open(path)?;
    let decoder = Decoder::new(BufReader::new(file))?.with_limits(Limits::unlimited());
    Ok(decoder)
}

fn read_tags<R: Read + Seek>(decoder: &mut Decoder<R>) -> GeoTiffResult<GeoTiffMetadata> {
    let (width, height) = decoder.dimensions()?;
    let color_type = decoder.colortype()?;
    if !matches!(color_type, ColorType::Gray(_)) {
        return Err(GeoTiffError::UnsupportedLayout(format!(
            "{:?} images are not supported, expected one sample per pixel",
            color_type
        )));
    }

    let transform = read_transform(decoder)?;
    let nodata = read_nodata(decoder)?;

    Ok(GeoTiffMetadata {
        width: width as usize,
        height: height as usize,
        transform,
        nodata,
        color_type: format!("{:?}", color_type),
    })
}

fn read_transform<R: Read + Seek>(decoder: &mut Decoder<R>) -> GeoTiffResult<AffineTransform> {
    let scale = decoder
        .find_tag(Tag::ModelPixelScaleTag)?
        .map(|v| v.into_f64_vec())
        .transpose()?;
    let tiepoint = decoder
        .find_tag(Tag::ModelTiepointTag)?
        .map(|v| v.into_f64_vec())
        .transpose()?;

    let transform = if let (Some(scale), Some(tiepoint)) = (scale, tiepoint) {
        AffineTransform::from_geotiff(&tiepoint, &scale)?
    } else if let Some(matrix) = decoder
        .find_tag(Tag::ModelTransformationTag)?
        .map(|v| v.into_f64_vec())
        .transpose()?
    {
        AffineTransform::from_model_transformation(&matrix)?
    } else {
        return Err(GeoTiffError::MissingGeoreference(
            "no ModelPixelScale/ModelTiepoint or ModelTransformation tags".to_string(),
        ));
    };

    let geokeys = decoder
        .find_tag(Tag::GeoKeyDirectoryTag)?
        .map(|v| v.into_u16_vec())
        .transpose()?
        .unwrap_or_default();
    if pixel_is_point(&geokeys) {
        debug!("PixelIsPoint raster, moving origin to the pixel corner");
        return Ok(corner_origin(transform));
    }
    Ok(transform)
}

const GT_RASTER_TYPE_GEO_KEY: u16 = 1025;
const RASTER_PIXEL_IS_POINT: u16 = 2;

/// Whether the GeoKeyDirectory sets `GTRasterTypeGeoKey` to PixelIsPoint.
///
/// The directory is a 4-value header followed by `(key, location, count,
/// value)` entries; the raster type is stored inline (`location` 0).
fn pixel_is_point(geokeys: &[u16]) -> bool {
    let Some(&n_keys) = geokeys.get(3) else {
        return false;
    };
    geokeys[4..]
        .chunks_exact(4)
        .take(n_keys as usize)
        .any(|e| e[0] == GT_RASTER_TYPE_GEO_KEY && e[1] == 0 && e[3] == RASTER_PIXEL_IS_POINT)
}

/// A point-registered transform maps index (0, 0) to the first sample's
/// center; shift it so (0, 0) is the pixel corner.
fn corner_origin(t: AffineTransform) -> AffineTransform {
    let (c, f) = t.apply(-0.5, -0.5);
    AffineTransform { c, f, ..t }
}

fn read_nodata<R: Read + Seek>(decoder: &mut Decoder<R>) -> GeoTiffResult<Option<f64>> {
    let Some(value) = decoder.find_tag(Tag::GdalNodata)? else {
        return Ok(None);
    };
    let text = value.into_string()?;
    Ok(parse_nodata(&text))
}

/// GDAL writes nodata as a NUL-terminated ASCII number.
fn parse_nodata(text: &str) -> Option<f64> {
    text.trim_matches(char::from(0)).trim().parse::<f64>().ok()
}

fn to_f32(decoded: DecodingResult) -> Vec<f32> {
    match decoded {
        DecodingResult::U8(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::U16(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::U32(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I8(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I16(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I32(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|x| x as f32).collect(),
        DecodingResult::F32(v) => v,
        DecodingResult::F64(v) => v.into_iter().map(|x| x as f32).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nodata() {
        assert_eq!(parse_nodata("-32768\0"), Some(-32768.0));
        assert_eq!(parse_nodata(" -9999.5 "), Some(-9999.5));
        assert!(parse_nodata("nan").unwrap().is_nan());
        assert_eq!(parse_nodata("none"), None);
    }

    #[test]
    fn test_raster_type_key() {
        let header = [1u16, 1, 0, 2];
        let area = [header.as_slice(), &[1024, 0, 1, 2, 1025, 0, 1, 1]].concat();
        let point = [header.as_slice(), &[1024, 0, 1, 2, 1025, 0, 1, 2]].concat();
        assert!(!pixel_is_point(&area));
        assert!(pixel_is_point(&point));
        assert!(!pixel_is_point(&[]));
        assert!(!pixel_is_point(&header));
    }

    #[test]
    fn test_corner_origin_shifts_half_pixel() {
        let t = corner_origin(AffineTransform::new(0.5, 0.0, -180.0, 0.0, -0.5, 90.0));
        assert_eq!(t.apply(0.0, 0.0), (-180.25, 90.25));
        assert_eq!(t.pixel_size(), (0.5, 0.5));
    }

    #[test]
    fn test_to_f32_integer_samples() {
        assert_eq!(to_f32(DecodingResult::I16(vec![-5, 7])), vec![-5.0, 7.0]);
        assert_eq!(to_f32(DecodingResult::F64(vec![0.5])), vec![0.5]);
    }
}
