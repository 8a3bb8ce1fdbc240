//! CPU-bound JPEG helpers. Callers run these on the blocking pool.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageReader};
use std::io::Cursor;

/// Quality used for a plain re-encode.
pub const DEFAULT_QUALITY: u8 = 80;

const QUALITY_STEPS: [u8; 5] = [85, 75, 65, 55, 45];
const SCALE_FACTOR: f32 = 0.8;
const MAX_SCALE_ROUNDS: usize = 10;
const MIN_EDGE_PX: u32 = 16;

pub fn decode(bytes: &[u8]) -> Result<DynamicImage, String> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| format!("Failed to guess format: {e}"))?
        .decode()
        .map_err(|e| format!("Failed to decode image: {e}"))
}

pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, String> {
    let rgb = img.to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| format!("Failed to encode JPEG: {e}"))?;
    Ok(out)
}

/// Walks down the quality steps, then shrinks the image, until the JPEG fits
/// `target_bytes`. Returns the smallest attempt when nothing fits.
pub fn compress_to_jpeg(img: DynamicImage, target_bytes: usize) -> Result<Vec<u8>, String> {
    let mut current = img;
    let mut smallest: Option<Vec<u8>> = None;

    for _ in 0..=MAX_SCALE_ROUNDS {
        for quality in QUALITY_STEPS {
            let encoded = encode_jpeg(&current, quality)?;
            if encoded.len() <= target_bytes {
                return Ok(encoded);
            }
            if smallest.as_ref().is_none_or(|s| encoded.len() < s.len()) {
                smallest = Some(encoded);
            }
        }

        let width = (current.width() as f32 * SCALE_FACTOR) as u32;
        let height = (current.height() as f32 * SCALE_FACTOR) as u32;
        if width < MIN_EDGE_PX || height < MIN_EDGE_PX {
            break;
        }
        current = current.resize(width, height, FilterType::Lanczos3);
    }

    smallest.ok_or_else(|| "Compression produced no output".to_string())
}
