//! JPEG output for preview images.

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};

use crate::error::ColorError;

/// Quality used when the caller does not pick one.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Encode an RGB canvas as JPEG in memory.
pub fn encode_jpeg(canvas: &RgbImage, quality: u8) -> Result<Vec<u8>, ColorError> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100))
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(ColorError::Encode)?;
    Ok(bytes)
}

/// Encode and write a canvas to `path`, creating parent directories.
///
/// Encoding finishes before the file is touched, so a failed encode never
/// leaves a truncated file behind.
pub fn save_jpeg(canvas: &RgbImage, path: &Path, quality: u8) -> Result<(), ColorError> {
    let bytes = encode_jpeg(canvas, quality)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &bytes)?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Saved JPEG");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_encode_produces_jpeg_signature() {
        let canvas = RgbImage::from_pixel(16, 16, Rgb([10, 200, 30]));
        let bytes = encode_jpeg(&canvas, DEFAULT_JPEG_QUALITY).unwrap();
        assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_save_round_trips_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("preview.jpg");
        let canvas = RgbImage::from_pixel(33, 21, Rgb([255, 255, 255]));

        save_jpeg(&canvas, &path, 90).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (33, 21));
    }
}
