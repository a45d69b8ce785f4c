//! Dominant color extraction.
//!
//! Reduces a raster to at most `limit` colors ordered by how many pixels
//! they cover. Exact pixel values are counted first, then near-identical
//! values are folded into the more frequent one (see [`compress`]).

mod compress;

use std::collections::HashMap;

use image::DynamicImage;

use crate::color::Rgb;
use crate::error::ColorError;

pub use compress::lab_distance;

/// Default merge threshold (CIE76 delta E).
pub const DEFAULT_TOLERANCE: u32 = 32;

/// Default maximum number of dominant colors.
pub const DEFAULT_LIMIT: usize = 4;

/// Largest accepted tolerance.
pub const MAX_TOLERANCE: u32 = 100;

/// Parameters for [`extract_dominant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Colors closer than this (CIE76 distance in Lab) are merged.
    /// Lower values keep more distinct colors; `0` disables merging.
    pub tolerance: u32,
    /// Maximum number of colors returned.
    pub limit: usize,
}

impl ExtractOptions {
    pub fn new(tolerance: u32, limit: usize) -> Self {
        Self { tolerance, limit }
    }

    pub fn validate(&self) -> Result<(), ColorError> {
        if self.limit == 0 {
            return Err(ColorError::InvalidOptions(
                "limit must be at least 1".to_string(),
            ));
        }
        if self.tolerance > MAX_TOLERANCE {
            return Err(ColorError::InvalidOptions(format!(
                "tolerance {} exceeds {MAX_TOLERANCE}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_LIMIT)
    }
}

/// One dominant color and the number of pixels folded into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub color: Rgb,
    pub count: u64,
}

/// Result of an extraction: swatches, most prominent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DominantColors {
    pub swatches: Vec<Swatch>,
    /// Visible pixels that were counted.
    pub pixel_count: u64,
}

impl DominantColors {
    /// The plain palette in rank order.
    pub fn colors(&self) -> Vec<Rgb> {
        self.swatches.iter().map(|s| s.color).collect()
    }

    /// Share of counted pixels covered by each swatch.
    pub fn coverage(&self) -> Vec<f64> {
        self.swatches
            .iter()
            .map(|s| s.count as f64 / self.pixel_count.max(1) as f64)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }
}

/// Decode raw image bytes, sniffing the format from the content.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ColorError> {
    image::load_from_memory(bytes).map_err(ColorError::Decode)
}

/// Extract the dominant colors of `image`.
///
/// Fully transparent pixels are ignored. The result is deterministic for a
/// given image and options, holds between 1 and `limit` colors, and fails
/// with [`ColorError::EmptyImage`] when nothing visible is left.
pub fn extract_dominant(
    image: &DynamicImage,
    options: &ExtractOptions,
) -> Result<DominantColors, ColorError> {
    options.validate()?;

    tracing::info!(
        width = image.width(),
        height = image.height(),
        tolerance = options.tolerance,
        limit = options.limit,
        "Extracting colors from the image"
    );

    match image {
        DynamicImage::ImageRgb8(rgb) => {
            summarize(rgb.pixels().map(|p| Rgb::new(p.0[0], p.0[1], p.0[2])), options)
        }
        _ => {
            let rgba = image.to_rgba8();
            let pixels = rgba
                .pixels()
                .filter(|p| p.0[3] > 0)
                .map(|p| Rgb::new(p.0[0], p.0[1], p.0[2]));
            summarize(pixels, options)
        }
    }
}

/// Extract dominant colors from an arbitrary pixel stream.
pub fn extract_from_pixels(
    pixels: impl Iterator<Item = Rgb>,
    options: &ExtractOptions,
) -> Result<DominantColors, ColorError> {
    options.validate()?;
    summarize(pixels, options)
}

/// Count, merge and truncate; `options` are already validated.
fn summarize(
    pixels: impl Iterator<Item = Rgb>,
    options: &ExtractOptions,
) -> Result<DominantColors, ColorError> {
    let mut counts: HashMap<Rgb, u64> = HashMap::new();
    let mut pixel_count = 0u64;
    for color in pixels {
        *counts.entry(color).or_insert(0) += 1;
        pixel_count += 1;
    }

    if pixel_count == 0 {
        return Err(ColorError::EmptyImage);
    }

    let mut swatches: Vec<Swatch> = counts
        .into_iter()
        .map(|(color, count)| Swatch { color, count })
        .collect();
    sort_by_prominence(&mut swatches);

    let distinct = swatches.len();
    let mut swatches = compress::merge_similar(swatches, options.tolerance);
    swatches.truncate(options.limit);

    tracing::debug!(
        distinct,
        kept = swatches.len(),
        pixel_count,
        "Color extraction finished"
    );

    Ok(DominantColors {
        swatches,
        pixel_count,
    })
}

/// Most pixels first; equal counts fall back to the packed RGB value so the
/// order never depends on hash iteration order.
fn sort_by_prominence(swatches: &mut [Swatch]) {
    swatches.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.color.packed().cmp(&b.color.packed()))
    });
}
