//! Side-by-side preview of an image and its palettes.
//!
//! ```text
//! +----------------------+----+---------+----+------------+----+
//! |                      | 10 |  100    | 10 |  100       | 10 |
//! |   source image       |    | dominant|    | classified |    |
//! |   (W x H)            |    | strip   |    | strip      |    |
//! +----------------------+----+---------+----+------------+----+
//! ```
//!
//! Both strips leave a 10 pixel margin at the top and bottom and split the
//! remaining height into one band per color. The classified strip and its
//! trailing margin are left out entirely when the layout disables it.

mod jpeg;

use image::{imageops, DynamicImage, Rgb as Px, RgbImage};

use crate::color::Rgb;
use crate::error::ColorError;

pub use jpeg::{encode_jpeg, save_jpeg, DEFAULT_JPEG_QUALITY};

/// Gap between the image, the strips and the right edge.
pub const MARGIN: u32 = 10;

/// Width of one color strip.
pub const STRIP_WIDTH: u32 = 100;

/// Which strips the preview contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewLayout {
    pub include_classified: bool,
}

impl PreviewLayout {
    pub fn new(include_classified: bool) -> Self {
        Self { include_classified }
    }

    /// Total canvas width for a source of `source_width` pixels.
    pub fn canvas_width(&self, source_width: u32) -> u32 {
        let strips = if self.include_classified { 2 } else { 1 };
        source_width + strips * (MARGIN + STRIP_WIDTH) + MARGIN
    }
}

impl Default for PreviewLayout {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Build the preview canvas.
///
/// `classified` is only read when the layout includes it.
///
/// # Errors
///
/// [`ColorError::EmptyPalette`] if `dominant` is empty, or if the layout
/// includes the classified strip and `classified` is empty.
pub fn compose_preview(
    source: &DynamicImage,
    dominant: &[Rgb],
    classified: &[Rgb],
    layout: PreviewLayout,
) -> Result<RgbImage, ColorError> {
    if dominant.is_empty() || (layout.include_classified && classified.is_empty()) {
        return Err(ColorError::EmptyPalette);
    }

    let source = source.to_rgb8();
    let (width, height) = source.dimensions();

    let mut canvas = RgbImage::from_pixel(layout.canvas_width(width), height, Px([255, 255, 255]));
    imageops::replace(&mut canvas, &source, 0, 0);

    let dominant_x = width + MARGIN;
    draw_strip(&mut canvas, dominant_x, dominant);

    if layout.include_classified {
        let classified_x = dominant_x + STRIP_WIDTH + MARGIN;
        draw_strip(&mut canvas, classified_x, classified);
    }

    tracing::debug!(
        width = canvas.width(),
        height = canvas.height(),
        dominant = dominant.len(),
        classified = layout.include_classified,
        "Composed preview image"
    );

    Ok(canvas)
}

/// Fill a strip with equal-height bands, top to bottom in palette order.
///
/// Band edges are computed from the cumulative share so the bands tile the
/// interior exactly even when it does not divide evenly.
fn draw_strip(canvas: &mut RgbImage, x0: u32, colors: &[Rgb]) {
    let interior = canvas.height().saturating_sub(2 * MARGIN) as u64;
    let bands = colors.len() as u64;

    for (i, &color) in colors.iter().enumerate() {
        let top = MARGIN + (i as u64 * interior / bands) as u32;
        let bottom = MARGIN + ((i as u64 + 1) * interior / bands) as u32;
        let pixel: Px<u8> = color.into();

        for y in top..bottom {
            for x in x0..x0 + STRIP_WIDTH {
                canvas.put_pixel(x, y, pixel);
            }
        }
    }
}
