//! Human-readable chart of the reference palette.
//!
//! One row per hue: a black marker cell, the four tones, and a white end
//! cell. The bottom row holds the grayscale ramp. The chart is documentary
//! only; classification never reads it.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use super::{ReferencePalette, GRAYSCALE, HUE_STEPS, TONE_STEPS};
use crate::color::Rgb;
use crate::error::ColorError;

/// Edge length of one chart cell in pixels.
pub const CELL_SIZE: u32 = 10;

/// Marker cell + tones + end cell.
pub const CHART_WIDTH: u32 = CELL_SIZE * (TONE_STEPS as u32 + 2);

/// Hue rows + grayscale row.
pub const CHART_HEIGHT: u32 = CELL_SIZE * (HUE_STEPS as u32 + 1);

impl ReferencePalette {
    /// Render the chart for this palette.
    ///
    /// Cells past the end of a shorter custom palette stay transparent.
    pub fn preview_image(&self) -> RgbaImage {
        let mut chart = RgbaImage::new(CHART_WIDTH, CHART_HEIGHT);
        let last_col = TONE_STEPS as u32 + 1;

        for row in 0..HUE_STEPS as u32 {
            fill_cell(&mut chart, 0, row, Rgb::BLACK);
            for tone in 0..TONE_STEPS {
                if let Some(color) = self.get(row as usize * TONE_STEPS + tone) {
                    fill_cell(&mut chart, tone as u32 + 1, row, color);
                }
            }
            fill_cell(&mut chart, last_col, row, Rgb::WHITE);
        }

        // Six grays fill the six cells of the bottom row exactly.
        for (col, &gray) in GRAYSCALE.iter().enumerate() {
            fill_cell(&mut chart, col as u32, HUE_STEPS as u32, gray);
        }

        chart
    }

    /// Write the chart as PNG, creating parent directories.
    pub fn save_preview(&self, path: &Path) -> Result<(), ColorError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut bytes = std::io::Cursor::new(Vec::new());
        self.preview_image()
            .write_to(&mut bytes, ImageFormat::Png)
            .map_err(ColorError::Encode)?;
        std::fs::write(path, bytes.into_inner())?;

        tracing::debug!(path = %path.display(), "Saved reference palette chart");
        Ok(())
    }
}

fn fill_cell(chart: &mut RgbaImage, col: u32, row: u32, color: Rgb) {
    let pixel: Rgba<u8> = color.into();
    for y in row * CELL_SIZE..(row + 1) * CELL_SIZE {
        for x in col * CELL_SIZE..(col + 1) * CELL_SIZE {
            chart.put_pixel(x, y, pixel);
        }
    }
}
