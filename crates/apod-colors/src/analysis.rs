//! One-call analysis of a decoded image.

use image::{DynamicImage, RgbImage};

use crate::classify::classify;
use crate::color::Rgb;
use crate::compose::{compose_preview, PreviewLayout};
use crate::error::ColorError;
use crate::extract::{extract_dominant, DominantColors, ExtractOptions};
use crate::reference::ReferencePalette;

/// Dominant palette of an image and, optionally, its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteAnalysis {
    pub dominant: DominantColors,
    /// Same length and order as `dominant`; `None` when classification was
    /// not requested.
    pub classified: Option<Vec<Rgb>>,
}

impl PaletteAnalysis {
    pub fn dominant_colors(&self) -> Vec<Rgb> {
        self.dominant.colors()
    }

    pub fn dominant_hex(&self) -> Vec<String> {
        self.dominant.swatches.iter().map(|s| s.color.to_hex()).collect()
    }

    pub fn classified_hex(&self) -> Option<Vec<String>> {
        self.classified
            .as_ref()
            .map(|colors| colors.iter().map(|c| c.to_hex()).collect())
    }

    /// Compose the preview for `source` (the image this analysis came from).
    ///
    /// The classified strip is drawn only if the layout asks for it; asking
    /// for it without a classification is [`ColorError::EmptyPalette`].
    pub fn compose(&self, source: &DynamicImage, layout: PreviewLayout) -> Result<RgbImage, ColorError> {
        let classified = self.classified.as_deref().unwrap_or_default();
        compose_preview(source, &self.dominant_colors(), classified, layout)
    }
}

/// Extract the dominant colors and classify them when `reference` is given.
pub fn analyze(
    image: &DynamicImage,
    options: &ExtractOptions,
    reference: Option<&ReferencePalette>,
) -> Result<PaletteAnalysis, ColorError> {
    let dominant = extract_dominant(image, options)?;
    let classified = match reference {
        Some(reference) => Some(classify(&dominant.colors(), reference)?),
        None => None,
    };

    Ok(PaletteAnalysis {
        dominant,
        classified,
    })
}
