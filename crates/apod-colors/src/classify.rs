//! Nearest-color classification against the reference palette.

use crate::color::Rgb;
use crate::error::ColorError;
use crate::reference::ReferencePalette;

/// Map every color onto its nearest reference entry.
///
/// The output has the same length and order as `colors`. Distance is
/// Euclidean in RGB; ties go to the entry generated first.
///
/// # Errors
///
/// - [`ColorError::EmptyPalette`] if `colors` is empty
/// - [`ColorError::EmptyReferencePalette`] if `reference` has no entries
pub fn classify(colors: &[Rgb], reference: &ReferencePalette) -> Result<Vec<Rgb>, ColorError> {
    if reference.is_empty() {
        return Err(ColorError::EmptyReferencePalette);
    }
    if colors.is_empty() {
        return Err(ColorError::EmptyPalette);
    }

    tracing::info!(colors = colors.len(), "Finding the closest reference colors");

    colors
        .iter()
        .map(|&color| {
            let (idx, closest) = reference
                .nearest(color)
                .ok_or(ColorError::EmptyReferencePalette)?;
            tracing::debug!(%color, %closest, idx, "Closest reference color");
            Ok(closest)
        })
        .collect()
}

/// [`classify`] returning `#RRGGBB` strings.
pub fn classify_hex(colors: &[Rgb], reference: &ReferencePalette) -> Result<Vec<String>, ColorError> {
    Ok(classify(colors, reference)?
        .into_iter()
        .map(Rgb::to_hex)
        .collect())
}
