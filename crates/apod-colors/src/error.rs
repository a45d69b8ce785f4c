//! Unified error type for the apod-colors public API.

use thiserror::Error;

/// Errors produced by the color pipeline.
///
/// Every failure is terminal for the image being processed: nothing in this
/// crate retries, and no partially built palette or composite is returned.
#[derive(Debug, Error)]
pub enum ColorError {
    /// A hex color string was not `#RRGGBB` / `RRGGBB`.
    #[error("invalid hex color: {0:?}")]
    InvalidFormat(String),

    /// Classification or composition was asked to work on zero colors.
    #[error("palette cannot be empty")]
    EmptyPalette,

    /// Classification was attempted against a reference palette with no entries.
    #[error("reference palette has not been built")]
    EmptyReferencePalette,

    /// The image has no visible pixels to extract colors from.
    #[error("image has no visible pixels")]
    EmptyImage,

    /// Extraction options out of range.
    #[error("invalid extraction options: {0}")]
    InvalidOptions(String),

    /// The raster could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The composite or chart could not be encoded.
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_message() {
        let error = ColorError::InvalidFormat("#12345".to_string());
        assert_eq!(error.to_string(), "invalid hex color: \"#12345\"");
    }

    #[test]
    fn test_empty_palette_message() {
        assert_eq!(ColorError::EmptyPalette.to_string(), "palette cannot be empty");
    }

    #[test]
    fn test_empty_reference_palette_message() {
        assert_eq!(
            ColorError::EmptyReferencePalette.to_string(),
            "reference palette has not been built"
        );
    }

    #[test]
    fn test_invalid_options_message() {
        let error = ColorError::InvalidOptions("limit must be at least 1".to_string());
        assert_eq!(
            error.to_string(),
            "invalid extraction options: limit must be at least 1"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: ColorError = io.into();
        assert!(matches!(error, ColorError::Io(_)));
    }
}
