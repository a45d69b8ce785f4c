//! apod-colors: palettes and previews for astronomy pictures
//!
//! This crate turns a decoded image into a short list of dominant colors,
//! maps those colors onto a fixed reference palette so pictures can be
//! filtered by color, and draws a preview of the image next to both
//! palettes.
//!
//! # Quick Start
//!
//! ```
//! use apod_colors::{analyze, ExtractOptions, PreviewLayout, ReferencePalette};
//! use image::{DynamicImage, Rgb, RgbImage};
//!
//! let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, Rgb([255, 0, 0])));
//! let reference = ReferencePalette::shared();
//!
//! let analysis = analyze(&image, &ExtractOptions::default(), Some(reference)).unwrap();
//! assert_eq!(analysis.dominant_hex(), vec!["#FF0000"]);
//! assert_eq!(analysis.classified_hex(), Some(vec!["#FF0000".to_string()]));
//!
//! let preview = analysis.compose(&image, PreviewLayout::default()).unwrap();
//! assert_eq!(preview.dimensions(), (330, 100));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! image bytes --decode_image--> DynamicImage
//!     |
//!     v
//! extract_dominant          (count, merge within tolerance, keep `limit`)
//!     |
//!     +--> Rgb::to_hex       ("#RRGGBB" strings for records)
//!     |
//!     +--> classify          (nearest ReferencePalette entry, RGB distance)
//!     |
//!     v
//! compose_preview           (image + dominant strip + classified strip)
//!     |
//!     v
//! save_jpeg
//! ```
//!
//! # Reference palette
//!
//! [`ReferencePalette::shared`] builds the 54-entry palette once per
//! process. Build it before fanning out work and pass `&ReferencePalette`
//! down; every consumer then reads the same immutable value.

pub mod analysis;
pub mod classify;
pub mod color;
pub mod compose;
pub mod error;
pub mod extract;
pub mod reference;


pub use analysis::{analyze, PaletteAnalysis};
pub use classify::{classify, classify_hex};
pub use color::{hex_to_rgb, hsv_to_rgb, rgb_to_hex, rgb_to_hsv, Rgb};
pub use compose::{compose_preview, encode_jpeg, save_jpeg, PreviewLayout, DEFAULT_JPEG_QUALITY};
pub use error::ColorError;
pub use extract::{
    decode_image, extract_dominant, extract_from_pixels, DominantColors, ExtractOptions, Swatch,
    DEFAULT_LIMIT, DEFAULT_TOLERANCE,
};
pub use reference::{ReferencePalette, GRAYSCALE, REFERENCE_LEN};
