//! Color types and conversion helpers.
//!
//! [`Rgb`] is the only color value the pipeline passes around. It converts
//! losslessly to and from the `#RRGGBB` form used in records and logs, and
//! the HSV helpers are used to lay out the reference palette grid.
//!
//! ```
//! use apod_colors::{hex_to_rgb, rgb_to_hex, Rgb};
//!
//! let teal = Rgb::new(0, 128, 128);
//! assert_eq!(rgb_to_hex(teal), "#008080");
//! assert_eq!(hex_to_rgb("#008080").unwrap(), teal);
//! ```

mod hsv;
mod rgb;

pub use hsv::{hsv_to_rgb, rgb_to_hsv};
pub use rgb::{hex_to_rgb, rgb_to_hex, Rgb};
