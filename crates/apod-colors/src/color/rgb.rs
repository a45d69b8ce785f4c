//! 8-bit RGB color and its hex representation.

use std::fmt;
use std::str::FromStr;

use crate::error::ColorError;

/// An opaque 8-bit sRGB color.
///
/// Ordering compares `r`, then `g`, then `b`; it only exists so that
/// frequency ties can be broken deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray with all three channels set to `level`.
    #[inline]
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// `0xRRGGBB` packed into the low 24 bits.
    #[inline]
    pub const fn packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Format as `#RRGGBB` with uppercase digits.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// Kept in integers so comparisons between candidates are exact.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Euclidean distance in RGB space.
    #[inline]
    pub fn distance(self, other: Rgb) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.to_bytes()
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(pixel: image::Rgb<u8>) -> Self {
        Self::from(pixel.0)
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(color: Rgb) -> Self {
        image::Rgb(color.to_bytes())
    }
}

impl From<Rgb> for image::Rgba<u8> {
    fn from(color: Rgb) -> Self {
        image::Rgba([color.r, color.g, color.b, 255])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    /// Parse `#RRGGBB` or `RRGGBB`, case-insensitive.
    ///
    /// Shorthand (`#RGB`), surrounding whitespace and sign characters are
    /// rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);

        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidFormat(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorError::InvalidFormat(s.to_string()))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Format a color as `#RRGGBB`.
pub fn rgb_to_hex(color: Rgb) -> String {
    color.to_hex()
}

/// Parse a `#RRGGBB` (or `RRGGBB`) string.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    hex.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex_uppercase_and_padded() {
        assert_eq!(Rgb::new(255, 0, 0).to_hex(), "#FF0000");
        assert_eq!(Rgb::new(1, 2, 10).to_hex(), "#01020A");
        assert_eq!(Rgb::new(171, 205, 239).to_string(), "#ABCDEF");
    }

    #[test]
    fn test_hex_round_trip_every_channel_value() {
        for v in 0..=255u8 {
            let colors = [Rgb::new(v, 0, 0), Rgb::new(0, v, 0), Rgb::new(0, 0, v), Rgb::gray(v)];
            for color in colors {
                let hex = rgb_to_hex(color);
                assert_eq!(hex.len(), 7);
                assert_eq!(hex_to_rgb(&hex).unwrap(), color, "round trip failed for {hex}");
            }
        }
    }

    #[test]
    fn test_parse_without_hash_and_lowercase() {
        assert_eq!(hex_to_rgb("abcdef").unwrap(), Rgb::new(0xAB, 0xCD, 0xEF));
        assert_eq!(hex_to_rgb("#ffffff").unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "#", "#FFF", "#FFFFF", "#FFFFFFF", "#GG0000", "+F0000", " #FF0000", "#ff00é"] {
            assert!(
                matches!(hex_to_rgb(bad), Err(ColorError::InvalidFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_distance() {
        assert_eq!(Rgb::BLACK.distance_squared(Rgb::WHITE), 3 * 255 * 255);
        assert_eq!(Rgb::new(3, 4, 0).distance(Rgb::BLACK), 5.0);
        assert_eq!(Rgb::new(10, 20, 30).distance_squared(Rgb::new(10, 20, 30)), 0);
    }

    #[test]
    fn test_packed() {
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).packed(), 0x123456);
    }
}
