//! HSV <-> RGB conversion.

use palette::{encoding, FromColor, Hsv, Srgb};

use super::Rgb;

type HsvF64 = Hsv<encoding::Srgb, f64>;

/// Convert HSV to an 8-bit color.
///
/// `h` is in degrees and wraps (so `360.0` is red, same as `0.0`); `s` and
/// `v` are clamped to `0.0..=1.0`. Each channel is scaled by 255, rounded to
/// the nearest integer and clamped.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let hsv = HsvF64::new(h, s.clamp(0.0, 1.0), v.clamp(0.0, 1.0));
    let rgb = Srgb::<f64>::from_color(hsv).into_format::<u8>();
    Rgb::new(rgb.red, rgb.green, rgb.blue)
}

/// Convert an 8-bit color to HSV (`h` in `0.0..360.0`, `s`/`v` in `0.0..=1.0`).
///
/// Grays report a hue of `0.0`.
pub fn rgb_to_hsv(color: Rgb) -> (f64, f64, f64) {
    let rgb = Srgb::new(color.r, color.g, color.b).into_format::<f64>();
    let hsv = HsvF64::from_color(rgb);
    (hsv.hue.into_positive_degrees(), hsv.saturation, hsv.value)
}
