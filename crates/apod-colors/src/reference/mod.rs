//! The fixed reference ("filterable") palette.
//!
//! Dominant colors are arbitrary, which makes them useless for filtering
//! pictures by color. Each dominant color is therefore also mapped onto a
//! small fixed palette generated from an HSV grid plus a grayscale ramp.
//!
//! # Layout
//!
//! | Index   | Source |
//! |---------|--------|
//! | 0..48   | 12 hues (`360, 330, ..., 30` degrees) x 4 tones |
//! | 48..54  | `#000000 #333333 #666666 #999999 #CCCCCC #FFFFFF` |
//!
//! Tone `k` (0..4) of a hue uses saturation and value `(100 - 25k) / 100`,
//! so every hue runs from its pure color down to a dark, muted shade.
//! Generation order is the classification tie-break order.

mod chart;

use std::sync::OnceLock;

use crate::color::{hsv_to_rgb, Rgb};

pub use chart::{CELL_SIZE, CHART_HEIGHT, CHART_WIDTH};

/// Number of hue rows in the grid.
pub const HUE_STEPS: usize = 12;

/// Number of saturation/value tones per hue.
pub const TONE_STEPS: usize = 4;

/// Grayscale ramp appended after the HSV grid.
pub const GRAYSCALE: [Rgb; 6] = [
    Rgb::gray(0x00),
    Rgb::gray(0x33),
    Rgb::gray(0x66),
    Rgb::gray(0x99),
    Rgb::gray(0xCC),
    Rgb::gray(0xFF),
];

/// Total number of entries in the built palette.
pub const REFERENCE_LEN: usize = HUE_STEPS * TONE_STEPS + GRAYSCALE.len();

static SHARED: OnceLock<ReferencePalette> = OnceLock::new();

/// An ordered, immutable set of classification targets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferencePalette {
    colors: Vec<Rgb>,
}

impl ReferencePalette {
    /// Generate the standard 54-entry palette.
    ///
    /// Pure and deterministic; prefer [`ReferencePalette::shared`] unless a
    /// private copy is needed.
    pub fn build() -> Self {
        let mut colors = Vec::with_capacity(REFERENCE_LEN);

        for x in 0..HUE_STEPS {
            let hue = 360.0 - 30.0 * x as f64;
            colors.extend((0..TONE_STEPS).map(|k| {
                let level = tone_level(k);
                hsv_to_rgb(hue, level, level)
            }));
        }
        colors.extend_from_slice(&GRAYSCALE);

        Self { colors }
    }

    /// The process-wide palette, built on first use.
    ///
    /// Concurrent first callers block until the single build finishes and
    /// all of them get the same instance.
    pub fn shared() -> &'static ReferencePalette {
        SHARED.get_or_init(|| {
            let palette = Self::build();
            tracing::info!(colors = palette.len(), "Built reference palette");
            palette
        })
    }

    /// Wrap an arbitrary color list. Order is kept as the tie-break order.
    pub fn from_colors(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at a palette index.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<Rgb> {
        self.colors.get(idx).copied()
    }

    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }

    /// Find the entry closest to `color` in RGB space.
    ///
    /// Linear scan with a strict `<`, so among equidistant entries the one
    /// generated first wins. Returns `None` for an empty palette.
    pub fn nearest(&self, color: Rgb) -> Option<(usize, Rgb)> {
        let mut best: Option<(usize, u32)> = None;

        for (i, &candidate) in self.colors.iter().enumerate() {
            let dist = color.distance_squared(candidate);
            if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                best = Some((i, dist));
                if dist == 0 {
                    break;
                }
            }
        }

        best.map(|(i, _)| (i, self.colors[i]))
    }
}

/// Saturation and value shared by tone `k`.
#[inline]
fn tone_level(k: usize) -> f64 {
    (100 - 25 * k as i32) as f64 / 100.0
}
