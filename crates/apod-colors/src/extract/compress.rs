//! Greedy merging of perceptually close colors.

use palette::{IntoColor, Lab, Srgb};
use std::collections::HashMap;

use super::{sort_by_prominence, Swatch};
use crate::color::Rgb;

/// CIE76 color difference (Euclidean distance in CIE-Lab, D65).
pub fn lab_distance(a: Rgb, b: Rgb) -> f32 {
    distance(to_lab(a), to_lab(b))
}

/// Fold each swatch into the first more prominent surviving swatch closer
/// than `tolerance`.
///
/// Input must already be sorted by prominence. Surviving swatches keep their
/// own color and absorb the counts of everything merged into them; the
/// result is re-sorted because absorbed counts can change the ranking.
///
/// Survivors are bucketed in a Lab grid with cells `tolerance` wide, so each
/// lookup only visits the 27 cells around the color.
pub(super) fn merge_similar(swatches: Vec<Swatch>, tolerance: u32) -> Vec<Swatch> {
    if tolerance == 0 || swatches.len() < 2 {
        return swatches;
    }

    let mut grid = SurvivorGrid::new(tolerance as f32);
    let mut survivors: Vec<Swatch> = Vec::new();

    for swatch in swatches {
        let lab = to_lab(swatch.color);
        match grid.first_within(lab) {
            Some(idx) => survivors[idx].count += swatch.count,
            None => {
                grid.insert(lab, survivors.len());
                survivors.push(swatch);
            }
        }
    }

    sort_by_prominence(&mut survivors);
    survivors
}

type Cell = (i32, i32, i32);

/// Surviving colors bucketed by Lab cell, each bucket in survivor order.
struct SurvivorGrid {
    tolerance: f32,
    cells: HashMap<Cell, Vec<(usize, Lab)>>,
}

impl SurvivorGrid {
    fn new(tolerance: f32) -> Self {
        Self {
            tolerance,
            cells: HashMap::new(),
        }
    }

    fn cell(&self, lab: Lab) -> Cell {
        (
            (lab.l / self.tolerance).floor() as i32,
            (lab.a / self.tolerance).floor() as i32,
            (lab.b / self.tolerance).floor() as i32,
        )
    }

    fn insert(&mut self, lab: Lab, idx: usize) {
        let cell = self.cell(lab);
        self.cells.entry(cell).or_default().push((idx, lab));
    }

    /// Lowest-index survivor closer than the tolerance.
    ///
    /// Anything closer than one cell width is in the same or an adjacent
    /// cell on every axis.
    fn first_within(&self, lab: Lab) -> Option<usize> {
        let (cl, ca, cb) = self.cell(lab);
        let mut best: Option<usize> = None;

        for dl in -1..=1 {
            for da in -1..=1 {
                for db in -1..=1 {
                    let Some(bucket) = self.cells.get(&(cl + dl, ca + da, cb + db)) else {
                        continue;
                    };
                    // Buckets are in survivor order: the first hit is the
                    // lowest index this bucket can offer.
                    let hit = bucket
                        .iter()
                        .take_while(|(idx, _)| best.map_or(true, |b| *idx < b))
                        .find(|(_, other)| distance(lab, *other) < self.tolerance);
                    if let Some(&(idx, _)) = hit {
                        best = Some(idx);
                    }
                }
            }
        }
        best
    }
}

fn to_lab(color: Rgb) -> Lab {
    Srgb::<u8>::new(color.r, color.g, color.b)
        .into_linear()
        .into_color()
}

#[inline]
fn distance(a: Lab, b: Lab) -> f32 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (dl * dl + da * da + db * db).sqrt()
}
