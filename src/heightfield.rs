//! Elevation synthesis and relaxation
//!
//! Combines a fine and a broad noise field into one elevation signal per
//! disk cell, normalizes it against the extrema actually observed over the
//! domain, and applies a bounded number of slope-relaxation passes.

use rayon::prelude::*;

use crate::grid::{disk_cells, CellPos, HeightMap};
use crate::noise_field::NoiseSource;

/// Number of relaxation passes applied by [`smooth_heights`]. Two passes
/// shrink neighbor deltas; they do not chase a fixed point.
const RELAXATION_PASSES: usize = 2;

/// Synthesize the integer height field over the world disk.
///
/// Per cell: `combined = micro(x, z) + macro(x, z) * macro_influence`. The
/// combined signal is normalized against the minimum and maximum observed
/// across the whole disk, not an a-priori range: noise amplitude depends on
/// scale/octave/influence choices in ways that are hard to predict, and
/// normalizing against the observed extrema guarantees the full configured
/// height range is used regardless. A degenerate range (max == min) maps
/// every cell to `min_height`.
///
/// Sampling is a pure function of the noise fields, so cells are evaluated
/// in parallel; the reduction and the final mapping stay sequential and the
/// result is identical to a serial scan.
pub fn synthesize_heights(
    micro: &(impl NoiseSource + Sync),
    macro_field: &(impl NoiseSource + Sync),
    macro_influence: f64,
    radius: i32,
    min_height: i32,
    max_height: i32,
) -> HeightMap {
    let cells: Vec<CellPos> = disk_cells(radius).collect();

    let combined: Vec<f64> = cells
        .par_iter()
        .map(|cell| {
            let x = cell.x as f64;
            let z = cell.z as f64;
            micro.sample(x, z) + macro_field.sample(x, z) * macro_influence
        })
        .collect();

    // Global reduction: normalization cannot start until the whole domain
    // has been scanned.
    let mut min_combined = f64::MAX;
    let mut max_combined = f64::MIN;
    for &value in &combined {
        if value < min_combined {
            min_combined = value;
        }
        if value > max_combined {
            max_combined = value;
        }
    }

    let range = if max_combined > min_combined {
        max_combined - min_combined
    } else {
        // Degenerate field: force t = 0 everywhere instead of dividing by zero.
        1.0
    };

    let span = (max_height - min_height) as f64;
    let mut heights = HeightMap::new(radius);
    for (cell, value) in cells.into_iter().zip(combined) {
        let t = (value - min_combined) / range;
        let height = (t * span).floor() as i32 + min_height;
        heights.set(cell, height);
    }

    heights
}

/// Apply at most [`RELAXATION_PASSES`] slope-relaxation passes.
///
/// Each pass reads a snapshot of the previous pass only: for every cell
/// with at least one 4-connected neighbor in the map, the height is clamped
/// into `[min(neighbors) - 1, max(neighbors) + 1]` and floored at
/// `min_height`. Two passes reduce multi-step discontinuities; they do not
/// guarantee a global one-step invariant on disks of arbitrary radius.
pub fn smooth_heights(heights: &HeightMap, min_height: i32) -> HeightMap {
    let mut current = heights.clone();
    for _ in 0..RELAXATION_PASSES {
        current = relaxation_pass(&current, min_height);
    }
    current
}

fn relaxation_pass(snapshot: &HeightMap, min_height: i32) -> HeightMap {
    let mut next = HeightMap::new(snapshot.radius());

    for (cell, height) in snapshot.iter() {
        let neighbors = snapshot.neighbor_heights(cell);
        if neighbors.is_empty() {
            next.set(cell, height);
            continue;
        }

        let lo = neighbors.iter().min().copied().unwrap_or(height) - 1;
        let hi = neighbors.iter().max().copied().unwrap_or(height) + 1;
        let relaxed = height.clamp(lo, hi).max(min_height);
        next.set(cell, relaxed);
    }

    next
}
