//! Column voxelization
//!
//! Converts the smoothed height field into typed block columns: subsurface
//! fill below the surface, a patch-noise-selected top layer, and a water
//! table flooded per column below the configured threshold.

use crate::blocks::{BlockGrid, BlockPos, VOIDGRASS, VOIDSOIL, VOIDWATER};
use crate::grid::HeightMap;
use crate::noise_field::NoiseSource;

/// Patch values above this cutoff get the vegetated top layer. The exact
/// value is part of the artifact's compatibility contract.
const PATCH_VEGETATION_CUTOFF: f64 = -0.1;

/// Fill terrain columns into the block grid.
///
/// For a column of smoothed height `h`: voidsoil at `y = 0..h`, a top layer
/// at `y = h` chosen by thresholding the patch field, and voidwater at
/// `y = h+1..=water_threshold` when the column lies below the water table.
/// Each column floods independently of its surroundings.
pub fn fill_terrain(
    heights: &HeightMap,
    patch: &impl NoiseSource,
    water_threshold: i32,
    grid: &mut BlockGrid,
) {
    for (cell, height) in heights.iter() {
        for y in 0..height {
            grid.set(BlockPos::new(cell.x, y, cell.z), VOIDSOIL);
        }

        let top = if patch.sample(cell.x as f64, cell.z as f64) > PATCH_VEGETATION_CUTOFF {
            VOIDGRASS
        } else {
            VOIDSOIL
        };
        grid.set(BlockPos::new(cell.x, height, cell.z), top);

        if height < water_threshold {
            for y in height + 1..=water_threshold {
                grid.set(BlockPos::new(cell.x, y, cell.z), VOIDWATER);
            }
        }
    }
}
