//! Boundary wall, ceiling panels, apex platform
//!
//! The structural passes enclosing the terrain disk. The wall and apex are
//! deterministic; panel placement draws from an explicitly seeded stream so
//! identical seeds reproduce identical ceilings.

use std::f64::consts::PI;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::blocks::{BlockGrid, BlockPos, SHADOWROCK};
use crate::config::MapConfig;
use crate::grid::{disk_cells, CellPos, HeightMap};

/// Footprint radius of the apex platform.
const APEX_RADIUS: i32 = 5;

/// Vertical thickness of a ceiling panel (rows below its dome elevation).
const PANEL_THICKNESS: i32 = 2;

/// Ring width of the boundary wall measured from the disk rim.
const WALL_RING: i32 = 2;

/// Ceiling elevation of the hemispherical vault at a given distance from
/// the world center. The radicand is clamped at zero so distances beyond
/// the radius project to the vault base instead of a domain error.
pub fn dome_ceiling_y(distance: f64, config: &MapConfig) -> i32 {
    let t = 1.0 - (distance / config.radius as f64).powi(2);
    (config.dome_height as f64 * t.max(0.0).sqrt()) as i32 + config.max_height
}

/// Lowest y a panel voxel may occupy: panels never reach down into the
/// terrain or the boundary wall.
fn panel_skip_threshold(config: &MapConfig) -> i32 {
    config.max_height + config.wall_height + config.skip_rows
}

/// Write the boundary wall: every rim column (distance > radius - 2) gets a
/// fixed-height shadowrock band directly above its terrain surface.
pub fn build_boundary_wall(heights: &HeightMap, config: &MapConfig, grid: &mut BlockGrid) {
    for cell in disk_cells(config.radius) {
        if cell.distance_from_origin() <= (config.radius - WALL_RING) as f64 {
            continue;
        }
        let terrain_height = heights.get(cell).unwrap_or(0);
        for y in terrain_height + 1..=terrain_height + config.wall_height {
            grid.set(BlockPos::new(cell.x, y, cell.z), SHADOWROCK);
        }
    }
}

/// Scatter ceiling panels over the vault.
///
/// Panel count, polar center, and footprint radius are sequential draws
/// from the panel stream; reordering the draws would change which panel
/// receives which sample.
pub fn build_ceiling_panels(config: &MapConfig, rng: &mut ChaCha8Rng, grid: &mut BlockGrid) {
    let radius = config.radius as f64;
    let panel_count = rng.gen_range(config.min_panels..=config.max_panels);

    for _ in 0..panel_count {
        let angle = rng.gen_range(0.0..2.0 * PI);
        let dist = rng.gen_range(radius * 0.3..=radius * 0.9);
        let center_x = (dist * angle.cos()) as i32;
        let center_z = (dist * angle.sin()) as i32;
        let panel_radius = rng.gen_range(config.min_panel_size..=config.max_panel_size);

        write_panel(center_x, center_z, panel_radius, config, grid);
    }
}

/// Write one panel: a thin shadowrock band following the vault, clipped to
/// the world disk and to the skip threshold per voxel.
fn write_panel(
    center_x: i32,
    center_z: i32,
    panel_radius: i32,
    config: &MapConfig,
    grid: &mut BlockGrid,
) {
    let skip_threshold = panel_skip_threshold(config);

    for dx in -panel_radius..=panel_radius {
        for dz in -panel_radius..=panel_radius {
            let x = center_x + dx;
            let z = center_z + dz;
            let world_distance = CellPos::new(x, z).distance_from_origin();
            let local_distance = ((dx * dx + dz * dz) as f64).sqrt();
            if world_distance > config.radius as f64 || local_distance > panel_radius as f64 {
                continue;
            }

            let dome_y = dome_ceiling_y(world_distance, config);
            for y in dome_y - PANEL_THICKNESS..=dome_y {
                // Guarded per voxel, not per panel: the outer rows of a
                // panel can dip below the threshold while its center clears it.
                if y >= skip_threshold {
                    grid.set(BlockPos::new(x, y, z), SHADOWROCK);
                }
            }
        }
    }
}

/// Write the apex platform: a fixed-radius shadowrock disk at the vault
/// top, centered on the origin, independent of terrain.
pub fn build_apex_platform(config: &MapConfig, grid: &mut BlockGrid) {
    let apex_y = config.dome_height + config.max_height;
    for dx in -APEX_RADIUS..=APEX_RADIUS {
        for dz in -APEX_RADIUS..=APEX_RADIUS {
            if ((dx * dx + dz * dz) as f64).sqrt() <= APEX_RADIUS as f64 {
                grid.set(BlockPos::new(dx, apex_y, dz), SHADOWROCK);
            }
        }
    }
}
