//! Top-down PNG preview of a generated map
//!
//! Diagnostic rendering only; the artifact itself never depends on this
//! module. Terrain heights use a warm-to-cool gradient, flooded columns a
//! fixed water color, the wall ring a fixed rock color.

use image::{ImageBuffer, Rgb, RgbImage};

use crate::config::MapConfig;
use crate::grid::HeightMap;

const BACKGROUND: [u8; 3] = [12, 10, 18];
const WATER: [u8; 3] = [48, 76, 140];
const WALL: [u8; 3] = [70, 64, 78];

/// Render the height field as a top-down PNG centered on the disk.
pub fn export_preview(
    heights: &HeightMap,
    config: &MapConfig,
    path: &str,
) -> Result<(), image::ImageError> {
    let radius = config.radius;
    let size = (2 * radius + 1) as u32;
    let mut img: RgbImage = ImageBuffer::from_pixel(size, size, Rgb(BACKGROUND));

    let span = (config.max_height - config.min_height).max(1) as f32;

    for (cell, height) in heights.iter() {
        let px = (cell.x + radius) as u32;
        let pz = (cell.z + radius) as u32;

        let color = if cell.distance_from_origin() > (radius - 2) as f64 {
            WALL
        } else if height < config.water_threshold {
            WATER
        } else {
            let t = (height - config.min_height) as f32 / span;
            elevation_color(t)
        };

        img.put_pixel(px, pz, Rgb(color));
    }

    img.save(path)
}

/// Elevation gradient: dark lowland greens rising into pale highland grays.
/// Input is expected normalized to 0.0-1.0.
fn elevation_color(t: f32) -> [u8; 3] {
    let stops: [[f32; 3]; 5] = [
        [0.13, 0.29, 0.18], // Deep lowland
        [0.24, 0.45, 0.22], // Meadow
        [0.47, 0.53, 0.30], // Upland
        [0.62, 0.58, 0.48], // Scree
        [0.86, 0.86, 0.88], // Summit
    ];

    let t = t.clamp(0.0, 1.0) * (stops.len() - 1) as f32;
    let idx = (t as usize).min(stops.len() - 2);
    let frac = t - idx as f32;

    let a = stops[idx];
    let b = stops[idx + 1];
    [
        ((a[0] + (b[0] - a[0]) * frac) * 255.0) as u8,
        ((a[1] + (b[1] - a[1]) * frac) * 255.0) as u8,
        ((a[2] + (b[2] - a[2]) * frac) * 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevation_gradient_endpoints() {
        assert_eq!(elevation_color(0.0), [33, 73, 45]);
        assert_eq!(elevation_color(1.0), [219, 219, 224]);

        // Out-of-range inputs clamp instead of indexing out of bounds.
        assert_eq!(elevation_color(-1.0), elevation_color(0.0));
        assert_eq!(elevation_color(2.0), elevation_color(1.0));
    }

    #[test]
    fn test_preview_pixel_mapping_stays_in_bounds() {
        let config = MapConfig {
            radius: 4,
            ..MapConfig::default()
        };
        let size = 2 * config.radius + 1;
        for cell in crate::grid::disk_cells(config.radius) {
            let px = cell.x + config.radius;
            let pz = cell.z + config.radius;
            assert!((0..size).contains(&px));
            assert!((0..size).contains(&pz));
        }
    }
}
