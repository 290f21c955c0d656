//! Full generation pipeline
//!
//! Runs the stages in their fixed order: elevation synthesis, relaxation,
//! voxelization, boundary wall, ceiling panels, apex platform, entity
//! scattering, assembly. Each stage consumes the previous stage's complete
//! output; nothing streams.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::artifact::MapArtifact;
use crate::blocks::{block_registry, BlockGrid};
use crate::config::{MapConfig, ModelDef};
use crate::dome;
use crate::error::GeneratorError;
use crate::grid::HeightMap;
use crate::heightfield::{smooth_heights, synthesize_heights};
use crate::noise_field::NoiseField;
use crate::scatter::{scatter_entities, EntityMap};
use crate::seeds::GeneratorSeeds;
use crate::voxel::fill_terrain;

/// All generated map data bundled together.
pub struct GeneratedMap {
    /// Seeds used for generation (allows recreation)
    pub seeds: GeneratorSeeds,
    /// Smoothed terrain heights, kept for diagnostics and previews
    pub heights: HeightMap,
    /// The persistable output
    pub artifact: MapArtifact,
}

impl GeneratedMap {
    /// Convenience accessor for the master seed
    pub fn seed(&self) -> u64 {
        self.seeds.master
    }
}

/// Generate a complete map from validated parameters and a master seed.
///
/// The height field depends only on the deterministic noise fields derived
/// from the master seed; the panel and entity streams never feed back into
/// it, so terrain is reproducible independently of the structural and
/// scattering randomness.
pub fn generate_map(
    config: &MapConfig,
    models: &[ModelDef],
    master_seed: u64,
) -> Result<GeneratedMap, GeneratorError> {
    config.validate()?;
    for model in models {
        model.validate()?;
    }

    let seeds = GeneratorSeeds::from_master(master_seed);

    // Elevation: fine + broad fields, observed-extrema normalization, then
    // the bounded relaxation passes.
    let micro = NoiseField::with_shape(
        seeds.elevation_micro,
        config.micro_scale,
        config.micro_octaves,
        config.persistence,
        config.lacunarity,
    );
    let macro_field = NoiseField::with_shape(
        seeds.elevation_macro,
        config.macro_scale,
        config.macro_octaves,
        config.persistence,
        config.lacunarity,
    );
    let raw = synthesize_heights(
        &micro,
        &macro_field,
        config.macro_influence,
        config.radius,
        config.min_height,
        config.max_height,
    );
    let heights = smooth_heights(&raw, config.min_height);

    // Terrain columns. Patch and clustering are single-octave fields.
    let mut blocks = BlockGrid::new();
    let patch = NoiseField::new(seeds.surface_patch, config.patch_scale, 1);
    fill_terrain(&heights, &patch, config.water_threshold, &mut blocks);

    // Structural passes write after terrain and take precedence where they
    // coincide with it.
    dome::build_boundary_wall(&heights, config, &mut blocks);
    let mut panel_rng = ChaCha8Rng::seed_from_u64(seeds.panels);
    dome::build_ceiling_panels(config, &mut panel_rng, &mut blocks);
    dome::build_apex_platform(config, &mut blocks);

    let entities = if models.is_empty() {
        EntityMap::new()
    } else {
        let clustering = NoiseField::new(seeds.clustering, config.clustering_scale, 1);
        let mut entity_rng = ChaCha8Rng::seed_from_u64(seeds.entities);
        scatter_entities(
            &heights,
            &clustering,
            models,
            config.placement_density,
            config.water_threshold,
            &mut entity_rng,
        )
    };

    let artifact = MapArtifact::new(block_registry(), blocks, entities);

    Ok(GeneratedMap {
        seeds,
        heights,
        artifact,
    })
}
