//! Seed management for map generation
//!
//! Provides separate seeds for each generation system, allowing fine-grained control
//! over which aspects of map generation to vary or keep constant.

use std::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;

/// Seeds for all map generation systems.
///
/// Each system gets its own seed, derived from a master seed by default.
/// The noise-field seeds feed deterministic coherent-noise samplers only;
/// the panel and entity seeds feed the random streams of the structural and
/// scattering stages, so the height field never depends on them.
#[derive(Clone, Debug)]
pub struct GeneratorSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Fine elevation noise field
    pub elevation_micro: u64,
    /// Broad elevation noise field
    pub elevation_macro: u64,
    /// Surface patch noise field (vegetated vs bare top layer)
    pub surface_patch: u64,
    /// Entity placement clustering noise field
    pub clustering: u64,
    /// Ceiling panel placement stream (count, polar positions, footprints)
    pub panels: u64,
    /// Entity scattering stream (trials, model picks, scale, yaw)
    pub entities: u64,
}

impl GeneratorSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            elevation_micro: derive_seed(master, "elevation_micro"),
            elevation_macro: derive_seed(master, "elevation_macro"),
            surface_patch: derive_seed(master, "surface_patch"),
            clustering: derive_seed(master, "clustering"),
            panels: derive_seed(master, "panels"),
            entities: derive_seed(master, "entities"),
        }
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(master: u64) -> GeneratorSeedsBuilder {
        GeneratorSeedsBuilder::new(master)
    }
}

impl Default for GeneratorSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

/// Builder for customizing individual seeds while deriving others from master
pub struct GeneratorSeedsBuilder {
    seeds: GeneratorSeeds,
}

impl GeneratorSeedsBuilder {
    pub fn new(master: u64) -> Self {
        Self {
            seeds: GeneratorSeeds::from_master(master),
        }
    }

    /// Override the fine elevation seed
    pub fn elevation_micro(mut self, seed: u64) -> Self {
        self.seeds.elevation_micro = seed;
        self
    }

    /// Override the broad elevation seed
    pub fn elevation_macro(mut self, seed: u64) -> Self {
        self.seeds.elevation_macro = seed;
        self
    }

    /// Override the surface patch seed
    pub fn surface_patch(mut self, seed: u64) -> Self {
        self.seeds.surface_patch = seed;
        self
    }

    /// Override the clustering seed
    pub fn clustering(mut self, seed: u64) -> Self {
        self.seeds.clustering = seed;
        self
    }

    /// Override the panel stream seed
    pub fn panels(mut self, seed: u64) -> Self {
        self.seeds.panels = seed;
        self
    }

    /// Override the entity stream seed
    pub fn entities(mut self, seed: u64) -> Self {
        self.seeds.entities = seed;
        self
    }

    /// Build the final GeneratorSeeds
    pub fn build(self) -> GeneratorSeeds {
        self.seeds
    }
}

/// Derive a sub-seed from a master seed and a system name.
/// Uses hashing to ensure different systems get different but deterministic seeds.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

/// Display format for seeds (useful for sharing map configurations)
impl std::fmt::Display for GeneratorSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GeneratorSeeds {{ master: {}, elevation_micro: {}, elevation_macro: {}, \
             surface_patch: {}, clustering: {}, panels: {}, entities: {} }}",
            self.master,
            self.elevation_micro,
            self.elevation_macro,
            self.surface_patch,
            self.clustering,
            self.panels,
            self.entities,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        let seeds1 = GeneratorSeeds::from_master(12345);
        let seeds2 = GeneratorSeeds::from_master(12345);

        assert_eq!(seeds1.elevation_micro, seeds2.elevation_micro);
        assert_eq!(seeds1.elevation_macro, seeds2.elevation_macro);
        assert_eq!(seeds1.panels, seeds2.panels);
        assert_eq!(seeds1.entities, seeds2.entities);
    }

    #[test]
    fn test_different_systems_get_different_seeds() {
        let seeds = GeneratorSeeds::from_master(12345);

        // Each system should get a unique seed
        assert_ne!(seeds.elevation_micro, seeds.elevation_macro);
        assert_ne!(seeds.elevation_macro, seeds.surface_patch);
        assert_ne!(seeds.surface_patch, seeds.clustering);
        assert_ne!(seeds.panels, seeds.entities);
    }

    #[test]
    fn test_builder_override() {
        let seeds = GeneratorSeeds::builder(12345)
            .panels(99999)
            .build();

        // Panel stream should be overridden
        assert_eq!(seeds.panels, 99999);

        // Others should be derived from master
        let default_seeds = GeneratorSeeds::from_master(12345);
        assert_eq!(seeds.elevation_micro, default_seeds.elevation_micro);
        assert_eq!(seeds.entities, default_seeds.entities);
    }
}
