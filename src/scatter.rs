//! Decorative entity scattering
//!
//! Places model entities on eligible land cells. A clustering noise field
//! biases the per-cell placement probability so objects form organic
//! clumps instead of uniform speckle; all random draws come from one
//! explicitly seeded stream consumed in fixed cell order.

use std::f64::consts::PI;
use std::path::Path;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::config::ModelDef;
use crate::grid::HeightMap;
use crate::noise_field::NoiseSource;

/// Cells closer than this to the rim never receive entities, keeping the
/// wall ring and its approach clear.
const INTERIOR_MARGIN: i32 = 5;

/// Orientation restricted to rotation about the vertical axis.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Rotation {
    /// Unit quaternion for a yaw angle: (0, sin θ/2, 0, cos θ/2).
    pub fn from_yaw(yaw: f64) -> Self {
        let half = yaw * 0.5;
        Self {
            x: 0.0,
            y: half.sin(),
            z: 0.0,
            w: half.cos(),
        }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }
}

/// Physics body description handed to the runtime.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RigidBodyOptions {
    #[serde(rename = "type")]
    pub kind: String,
    pub rotation: Rotation,
}

/// One placed decorative entity.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedEntity {
    /// World position; becomes the fixed-precision map key on serialization.
    #[serde(skip)]
    pub position: (f64, f64, f64),
    pub model_uri: String,
    pub name: String,
    pub model_scale: f64,
    pub opacity: f64,
    pub model_looped_animations: Vec<String>,
    pub rigid_body_options: RigidBodyOptions,
}

/// Entity placements in generation order.
///
/// Serialized as a JSON object keyed by two-decimal `"x,y,z"` strings; the
/// keys exist only at this boundary, positions stay numeric in memory.
#[derive(Clone, Debug, Default)]
pub struct EntityMap {
    entries: Vec<PlacedEntity>,
}

impl EntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entity: PlacedEntity) {
        self.entries.push(entity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedEntity> {
        self.entries.iter()
    }
}

impl Serialize for EntityMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entity in &self.entries {
            let (x, y, z) = entity.position;
            let key = format!("{x:.2},{y:.2},{z:.2}");
            map.serialize_entry(&key, entity)?;
        }
        map.end()
    }
}

/// Scatter entities over the land interior of the disk.
///
/// Eligible cells are land (height above the water threshold) and strictly
/// interior. Each eligible cell runs one Bernoulli trial with probability
/// `(clustering + 1) / 2 * density`; a placement then draws model, scale,
/// and yaw from the same stream. With an empty model list this is a no-op.
pub fn scatter_entities(
    heights: &HeightMap,
    clustering: &impl NoiseSource,
    models: &[ModelDef],
    density: f64,
    water_threshold: i32,
    rng: &mut ChaCha8Rng,
) -> EntityMap {
    let mut entities = EntityMap::new();
    if models.is_empty() {
        return entities;
    }

    let interior_limit = (heights.radius() - INTERIOR_MARGIN) as f64;

    for (cell, height) in heights.iter() {
        if height <= water_threshold {
            continue;
        }
        if cell.distance_from_origin() >= interior_limit {
            continue;
        }

        let cluster = clustering.sample(cell.x as f64, cell.z as f64);
        let probability = ((cluster + 1.0) / 2.0 * density).clamp(0.0, 1.0);
        if rng.gen::<f64>() >= probability {
            continue;
        }

        let model = &models[rng.gen_range(0..models.len())];
        let scale = rng.gen_range(model.min_scale..=model.max_scale);
        let yaw = rng.gen_range(0.0..2.0 * PI);

        // Unit-height models with a centered pivot: scale/2 above the block
        // top rests the rendered base exactly on the surface.
        let position = (
            cell.x as f64 + 0.5,
            height as f64 + 1.0 + scale / 2.0,
            cell.z as f64 + 0.5,
        );

        entities.push(PlacedEntity {
            position,
            model_uri: model.model_uri.clone(),
            name: display_name(model),
            model_scale: scale,
            opacity: 1.0,
            model_looped_animations: model.animations.clone(),
            rigid_body_options: RigidBodyOptions {
                kind: "fixed".to_string(),
                rotation: Rotation::from_yaw(yaw),
            },
        });
    }

    entities
}

/// Display name for a placement: the definition's name, or the last path
/// segment of its model reference stripped of the file-type suffix.
fn display_name(model: &ModelDef) -> String {
    if let Some(name) = &model.name {
        return name.clone();
    }
    Path::new(&model.model_uri)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| model.model_uri.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{disk_cells, CellPos};
    use crate::noise_field::ConstNoise;
    use rand::SeedableRng;

    fn model(uri: &str, min_scale: f64, max_scale: f64) -> ModelDef {
        ModelDef {
            model_uri: uri.to_string(),
            name: None,
            min_scale,
            max_scale,
            animations: vec![],
        }
    }

    fn flat_heights(radius: i32, height: i32) -> HeightMap {
        let mut map = HeightMap::new(radius);
        for cell in disk_cells(radius) {
            map.set(cell, height);
        }
        map
    }

    #[test]
    fn test_empty_model_list_is_noop() {
        let heights = flat_heights(15, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let entities = scatter_entities(&heights, &ConstNoise(1.0), &[], 1.0, 0, &mut rng);
        assert!(entities.is_empty());
    }

    #[test]
    fn test_placement_math() {
        // Pinned scale bounds force scale == 2.0; terrain height 3 puts the
        // model base at y = 3 + 1 + 1.0 and the footprint center at +0.5.
        let heights = flat_heights(15, 3);
        let models = [model("models/environment/void-tree.gltf", 2.0, 2.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let entities =
            scatter_entities(&heights, &ConstNoise(1.0), &models, 1.0, 0, &mut rng);

        assert!(!entities.is_empty());
        for entity in entities.iter() {
            let (x, y, z) = entity.position;
            assert_eq!(entity.model_scale, 2.0);
            assert_eq!(y, 5.0);
            assert_eq!(x - x.floor(), 0.5);
            assert_eq!(z - z.floor(), 0.5);
        }
    }

    #[test]
    fn test_full_density_covers_every_eligible_cell() {
        // density 1 and clustering +1 give probability 1: exactly the land
        // interior receives an entity.
        let radius = 12;
        let heights = flat_heights(radius, 4);
        let models = [model("models/a.gltf", 1.0, 1.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let entities =
            scatter_entities(&heights, &ConstNoise(1.0), &models, 1.0, 0, &mut rng);

        let eligible = disk_cells(radius)
            .filter(|c| c.distance_from_origin() < (radius - INTERIOR_MARGIN) as f64)
            .count();
        assert_eq!(entities.len(), eligible);

        for entity in entities.iter() {
            let (x, _, z) = entity.position;
            let cell = CellPos::new(x.floor() as i32, z.floor() as i32);
            assert!(cell.distance_from_origin() < (radius - INTERIOR_MARGIN) as f64);
        }
    }

    #[test]
    fn test_water_cells_are_skipped() {
        // height == threshold is not land, so nothing places even at full
        // density.
        let heights = flat_heights(12, 2);
        let models = [model("models/a.gltf", 1.0, 1.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let entities =
            scatter_entities(&heights, &ConstNoise(1.0), &models, 1.0, 2, &mut rng);
        assert!(entities.is_empty());
    }

    #[test]
    fn test_zero_cluster_noise_suppresses_placement() {
        // clustering -1 maps to probability 0 regardless of density.
        let heights = flat_heights(12, 4);
        let models = [model("models/a.gltf", 1.0, 1.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let entities =
            scatter_entities(&heights, &ConstNoise(-1.0), &models, 1.0, 0, &mut rng);
        assert!(entities.is_empty());
    }

    #[test]
    fn test_rotation_quaternions_are_unit_vertical() {
        let heights = flat_heights(14, 4);
        let models = [model("models/a.gltf", 0.5, 1.5)];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let entities =
            scatter_entities(&heights, &ConstNoise(1.0), &models, 1.0, 0, &mut rng);

        assert!(!entities.is_empty());
        for entity in entities.iter() {
            let rotation = &entity.rigid_body_options.rotation;
            assert_eq!(rotation.x, 0.0);
            assert_eq!(rotation.z, 0.0);
            assert!((rotation.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scales_stay_within_model_bounds() {
        let heights = flat_heights(14, 4);
        let models = [
            model("models/a.gltf", 0.5, 1.5),
            model("models/b.gltf", 2.0, 3.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let entities =
            scatter_entities(&heights, &ConstNoise(1.0), &models, 1.0, 0, &mut rng);

        assert!(!entities.is_empty());
        for entity in entities.iter() {
            let bounds = if entity.model_uri == "models/a.gltf" {
                0.5..=1.5
            } else {
                2.0..=3.0
            };
            assert!(bounds.contains(&entity.model_scale));
        }
    }

    #[test]
    fn test_display_name_derivation() {
        let named = ModelDef {
            name: Some("Obsidian Spire".to_string()),
            ..model("models/environment/spire.gltf", 1.0, 1.0)
        };
        assert_eq!(display_name(&named), "Obsidian Spire");

        let derived = model("models/environment/void-tree.gltf", 1.0, 1.0);
        assert_eq!(display_name(&derived), "void-tree");

        let bare = model("void-shrub", 1.0, 1.0);
        assert_eq!(display_name(&bare), "void-shrub");
    }

    #[test]
    fn test_entity_map_serialization_keys() {
        let mut entities = EntityMap::new();
        entities.push(PlacedEntity {
            position: (2.5, 5.0, -3.5),
            model_uri: "models/a.gltf".to_string(),
            name: "a".to_string(),
            model_scale: 1.0,
            opacity: 1.0,
            model_looped_animations: vec!["sway".to_string()],
            rigid_body_options: RigidBodyOptions {
                kind: "fixed".to_string(),
                rotation: Rotation::from_yaw(0.0),
            },
        });

        let value = serde_json::to_value(&entities).unwrap();
        let entry = &value["2.50,5.00,-3.50"];
        assert_eq!(entry["modelUri"], "models/a.gltf");
        assert_eq!(entry["modelScale"], 1.0);
        assert_eq!(entry["opacity"], 1.0);
        assert_eq!(entry["modelLoopedAnimations"][0], "sway");
        assert_eq!(entry["rigidBodyOptions"]["type"], "fixed");
        assert_eq!(entry["rigidBodyOptions"]["rotation"]["w"], 1.0);
    }
}
