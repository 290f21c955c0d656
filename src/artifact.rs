//! Final map artifact and persistence
//!
//! Pure aggregation of the three outputs plus the single write at the end
//! of a run. Serialization happens fully in memory before the output file
//! is created, so a failed run leaves no partial artifact behind.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::blocks::{BlockGrid, BlockType};
use crate::error::GeneratorError;
use crate::scatter::EntityMap;

/// The complete generated map. Immutable once produced; written once.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapArtifact {
    pub block_types: Vec<BlockType>,
    pub blocks: BlockGrid,
    pub entities: EntityMap,
}

impl MapArtifact {
    /// Bundle the registry, block grid, and entity map. No validation and
    /// no computation; earlier stages already guarantee their invariants.
    pub fn new(block_types: Vec<BlockType>, blocks: BlockGrid, entities: EntityMap) -> Self {
        Self {
            block_types,
            blocks,
            entities,
        }
    }

    /// Write the artifact to disk as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), GeneratorError> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Serialize to a JSON string without touching the filesystem.
    pub fn to_json(&self) -> Result<String, GeneratorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{block_registry, BlockPos, VOIDGRASS};
    use crate::scatter::{PlacedEntity, RigidBodyOptions, Rotation};

    #[test]
    fn test_artifact_top_level_shape() {
        let mut blocks = BlockGrid::new();
        blocks.set(BlockPos::new(0, 3, 0), VOIDGRASS);

        let mut entities = EntityMap::new();
        entities.push(PlacedEntity {
            position: (0.5, 4.5, 0.5),
            model_uri: "models/a.gltf".to_string(),
            name: "a".to_string(),
            model_scale: 1.0,
            opacity: 1.0,
            model_looped_animations: vec![],
            rigid_body_options: RigidBodyOptions {
                kind: "fixed".to_string(),
                rotation: Rotation::from_yaw(0.0),
            },
        });

        let artifact = MapArtifact::new(block_registry(), blocks, entities);
        let value: serde_json::Value =
            serde_json::from_str(&artifact.to_json().unwrap()).unwrap();

        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object.contains_key("blockTypes"));
        assert!(object.contains_key("blocks"));
        assert!(object.contains_key("entities"));

        assert_eq!(value["blockTypes"].as_array().unwrap().len(), 4);
        assert_eq!(value["blocks"]["0,3,0"], 2);
        assert!(value["entities"]["0.50,4.50,0.50"].is_object());
    }
}
