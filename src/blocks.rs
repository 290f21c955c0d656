//! Block type registry and sparse voxel grid
//!
//! Voxel positions are numeric structs throughout the pipeline; the
//! `"x,y,z"` string keys consumed by the runtime exist only in the
//! `Serialize` impl at the persistence boundary.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Subsurface fill and bare top layer.
pub const VOIDSOIL: u32 = 1;
/// Vegetated top layer.
pub const VOIDGRASS: u32 = 2;
/// Boundary wall, ceiling panels, apex platform.
pub const SHADOWROCK: u32 = 3;
/// Water table infill.
pub const VOIDWATER: u32 = 4;

/// Immutable registry entry. Created once at generation start, never mutated.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockType {
    pub id: u32,
    pub name: String,
    pub texture_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_liquid: Option<bool>,
}

impl BlockType {
    fn solid(id: u32, name: &str, texture_uri: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            texture_uri: texture_uri.to_string(),
            is_liquid: None,
        }
    }

    fn liquid(id: u32, name: &str, texture_uri: &str) -> Self {
        Self {
            is_liquid: Some(true),
            ..Self::solid(id, name, texture_uri)
        }
    }
}

/// The fixed block palette of the domed arena. Texture references are the
/// runtime's asset paths and must match it verbatim.
pub fn block_registry() -> Vec<BlockType> {
    vec![
        BlockType::solid(VOIDSOIL, "voidsoil", "blocks/voidsoil.png"),
        BlockType::solid(VOIDGRASS, "voidgrass", "blocks/voidgrass"),
        BlockType::solid(SHADOWROCK, "shadowrock", "blocks/shadowrock.png"),
        BlockType::liquid(VOIDWATER, "voidwater", "blocks/voidwater.png"),
    ]
}

/// Integer voxel coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Sparse voxel grid: only occupied positions are present, air is implicit.
///
/// Writes to an occupied position replace it (last write wins), which is how
/// the dome stage intentionally overwrites terrain where panels coincide
/// with it. Ordered keys keep serialization byte-stable across runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockGrid {
    blocks: BTreeMap<BlockPos, u32>,
}

impl BlockGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, pos: BlockPos, block_id: u32) {
        self.blocks.insert(pos, block_id);
    }

    pub fn get(&self, pos: BlockPos) -> Option<u32> {
        self.blocks.get(&pos).copied()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate occupied voxels in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, u32)> + '_ {
        self.blocks.iter().map(|(pos, id)| (*pos, *id))
    }
}

impl Serialize for BlockGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.blocks.len()))?;
        for (pos, id) in &self.blocks {
            let key = format!("{},{},{}", pos.x, pos.y, pos.z);
            map.serialize_entry(&key, id)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_palette() {
        let registry = block_registry();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry[0].id, VOIDSOIL);
        assert_eq!(registry[3].name, "voidwater");
        assert_eq!(registry[3].is_liquid, Some(true));
        assert!(registry[..3].iter().all(|b| b.is_liquid.is_none()));
    }

    #[test]
    fn test_last_write_wins_keeps_keys_unique() {
        let mut grid = BlockGrid::new();
        let pos = BlockPos::new(2, 5, -3);
        grid.set(pos, VOIDGRASS);
        grid.set(pos, SHADOWROCK);

        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(pos), Some(SHADOWROCK));
    }

    #[test]
    fn test_serializes_to_comma_keys() {
        let mut grid = BlockGrid::new();
        grid.set(BlockPos::new(-1, 0, 7), VOIDSOIL);
        grid.set(BlockPos::new(3, 12, -4), VOIDWATER);

        let value = serde_json::to_value(&grid).unwrap();
        assert_eq!(value["-1,0,7"], 1);
        assert_eq!(value["3,12,-4"], 4);
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_registry_entry_serialization() {
        let registry = block_registry();
        let soil = serde_json::to_value(&registry[0]).unwrap();
        assert_eq!(soil["textureUri"], "blocks/voidsoil.png");
        assert!(soil.get("isLiquid").is_none());

        let water = serde_json::to_value(&registry[3]).unwrap();
        assert_eq!(water["isLiquid"], true);
    }
}
