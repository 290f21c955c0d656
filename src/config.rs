//! Generation parameters and their validation
//!
//! Every knob of the pipeline is caller-supplied; validation turns bad
//! parameters into typed [`ConfigError`]s so callers can tell "fix your
//! parameters" apart from an internal fault.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Parameters for a full map generation run.
#[derive(Clone, Debug)]
pub struct MapConfig {
    /// World disk radius in columns
    pub radius: i32,
    /// Minimum terrain height after normalization
    pub min_height: i32,
    /// Maximum terrain height after normalization
    pub max_height: i32,
    /// Fine elevation noise scale (lower = broader features)
    pub micro_scale: f64,
    /// Fine elevation octave count
    pub micro_octaves: u32,
    /// Broad elevation noise scale
    pub macro_scale: f64,
    /// Broad elevation octave count
    pub macro_octaves: u32,
    /// Weight of the broad field added to the fine field
    pub macro_influence: f64,
    /// Amplitude decay per octave (0.0-1.0)
    pub persistence: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
    /// Columns below this height flood up to it
    pub water_threshold: i32,
    /// Dome apex height above the terrain ceiling
    pub dome_height: i32,
    /// Rows of boundary wall above each rim column
    pub wall_height: i32,
    /// Clearance rows between the wall top and the lowest panel voxel
    pub skip_rows: i32,
    /// Ceiling panel count range (inclusive)
    pub min_panels: u32,
    pub max_panels: u32,
    /// Ceiling panel footprint radius range (inclusive)
    pub min_panel_size: i32,
    pub max_panel_size: i32,
    /// Surface patch noise scale (vegetated vs bare top layer)
    pub patch_scale: f64,
    /// Base probability of placing an entity on an eligible cell
    pub placement_density: f64,
    /// Clustering noise scale for entity placement
    pub clustering_scale: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            radius: 50,
            min_height: 1,
            max_height: 8,
            micro_scale: 0.05,
            micro_octaves: 4,
            macro_scale: 0.012,
            macro_octaves: 2,
            macro_influence: 0.6,
            persistence: 0.5,
            lacunarity: 2.0,
            water_threshold: 2,
            dome_height: 50,
            wall_height: 4,
            skip_rows: 12,
            min_panels: 20,
            max_panels: 25,
            min_panel_size: 8,
            max_panel_size: 12,
            patch_scale: 0.1,
            placement_density: 0.02,
            clustering_scale: 0.08,
        }
    }
}

impl MapConfig {
    /// Check every parameter before any computation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.radius <= 0 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if self.min_height < 0 {
            return Err(ConfigError::NegativeMinHeight(self.min_height));
        }
        if self.min_height > self.max_height {
            return Err(ConfigError::InvalidHeightRange {
                min: self.min_height,
                max: self.max_height,
            });
        }
        for (name, scale) in [
            ("micro_scale", self.micro_scale),
            ("macro_scale", self.macro_scale),
            ("patch_scale", self.patch_scale),
            ("clustering_scale", self.clustering_scale),
        ] {
            if !(scale > 0.0) {
                return Err(ConfigError::InvalidNoiseScale { name, value: scale });
            }
        }
        if self.micro_octaves == 0 || self.macro_octaves == 0 {
            return Err(ConfigError::InvalidOctaves);
        }
        if !(self.persistence > 0.0) || !(self.lacunarity > 0.0) {
            return Err(ConfigError::InvalidOctaveShape {
                persistence: self.persistence,
                lacunarity: self.lacunarity,
            });
        }
        if self.dome_height <= 0 {
            return Err(ConfigError::InvalidDomeHeight(self.dome_height));
        }
        if self.wall_height < 0 || self.skip_rows < 0 {
            return Err(ConfigError::InvalidWallBand {
                wall_height: self.wall_height,
                skip_rows: self.skip_rows,
            });
        }
        if self.min_panels > self.max_panels {
            return Err(ConfigError::InvalidPanelCount {
                min: self.min_panels,
                max: self.max_panels,
            });
        }
        if self.min_panel_size <= 0 || self.min_panel_size > self.max_panel_size {
            return Err(ConfigError::InvalidPanelSize {
                min: self.min_panel_size,
                max: self.max_panel_size,
            });
        }
        if !(0.0..=1.0).contains(&self.placement_density) {
            return Err(ConfigError::InvalidDensity(self.placement_density));
        }
        Ok(())
    }
}

/// A candidate model for entity scattering, as supplied by the caller.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDef {
    /// Asset path of the model
    pub model_uri: String,
    /// Display name; derived from the URI when absent
    #[serde(default)]
    pub name: Option<String>,
    /// Uniform scale bounds drawn per placement
    pub min_scale: f64,
    pub max_scale: f64,
    /// Looped animations started by the runtime
    #[serde(default)]
    pub animations: Vec<String>,
}

impl ModelDef {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_scale > 0.0) || self.min_scale > self.max_scale {
            return Err(ConfigError::InvalidModelScale {
                uri: self.model_uri.clone(),
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        Ok(())
    }
}

/// Load and validate a model catalog from a JSON file.
pub fn load_model_defs(path: &Path) -> Result<Vec<ModelDef>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ModelFile {
        path: path.display().to_string(),
        source,
    })?;
    let models: Vec<ModelDef> =
        serde_json::from_str(&contents).map_err(|source| ConfigError::ModelParse {
            path: path.display().to_string(),
            source,
        })?;
    for model in &models {
        model.validate()?;
    }
    Ok(models)
}

/// A parameter the caller must fix, as opposed to an internal fault.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("world disk radius must be positive (got {0})")]
    InvalidRadius(i32),

    #[error("minimum terrain height must not be negative (got {0})")]
    NegativeMinHeight(i32),

    #[error("terrain height range is inverted: min {min} > max {max}")]
    InvalidHeightRange { min: i32, max: i32 },

    #[error("{name} must be positive (got {value})")]
    InvalidNoiseScale { name: &'static str, value: f64 },

    #[error("octave counts must be at least 1")]
    InvalidOctaves,

    #[error("octave shape must be positive (persistence {persistence}, lacunarity {lacunarity})")]
    InvalidOctaveShape { persistence: f64, lacunarity: f64 },

    #[error("dome height must be positive (got {0})")]
    InvalidDomeHeight(i32),

    #[error("wall band must not be negative (wall height {wall_height}, skip rows {skip_rows})")]
    InvalidWallBand { wall_height: i32, skip_rows: i32 },

    #[error("panel count range is inverted: {min}..{max}")]
    InvalidPanelCount { min: u32, max: u32 },

    #[error("panel size range is invalid: {min}..{max}")]
    InvalidPanelSize { min: i32, max: i32 },

    #[error("placement density must lie in [0, 1] (got {0})")]
    InvalidDensity(f64),

    #[error("model '{uri}' has invalid scale bounds {min}..{max}")]
    InvalidModelScale { uri: String, min: f64, max: f64 },

    #[error("failed to read model definitions from {path}")]
    ModelFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model definitions from {path}")]
    ModelParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
