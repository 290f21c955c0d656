//! Coherent noise fields for terrain synthesis
//!
//! Each field owns an independently seeded Perlin generator plus the
//! horizontal scale and octave shape it is sampled at, so the elevation,
//! surface patch, and clustering fields never correlate.

use noise::{NoiseFn, Perlin, Seedable};

/// A deterministic, continuous 2-D noise source over world (x, z) coordinates.
///
/// Implementations return values in roughly [-1, 1] and must be pure
/// functions of their inputs and construction parameters.
pub trait NoiseSource {
    fn sample(&self, x: f64, z: f64) -> f64;
}

/// Multi-octave Perlin noise field.
pub struct NoiseField {
    perlin: Perlin,
    scale: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
}

impl NoiseField {
    /// Create a field with the default octave shape (persistence 0.5,
    /// lacunarity 2.0).
    pub fn new(seed: u64, scale: f64, octaves: u32) -> Self {
        Self::with_shape(seed, scale, octaves, 0.5, 2.0)
    }

    /// Create a field with explicit persistence and lacunarity.
    pub fn with_shape(
        seed: u64,
        scale: f64,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
    ) -> Self {
        Self {
            perlin: Perlin::new(1).set_seed(seed as u32),
            scale,
            octaves,
            persistence,
            lacunarity,
        }
    }
}

impl NoiseSource for NoiseField {
    fn sample(&self, x: f64, z: f64) -> f64 {
        fbm(
            &self.perlin,
            x * self.scale,
            z * self.scale,
            self.octaves,
            self.persistence,
            self.lacunarity,
        )
    }
}

/// Constant-valued source. Degenerate field used for flat test worlds and
/// normalization diagnostics.
pub struct ConstNoise(pub f64);

impl NoiseSource for ConstNoise {
    fn sample(&self, _x: f64, _z: f64) -> f64 {
        self.0
    }
}

/// Fractional Brownian Motion - multi-octave noise
fn fbm(
    noise: &Perlin,
    x: f64,
    z: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves {
        total += amplitude * noise.get([x * frequency, z * frequency]);
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    total / max_value
}
