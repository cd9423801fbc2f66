//! Density field generation: chunk coordinates, noise, and the sampled scalar grid.
#![forbid(unsafe_code)]

pub mod chunk_coord;
pub mod field;
pub mod grid;
pub mod noise;
pub mod params;

pub use chunk_coord::ChunkCoord;
pub use field::DensityField;
pub use grid::{DensityGrid, GridError};
pub use noise::OctaveNoise;
pub use params::{FieldParams, load_params_from_path};

use serde::Deserialize;

/// Seed used when a config does not name one.
pub const DEFAULT_SEED: i32 = 234_525;

#[derive(Clone, Debug, Deserialize)]
pub struct FieldConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_chunk_span")]
    pub chunk_span: f32,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub noise: Noise,
}

fn default_seed() -> i32 {
    DEFAULT_SEED
}
fn default_chunk_span() -> f32 {
    16.0
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            chunk_span: default_chunk_span(),
            height: Height::default(),
            noise: Noise::default(),
        }
    }
}

/// Heightmap shaping: `noise(x / scale, z / scale) * amplitude + base`.
#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_octaves")]
    pub octaves: u32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_base")]
    pub base: f32,
}
fn default_octaves() -> u32 {
    8
}
fn default_scale() -> f32 {
    100.0
}
fn default_amplitude() -> f32 {
    10.0
}
fn default_base() -> f32 {
    20.0
}
impl Default for Height {
    fn default() -> Self {
        Self {
            octaves: default_octaves(),
            scale: default_scale(),
            amplitude: default_amplitude(),
            base: default_base(),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    Perlin,
    OpenSimplex2,
    Value,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Noise {
    #[serde(default = "default_kind")]
    pub kind: NoiseKind,
    #[serde(default = "default_persistence")]
    pub persistence: f32,
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f32,
}
fn default_kind() -> NoiseKind {
    NoiseKind::Perlin
}
fn default_persistence() -> f32 {
    0.5
}
fn default_lacunarity() -> f32 {
    2.0
}
impl Default for Noise {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            persistence: default_persistence(),
            lacunarity: default_lacunarity(),
        }
    }
}
