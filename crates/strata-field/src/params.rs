use std::error::Error;
use std::fs;
use std::path::Path;

use crate::{FieldConfig, NoiseKind};

// Flattened params used in the sampling loop (snapshot of config)
#[derive(Clone, Debug, PartialEq)]
pub struct FieldParams {
    pub seed: i32,
    pub chunk_span: f32,
    pub octaves: u32,
    pub height_scale: f32,
    pub height_amplitude: f32,
    pub height_base: f32,
    pub noise_kind: NoiseKind,
    pub persistence: f32,
    pub lacunarity: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self::from_config(&FieldConfig::default())
    }
}

impl FieldParams {
    pub fn from_config(cfg: &FieldConfig) -> Self {
        Self {
            seed: cfg.seed,
            chunk_span: cfg.chunk_span,
            octaves: cfg.height.octaves,
            height_scale: cfg.height.scale,
            height_amplitude: cfg.height.amplitude,
            height_base: cfg.height.base,
            noise_kind: cfg.noise.kind,
            persistence: cfg.noise.persistence,
            lacunarity: cfg.noise.lacunarity,
        }
    }

    #[inline]
    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }
}

pub fn parse_params(s: &str) -> Result<FieldParams, Box<dyn Error>> {
    let cfg: FieldConfig = toml::from_str(s)?;
    Ok(FieldParams::from_config(&cfg))
}

pub fn load_params_from_path(path: &Path) -> Result<FieldParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let params = parse_params(&s)?;
    log::debug!("field params loaded from {}: {:?}", path.display(), params);
    Ok(params)
}
