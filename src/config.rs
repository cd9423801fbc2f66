use std::error::Error;

use serde::Deserialize;
use strata_mesh_cpu::DEFAULT_ISOLEVEL;

use crate::cli::Cli;

/// `[run]` table of the config file; field settings live in the same file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RunConfig {
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default = "default_isolevel")]
    pub isolevel: f32,
    #[serde(default = "default_radius")]
    pub radius: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default)]
    pub workers: Option<usize>,
}

fn default_size() -> usize {
    16
}
fn default_isolevel() -> f32 {
    DEFAULT_ISOLEVEL
}
fn default_radius() -> i32 {
    1
}
fn default_height() -> i32 {
    2
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            isolevel: default_isolevel(),
            radius: default_radius(),
            height: default_height(),
            workers: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    run: RunConfig,
}

impl RunConfig {
    pub fn parse(s: &str) -> Result<Self, Box<dyn Error>> {
        let file: ConfigFile = toml::from_str(s)?;
        Ok(file.run)
    }

    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(v) = cli.size {
            self.size = v;
        }
        if let Some(v) = cli.isolevel {
            self.isolevel = v;
        }
        if let Some(v) = cli.radius {
            self.radius = v;
        }
        if let Some(v) = cli.height {
            self.height = v;
        }
        if cli.workers.is_some() {
            self.workers = cli.workers;
        }
        self
    }
}
