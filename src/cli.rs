use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "strata", author, version, about = "Extract marching-cubes terrain for a block of chunks")]
pub struct Cli {
    /// Field and run settings (TOML). Flags below override the `[run]` table.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Cubes per chunk axis.
    #[arg(short, long)]
    pub size: Option<usize>,
    #[arg(short, long, allow_negative_numbers = true)]
    pub isolevel: Option<f32>,
    /// Chunks around the origin on x and z.
    #[arg(short, long)]
    pub radius: Option<i32>,
    /// Vertical chunk layers, starting at cy = 0.
    #[arg(long)]
    pub height: Option<i32>,
    #[arg(long)]
    pub seed: Option<i32>,
    #[arg(short, long)]
    pub workers: Option<usize>,
    /// Write every chunk mesh, translated to world space, as Wavefront OBJ.
    #[arg(long)]
    pub obj: Option<PathBuf>,
}
