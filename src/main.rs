mod cli;
mod config;
mod obj;

use std::error::Error;
use std::fs::{self, File};
use std::io::BufWriter;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use hashbrown::HashMap;
use strata_field::{ChunkCoord, DensityField, FieldParams, load_params_from_path};
use strata_runtime::{BuildJob, JobOut, Runtime, RuntimeSettings};

use crate::cli::Cli;
use crate::config::RunConfig;
use crate::obj::ObjWriter;

const RESULT_WAIT: Duration = Duration::from_secs(30);

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

fn chunk_block(radius: i32, height: i32) -> Vec<ChunkCoord> {
    let origin = ChunkCoord::default();
    let mut coords = Vec::new();
    for cy in 0..height.max(0) {
        for cz in -radius..=radius {
            for cx in -radius..=radius {
                coords.push(ChunkCoord::new(cx, cy, cz));
            }
        }
    }
    // Nearest first, like a streaming loader would request them.
    coords.sort_by_key(|c| c.distance_sq(origin));
    coords
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let cli = Cli::parse();

    let (mut params, run) = match &cli.config {
        Some(path) => {
            let params = load_params_from_path(path)?;
            let run = RunConfig::parse(&fs::read_to_string(path)?)?;
            (params, run)
        }
        None => (FieldParams::default(), RunConfig::default()),
    };
    if let Some(seed) = cli.seed {
        params = params.with_seed(seed);
    }
    let run = run.apply_cli(&cli);
    log::info!("seed {}, run {:?}", params.seed, run);

    let field = Arc::new(DensityField::new(params));
    let rt = Runtime::new(
        field,
        RuntimeSettings {
            size: run.size,
            isolevel: run.isolevel,
            workers: run.workers,
        },
    );

    let coords = chunk_block(run.radius, run.height);
    let t0 = Instant::now();
    for (i, &coord) in coords.iter().enumerate() {
        rt.submit(BuildJob::new(coord, i as u64));
    }

    let mut done: HashMap<ChunkCoord, JobOut> = HashMap::with_capacity(coords.len());
    while done.len() < coords.len() {
        let Some(out) = rt.recv_timeout(RESULT_WAIT) else {
            return Err(format!(
                "timed out waiting for chunks: {}/{} done, {} queued, {} in flight",
                done.len(),
                coords.len(),
                rt.queue_len(),
                rt.inflight()
            )
            .into());
        };
        done.insert(out.coord, out);
    }
    let wall_ms = t0.elapsed().as_millis();

    let mut triangles = 0usize;
    let mut failed = 0usize;
    let (mut gen_ms, mut mesh_ms) = (0u64, 0u64);
    for out in done.values() {
        gen_ms += u64::from(out.t_gen_ms);
        mesh_ms += u64::from(out.t_mesh_ms);
        match &out.result {
            Ok(cpu) => triangles += cpu.mesh.triangle_count(),
            Err(_) => failed += 1,
        }
    }
    log::info!(
        "{} chunks in {} ms on {} workers: {} triangles, {} failed (gen {} ms, mesh {} ms summed)",
        coords.len(),
        wall_ms,
        rt.workers,
        triangles,
        failed,
        gen_ms,
        mesh_ms
    );

    if let Some(path) = &cli.obj {
        let mut w = ObjWriter::new(BufWriter::new(File::create(path)?))?;
        for coord in &coords {
            if let Some(JobOut { result: Ok(cpu), .. }) = done.get(coord) {
                w.write_chunk(cpu)?;
            }
        }
        w.finish()?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}
