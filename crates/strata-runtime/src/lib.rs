//! Runtime job queue and worker orchestration for chunk extraction (engine-only).
#![forbid(unsafe_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, unbounded};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use strata_field::{ChunkCoord, DensityField};
use strata_mesh_cpu::{ChunkMeshCPU, DEFAULT_ISOLEVEL, MeshError, mesh_chunk_grid};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildJob {
    pub coord: ChunkCoord,
    pub job_id: u64,
}

impl BuildJob {
    #[inline]
    pub fn new(coord: ChunkCoord, job_id: u64) -> Self {
        Self { coord, job_id }
    }
}

#[derive(Debug)]
pub struct JobOut {
    pub coord: ChunkCoord,
    pub job_id: u64,
    pub result: Result<ChunkMeshCPU, MeshError>,
    pub t_gen_ms: u32,
    pub t_mesh_ms: u32,
    pub t_total_ms: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuntimeSettings {
    /// Cubes per chunk axis.
    pub size: usize,
    pub isolevel: f32,
    /// Worker threads; `None` picks one per available core.
    pub workers: Option<usize>,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            size: 16,
            isolevel: DEFAULT_ISOLEVEL,
            workers: None,
        }
    }
}

#[inline]
fn elapsed_ms(t0: Instant) -> u32 {
    t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32
}

/// Builds one chunk. The density grid lives only for the duration of the call.
pub fn process_build_job(
    job: BuildJob,
    field: &DensityField,
    size: usize,
    isolevel: f32,
) -> JobOut {
    let BuildJob { coord, job_id } = job;
    let t_job_start = Instant::now();

    let t0 = Instant::now();
    let grid = field.generate_chunk(size, coord);
    let t_gen_ms = elapsed_ms(t0);

    let t0 = Instant::now();
    let result = grid.map_err(MeshError::from).and_then(|grid| {
        mesh_chunk_grid(&grid, coord, field.params().chunk_span, size, isolevel)
    });
    let t_mesh_ms = elapsed_ms(t0);

    if let Err(e) = &result {
        log::warn!(
            "chunk ({}, {}, {}) job {:#x} failed: {}",
            coord.cx,
            coord.cy,
            coord.cz,
            job_id,
            e
        );
    }

    JobOut {
        coord,
        job_id,
        result,
        t_gen_ms,
        t_mesh_ms,
        t_total_ms: elapsed_ms(t_job_start),
    }
}

/// Builds a batch of chunks on the global rayon pool, preserving input order.
pub fn build_chunks_parallel(
    field: &DensityField,
    coords: &[ChunkCoord],
    size: usize,
    isolevel: f32,
) -> Vec<JobOut> {
    coords
        .par_iter()
        .enumerate()
        .map(|(i, &coord)| process_build_job(BuildJob::new(coord, i as u64), field, size, isolevel))
        .collect()
}

/// Background chunk builder: jobs go in through `submit`, finished meshes
/// come back through `try_recv`/`recv`. Each worker owns its grids and output
/// buffers; only the field (and its read-only tables) is shared.
pub struct Runtime {
    job_tx: Option<Sender<BuildJob>>,
    res_rx: Receiver<JobOut>,
    _pool: Arc<ThreadPool>,
    queued: Arc<AtomicUsize>,
    inflight: Arc<AtomicUsize>,
    pub workers: usize,
    pub settings: RuntimeSettings,
}

impl Runtime {
    pub fn new(field: Arc<DensityField>, settings: RuntimeSettings) -> Self {
        let (job_tx, job_rx) = unbounded::<BuildJob>();
        let (res_tx, res_rx) = unbounded::<JobOut>();

        let workers = settings
            .workers
            .unwrap_or_else(|| thread::available_parallelism().map(|n| n.get()).unwrap_or(4))
            .max(1);
        let queued = Arc::new(AtomicUsize::new(0));
        let inflight = Arc::new(AtomicUsize::new(0));

        let pool = Arc::new(
            ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|i| format!("strata-mesh-{i}"))
                .build()
                .expect("mesh pool"),
        );
        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            let field = field.clone();
            let queued = queued.clone();
            let inflight = inflight.clone();
            let RuntimeSettings { size, isolevel, .. } = settings;
            pool.spawn(move || {
                while let Ok(job) = rx.recv() {
                    queued.fetch_sub(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::Relaxed);
                    let out = process_build_job(job, field.as_ref(), size, isolevel);
                    inflight.fetch_sub(1, Ordering::Relaxed);
                    if tx.send(out).is_err() {
                        break;
                    }
                }
            });
        }
        log::info!(
            "mesh runtime started: {} workers, {} cubes per chunk axis, isolevel {}",
            workers,
            settings.size,
            settings.isolevel
        );

        Self {
            job_tx: Some(job_tx),
            res_rx,
            _pool: pool,
            queued,
            inflight,
            workers,
            settings,
        }
    }

    pub fn submit(&self, job: BuildJob) {
        if let Some(tx) = &self.job_tx {
            self.queued.fetch_add(1, Ordering::Relaxed);
            if tx.send(job).is_err() {
                self.queued.fetch_sub(1, Ordering::Relaxed);
            }
        }
    }

    pub fn try_recv(&self) -> Option<JobOut> {
        match self.res_rx.try_recv() {
            Ok(out) => Some(out),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<JobOut> {
        match self.res_rx.recv_timeout(timeout) {
            Ok(out) => Some(out),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Drains every finished result without blocking.
    pub fn drain(&self) -> Vec<JobOut> {
        self.res_rx.try_iter().collect()
    }

    #[inline]
    pub fn queue_len(&self) -> usize {
        self.queued.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn inflight(&self) -> usize {
        self.inflight.load(Ordering::Relaxed)
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        // Closing the job channel lets every worker loop exit.
        self.job_tx.take();
    }
}
