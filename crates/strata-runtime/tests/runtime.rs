use std::sync::Arc;
use std::time::Duration;

use hashbrown::HashMap;
use strata_field::{ChunkCoord, DensityField, FieldParams};
use strata_mesh_cpu::{DEFAULT_ISOLEVEL, MeshError, build_chunk_mesh};
use strata_runtime::{BuildJob, Runtime, RuntimeSettings, build_chunks_parallel, process_build_job};

const WAIT: Duration = Duration::from_secs(60);

fn field() -> Arc<DensityField> {
    Arc::new(DensityField::new(FieldParams::default()))
}

fn coords() -> Vec<ChunkCoord> {
    let mut out = Vec::new();
    for cx in -1..=1 {
        for cz in -1..=1 {
            out.push(ChunkCoord::new(cx, 0, cz));
        }
    }
    out
}

#[test]
fn process_job_matches_direct_build() {
    let f = field();
    let coord = ChunkCoord::new(1, 0, -1);
    let out = process_build_job(BuildJob::new(coord, 7), &f, 48, DEFAULT_ISOLEVEL);
    assert_eq!(out.job_id, 7);
    assert_eq!(out.coord, coord);
    assert!(out.t_total_ms >= out.t_mesh_ms);

    let direct = build_chunk_mesh(&f, coord, 48, DEFAULT_ISOLEVEL).expect("direct");
    let got = out.result.expect("job");
    assert!(!got.is_empty());
    assert_eq!(got.mesh, direct.mesh);
    assert_eq!(got.origin, direct.origin);
}

#[test]
fn zero_size_job_reports_error() {
    let f = field();
    let out = process_build_job(BuildJob::new(ChunkCoord::default(), 0), &f, 0, DEFAULT_ISOLEVEL);
    assert!(matches!(out.result, Err(MeshError::Grid(_))));
}

#[test]
fn parallel_batch_preserves_order_and_content() {
    let f = field();
    let cs = coords();
    let outs = build_chunks_parallel(&f, &cs, 16, DEFAULT_ISOLEVEL);
    assert_eq!(outs.len(), cs.len());
    for (i, (out, &c)) in outs.iter().zip(&cs).enumerate() {
        assert_eq!(out.coord, c);
        assert_eq!(out.job_id, i as u64);
        let direct = build_chunk_mesh(&f, c, 16, DEFAULT_ISOLEVEL).expect("direct");
        let got = out.result.as_ref().expect("job");
        assert_eq!(got.mesh, direct.mesh);
    }
}

#[test]
fn runtime_returns_every_submitted_job() {
    let f = field();
    let rt = Runtime::new(
        f.clone(),
        RuntimeSettings {
            size: 16,
            isolevel: DEFAULT_ISOLEVEL,
            workers: Some(3),
        },
    );
    assert_eq!(rt.workers, 3);

    let cs = coords();
    for (i, &c) in cs.iter().enumerate() {
        rt.submit(BuildJob::new(c, i as u64));
    }

    let mut got: HashMap<ChunkCoord, _> = HashMap::new();
    while got.len() < cs.len() {
        let out = rt.recv_timeout(WAIT).expect("worker result");
        got.insert(out.coord, out);
    }
    assert!(rt.try_recv().is_none());
    assert_eq!(rt.queue_len(), 0);

    for c in cs {
        let direct = build_chunk_mesh(&f, c, 16, DEFAULT_ISOLEVEL).expect("direct");
        let out = got.remove(&c).expect("coord present");
        assert_eq!(out.result.expect("job").mesh, direct.mesh);
    }
}

#[test]
fn single_worker_runtime_drains_in_submission_order() {
    let rt = Runtime::new(
        field(),
        RuntimeSettings {
            workers: Some(1),
            ..RuntimeSettings::default()
        },
    );
    for id in 0..4u64 {
        rt.submit(BuildJob::new(ChunkCoord::new(id as i32, 8, 0), id));
    }
    let mut ids = Vec::new();
    while ids.len() < 4 {
        let out = rt.recv_timeout(WAIT).expect("worker result");
        // Chunks this high sit above any surface.
        assert!(out.result.expect("job").is_empty());
        ids.push(out.job_id);
    }
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert!(rt.drain().is_empty());
}
