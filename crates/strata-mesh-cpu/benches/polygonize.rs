use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use strata_field::{ChunkCoord, DensityField, DensityGrid};
use strata_mesh_cpu::{DEFAULT_ISOLEVEL, MeshBuild, build_chunk_mesh, polygonize, polygonize_into};

fn bench_generate_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("density_field");
    let field = DensityField::default();
    group.bench_function("generate_16", |b| {
        b.iter(|| {
            let grid = field.generate_chunk(16, ChunkCoord::new(0, 1, 0));
            black_box(grid)
        })
    });
    group.finish();
}

fn bench_polygonize_flat_sheet(c: &mut Criterion) {
    let mut group = c.benchmark_group("polygonize_flat");
    let grid = DensityGrid::from_fn(32, |_, y, _| if y < 16 { 20.0 } else { 0.0 }).unwrap();
    group.bench_function("sheet_32", |b| {
        b.iter(|| {
            let mb = polygonize(&grid, 32, DEFAULT_ISOLEVEL).unwrap();
            black_box(mb)
        })
    });
    let mut reused = MeshBuild::new();
    group.bench_function("sheet_32_reused", |b| {
        b.iter(|| {
            polygonize_into(&grid, 32, DEFAULT_ISOLEVEL, &mut reused).unwrap();
            black_box(reused.triangle_count())
        })
    });
    group.finish();
}

fn bench_build_chunk_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_chunk_mesh");
    let field = DensityField::default();
    group.bench_function("terrain_16", |b| {
        b.iter(|| {
            let out = build_chunk_mesh(&field, ChunkCoord::new(0, 1, 0), 16, DEFAULT_ISOLEVEL);
            black_box(out)
        })
    });
    group.bench_function("terrain_48_column", |b| {
        b.iter(|| {
            let out = build_chunk_mesh(&field, ChunkCoord::new(2, 0, -3), 48, DEFAULT_ISOLEVEL);
            black_box(out)
        })
    });
    group.finish();
}

fn long_config() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .warm_up_time(Duration::from_secs(3))
        .sample_size(20)
}

criterion_group! {
    name = benches;
    config = long_config();
    targets =
        bench_generate_field,
        bench_polygonize_flat_sheet,
        bench_build_chunk_mesh
}
criterion_main!(benches);
