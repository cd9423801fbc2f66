use strata_field::{ChunkCoord, DensityField, DensityGrid, GridError};
use strata_geom::Vec3;
use strata_mesh_cpu::{
    DEFAULT_ISOLEVEL, MAX_INDEXED_VERTICES, MeshBuild, MeshError, TERRAIN_COLOR, build_chunk_mesh,
    polygonize, polygonize_cube, polygonize_into,
};

fn single_cube(corners: [f32; 8]) -> DensityGrid {
    // Same corner convention as the lookup tables.
    const OFFS: [[usize; 3]; 8] = [
        [0, 0, 0],
        [1, 0, 0],
        [1, 1, 0],
        [0, 1, 0],
        [0, 0, 1],
        [1, 0, 1],
        [1, 1, 1],
        [0, 1, 1],
    ];
    let mut g = DensityGrid::new(1).unwrap();
    for (c, [x, y, z]) in OFFS.into_iter().enumerate() {
        g.set(x, y, z, corners[c]);
    }
    g
}

fn tri_area_sum(mb: &MeshBuild) -> f32 {
    mb.triangles()
        .map(|[a, b, c]| 0.5 * (b - a).cross(c - a).length())
        .sum()
}

#[test]
fn uniform_cubes_emit_nothing() {
    let below = single_cube([0.0; 8]);
    let above = single_cube([10.0; 8]);
    assert!(polygonize(&below, 1, 5.0).unwrap().is_empty());
    assert!(polygonize(&above, 1, 5.0).unwrap().is_empty());
}

#[test]
fn single_hot_corner_emits_one_triangle_on_its_edges() {
    let grid = single_cube([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0]);
    let mb = polygonize(&grid, 1, 5.0).unwrap();
    assert_eq!(mb.triangle_count(), 1);
    assert_eq!(mb.vertices.len(), 3);
    assert_eq!(mb.indices, vec![0, 1, 2]);

    // Corner 7 is (0,1,1); its edges meet corners 4, 6 and 3, each crossed halfway.
    let positions: Vec<Vec3> = mb.vertices.iter().map(|v| v.position()).collect();
    assert_eq!(
        positions,
        vec![
            Vec3::new(0.0, 0.5, 1.0),
            Vec3::new(0.5, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 0.5),
        ]
    );
    for v in &mb.vertices {
        assert_eq!(v.normal, [-0.25, 0.25, 0.25]);
        assert_eq!(v.color, TERRAIN_COLOR);
    }
}

#[test]
fn multi_triangle_cube_indexes_newest_first() {
    // Corners 0 and 1 hot: two triangles.
    let grid = single_cube([10.0, 10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let mb = polygonize(&grid, 1, 5.0).unwrap();
    assert_eq!(mb.triangle_count(), 2);
    assert_eq!(mb.indices, vec![3, 4, 5, 0, 1, 2]);
}

#[test]
fn flat_sheet_spans_the_footprint() {
    let grid = DensityGrid::from_fn(16, |_, y, _| if y < 8 { 20.0 } else { 0.0 }).unwrap();
    let mb = polygonize(&grid, 16, DEFAULT_ISOLEVEL).unwrap();

    // Two triangles per column of cubes, all in the j = 7 layer.
    assert_eq!(mb.triangle_count(), 16 * 16 * 2);
    assert_eq!(mb.vertices.len(), mb.indices.len());
    // mu = (5 - 20) / (0 - 20) from y = 7.
    assert!(mb.vertices.iter().all(|v| v.position[1] == 7.75));

    let bb = mb.bounds();
    assert_eq!((bb.min.x, bb.min.z), (0.0, 0.0));
    assert_eq!((bb.max.x, bb.max.z), (16.0, 16.0));
    assert!((tri_area_sum(&mb) - 256.0).abs() < 1e-3);
    // Sheet normals are vertical.
    for v in &mb.vertices {
        assert_eq!(v.normal[0], 0.0);
        assert_eq!(v.normal[2], 0.0);
        assert_ne!(v.normal[1], 0.0);
    }
}

#[test]
fn too_small_grid_is_rejected() {
    let grid = DensityGrid::new(2).unwrap();
    assert_eq!(
        polygonize(&grid, 3, 5.0).unwrap_err(),
        MeshError::GridTooSmall {
            required: 4,
            actual: 3
        }
    );
    assert_eq!(
        polygonize(&grid, 0, 5.0).unwrap_err(),
        MeshError::Grid(GridError::ZeroSize)
    );
    let mut out = MeshBuild::new();
    assert_eq!(
        polygonize_cube(&grid, 2, 0, 0, 5.0, &mut out).unwrap_err(),
        MeshError::CubeOutOfRange {
            i: 2,
            j: 0,
            k: 0,
            size: 2
        }
    );
}

#[test]
fn larger_grid_can_be_partially_extracted() {
    let grid = DensityGrid::from_fn(4, |_, y, _| if y < 1 { 20.0 } else { 0.0 }).unwrap();
    let part = polygonize(&grid, 2, 5.0).unwrap();
    assert_eq!(part.triangle_count(), 2 * 2 * 2);
    let bb = part.bounds();
    assert_eq!((bb.max.x, bb.max.z), (2.0, 2.0));
}

#[test]
fn chunk_meshes_are_reproducible_and_placed_in_world() {
    let field = DensityField::default();
    let coord = ChunkCoord::new(1, 0, -1);
    // 48 cells tall covers the whole default height band.
    let a = build_chunk_mesh(&field, coord, 48, DEFAULT_ISOLEVEL).unwrap();
    let b = build_chunk_mesh(&field, coord, 48, DEFAULT_ISOLEVEL).unwrap();
    assert_eq!(a.mesh, b.mesh);
    assert!(!a.is_empty());
    assert_eq!(a.origin, Vec3::new(16.0, 0.0, -16.0));
    assert!(a.bbox.min.x >= 16.0 && a.bbox.max.x <= 64.0);
    assert!(a.bbox.min.z >= -16.0 && a.bbox.max.z <= 32.0);
}

#[test]
fn sky_chunk_has_no_surface() {
    let field = DensityField::default();
    let sky = build_chunk_mesh(&field, ChunkCoord::new(0, 8, 0), 16, DEFAULT_ISOLEVEL).unwrap();
    assert!(sky.is_empty());
    assert!(sky.bbox.is_empty());
}

fn filled_mesh(triangles: usize) -> MeshBuild {
    let mut mb = MeshBuild::new();
    mb.reserve_triangles(triangles);
    for _ in 0..triangles {
        mb.push_flat_triangle(Vec3::ZERO, Vec3::UP, Vec3::new(1.0, 0.0, 0.0), TERRAIN_COLOR);
        mb.index_recent_triangles(1).unwrap();
    }
    mb
}

#[test]
fn cube_that_would_overflow_indices_leaves_buffer_untouched() {
    let grid = single_cube([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0]);
    let mut mb = filled_mesh((MAX_INDEXED_VERTICES - 1) / 3);
    assert_eq!(mb.vertices.len(), MAX_INDEXED_VERTICES - 1);
    let before = mb.clone();

    let res = polygonize_cube(&grid, 0, 0, 0, 5.0, &mut mb);
    assert_eq!(
        res,
        Err(MeshError::IndexOverflow {
            vertices: MAX_INDEXED_VERTICES + 2
        })
    );
    assert_eq!(mb, before);
    assert_eq!(mb.vertices.len(), mb.indices.len());
}

#[test]
fn cube_filling_the_last_indices_still_fits() {
    let grid = single_cube([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0]);
    let mut mb = filled_mesh((MAX_INDEXED_VERTICES - 1) / 3 - 1);
    assert_eq!(polygonize_cube(&grid, 0, 0, 0, 5.0, &mut mb), Ok(1));
    assert_eq!(mb.vertices.len(), MAX_INDEXED_VERTICES - 1);
    assert_eq!(mb.indices.len(), mb.vertices.len());
    assert_eq!(*mb.indices.last().unwrap() as usize, MAX_INDEXED_VERTICES - 2);
}

#[test]
fn reused_buffer_matches_fresh_extraction() {
    let sheet = DensityGrid::from_fn(8, |_, y, _| if y < 4 { 20.0 } else { 0.0 }).unwrap();
    let corner = single_cube([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0]);

    let mut buf = MeshBuild::new();
    polygonize_into(&sheet, 8, 5.0, &mut buf).unwrap();
    assert_eq!(buf, polygonize(&sheet, 8, 5.0).unwrap());
    let cap = buf.vertices.capacity();

    // Refilling drops the previous chunk's triangles but keeps the allocation.
    polygonize_into(&corner, 1, 5.0, &mut buf).unwrap();
    assert_eq!(buf, polygonize(&corner, 1, 5.0).unwrap());
    assert_eq!(buf.triangle_count(), 1);
    assert!(buf.vertices.capacity() >= cap);

    assert!(polygonize_into(&corner, 2, 5.0, &mut buf).is_err());
    assert!(buf.is_empty());
}
