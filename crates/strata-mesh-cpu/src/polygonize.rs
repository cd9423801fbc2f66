use strata_field::{DensityGrid, GridError};
use strata_geom::Vec3;

use crate::tables::{CORNER_COUNT, CORNER_OFFSETS, EDGE_CORNERS, EDGE_COUNT, EDGE_TABLE, TRI_TABLE};
use crate::{MeshBuild, MeshError, TERRAIN_COLOR, vertex_interp};

/// Isolevel the terrain pipeline extracts at.
pub const DEFAULT_ISOLEVEL: f32 = 5.0;

/// Case index for one cube: bit `i` is set when corner `i` lies strictly above `isolevel`.
#[inline]
pub fn cube_index(corners: &[f32; CORNER_COUNT], isolevel: f64) -> u8 {
    let mut ci = 0u8;
    for (i, &v) in corners.iter().enumerate() {
        if f64::from(v) > isolevel {
            ci |= 1 << i;
        }
    }
    ci
}

/// Extracts the isosurface of the first `size³` cubes of `grid`.
///
/// Every triangle gets three fresh vertices (nothing is shared between
/// triangles or cubes), a flat unnormalized normal, and `TERRAIN_COLOR`.
/// Positions are in grid units relative to the grid's origin corner.
pub fn polygonize(grid: &DensityGrid, size: usize, isolevel: f32) -> Result<MeshBuild, MeshError> {
    let mut out = MeshBuild::new();
    // A heightmap surface crosses roughly two triangles per column.
    out.reserve_triangles(size * size * 2);
    polygonize_into(grid, size, isolevel, &mut out)?;
    Ok(out)
}

/// Same as `polygonize`, but refills `out` so callers meshing many chunks
/// can reuse one buffer's capacity.
pub fn polygonize_into(
    grid: &DensityGrid,
    size: usize,
    isolevel: f32,
    out: &mut MeshBuild,
) -> Result<(), MeshError> {
    out.clear_keep_capacity();
    if size == 0 {
        return Err(GridError::ZeroSize.into());
    }
    if grid.cubes_per_axis() < size {
        log::warn!(
            "rejecting polygonize: size {} needs {} samples per axis, grid has {}",
            size,
            size + 1,
            grid.samples_per_axis()
        );
        return Err(MeshError::GridTooSmall {
            required: size + 1,
            actual: grid.samples_per_axis(),
        });
    }

    let mut skipped = 0usize;
    for i in 0..size {
        for j in 0..size {
            for k in 0..size {
                if polygonize_cube(grid, i, j, k, isolevel, out)? == 0 {
                    skipped += 1;
                }
            }
        }
    }
    log::trace!(
        "polygonized {} cubes: {} triangles, {} cubes without surface",
        size * size * size,
        out.triangle_count(),
        skipped
    );
    Ok(())
}

/// Emits the triangles of cube `(i, j, k)` into `out` and returns how many were written.
///
/// A cube whose triangles would not fit in `u16` indices is rejected before
/// anything is appended.
pub fn polygonize_cube(
    grid: &DensityGrid,
    i: usize,
    j: usize,
    k: usize,
    isolevel: f32,
    out: &mut MeshBuild,
) -> Result<usize, MeshError> {
    let size = grid.cubes_per_axis();
    if i >= size || j >= size || k >= size {
        return Err(MeshError::CubeOutOfRange { i, j, k, size });
    }
    let iso = f64::from(isolevel);

    let mut corners = [0.0f32; CORNER_COUNT];
    let mut positions = [Vec3::ZERO; CORNER_COUNT];
    for (c, [dx, dy, dz]) in CORNER_OFFSETS.iter().copied().enumerate() {
        let (x, y, z) = (i + dx, j + dy, k + dz);
        corners[c] = grid.get(x, y, z);
        positions[c] = Vec3::new(x as f32, y as f32, z as f32);
    }

    let ci = usize::from(cube_index(&corners, iso));
    let crossed = EDGE_TABLE[ci];
    if crossed == 0 {
        return Ok(0);
    }
    let row_len = TRI_TABLE[ci].iter().take_while(|&&e| e >= 0).count();
    if !out.can_index(row_len) {
        log::trace!("cube ({}, {}, {}) would overflow u16 indices", i, j, k);
        return Err(MeshError::IndexOverflow {
            vertices: out.vertices.len() + row_len,
        });
    }

    let mut edge_points = [Vec3::ZERO; EDGE_COUNT];
    for (e, &(a, b)) in EDGE_CORNERS.iter().enumerate() {
        if crossed & (1 << e) != 0 {
            edge_points[e] = vertex_interp(
                iso,
                positions[a],
                positions[b],
                f64::from(corners[a]),
                f64::from(corners[b]),
            );
        }
    }

    let mut emitted = 0usize;
    for tri in TRI_TABLE[ci].chunks_exact(3) {
        if tri[0] < 0 {
            break;
        }
        let a = edge_points[tri[0] as usize];
        let b = edge_points[tri[1] as usize];
        let c = edge_points[tri[2] as usize];
        out.push_flat_triangle(a, b, c, TERRAIN_COLOR);
        emitted += 1;
    }
    out.index_recent_triangles(emitted)?;
    Ok(emitted)
}
