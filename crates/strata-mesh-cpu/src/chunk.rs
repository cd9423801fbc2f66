use strata_field::{ChunkCoord, DensityField, DensityGrid};
use strata_geom::{Aabb, Vec3};

use crate::{MeshBuild, MeshError, polygonize};

/// Extracted mesh for one chunk, positioned by `origin` in world space.
#[derive(Clone, Debug)]
pub struct ChunkMeshCPU {
    pub coord: ChunkCoord,
    /// World-space translation of the mesh's local (grid-unit) positions.
    pub origin: Vec3,
    /// World-space bounds; empty when the chunk has no surface.
    pub bbox: Aabb,
    pub mesh: MeshBuild,
}

impl ChunkMeshCPU {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }
}

/// Generates the density grid for `coord` and extracts its surface.
///
/// The grid is built for this call only and dropped before returning.
pub fn build_chunk_mesh(
    field: &DensityField,
    coord: ChunkCoord,
    size: usize,
    isolevel: f32,
) -> Result<ChunkMeshCPU, MeshError> {
    let grid = field.generate_chunk(size, coord)?;
    mesh_chunk_grid(&grid, coord, field.params().chunk_span, size, isolevel)
}

/// Extracts an already generated chunk grid; `chunk_span` places it in world space.
pub fn mesh_chunk_grid(
    grid: &DensityGrid,
    coord: ChunkCoord,
    chunk_span: f32,
    size: usize,
    isolevel: f32,
) -> Result<ChunkMeshCPU, MeshError> {
    let mesh = polygonize(grid, size, isolevel)?;
    let origin = coord.to_offset() * chunk_span;
    let bbox = mesh.bounds().translated(origin);
    log::debug!(
        "chunk ({}, {}, {}) meshed: {} triangles",
        coord.cx,
        coord.cy,
        coord.cz,
        mesh.triangle_count()
    );
    Ok(ChunkMeshCPU {
        coord,
        origin,
        bbox,
        mesh,
    })
}
