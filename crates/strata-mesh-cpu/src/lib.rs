//! CPU marching-cubes surface extraction over density grids (engine-only).
#![forbid(unsafe_code)]

pub mod chunk;
pub mod error;
pub mod interp;
pub mod mesh_build;
pub mod polygonize;
pub mod primitives;
pub mod tables;

pub use chunk::{ChunkMeshCPU, build_chunk_mesh, mesh_chunk_grid};
pub use error::MeshError;
pub use interp::vertex_interp;
pub use mesh_build::{MAX_INDEXED_VERTICES, MeshBuild, TERRAIN_COLOR, Vertex};
pub use polygonize::{DEFAULT_ISOLEVEL, cube_index, polygonize, polygonize_cube, polygonize_into};
pub use primitives::{PrimitiveKind, build_primitive};
