use strata_geom::{Aabb, Vec3};

use crate::MeshError;

/// Flat material color applied to every extracted terrain vertex.
pub const TERRAIN_COLOR: [f32; 3] = [0.2, 0.6, 0.2];

/// Highest vertex count a `u16` index buffer can address.
pub const MAX_INDEXED_VERTICES: usize = u16::MAX as usize + 1;

/// Vertex layout handed to the renderer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    /// Not normalized for extracted triangles; consumers normalize if they need to.
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    #[inline]
    pub fn new(position: Vec3, normal: Vec3, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        Vec3::from(self.normal)
    }
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshBuild {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears both buffers but retains capacity for reuse across chunks.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Pre-reserve capacity for `n_tris` unshared triangles.
    #[inline]
    pub fn reserve_triangles(&mut self, n_tris: usize) {
        self.vertices.reserve(n_tris * 3);
        self.indices.reserve(n_tris * 3);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn push_vertex(&mut self, v: Vertex) -> usize {
        self.vertices.push(v);
        self.vertices.len() - 1
    }

    /// Appends three fresh vertices sharing the unnormalized face normal
    /// `(b - a) × (c - a)`. No index is written; see `index_recent_triangles`.
    pub fn push_flat_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: [f32; 3]) -> Vec3 {
        let normal = (b - a).cross(c - a);
        self.vertices.push(Vertex::new(a, normal, color));
        self.vertices.push(Vertex::new(b, normal, color));
        self.vertices.push(Vertex::new(c, normal, color));
        normal
    }

    /// True when `extra` more vertices still fit in `u16` index range.
    #[inline]
    pub fn can_index(&self, extra: usize) -> bool {
        self.vertices.len() + extra <= MAX_INDEXED_VERTICES
    }

    /// Indexes the last `count` triangles appended with `push_flat_triangle`.
    ///
    /// Triples are written walking back from the newest vertex: the first
    /// triple names the most recent triangle `(last-2, last-1, last)`, the
    /// next one the triangle before it, and so on. On overflow those
    /// triangles' vertices are dropped again, so the buffer stays indexed.
    pub fn index_recent_triangles(&mut self, count: usize) -> Result<(), MeshError> {
        if count == 0 {
            return Ok(());
        }
        let len = self.vertices.len();
        if len > MAX_INDEXED_VERTICES {
            self.vertices.truncate(len.saturating_sub(count * 3));
            return Err(MeshError::IndexOverflow { vertices: len });
        }
        debug_assert!(len >= count * 3);
        let last = len - 1;
        for t in 0..count {
            let step = t * 3;
            // `last < 65536` was checked above, so the casts are lossless.
            self.indices.extend_from_slice(&[
                (last - step - 2) as u16,
                (last - step - 1) as u16,
                (last - step) as u16,
            ]);
        }
        Ok(())
    }

    pub fn bounds(&self) -> Aabb {
        let mut bb = Aabb::empty();
        for v in &self.vertices {
            bb.include(v.position());
        }
        bb
    }

    /// Iterates triangles as position triples in index order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.vertices[usize::from(t[0])].position(),
                self.vertices[usize::from(t[1])].position(),
                self.vertices[usize::from(t[2])].position(),
            ]
        })
    }
}
