use std::io::{self, Write};

use strata_mesh_cpu::ChunkMeshCPU;

/// Streams chunk meshes into one Wavefront OBJ, one `o` group per chunk.
pub struct ObjWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> ObjWriter<W> {
    pub fn new(mut out: W) -> io::Result<Self> {
        writeln!(out, "# strata terrain")?;
        Ok(Self { out, written: 0 })
    }

    pub fn write_chunk(&mut self, chunk: &ChunkMeshCPU) -> io::Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        let c = chunk.coord;
        writeln!(self.out, "o chunk_{}_{}_{}", c.cx, c.cy, c.cz)?;
        for v in &chunk.mesh.vertices {
            let p = v.position() + chunk.origin;
            writeln!(self.out, "v {} {} {}", p.x, p.y, p.z)?;
        }
        for v in &chunk.mesh.vertices {
            let n = v.normal().normalized();
            writeln!(self.out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
        // OBJ indices are 1-based and global across groups.
        let base = self.written + 1;
        for tri in chunk.mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| base + usize::from(i));
            writeln!(self.out, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }
        self.written += chunk.mesh.vertices.len();
        Ok(())
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_field::{ChunkCoord, DensityGrid};
    use strata_mesh_cpu::mesh_chunk_grid;

    fn corner_chunk(coord: ChunkCoord) -> ChunkMeshCPU {
        let grid = DensityGrid::from_fn(1, |x, y, z| if (x, y, z) == (0, 1, 1) { 10.0 } else { 0.0 })
            .unwrap();
        mesh_chunk_grid(&grid, coord, 16.0, 1, 5.0).unwrap()
    }

    #[test]
    fn faces_are_one_based_and_offset_per_chunk() {
        let mut w = ObjWriter::new(Vec::new()).unwrap();
        w.write_chunk(&corner_chunk(ChunkCoord::new(0, 0, 0))).unwrap();
        w.write_chunk(&corner_chunk(ChunkCoord::new(1, 0, 0))).unwrap();
        let text = String::from_utf8(w.finish().unwrap()).unwrap();

        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces, vec!["f 1//1 2//2 3//3", "f 4//4 5//5 6//6"]);
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 6);
        assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 6);
        assert!(text.contains("o chunk_1_0_0"));
        // Second chunk is shifted one chunk span along x.
        assert!(text.contains("v 16 0.5 1"));
    }

    #[test]
    fn empty_chunks_write_nothing() {
        let grid = DensityGrid::new(2).unwrap();
        let chunk = mesh_chunk_grid(&grid, ChunkCoord::default(), 16.0, 2, 5.0).unwrap();
        let mut w = ObjWriter::new(Vec::new()).unwrap();
        w.write_chunk(&chunk).unwrap();
        let text = String::from_utf8(w.finish().unwrap()).unwrap();
        assert_eq!(text, "# strata terrain\n");
    }
}
