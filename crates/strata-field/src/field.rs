use strata_geom::Vec3;

use crate::{ChunkCoord, DensityGrid, FieldParams, GridError, OctaveNoise};

/// Solid-below-a-noisy-heightmap density source.
///
/// A cell holds the column's surface height while it lies below that height,
/// and `0` above it. Overhangs and caves cannot be expressed by this rule.
/// The noise is seeded once at construction, so a field is a pure function of
/// its inputs and can be shared across worker threads.
pub struct DensityField {
    params: FieldParams,
    noise: OctaveNoise,
}

impl DensityField {
    pub fn new(params: FieldParams) -> Self {
        let noise = OctaveNoise::from_params(&params);
        Self { params, noise }
    }

    #[inline]
    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Heightmap value for a world-space column.
    #[inline]
    pub fn surface_height(&self, world_x: f32, world_z: f32) -> f32 {
        let p = &self.params;
        self.noise
            .sample_2d(world_x / p.height_scale, world_z / p.height_scale)
            * p.height_amplitude
            + p.height_base
    }

    /// Density of a single world-space point.
    #[inline]
    pub fn sample(&self, world_x: f32, world_y: f32, world_z: f32) -> f32 {
        let height = self.surface_height(world_x, world_z);
        if height > world_y { height } else { 0.0 }
    }

    /// Fills a fresh `(size+1)³` grid for the chunk at `offset` (in chunk units).
    pub fn generate(&self, size: usize, offset: Vec3) -> Result<DensityGrid, GridError> {
        let mut grid = DensityGrid::new(size)?;
        let span = self.params.chunk_span;
        let base_x = offset.x * span;
        let base_y = offset.y * span;
        let base_z = offset.z * span;
        let n = grid.samples_per_axis();
        for x in 0..n {
            let world_x = base_x + x as f32;
            for z in 0..n {
                let world_z = base_z + z as f32;
                // Height depends only on the column.
                let height = self.surface_height(world_x, world_z);
                for y in 0..n {
                    let world_y = base_y + y as f32;
                    if height > world_y {
                        grid.set(x, y, z, height);
                    }
                }
            }
        }
        log::trace!(
            "generated density grid size={} offset=({}, {}, {})",
            size,
            offset.x,
            offset.y,
            offset.z
        );
        Ok(grid)
    }

    #[inline]
    pub fn generate_chunk(&self, size: usize, coord: ChunkCoord) -> Result<DensityGrid, GridError> {
        self.generate(size, coord.to_offset())
    }
}

impl Default for DensityField {
    fn default() -> Self {
        Self::new(FieldParams::default())
    }
}
