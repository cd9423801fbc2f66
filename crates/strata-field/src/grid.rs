use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must hold at least one cube per axis")]
    ZeroSize,
    #[error("expected {expected} density samples for the grid, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },
}

/// Scalar densities sampled on the corners of `size³` unit cubes.
///
/// Storage is one flat buffer of `(size+1)³` values addressed `[x][y][z]`,
/// so every cube `(i, j, k)` with `i, j, k < size` has all eight corners in range.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityGrid {
    size: usize,
    samples: Vec<f32>,
}

impl DensityGrid {
    /// All-zero grid with `size` cubes per axis.
    pub fn new(size: usize) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::ZeroSize);
        }
        let n = size + 1;
        Ok(Self {
            size,
            samples: vec![0.0; n * n * n],
        })
    }

    pub fn from_fn(
        size: usize,
        mut f: impl FnMut(usize, usize, usize) -> f32,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(size)?;
        let n = grid.samples_per_axis();
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    let i = grid.idx(x, y, z);
                    grid.samples[i] = f(x, y, z);
                }
            }
        }
        Ok(grid)
    }

    /// Wraps an `[x][y][z]`-ordered buffer of `(size+1)³` samples.
    pub fn from_samples(size: usize, samples: Vec<f32>) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::ZeroSize);
        }
        let n = size + 1;
        let expected = n * n * n;
        if samples.len() != expected {
            return Err(GridError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self { size, samples })
    }

    #[inline]
    pub fn cubes_per_axis(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn samples_per_axis(&self) -> usize {
        self.size + 1
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        let n = self.size + 1;
        (x * n + y) * n + z
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> f32 {
        self.samples[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, v: f32) {
        let i = self.idx(x, y, z);
        self.samples[i] = v;
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// True when every sample lies on the same side of `isolevel`,
    /// in which case no cube can produce a triangle.
    pub fn is_uniform(&self, isolevel: f32) -> bool {
        let mut it = self.samples.iter().map(|&v| v > isolevel);
        match it.next() {
            Some(first) => it.all(|s| s == first),
            None => true,
        }
    }
}
