use strata_field::GridError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("grid has {actual} samples per axis, {required} needed")]
    GridTooSmall { required: usize, actual: usize },
    #[error("cube ({i}, {j}, {k}) lies outside a grid of {size} cubes per axis")]
    CubeOutOfRange {
        i: usize,
        j: usize,
        k: usize,
        size: usize,
    },
    #[error("mesh needs {vertices} vertices, more than 16-bit indices can address")]
    IndexOverflow { vertices: usize },
}
