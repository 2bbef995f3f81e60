//! Error types for focus stack fusion.

use thiserror::Error;

use crate::pixel_grid::Dimensions;

/// Pixelwise operation that found two grids of different shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridOp {
    Add,
    Subtract,
    Mean,
    Fuse,
}

impl std::fmt::Display for GridOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GridOp::Add => "add",
            GridOp::Subtract => "subtract",
            GridOp::Mean => "average",
            GridOp::Fuse => "fuse",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while fusing a focus stack.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FusionError {
    #[error("At least {required} images are required for fusion, got {actual}")]
    NotEnoughImages { required: usize, actual: usize },

    #[error("Image {index} is empty ({dimensions})")]
    EmptyImage { index: usize, dimensions: Dimensions },

    #[error("Dimension mismatch for image {index}: expected {expected}, got {actual}")]
    DimensionMismatch {
        index: usize,
        expected: Dimensions,
        actual: Dimensions,
    },

    #[error("Cannot {op} grids of differing sizes: {left} and {right}")]
    IncompatibleGrids {
        op: GridOp,
        left: Dimensions,
        right: Dimensions,
    },

    #[error("Pixel buffer holds {len} samples, {dimensions} requires {expected}")]
    BufferLength {
        dimensions: Dimensions,
        len: usize,
        expected: usize,
    },

    #[error("Pyramid has {actual} levels, expected {expected}")]
    LevelCountMismatch { expected: usize, actual: usize },

    #[error("Resample target {0} is smaller than 2x2")]
    TargetTooSmall(Dimensions),

    #[error("Cannot resample an empty grid ({0})")]
    EmptySource(Dimensions),

    #[error("Invalid fusion parameter: {0}")]
    InvalidParams(&'static str),
}

impl FusionError {
    /// `true` for errors caused by the caller's input, `false` for internal
    /// invariant violations (shape inconsistencies between values the fuser
    /// produced itself).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FusionError::NotEnoughImages { .. }
                | FusionError::EmptyImage { .. }
                | FusionError::DimensionMismatch { .. }
                | FusionError::BufferLength { .. }
                | FusionError::InvalidParams(_)
        )
    }
}

pub type Result<T, E = FusionError> = std::result::Result<T, E>;
