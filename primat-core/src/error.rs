//! Error types for matrix operations

use crate::shape::{Position, Shape};

/// Precondition violations detected before any allocation or mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// Row or column index outside `0..len`
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// Half-open range not contained in `0..len`
    #[error("range {from}..{to} out of bounds for length {len}")]
    RangeOutOfBounds { from: usize, to: usize, len: usize },
    /// Position outside the matrix shape
    #[error("position {position} out of bounds for shape {shape}")]
    PositionOutOfBounds { position: Position, shape: Shape },
    /// Binary operation over incompatible shapes
    #[error("incompatible shapes {left} and {right}")]
    ShapeMismatch { left: Shape, right: Shape },
    /// Diagonal operation on a non-square matrix
    #[error("'rows' and 'cols' must be same to get diagonals: rows={rows}, cols={cols}")]
    NotSquare { rows: usize, cols: usize },
    /// Row buffer whose length differs from the first row
    #[error("row {row} has length {actual}, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// Supplied slice has the wrong length
    #[error("length mismatch: expected {expected}, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// Element count not addressable on this platform
    #[error("dimensions {rows}x{cols} overflow addressable storage")]
    DimensionOverflow { rows: usize, cols: usize },
    /// Any other rejected argument
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Result type for matrix operations
pub type Result<T> = core::result::Result<T, MatrixError>;
