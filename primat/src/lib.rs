//! primat - Dense Primitive-Element Matrices
//!
//! This library provides a single generic dense matrix, instantiated once per
//! element kind (boolean, char, byte, short, int, long, float, double and a
//! nullable generic kind), with adaptive parallel bulk operations, lazy
//! positional traversal and geometric transforms.
//!
//! ## Architecture
//!
//! primat follows the same split as its core crate:
//!
//! - **primat-core**: element kinds, shape model, errors and validation (no allocation)
//! - **primat**: the [`Matrix`] container and the engines built on it
//!   - [`executor`]: serial/parallel dispatch and the multiply kernel
//!   - [`traversal`]: row, column and diagonal iterators with O(1) skip
//!   - [`matrix::transform`]: transpose, rotate, reshape, pad, tile, stack
//!
//! ## Quick Start
//!
//! ```rust
//! use primat::{IntMatrix, Matrix, MatrixError};
//!
//! fn example() -> Result<(), MatrixError> {
//!     let m: IntMatrix = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]])?;
//!
//!     assert_eq!(m.transpose().to_string(), "[[1, 3], [2, 4]]");
//!     assert_eq!(m.rotate90().to_string(), "[[3, 1], [4, 2]]");
//!     assert_eq!(m.extend_with(3, 3, 9)?.to_string(), "[[1, 2, 9], [3, 4, 9], [9, 9, 9]]");
//!
//!     let doubled = m.map(|v| v * 2);
//!     let product = m.multiply(&doubled)?;
//!     assert_eq!(product[(1, 1)], 44);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Parallelism
//!
//! Bulk operations split across rayon workers once a shape holds more than
//! [`ParallelConfig::DEFAULT_MIN_COUNT`] elements. Pass a matrix its own
//! [`ParallelExecutor`] to change the threshold or pin a worker pool:
//!
//! ```rust
//! use std::sync::Arc;
//! use primat::{LongMatrix, Matrix, ParallelConfig, ParallelExecutor};
//!
//! let exec = ParallelExecutor::new(ParallelConfig::default().with_threshold(1024).with_workers(2))
//!     .expect("worker pool");
//! let mut m: LongMatrix = Matrix::zeros(64, 64).unwrap().with_executor(Arc::new(exec));
//! m.update_all_indexed(|i, j, _| (i * j) as i64);
//! assert_eq!(m[(63, 63)], 3969);
//! ```

pub use primat_core::{
    DenseMatrix, ElementKind, IntegerElement, MatrixElement, MatrixError, NumericElement,
    Position, Result, Shape,
};

pub mod config;
pub mod executor;
pub mod kinds;
pub mod matrix;
pub mod traversal;

pub use config::ParallelConfig;
pub use executor::ParallelExecutor;
pub use kinds::{
    BooleanMatrix, ByteMatrix, CharMatrix, DoubleMatrix, FloatMatrix, IntMatrix, LongMatrix,
    ObjectMatrix, ShortMatrix,
};
pub use matrix::Matrix;
pub use traversal::{ColumnPoints, Elements, PositionalIterator, Positions, RowPoints};

#[cfg(test)]
mod property_tests;
