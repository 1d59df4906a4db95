//! Abstract interfaces for dense matrices
//!
//! This module defines the element-kind traits every concrete matrix is
//! instantiated over and the read-only shape-model trait.

pub mod element;
pub mod matrix;

pub use element::{IntegerElement, MatrixElement, NumericElement};
pub use matrix::DenseMatrix;
