//! Shape-model abstraction for dense matrices

use super::element::MatrixElement;
use crate::shape::Shape;

/// Read-only view shared by every dense matrix, whatever its storage
///
/// Implementors hold `rows` row-buffers of `cols` values each; the derived
/// accessors only depend on `shape`.
pub trait DenseMatrix {
    /// The element type stored in this matrix
    type Element: MatrixElement;

    /// Get matrix dimensions
    fn shape(&self) -> Shape;

    /// Get an element at the specified position, `None` when out of bounds
    fn get_element(&self, row: usize, col: usize) -> Option<&Self::Element>;

    /// Number of rows
    fn nrows(&self) -> usize {
        self.shape().rows
    }

    /// Number of columns
    fn ncols(&self) -> usize {
        self.shape().cols
    }

    /// Element count in a wide integer
    fn element_count(&self) -> u64 {
        self.shape().count()
    }

    /// Whether both matrices have identical dimensions
    fn same_shape_as<M: DenseMatrix + ?Sized>(&self, other: &M) -> bool {
        self.shape() == other.shape()
    }
}
