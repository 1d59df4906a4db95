//! Dense row-major matrix container
//!
//! [`Matrix<T>`] owns `rows` row-buffers of exactly `cols` elements each and
//! a handle to the [`ParallelExecutor`] its bulk operations run on. The
//! operations are split by concern:
//!
//! - [`access`]: bounds-checked element, row, column and neighbour access
//! - [`diagonal`]: diagonal factories and diagonal get/set/update
//! - [`elementwise`]: bulk map/update/zip/arithmetic routed through the executor
//! - [`transform`]: shape-changing copies (transpose, rotate, reshape, pad, tile, stack)
//! - [`convert`]: boxing to and from the generic `Option<T>` kind
//!
//! Row-major and column-major traversal lives in [`crate::traversal`].

use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::{Index, IndexMut},
    sync::Arc,
};

use primat_core::{
    validation::{check_rectangular, checked_storage},
    DenseMatrix, MatrixElement, Result, Shape,
};

use crate::executor::ParallelExecutor;

pub mod access;
pub mod convert;
pub mod diagonal;
pub mod elementwise;
pub mod transform;

/// Dense, rectangular matrix of one element kind
#[derive(Clone)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<Vec<T>>,
    exec: Arc<ParallelExecutor>,
}

impl<T: MatrixElement> Matrix<T> {
    /// Adopt `rows` as the backing storage
    ///
    /// Fails with [`RaggedRows`](primat_core::MatrixError::RaggedRows) if any
    /// row-buffer differs in length from the first.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        Self::from_rows_in(rows, ParallelExecutor::shared())
    }

    /// Like [`from_rows`](Self::from_rows), running bulk operations on `exec`
    pub fn from_rows_in(rows: Vec<Vec<T>>, exec: Arc<ParallelExecutor>) -> Result<Self> {
        let cols = check_rectangular(&rows)?;
        Ok(Self {
            rows: rows.len(),
            cols,
            data: rows,
            exec,
        })
    }

    /// The 0x0 matrix
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            data: Vec::new(),
            exec: ParallelExecutor::shared(),
        }
    }

    /// `rows x cols` matrix with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Result<Self> {
        checked_storage::<T>(rows, cols)?;
        Ok(Self::adopt(
            vec![vec![value; cols]; rows],
            cols,
            ParallelExecutor::shared(),
        ))
    }

    /// `rows x cols` matrix of the element kind's zero
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::filled(rows, cols, T::zero())
    }

    /// `rows x cols` matrix whose cell `(i, j)` is `f(i, j)`
    pub fn from_fn<F>(rows: usize, cols: usize, f: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> T + Sync,
    {
        checked_storage::<T>(rows, cols)?;
        let exec = ParallelExecutor::shared();
        let parallel = exec.is_parallelable(Shape::new(rows, cols));
        let data = exec.generate(rows, cols, f, parallel);
        Ok(Self::adopt(data, cols, exec))
    }

    /// Single-row matrix holding `values`
    pub fn row_vector(values: Vec<T>) -> Self {
        let cols = values.len();
        Self::adopt(vec![values], cols, ParallelExecutor::shared())
    }

    /// Single-column matrix holding `values`
    pub fn column_vector(values: Vec<T>) -> Self {
        let data = values.into_iter().map(|value| vec![value]).collect();
        Self::adopt(data, 1, ParallelExecutor::shared())
    }

    /// Single-row matrix of `len` copies of `value`
    pub fn repeat(value: T, len: usize) -> Self {
        Self::row_vector(vec![value; len])
    }

    /// Storage already known to be `data.len() x cols`
    pub(crate) fn adopt(data: Vec<Vec<T>>, cols: usize, exec: Arc<ParallelExecutor>) -> Self {
        debug_assert!(data.iter().all(|row| row.len() == cols));
        Self {
            rows: data.len(),
            cols,
            data,
            exec,
        }
    }

    /// Wrap `data` as a new matrix sharing this matrix's executor
    pub(crate) fn derive<U: MatrixElement>(&self, data: Vec<Vec<U>>, cols: usize) -> Matrix<U> {
        Matrix::adopt(data, cols, Arc::clone(&self.exec))
    }

    /// Run subsequent bulk operations on `exec`
    pub fn with_executor(mut self, exec: Arc<ParallelExecutor>) -> Self {
        self.exec = exec;
        self
    }

    pub fn executor(&self) -> &Arc<ParallelExecutor> {
        &self.exec
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Element count, computed wide
    pub fn count(&self) -> u64 {
        self.shape().count()
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_same_shape<U: MatrixElement>(&self, other: &Matrix<U>) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Borrow the row-buffers
    pub fn as_rows(&self) -> &[Vec<T>] {
        &self.data
    }

    /// Give up the row-buffers
    pub fn into_rows(self) -> Vec<Vec<T>> {
        self.data
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<T>] {
        &mut self.data
    }

    pub(crate) fn parallel_for(&self, shape: Shape) -> bool {
        self.exec.is_parallelable(shape)
    }
}

impl<T: MatrixElement> Default for Matrix<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: MatrixElement> DenseMatrix for Matrix<T> {
    type Element = T;

    fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    fn get_element(&self, row: usize, col: usize) -> Option<&T> {
        self.data.get(row)?.get(col)
    }
}

impl<T: MatrixElement> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row][col]
    }
}

impl<T: MatrixElement> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[row][col]
    }
}

impl<T: MatrixElement> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.data == other.data
    }
}

impl<T: MatrixElement + Eq> Eq for Matrix<T> {}

impl<T: MatrixElement + Hash> Hash for Matrix<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows.hash(state);
        self.cols.hash(state);
        self.data.hash(state);
    }
}

/// Wrapper rendering one element through [`MatrixElement::fmt_element`]
struct Cell<'a, T>(&'a T);

impl<T: MatrixElement> fmt::Debug for Cell<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_element(f)
    }
}

/// Renders `[[1, 2], [3, 4]]`
impl<T: MatrixElement> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, row) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                value.fmt_element(f)?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}

impl<T: MatrixElement> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<Cell<'_, T>>> = self
            .data
            .iter()
            .map(|row| row.iter().map(Cell).collect())
            .collect();
        f.debug_struct("Matrix")
            .field("kind", &T::KIND)
            .field("shape", &self.shape())
            .field("data", &rows)
            .finish()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::*;

    impl<T: MatrixElement + Serialize> Serialize for Matrix<T> {
        fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            self.data.serialize(serializer)
        }
    }

    impl<'de, T: MatrixElement + Deserialize<'de>> Deserialize<'de> for Matrix<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
            let rows = Vec::<Vec<T>>::deserialize(deserializer)?;
            Matrix::from_rows(rows).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use primat_core::MatrixError;

    use super::*;

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Matrix::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_shape_queries() {
        let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.count(), 6);
        assert_eq!(m.shape(), Shape::new(2, 3));
        assert!(!m.is_square());
        assert!(!m.is_empty());
        assert_eq!(m[(1, 2)], 6);

        let empty = Matrix::<i32>::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.count(), 0);
        assert!(Matrix::<i32>::zeros(0, 5).unwrap().is_empty());
    }

    #[test]
    fn test_factories() {
        let filled = Matrix::filled(2, 2, 7i64).unwrap();
        assert_eq!(filled.to_string(), "[[7, 7], [7, 7]]");

        let generated = Matrix::from_fn(2, 3, |i, j| (i * 3 + j) as i32).unwrap();
        assert_eq!(generated.to_string(), "[[0, 1, 2], [3, 4, 5]]");

        assert_eq!(Matrix::row_vector(vec![1, 2]).shape(), Shape::new(1, 2));
        assert_eq!(Matrix::column_vector(vec![1, 2]).shape(), Shape::new(2, 1));
        assert_eq!(Matrix::repeat('x', 3).to_string(), "[[x, x, x]]");

        assert_eq!(
            Matrix::<i8>::zeros(usize::MAX, 2).unwrap_err(),
            MatrixError::DimensionOverflow {
                rows: usize::MAX,
                cols: 2
            }
        );
    }

    #[test]
    fn test_factories_reject_huge_row_tables() {
        let overflow = MatrixError::DimensionOverflow {
            rows: usize::MAX / 8,
            cols: 0,
        };
        assert_eq!(Matrix::<i32>::zeros(usize::MAX / 8, 0).unwrap_err(), overflow);
        assert_eq!(Matrix::filled(usize::MAX / 8, 0, 'x').unwrap_err(), overflow);
        assert_eq!(
            Matrix::from_fn(usize::MAX / 8, 0, |_, _| 0i8).unwrap_err(),
            overflow
        );
        assert!(Matrix::<i8>::zeros(1, usize::MAX).is_err());
        assert!(Matrix::<i32>::zeros(4, 0).is_ok());
    }

    #[test]
    fn test_display_per_kind() {
        let ints = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(ints.to_string(), "[[1, 2], [3, 4]]");

        let floats = Matrix::from_rows(vec![vec![1.0f64, 2.5]]).unwrap();
        assert_eq!(floats.to_string(), "[[1.0, 2.5]]");

        let bools = Matrix::row_vector(vec![true, false]);
        assert_eq!(bools.to_string(), "[[true, false]]");

        let objects = Matrix::row_vector(vec![Some("a"), None]);
        assert_eq!(objects.to_string(), "[[\"a\", null]]");

        assert_eq!(Matrix::<i32>::empty().to_string(), "[]");
        assert_eq!(Matrix::<i32>::zeros(2, 0).unwrap().to_string(), "[[], []]");
    }

    #[test]
    fn test_equality_ignores_executor() {
        let a = Matrix::from_rows(vec![vec![1, 2]]).unwrap();
        let b = a
            .clone()
            .with_executor(Arc::new(ParallelExecutor::serial()));
        assert_eq!(a, b);
        assert_ne!(a, Matrix::from_rows(vec![vec![1], vec![2]]).unwrap());
    }

    #[test]
    fn test_dense_matrix_view() {
        fn corner<M: DenseMatrix>(m: &M) -> Option<&M::Element> {
            m.get_element(m.nrows().checked_sub(1)?, m.ncols().checked_sub(1)?)
        }

        let m = Matrix::from_rows(vec![vec!['a', 'b'], vec!['c', 'd']]).unwrap();
        assert_eq!(corner(&m), Some(&'d'));
        assert_eq!(corner(&Matrix::<char>::empty()), None);
        assert_eq!(m.element_count(), 4);
        assert!(m.same_shape_as(&Matrix::<f32>::zeros(2, 2).unwrap()));
        assert_eq!(m.get_element(2, 0), None);
    }

    #[test]
    fn test_debug_includes_shape() {
        let m = Matrix::row_vector(vec![1i16]);
        let debug = format!("{m:?}");
        assert!(debug.contains("Matrix"));
        assert!(debug.contains("rows: 1"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_nested_rows() {
        let m = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[1,2],[3,4]]");

        let back: Matrix<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        assert!(serde_json::from_str::<Matrix<i32>>("[[1,2],[3]]").is_err());
    }
}
