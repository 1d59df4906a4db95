//! Shape-changing transforms
//!
//! Everything here except [`reverse_h`](Matrix::reverse_h) and
//! [`reverse_v`](Matrix::reverse_v) returns a new, independent matrix that
//! inherits the source's executor. Copies that move cells between rows and
//! columns, and large resizing or tiling copies, go through
//! [`ParallelExecutor::generate`](crate::ParallelExecutor::generate).

use std::ops::Range;

use primat_core::{
    validation::{check_range, check_repeats, checked_extent, checked_storage},
    MatrixElement, MatrixError, Result, Shape,
};

use super::Matrix;

impl<T: MatrixElement> Matrix<T> {
    /// Deep copy
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Copy of the rows in `rows`
    pub fn copy_rows(&self, rows: Range<usize>) -> Result<Self> {
        check_range(&rows, self.rows)?;
        Ok(self.derive(self.data[rows].to_vec(), self.cols))
    }

    /// Copy of the sub-rectangle `rows x cols`
    pub fn copy_range(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self> {
        check_range(&rows, self.rows)?;
        check_range(&cols, self.cols)?;
        let data = self.data[rows]
            .iter()
            .map(|row| row[cols.clone()].to_vec())
            .collect();
        Ok(self.derive(data, cols.len()))
    }

    /// Rows become columns
    pub fn transpose(&self) -> Self {
        self.regrid(self.shape().transposed(), |data, i, j| data[j][i].clone())
    }

    /// Quarter turn clockwise
    pub fn rotate90(&self) -> Self {
        let rows = self.rows;
        self.regrid(self.shape().transposed(), |data, i, j| {
            data[rows - 1 - j][i].clone()
        })
    }

    /// Half turn
    pub fn rotate180(&self) -> Self {
        let data = self
            .data
            .iter()
            .rev()
            .map(|row| row.iter().rev().cloned().collect())
            .collect();
        self.derive(data, self.cols)
    }

    /// Quarter turn counter-clockwise
    pub fn rotate270(&self) -> Self {
        let cols = self.cols;
        self.regrid(self.shape().transposed(), |data, i, j| {
            data[j][cols - 1 - i].clone()
        })
    }

    /// Fill a `shape` result from `cell(source, i, j)`
    ///
    /// Large copies are split over the executor. Serial copies walk the
    /// longer source dimension in the inner loop.
    fn regrid<F>(&self, shape: Shape, cell: F) -> Self
    where
        F: Fn(&[Vec<T>], usize, usize) -> T + Sync,
    {
        let source = &self.data;
        if self.parallel_for(shape) {
            let out = self
                .exec
                .generate(shape.rows, shape.cols, |i, j| cell(source, i, j), true);
            return self.derive(out, shape.cols);
        }

        if self.rows <= self.cols {
            let mut out: Vec<Vec<T>> = (0..shape.rows).map(|_| Vec::with_capacity(shape.cols)).collect();
            for j in 0..shape.cols {
                for (i, row) in out.iter_mut().enumerate() {
                    row.push(cell(source, i, j));
                }
            }
            self.derive(out, shape.cols)
        } else {
            let out = (0..shape.rows)
                .map(|i| (0..shape.cols).map(|j| cell(source, i, j)).collect())
                .collect();
            self.derive(out, shape.cols)
        }
    }

    /// Re-lay the row-major cell order into `rows x cols`
    ///
    /// Surplus source cells are dropped; missing ones are the element zero.
    pub fn reshape(&self, rows: usize, cols: usize) -> Result<Self> {
        checked_storage::<T>(rows, cols)?;
        let source = &self.data;
        let (src_cols, count) = (self.cols, self.count());
        let parallel = self.parallel_for(Shape::new(rows, cols));

        let out = self.exec.generate(
            rows,
            cols,
            |i, j| {
                let flat = (i * cols + j) as u64;
                if flat < count {
                    let flat = flat as usize;
                    source[flat / src_cols][flat % src_cols].clone()
                } else {
                    T::zero()
                }
            },
            parallel,
        );
        Ok(self.derive(out, cols))
    }

    /// Reshape to `cols` columns and as many rows as the cells need
    pub fn reshape_cols(&self, cols: usize) -> Result<Self> {
        if cols == 0 {
            return Err(MatrixError::InvalidArgument("column count must be bigger than 0"));
        }
        let rows = usize::try_from(self.count().div_ceil(cols as u64)).map_err(|_| {
            MatrixError::DimensionOverflow {
                rows: usize::MAX,
                cols,
            }
        })?;
        self.reshape(rows, cols)
    }

    /// Resize to `rows x cols`, keeping the top-left corner and zero-filling
    pub fn extend(&self, rows: usize, cols: usize) -> Result<Self> {
        self.extend_with(rows, cols, T::zero())
    }

    /// Resize to `rows x cols`, keeping the top-left corner
    ///
    /// New cells take `fill`. Smaller targets truncate.
    pub fn extend_with(&self, rows: usize, cols: usize, fill: T) -> Result<Self> {
        checked_storage::<T>(rows, cols)?;
        if rows <= self.rows && cols <= self.cols {
            return self.copy_range(0..rows, 0..cols);
        }

        let keep = cols.min(self.cols);
        if self.parallel_for(Shape::new(rows, cols)) {
            let (source, fill) = (&self.data, &fill);
            let out = self.exec.generate(
                rows,
                cols,
                |i, j| match source.get(i) {
                    Some(src) if j < keep => src[j].clone(),
                    _ => fill.clone(),
                },
                true,
            );
            return Ok(self.derive(out, cols));
        }

        let data = (0..rows)
            .map(|i| match self.data.get(i) {
                Some(src) => {
                    let mut row = Vec::with_capacity(cols);
                    row.extend_from_slice(&src[..keep]);
                    row.resize(cols, fill.clone());
                    row
                }
                None => vec![fill.clone(); cols],
            })
            .collect();
        Ok(self.derive(data, cols))
    }

    /// Grow on every side by the given margins, zero-filling
    pub fn pad(&self, up: usize, down: usize, left: usize, right: usize) -> Result<Self> {
        self.pad_with(up, down, left, right, T::zero())
    }

    /// Grow on every side by the given margins, filling new cells with `fill`
    pub fn pad_with(&self, up: usize, down: usize, left: usize, right: usize, fill: T) -> Result<Self> {
        let rows = checked_extent(up, self.rows, down);
        let cols = checked_extent(left, self.cols, right);
        let (Some(rows), Some(cols)) = (rows, cols) else {
            return Err(MatrixError::DimensionOverflow {
                rows: self.rows,
                cols: self.cols,
            });
        };
        checked_storage::<T>(rows, cols)?;

        if self.parallel_for(Shape::new(rows, cols)) {
            let (source, fill) = (&self.data, &fill);
            let (src_rows, src_cols) = (self.rows, self.cols);
            let out = self.exec.generate(
                rows,
                cols,
                |i, j| {
                    let inside_rows = (up..up + src_rows).contains(&i);
                    if inside_rows && (left..left + src_cols).contains(&j) {
                        source[i - up][j - left].clone()
                    } else {
                        fill.clone()
                    }
                },
                true,
            );
            return Ok(self.derive(out, cols));
        }

        let mut data = Vec::with_capacity(rows);
        data.extend((0..up).map(|_| vec![fill.clone(); cols]));
        for src in &self.data {
            let mut row = Vec::with_capacity(cols);
            row.resize(left, fill.clone());
            row.extend_from_slice(src);
            row.resize(cols, fill.clone());
            data.push(row);
        }
        data.extend((0..down).map(|_| vec![fill.clone(); cols]));
        Ok(self.derive(data, cols))
    }

    /// Expand every cell into a `row_repeats x col_repeats` block
    pub fn repelem(&self, row_repeats: usize, col_repeats: usize) -> Result<Self> {
        check_repeats(row_repeats, col_repeats)?;
        let (rows, cols) = self.repeated_shape(row_repeats, col_repeats)?;
        if self.parallel_for(Shape::new(rows, cols)) {
            let source = &self.data;
            let out = self.exec.generate(
                rows,
                cols,
                |i, j| source[i / row_repeats][j / col_repeats].clone(),
                true,
            );
            return Ok(self.derive(out, cols));
        }

        let mut data = Vec::with_capacity(rows);
        for src in &self.data {
            let row: Vec<T> = src
                .iter()
                .flat_map(|value| std::iter::repeat_n(value, col_repeats))
                .cloned()
                .collect();
            data.extend(std::iter::repeat_n(row, row_repeats));
        }
        Ok(self.derive(data, cols))
    }

    /// Tile the whole matrix `row_repeats x col_repeats` times
    pub fn repmat(&self, row_repeats: usize, col_repeats: usize) -> Result<Self> {
        check_repeats(row_repeats, col_repeats)?;
        let (rows, cols) = self.repeated_shape(row_repeats, col_repeats)?;
        if self.parallel_for(Shape::new(rows, cols)) {
            let (source, src_rows, src_cols) = (&self.data, self.rows, self.cols);
            let out = self.exec.generate(
                rows,
                cols,
                |i, j| source[i % src_rows][j % src_cols].clone(),
                true,
            );
            return Ok(self.derive(out, cols));
        }

        let band: Vec<Vec<T>> = self
            .data
            .iter()
            .map(|src| (0..col_repeats).flat_map(|_| src.iter().cloned()).collect())
            .collect();
        let mut data = Vec::with_capacity(rows);
        for _ in 0..row_repeats {
            data.extend(band.iter().cloned());
        }
        Ok(self.derive(data, cols))
    }

    fn repeated_shape(&self, row_repeats: usize, col_repeats: usize) -> Result<(usize, usize)> {
        let overflow = MatrixError::DimensionOverflow {
            rows: self.rows,
            cols: self.cols,
        };
        let rows = self.rows.checked_mul(row_repeats).ok_or(overflow)?;
        let cols = self.cols.checked_mul(col_repeats).ok_or(overflow)?;
        checked_storage::<T>(rows, cols)?;
        Ok((rows, cols))
    }

    /// Reverse every row in place
    pub fn reverse_h(&mut self) {
        for row in &mut self.data {
            row.reverse();
        }
    }

    /// Reverse the row order in place, which reverses every column
    pub fn reverse_v(&mut self) {
        self.data.reverse();
    }

    /// Mirrored copy, left to right
    pub fn flip_h(&self) -> Self {
        let mut out = self.copy();
        out.reverse_h();
        out
    }

    /// Mirrored copy, top to bottom
    pub fn flip_v(&self) -> Self {
        let mut out = self.copy();
        out.reverse_v();
        out
    }

    /// Stack `other` below this matrix
    pub fn vstack(&self, other: &Self) -> Result<Self> {
        if self.cols != other.cols {
            return Err(MatrixError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        checked_storage::<T>(self.rows.saturating_add(other.rows), self.cols)?;

        let data = self.data.iter().chain(&other.data).cloned().collect();
        Ok(self.derive(data, self.cols))
    }

    /// Place `other` to the right of this matrix
    pub fn hstack(&self, other: &Self) -> Result<Self> {
        if self.rows != other.rows {
            return Err(MatrixError::ShapeMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        let cols = self.cols.saturating_add(other.cols);
        checked_storage::<T>(self.rows, cols)?;

        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(left, right)| {
                let mut row = Vec::with_capacity(cols);
                row.extend_from_slice(left);
                row.extend_from_slice(right);
                row
            })
            .collect();
        Ok(self.derive(data, cols))
    }

    /// All cells in row-major order
    pub fn flatten(&self) -> Vec<T> {
        self.data.concat()
    }
}
