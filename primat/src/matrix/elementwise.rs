//! Bulk element-wise operations
//!
//! Each operation checks its preconditions, asks the matrix's executor
//! once whether the shape is worth splitting, and hands the whole rectangle
//! to [`ParallelExecutor`](crate::ParallelExecutor). In-place updates write
//! through disjoint row blocks; everything else fills a fresh buffer.

use std::ops::Range;

use primat_core::{
    validation::{check_range, check_same_shape},
    MatrixElement, MatrixError, NumericElement, Result, Shape,
};

use super::Matrix;

impl<T: MatrixElement> Matrix<T> {
    pub fn for_each<F>(&self, f: F)
    where
        F: Fn(&T) + Sync,
    {
        self.for_each_indexed(|_, _, value| f(value));
    }

    pub fn for_each_indexed<F>(&self, f: F)
    where
        F: Fn(usize, usize, &T) + Sync,
    {
        let data = &self.data;
        let parallel = self.parallel_for(self.shape());
        self.exec
            .run(0..self.rows, 0..self.cols, |i, j| f(i, j, &data[i][j]), parallel);
    }

    /// Visit the sub-rectangle `rows x cols`
    pub fn for_each_in<F>(&self, rows: Range<usize>, cols: Range<usize>, f: F) -> Result<()>
    where
        F: Fn(usize, usize, &T) + Sync,
    {
        check_range(&rows, self.rows)?;
        check_range(&cols, self.cols)?;

        let data = &self.data;
        let parallel = self.parallel_for(Shape::new(rows.len(), cols.len()));
        self.exec.run(rows, cols, |i, j| f(i, j, &data[i][j]), parallel);
        Ok(())
    }

    /// New matrix of `f` applied to every cell
    pub fn map<U, F>(&self, f: F) -> Matrix<U>
    where
        U: MatrixElement,
        F: Fn(&T) -> U + Sync,
    {
        let data = &self.data;
        let parallel = self.parallel_for(self.shape());
        let out = self
            .exec
            .generate(self.rows, self.cols, |i, j| f(&data[i][j]), parallel);
        self.derive(out, self.cols)
    }

    /// Fallible [`map`](Self::map); the first error is returned and no
    /// matrix is built
    pub fn try_map<U, E, F>(&self, f: F) -> std::result::Result<Matrix<U>, E>
    where
        U: MatrixElement,
        E: Send,
        F: Fn(&T) -> std::result::Result<U, E> + Sync,
    {
        let data = &self.data;
        let parallel = self.parallel_for(self.shape());
        let out = self
            .exec
            .try_generate(self.rows, self.cols, |i, j| f(&data[i][j]), parallel)?;
        Ok(self.derive(out, self.cols))
    }

    pub fn update_all<F>(&mut self, f: F)
    where
        F: Fn(&T) -> T + Sync,
    {
        self.update_all_indexed(|_, _, value| f(value));
    }

    pub fn update_all_indexed<F>(&mut self, f: F)
    where
        F: Fn(usize, usize, &T) -> T + Sync,
    {
        let parallel = self.parallel_for(self.shape());
        let cols = 0..self.cols;
        self.exec.run_rows_mut(
            &mut self.data,
            cols,
            |i, j, value| {
                let updated = f(i, j, value);
                *value = updated;
            },
            parallel,
        );
    }

    /// Fallible in-place update
    ///
    /// Results are computed into a scratch buffer which replaces the storage
    /// only when every cell succeeded, so on error the matrix is unchanged.
    pub fn try_update_all<E, F>(&mut self, f: F) -> std::result::Result<(), E>
    where
        E: Send,
        F: Fn(usize, usize, &T) -> std::result::Result<T, E> + Sync,
    {
        let data = &self.data;
        let parallel = self.parallel_for(self.shape());
        let out = self
            .exec
            .try_generate(self.rows, self.cols, |i, j| f(i, j, &data[i][j]), parallel)?;
        self.data = out;
        Ok(())
    }

    /// Run `f` over every cell as one row-major slice, then write the
    /// slice back row by row
    ///
    /// `f` may reorder the cells freely (sort, rotate, shuffle); the shape
    /// is unchanged.
    pub fn flat_op<F>(&mut self, f: F)
    where
        F: FnOnce(&mut [T]),
    {
        let mut flat = self.data.concat();
        f(&mut flat);
        if self.cols == 0 {
            return;
        }
        for (row, cells) in self.data.iter_mut().zip(flat.chunks_exact(self.cols)) {
            row.clone_from_slice(cells);
        }
    }

    /// Replace every cell matching `predicate` with `new_value`
    pub fn replace_if<P>(&mut self, predicate: P, new_value: T)
    where
        P: Fn(&T) -> bool + Sync,
    {
        self.replace_if_indexed(|_, _, value| predicate(value), new_value);
    }

    pub fn replace_if_indexed<P>(&mut self, predicate: P, new_value: T)
    where
        P: Fn(usize, usize, &T) -> bool + Sync,
    {
        let parallel = self.parallel_for(self.shape());
        let cols = 0..self.cols;
        self.exec.run_rows_mut(
            &mut self.data,
            cols,
            |i, j, value| {
                if predicate(i, j, value) {
                    *value = new_value.clone();
                }
            },
            parallel,
        );
    }

    /// Combine with a same-shaped matrix cell by cell
    pub fn zip_with<U, R, F>(&self, other: &Matrix<U>, f: F) -> Result<Matrix<R>>
    where
        U: MatrixElement,
        R: MatrixElement,
        F: Fn(&T, &U) -> R + Sync,
    {
        check_same_shape(self.shape(), other.shape())?;

        let (a, b) = (&self.data, &other.data);
        let parallel = self.parallel_for(self.shape());
        let out = self
            .exec
            .generate(self.rows, self.cols, |i, j| f(&a[i][j], &b[i][j]), parallel);
        Ok(self.derive(out, self.cols))
    }

    /// Combine with two same-shaped matrices cell by cell
    pub fn zip3_with<U, V, R, F>(&self, second: &Matrix<U>, third: &Matrix<V>, f: F) -> Result<Matrix<R>>
    where
        U: MatrixElement,
        V: MatrixElement,
        R: MatrixElement,
        F: Fn(&T, &U, &V) -> R + Sync,
    {
        check_same_shape(self.shape(), second.shape())?;
        check_same_shape(self.shape(), third.shape())?;

        let (a, b, c) = (&self.data, &second.data, &third.data);
        let parallel = self.parallel_for(self.shape());
        let out = self.exec.generate(
            self.rows,
            self.cols,
            |i, j| f(&a[i][j], &b[i][j], &c[i][j]),
            parallel,
        );
        Ok(self.derive(out, self.cols))
    }

    /// Left fold of `f` over the cells of same-shaped matrices
    ///
    /// A single matrix is copied unchanged.
    pub fn zip_all<F>(matrices: &[Matrix<T>], f: F) -> Result<Matrix<T>>
    where
        F: Fn(&T, &T) -> T + Sync,
    {
        let first = check_zip_inputs(matrices)?;
        let parallel = first.parallel_for(first.shape());
        let out = first.exec.generate(
            first.rows,
            first.cols,
            |i, j| {
                let seed = first.data[i][j].clone();
                matrices[1..]
                    .iter()
                    .fold(seed, |acc, m| f(&acc, &m.data[i][j]))
            },
            parallel,
        );
        Ok(first.derive(out, first.cols))
    }

    /// Combine the cells at each position of same-shaped matrices
    ///
    /// `f` receives one reference per input matrix, in input order.
    pub fn zip_all_with<R, F>(matrices: &[Matrix<T>], f: F) -> Result<Matrix<R>>
    where
        R: MatrixElement,
        F: Fn(&[&T]) -> R + Sync,
    {
        let first = check_zip_inputs(matrices)?;
        let parallel = first.parallel_for(first.shape());
        let out = first.exec.generate(
            first.rows,
            first.cols,
            |i, j| {
                let cells: Vec<&T> = matrices.iter().map(|m| &m.data[i][j]).collect();
                f(&cells)
            },
            parallel,
        );
        Ok(first.derive(out, first.cols))
    }

    /// Matrix product with a caller-supplied accumulate step
    ///
    /// `op(acc, a_ik, b_kj)` is called for every `k` of every destination
    /// cell, starting from `R::zero()`.
    pub fn multiply_with<U, R, F>(&self, other: &Matrix<U>, op: F) -> Result<Matrix<R>>
    where
        U: MatrixElement,
        R: MatrixElement,
        F: Fn(&mut R, &T, &U) + Sync,
    {
        self.exec.multiply(self, other, op)
    }
}

fn check_zip_inputs<T: MatrixElement>(matrices: &[Matrix<T>]) -> Result<&Matrix<T>> {
    let Some(first) = matrices.first() else {
        return Err(MatrixError::InvalidArgument("at least one matrix is required to zip"));
    };
    for m in &matrices[1..] {
        check_same_shape(first.shape(), m.shape())?;
    }
    Ok(first)
}

impl<T: NumericElement> Matrix<T> {
    /// Cell-wise sum, wrapping for integer kinds
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a.elem_add(*b))
    }

    /// Cell-wise difference, wrapping for integer kinds
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a.elem_sub(*b))
    }

    /// Matrix product, `self.cols()` must equal `other.rows()`
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        self.multiply_with(other, |acc, a, b| T::mul_add_into(acc, *a, *b))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;
    use crate::{ParallelConfig, ParallelExecutor};

    fn sample() -> Matrix<i32> {
        Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap()
    }

    fn always_parallel() -> Arc<ParallelExecutor> {
        Arc::new(
            ParallelExecutor::new(ParallelConfig::default().with_threshold(0).with_workers(3))
                .unwrap(),
        )
    }

    fn large(exec: Arc<ParallelExecutor>) -> Matrix<i64> {
        Matrix::from_fn(37, 23, |i, j| (i * 23 + j) as i64)
            .unwrap()
            .with_executor(exec)
    }

    #[test]
    fn test_flat_op_writes_back_row_major() {
        let mut m = Matrix::from_rows(vec![vec![5, 3, 9], vec![1, 8, 2]]).unwrap();
        m.flat_op(|cells| cells.sort_unstable());
        assert_eq!(m.to_string(), "[[1, 2, 3], [5, 8, 9]]");

        m.flat_op(|cells| cells.rotate_left(1));
        assert_eq!(m.to_string(), "[[2, 3, 5], [8, 9, 1]]");

        let mut seen = 0;
        let mut empty = Matrix::<i32>::zeros(4, 0).unwrap();
        empty.flat_op(|cells| seen = cells.len());
        assert_eq!(seen, 0);
        assert_eq!(empty.shape(), Shape::new(4, 0));
    }

    #[test]
    fn test_for_each_visits_every_cell() {
        let sum = AtomicUsize::new(0);
        let m = large(always_parallel());
        m.for_each(|v| {
            sum.fetch_add(*v as usize, Ordering::Relaxed);
        });
        let n = 37 * 23;
        assert_eq!(sum.load(Ordering::Relaxed), n * (n - 1) / 2);
    }

    #[test]
    fn test_for_each_in_checks_ranges() {
        let m = sample();
        let seen = AtomicUsize::new(0);
        m.for_each_in(1..2, 0..2, |i, _, v| {
            assert_eq!(i, 1);
            seen.fetch_add(*v as usize, Ordering::Relaxed);
        })
        .unwrap();
        assert_eq!(seen.load(Ordering::Relaxed), 7);
        assert!(m.for_each_in(0..3, 0..1, |_, _, _| {}).is_err());
    }

    #[test]
    fn test_map_and_try_map() {
        let m = sample();
        assert_eq!(m.map(|v| *v as f64 / 2.0).to_string(), "[[0.5, 1.0], [1.5, 2.0]]");
        assert_eq!(m.map(|v| v % 2 == 0).to_string(), "[[false, true], [false, true]]");

        let ok: std::result::Result<Matrix<i64>, String> = m.try_map(|v| Ok(i64::from(*v)));
        assert_eq!(ok.unwrap().to_string(), "[[1, 2], [3, 4]]");

        let err = m.try_map(|v| if *v == 3 { Err("three") } else { Ok(*v) });
        assert_eq!(err.unwrap_err(), "three");
    }

    #[test]
    fn test_update_and_replace() {
        let mut m = sample();
        m.update_all(|v| v * v);
        assert_eq!(m.to_string(), "[[1, 4], [9, 16]]");

        m.update_all_indexed(|i, j, v| v + (i * 10 + j) as i32);
        assert_eq!(m.to_string(), "[[1, 5], [19, 27]]");

        m.replace_if(|v| *v > 10, 0);
        assert_eq!(m.to_string(), "[[1, 5], [0, 0]]");

        m.replace_if_indexed(|i, j, _| i == j, -1);
        assert_eq!(m.to_string(), "[[-1, 5], [0, -1]]");
    }

    #[test]
    fn test_try_update_all_is_atomic() {
        let mut m = large(always_parallel());
        let before = m.clone();
        let result = m.try_update_all(|i, _, v| if i == 30 { Err(i) } else { Ok(v + 1) });
        assert_eq!(result, Err(30));
        assert_eq!(m, before);

        m.try_update_all::<(), _>(|_, _, v| Ok(v * 2)).unwrap();
        assert_eq!(m[(1, 0)], 46);
    }

    #[test]
    fn test_zip_variants() {
        let a = sample();
        let b = a.map(|v| v * 10);
        assert_eq!(a.zip_with(&b, |x, y| x + y).unwrap().to_string(), "[[11, 22], [33, 44]]");
        assert_eq!(
            a.zip3_with(&b, &a, |x, y, z| x * y - z).unwrap().to_string(),
            "[[9, 38], [87, 156]]"
        );

        let wrong = Matrix::<i32>::zeros(1, 2).unwrap();
        assert_eq!(
            a.zip_with(&wrong, |x, _| *x).unwrap_err(),
            MatrixError::ShapeMismatch {
                left: Shape::new(2, 2),
                right: Shape::new(1, 2)
            }
        );

        let all = [a.clone(), b.clone(), a.clone()];
        let folded = Matrix::zip_all(&all, |x, y| x + y).unwrap();
        assert_eq!(folded.to_string(), "[[12, 24], [36, 48]]");
        assert_eq!(Matrix::zip_all(&all[..1], |x, _| *x).unwrap(), a);

        let maxes = Matrix::zip_all_with(&all, |cells| cells.iter().map(|v| i64::from(**v)).max().unwrap_or(0)).unwrap();
        assert_eq!(maxes.to_string(), "[[10, 20], [30, 40]]");

        assert!(Matrix::<i32>::zip_all(&[], |x, _| *x).is_err());
        assert!(Matrix::zip_all(&[a, wrong], |x, _| *x).is_err());
    }

    #[test]
    fn test_arithmetic_wraps() {
        let a = Matrix::row_vector(vec![i8::MAX, 1]);
        let b = Matrix::row_vector(vec![1i8, 2]);
        assert_eq!(a.add(&b).unwrap().to_string(), "[[-128, 3]]");
        assert_eq!(b.subtract(&a).unwrap().to_string(), "[[-126, 1]]");
    }

    #[test]
    fn test_multiply() {
        let a = sample();
        let b = Matrix::from_rows(vec![vec![5, 6, 7], vec![8, 9, 10]]).unwrap();
        assert_eq!(a.multiply(&b).unwrap().to_string(), "[[21, 24, 27], [47, 54, 61]]");
        assert!(b.multiply(&a).is_err());

        let floats = Matrix::from_rows(vec![vec![0.5f64, 1.5]]).unwrap();
        let col = Matrix::column_vector(vec![2.0f64, 4.0]);
        assert_eq!(floats.multiply(&col).unwrap().to_string(), "[[7.0]]");

        let counted = a
            .multiply_with(&b, |acc: &mut i64, x: &i32, y: &i32| *acc += i64::from(x * y))
            .unwrap();
        assert_eq!(counted[(1, 2)], 61);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let serial = large(Arc::new(ParallelExecutor::serial()));
        let parallel = large(always_parallel());

        assert_eq!(serial.map(|v| v * 3 - 1), parallel.map(|v| v * 3 - 1));
        assert_eq!(
            serial.zip_with(&serial, |a, b| a ^ b).unwrap(),
            parallel.zip_with(&parallel, |a, b| a ^ b).unwrap()
        );

        let mut s = serial.clone();
        let mut p = parallel.clone();
        s.update_all_indexed(|i, j, v| v - (i as i64) * (j as i64));
        p.update_all_indexed(|i, j, v| v - (i as i64) * (j as i64));
        assert_eq!(s, p);

        let t = serial.transpose();
        assert_eq!(serial.multiply(&t).unwrap(), parallel.multiply(&t).unwrap());
    }
}
