//! Main (LU2RD) and anti (RU2LD) diagonals of square matrices

use primat_core::{validation::check_square, MatrixElement, MatrixError, Result};

use super::Matrix;

impl<T: MatrixElement> Matrix<T> {
    /// Square matrix with `values` on the main diagonal and zero elsewhere
    pub fn diagonal_lu2rd(values: &[T]) -> Self {
        let mut out = Self::square_zeros(values.len());
        for (i, value) in values.iter().enumerate() {
            out.rows_mut()[i][i] = value.clone();
        }
        out
    }

    /// Square matrix with `values` on the anti-diagonal and zero elsewhere
    pub fn diagonal_ru2ld(values: &[T]) -> Self {
        let n = values.len();
        let mut out = Self::square_zeros(n);
        for (i, value) in values.iter().enumerate() {
            out.rows_mut()[i][n - 1 - i] = value.clone();
        }
        out
    }

    /// Square matrix with both diagonals set
    ///
    /// Either slice may be empty; otherwise both must have the same length.
    /// On odd sizes the anti-diagonal wins the shared center cell.
    pub fn diagonal(lu2rd: &[T], ru2ld: &[T]) -> Result<Self> {
        if !lu2rd.is_empty() && !ru2ld.is_empty() && lu2rd.len() != ru2ld.len() {
            return Err(MatrixError::LengthMismatch {
                expected: lu2rd.len(),
                actual: ru2ld.len(),
            });
        }

        let mut out = Self::diagonal_lu2rd(lu2rd);
        if out.is_empty() {
            return Ok(Self::diagonal_ru2ld(ru2ld));
        }
        if !ru2ld.is_empty() {
            out.set_ru2ld(ru2ld)?;
        }
        Ok(out)
    }

    fn square_zeros(n: usize) -> Self {
        let data = (0..n).map(|_| vec![T::zero(); n]).collect();
        Self::adopt(data, n, crate::ParallelExecutor::shared())
    }

    /// Copy of the main diagonal
    pub fn get_lu2rd(&self) -> Result<Vec<T>> {
        check_square(self.shape())?;
        Ok(self
            .as_rows()
            .iter()
            .enumerate()
            .map(|(i, row)| row[i].clone())
            .collect())
    }

    /// Overwrite the main diagonal from the first `rows` elements of `values`
    pub fn set_lu2rd(&mut self, values: &[T]) -> Result<()> {
        self.check_diagonal_source(values.len())?;
        for (i, (row, value)) in self.rows_mut().iter_mut().zip(values).enumerate() {
            row[i] = value.clone();
        }
        Ok(())
    }

    pub fn update_lu2rd<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&T) -> T,
    {
        check_square(self.shape())?;
        for (i, row) in self.rows_mut().iter_mut().enumerate() {
            let updated = f(&row[i]);
            row[i] = updated;
        }
        Ok(())
    }

    /// Copy of the anti-diagonal, top-right first
    pub fn get_ru2ld(&self) -> Result<Vec<T>> {
        check_square(self.shape())?;
        let last = self.cols().saturating_sub(1);
        Ok(self
            .as_rows()
            .iter()
            .enumerate()
            .map(|(i, row)| row[last - i].clone())
            .collect())
    }

    /// Overwrite the anti-diagonal from the first `rows` elements of `values`
    pub fn set_ru2ld(&mut self, values: &[T]) -> Result<()> {
        self.check_diagonal_source(values.len())?;
        let last = self.cols().saturating_sub(1);
        for (i, (row, value)) in self.rows_mut().iter_mut().zip(values).enumerate() {
            row[last - i] = value.clone();
        }
        Ok(())
    }

    pub fn update_ru2ld<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&T) -> T,
    {
        check_square(self.shape())?;
        let last = self.cols().saturating_sub(1);
        for (i, row) in self.rows_mut().iter_mut().enumerate() {
            let updated = f(&row[last - i]);
            row[last - i] = updated;
        }
        Ok(())
    }

    fn check_diagonal_source(&self, len: usize) -> Result<()> {
        check_square(self.shape())?;
        if len < self.rows() {
            return Err(MatrixError::LengthMismatch {
                expected: self.rows(),
                actual: len,
            });
        }
        Ok(())
    }
}
