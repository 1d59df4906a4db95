//! Per-kind aliases and integer range factories

use primat_core::{IntegerElement, MatrixError, Result};

use crate::Matrix;

pub type BooleanMatrix = Matrix<bool>;
pub type CharMatrix = Matrix<char>;
pub type ByteMatrix = Matrix<i8>;
pub type ShortMatrix = Matrix<i16>;
pub type IntMatrix = Matrix<i32>;
pub type LongMatrix = Matrix<i64>;
pub type FloatMatrix = Matrix<f32>;
pub type DoubleMatrix = Matrix<f64>;
/// Generic nullable kind, the target of [`Matrix::boxed`]
pub type ObjectMatrix<T> = Matrix<Option<T>>;

impl<T: IntegerElement> Matrix<T> {
    /// `1 x n` matrix of `start, start + 1, ..` below `end`
    pub fn range(start: T, end: T) -> Result<Self> {
        Self::range_step(start, end, T::one())
    }

    /// `1 x n` matrix of `start, start + step, ..` stopping before `end`
    ///
    /// A step pointing away from `end` yields a `1 x 0` matrix.
    pub fn range_step(start: T, end: T, step: T) -> Result<Self> {
        let (start, end, step) = (start.to_i128(), end.to_i128(), step.to_i128());
        check_step(step)?;

        let span = end - start;
        let len = if span == 0 || (span > 0) != (step > 0) {
            0
        } else {
            (span + step - step.signum()) / step
        };
        arithmetic_row(start, step, len)
    }

    /// `1 x n` matrix of `start, start + 1, ..` up to and including `end`
    pub fn range_closed(start: T, end: T) -> Result<Self> {
        Self::range_closed_step(start, end, T::one())
    }

    /// `1 x n` matrix of `start, start + step, ..` up to and including `end`
    /// when the step lands on it
    pub fn range_closed_step(start: T, end: T, step: T) -> Result<Self> {
        let (start, end, step) = (start.to_i128(), end.to_i128(), step.to_i128());
        check_step(step)?;

        let span = end - start;
        let len = if span != 0 && (span > 0) != (step > 0) {
            0
        } else {
            span / step + 1
        };
        arithmetic_row(start, step, len)
    }
}

fn check_step(step: i128) -> Result<()> {
    if step == 0 {
        return Err(MatrixError::InvalidArgument("step can't be zero"));
    }
    Ok(())
}

fn arithmetic_row<T: IntegerElement>(start: i128, step: i128, len: i128) -> Result<Matrix<T>> {
    let len = usize::try_from(len).map_err(|_| MatrixError::DimensionOverflow {
        rows: 1,
        cols: usize::MAX,
    })?;
    let values = (0..len)
        .map(|k| T::from_i128_wrapping(start + k as i128 * step))
        .collect();
    Ok(Matrix::row_vector(values))
}
