//! Index, range and dimension validation
//!
//! This module provides pure validation functions for index arithmetic with
//! overflow protection.

use core::{mem::size_of, ops::Range};

use crate::{MatrixError, Position, Result, Shape};

/// Validate that `index < len`
pub const fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(MatrixError::IndexOutOfBounds { index, len });
    }
    Ok(())
}

/// Validate that `from..to` lies within `0..len`
pub const fn check_from_to(from: usize, to: usize, len: usize) -> Result<()> {
    if from > to || to > len {
        return Err(MatrixError::RangeOutOfBounds { from, to, len });
    }
    Ok(())
}

/// Validate a half-open range against a length
pub fn check_range(range: &Range<usize>, len: usize) -> Result<()> {
    check_from_to(range.start, range.end, len)
}

/// Validate that a position addresses a cell of `shape`
pub const fn check_position(position: Position, shape: Shape) -> Result<()> {
    if !shape.contains(position) {
        return Err(MatrixError::PositionOutOfBounds { position, shape });
    }
    Ok(())
}

/// Element count of a `rows x cols` buffer, rejecting shapes whose count
/// overflows `usize`
pub const fn checked_count(rows: usize, cols: usize) -> Result<usize> {
    match rows.checked_mul(cols) {
        Some(count) => Ok(count),
        None => Err(MatrixError::DimensionOverflow { rows, cols }),
    }
}

/// Size of one row-buffer handle (pointer, capacity, length)
const ROW_HANDLE_SIZE: usize = 3 * size_of::<usize>();

/// Element count of a `rows x cols` matrix of `T`, rejecting shapes whose
/// row table or row-buffers exceed what a `Vec` can hold
///
/// Catches zero-width shapes with huge row counts, which pass
/// [`checked_count`] but still allocate one row-buffer per row.
pub const fn checked_storage<T>(rows: usize, cols: usize) -> Result<usize> {
    const LIMIT: usize = isize::MAX as usize;
    let count = match checked_count(rows, cols) {
        Ok(count) => count,
        Err(error) => return Err(error),
    };
    let row_bytes = match cols.checked_mul(size_of::<T>()) {
        Some(bytes) => bytes,
        None => return Err(MatrixError::DimensionOverflow { rows, cols }),
    };
    if rows > LIMIT / ROW_HANDLE_SIZE || row_bytes > LIMIT {
        return Err(MatrixError::DimensionOverflow { rows, cols });
    }
    Ok(count)
}

/// Extent of `before + len + after`, used for padding and tiling
pub const fn checked_extent(before: usize, len: usize, after: usize) -> Option<usize> {
    match before.checked_add(len) {
        Some(partial) => partial.checked_add(after),
        None => None,
    }
}

/// Validate that a shape is square
pub const fn check_square(shape: Shape) -> Result<()> {
    if !shape.is_square() {
        return Err(MatrixError::NotSquare {
            rows: shape.rows,
            cols: shape.cols,
        });
    }
    Ok(())
}

/// Validate that two shapes are identical
pub const fn check_same_shape(left: Shape, right: Shape) -> Result<()> {
    if left.rows != right.rows || left.cols != right.cols {
        return Err(MatrixError::ShapeMismatch { left, right });
    }
    Ok(())
}

/// Validate repeat counts for tiling operations
pub const fn check_repeats(row_repeats: usize, col_repeats: usize) -> Result<()> {
    if row_repeats == 0 || col_repeats == 0 {
        return Err(MatrixError::InvalidArgument(
            "row and column repeats must be bigger than 0",
        ));
    }
    Ok(())
}

/// Validate that every row-buffer has the length of the first one
///
/// Returns the common column count, 0 for no rows.
pub fn check_rectangular<T, R: AsRef<[T]>>(rows: &[R]) -> Result<usize> {
    let Some(first) = rows.first() else {
        return Ok(0);
    };
    let expected = first.as_ref().len();

    for (row, buffer) in rows.iter().enumerate().skip(1) {
        let actual = buffer.as_ref().len();
        if actual != expected {
            return Err(MatrixError::RaggedRows {
                row,
                expected,
                actual,
            });
        }
    }

    checked_count(rows.len(), expected)?;
    Ok(expected)
}
