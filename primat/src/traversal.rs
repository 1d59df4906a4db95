//! Lazy positional traversal
//!
//! A traversal is a [`Cursor`] over positions (row-major, column-major, main
//! diagonal or anti-diagonal) paired with the row-buffers it reads from.
//! Cursors are plain index arithmetic, so skipping `n` elements and counting
//! what is left are both O(1) no matter how far the skip reaches.
//!
//! Every iterator here is single-pass and implements [`PositionalIterator`]
//! on top of [`Iterator`], [`ExactSizeIterator`] and [`FusedIterator`].
//! `nth` and `count` go through the cursor rather than pulling elements one
//! at a time. Any further composition (map, filter, fold) is the standard
//! iterator adapter chain.
//!
//! ```
//! use primat::{Matrix, PositionalIterator};
//!
//! let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
//! let mut column_major = m.stream_v();
//! column_major.advance(3);
//! assert_eq!(column_major.next(), Some(&5));
//! assert_eq!(column_major.len(), 2);
//! ```

use std::{iter::FusedIterator, ops::Range};

use primat_core::{
    validation::{check_index, check_range, check_square},
    MatrixElement, Position, Result,
};

use crate::Matrix;

/// Iterator with O(1) skip and remaining-count
pub trait PositionalIterator: Iterator {
    /// Skip `n` elements without producing them, clamping at the end
    fn advance(&mut self, n: usize);

    /// Elements left to produce
    fn remaining(&self) -> usize;
}

/// Position generator behind every traversal
pub trait Cursor: Clone {
    /// Produce the current position and step past it
    fn next_position(&mut self) -> Option<Position>;

    /// Move forward `n` positions, clamping at the end
    fn advance(&mut self, n: usize);

    fn remaining(&self) -> usize;

    /// Append the elements at every remaining position to `out`, leaving
    /// the cursor at the end
    fn drain_into<T: Clone>(&mut self, data: &[Vec<T>], out: &mut Vec<T>) {
        out.reserve(self.remaining());
        while let Some(p) = self.next_position() {
            out.push(data[p.row][p.col].clone());
        }
    }
}

/// Row-major walk over all columns of `row..end_row`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMajorCursor {
    row: usize,
    col: usize,
    end_row: usize,
    cols: usize,
}

impl RowMajorCursor {
    pub fn new(rows: Range<usize>, cols: usize) -> Self {
        let row = if cols == 0 { rows.end } else { rows.start };
        Self {
            row,
            col: 0,
            end_row: rows.end,
            cols,
        }
    }
}

impl Cursor for RowMajorCursor {
    fn next_position(&mut self) -> Option<Position> {
        if self.row >= self.end_row {
            return None;
        }
        let position = Position::new(self.row, self.col);
        self.col += 1;
        if self.col == self.cols {
            self.col = 0;
            self.row += 1;
        }
        Some(position)
    }

    fn advance(&mut self, n: usize) {
        if n >= self.remaining() {
            self.row = self.end_row;
            self.col = 0;
            return;
        }
        let offset = self.col + n;
        self.row += offset / self.cols;
        self.col = offset % self.cols;
    }

    fn remaining(&self) -> usize {
        (self.end_row - self.row) * self.cols - self.col
    }

    fn drain_into<T: Clone>(&mut self, data: &[Vec<T>], out: &mut Vec<T>) {
        out.reserve(self.remaining());
        if self.row < self.end_row {
            out.extend_from_slice(&data[self.row][self.col..]);
            for row in &data[self.row + 1..self.end_row] {
                out.extend_from_slice(row);
            }
        }
        self.row = self.end_row;
        self.col = 0;
    }
}

/// Column-major walk over all rows of `col..end_col`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMajorCursor {
    row: usize,
    col: usize,
    end_col: usize,
    rows: usize,
}

impl ColumnMajorCursor {
    pub fn new(cols: Range<usize>, rows: usize) -> Self {
        let col = if rows == 0 { cols.end } else { cols.start };
        Self {
            row: 0,
            col,
            end_col: cols.end,
            rows,
        }
    }
}

impl Cursor for ColumnMajorCursor {
    fn next_position(&mut self) -> Option<Position> {
        if self.col >= self.end_col {
            return None;
        }
        let position = Position::new(self.row, self.col);
        self.row += 1;
        if self.row == self.rows {
            self.row = 0;
            self.col += 1;
        }
        Some(position)
    }

    fn advance(&mut self, n: usize) {
        if n >= self.remaining() {
            self.col = self.end_col;
            self.row = 0;
            return;
        }
        let offset = self.row + n;
        self.col += offset / self.rows;
        self.row = offset % self.rows;
    }

    fn remaining(&self) -> usize {
        (self.end_col - self.col) * self.rows - self.row
    }
}

/// Walk along the main diagonal or the anti-diagonal of an `len x len` square
#[derive(Debug, Clone)]
pub struct DiagonalCursor {
    index: usize,
    len: usize,
    anti: bool,
}

impl DiagonalCursor {
    /// Top-left to bottom-right
    pub fn lu2rd(len: usize) -> Self {
        Self {
            index: 0,
            len,
            anti: false,
        }
    }

    /// Top-right to bottom-left
    pub fn ru2ld(len: usize) -> Self {
        Self {
            index: 0,
            len,
            anti: true,
        }
    }
}

impl Cursor for DiagonalCursor {
    fn next_position(&mut self) -> Option<Position> {
        if self.index >= self.len {
            return None;
        }
        let i = self.index;
        self.index += 1;
        let col = if self.anti { self.len - 1 - i } else { i };
        Some(Position::new(i, col))
    }

    fn advance(&mut self, n: usize) {
        self.index = self.index.saturating_add(n).min(self.len);
    }

    fn remaining(&self) -> usize {
        self.len - self.index
    }
}

/// Elements of a matrix in cursor order
#[derive(Debug, Clone)]
pub struct Elements<'a, T, C> {
    data: &'a [Vec<T>],
    cursor: C,
}

impl<'a, T: Clone, C: Cursor> Elements<'a, T, C> {
    pub fn new(data: &'a [Vec<T>], cursor: C) -> Self {
        Self { data, cursor }
    }

    /// Copy every remaining element out, consuming the traversal
    pub fn to_vec(mut self) -> Vec<T> {
        let mut out = Vec::new();
        self.cursor.drain_into(self.data, &mut out);
        out
    }
}

impl<'a, T, C: Cursor> Iterator for Elements<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let p = self.cursor.next_position()?;
        Some(&self.data[p.row][p.col])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.cursor.remaining();
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        self.cursor.advance(n);
        self.next()
    }

    fn count(self) -> usize {
        self.cursor.remaining()
    }
}

impl<T, C: Cursor> ExactSizeIterator for Elements<'_, T, C> {}

impl<T, C: Cursor> FusedIterator for Elements<'_, T, C> {}

impl<T, C: Cursor> PositionalIterator for Elements<'_, T, C> {
    fn advance(&mut self, n: usize) {
        self.cursor.advance(n);
    }

    fn remaining(&self) -> usize {
        self.cursor.remaining()
    }
}

/// Positions in cursor order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positions<C> {
    cursor: C,
}

impl<C: Cursor> Positions<C> {
    pub fn new(cursor: C) -> Self {
        Self { cursor }
    }
}

impl<C: Cursor> Iterator for Positions<C> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        self.cursor.next_position()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.cursor.remaining();
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<Position> {
        self.cursor.advance(n);
        self.next()
    }

    fn count(self) -> usize {
        self.cursor.remaining()
    }
}

impl<C: Cursor> ExactSizeIterator for Positions<C> {}

impl<C: Cursor> FusedIterator for Positions<C> {}

impl<C: Cursor> PositionalIterator for Positions<C> {
    fn advance(&mut self, n: usize) {
        self.cursor.advance(n);
    }

    fn remaining(&self) -> usize {
        self.cursor.remaining()
    }
}

/// Row slices in order
#[derive(Debug, Clone)]
pub struct Rows<'a, T> {
    rows: &'a [Vec<T>],
}

impl<'a, T> Iterator for Rows<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<&'a [T]> {
        let (first, rest) = self.rows.split_first()?;
        self.rows = rest;
        Some(first)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rows.len(), Some(self.rows.len()))
    }

    fn nth(&mut self, n: usize) -> Option<&'a [T]> {
        PositionalIterator::advance(self, n);
        self.next()
    }

    fn count(self) -> usize {
        self.rows.len()
    }
}

impl<T> ExactSizeIterator for Rows<'_, T> {}

impl<T> FusedIterator for Rows<'_, T> {}

impl<T> PositionalIterator for Rows<'_, T> {
    fn advance(&mut self, n: usize) {
        self.rows = &self.rows[n.min(self.rows.len())..];
    }

    fn remaining(&self) -> usize {
        self.rows.len()
    }
}

/// One column traversal per column, in order
#[derive(Debug, Clone)]
pub struct Columns<'a, T> {
    data: &'a [Vec<T>],
    cols: Range<usize>,
}

impl<'a, T> Iterator for Columns<'a, T> {
    type Item = Elements<'a, T, ColumnMajorCursor>;

    fn next(&mut self) -> Option<Self::Item> {
        let col = self.cols.next()?;
        let cursor = ColumnMajorCursor::new(col..col + 1, self.data.len());
        Some(Elements {
            data: self.data,
            cursor,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cols.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        PositionalIterator::advance(self, n);
        self.next()
    }

    fn count(self) -> usize {
        self.cols.len()
    }
}

impl<T> ExactSizeIterator for Columns<'_, T> {}

impl<T> FusedIterator for Columns<'_, T> {}

impl<T> PositionalIterator for Columns<'_, T> {
    fn advance(&mut self, n: usize) {
        self.cols.start = self.cols.start.saturating_add(n).min(self.cols.end);
    }

    fn remaining(&self) -> usize {
        self.cols.len()
    }
}

/// One row-major position stream per row, in order
#[derive(Debug, Clone)]
pub struct RowPoints {
    rows: Range<usize>,
    cols: usize,
}

impl Iterator for RowPoints {
    type Item = Positions<RowMajorCursor>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(Positions::new(RowMajorCursor::new(row..row + 1, self.cols)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        PositionalIterator::advance(self, n);
        self.next()
    }

    fn count(self) -> usize {
        self.rows.len()
    }
}

impl ExactSizeIterator for RowPoints {}

impl FusedIterator for RowPoints {}

impl PositionalIterator for RowPoints {
    fn advance(&mut self, n: usize) {
        self.rows.start = self.rows.start.saturating_add(n).min(self.rows.end);
    }

    fn remaining(&self) -> usize {
        self.rows.len()
    }
}

/// One column-major position stream per column, in order
#[derive(Debug, Clone)]
pub struct ColumnPoints {
    cols: Range<usize>,
    rows: usize,
}

impl Iterator for ColumnPoints {
    type Item = Positions<ColumnMajorCursor>;

    fn next(&mut self) -> Option<Self::Item> {
        let col = self.cols.next()?;
        Some(Positions::new(ColumnMajorCursor::new(col..col + 1, self.rows)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cols.size_hint()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        PositionalIterator::advance(self, n);
        self.next()
    }

    fn count(self) -> usize {
        self.cols.len()
    }
}

impl ExactSizeIterator for ColumnPoints {}

impl FusedIterator for ColumnPoints {}

impl PositionalIterator for ColumnPoints {
    fn advance(&mut self, n: usize) {
        self.cols.start = self.cols.start.saturating_add(n).min(self.cols.end);
    }

    fn remaining(&self) -> usize {
        self.cols.len()
    }
}

impl<T: MatrixElement> Matrix<T> {
    /// All elements, row-major
    pub fn stream_h(&self) -> Elements<'_, T, RowMajorCursor> {
        Elements::new(self.as_rows(), RowMajorCursor::new(0..self.rows(), self.cols()))
    }

    pub fn stream_h_row(&self, row: usize) -> Result<Elements<'_, T, RowMajorCursor>> {
        check_index(row, self.rows())?;
        Ok(Elements::new(self.as_rows(), RowMajorCursor::new(row..row + 1, self.cols())))
    }

    /// Elements of the rows in `rows`, row-major
    pub fn stream_h_rows(&self, rows: Range<usize>) -> Result<Elements<'_, T, RowMajorCursor>> {
        check_range(&rows, self.rows())?;
        Ok(Elements::new(self.as_rows(), RowMajorCursor::new(rows, self.cols())))
    }

    /// All elements, column-major
    pub fn stream_v(&self) -> Elements<'_, T, ColumnMajorCursor> {
        Elements::new(self.as_rows(), ColumnMajorCursor::new(0..self.cols(), self.rows()))
    }

    pub fn stream_v_column(&self, col: usize) -> Result<Elements<'_, T, ColumnMajorCursor>> {
        check_index(col, self.cols())?;
        Ok(Elements::new(self.as_rows(), ColumnMajorCursor::new(col..col + 1, self.rows())))
    }

    /// Elements of the columns in `cols`, column-major
    pub fn stream_v_columns(&self, cols: Range<usize>) -> Result<Elements<'_, T, ColumnMajorCursor>> {
        check_range(&cols, self.cols())?;
        Ok(Elements::new(self.as_rows(), ColumnMajorCursor::new(cols, self.rows())))
    }

    /// Main diagonal, top-left first; fails on a non-square matrix
    pub fn stream_lu2rd(&self) -> Result<Elements<'_, T, DiagonalCursor>> {
        check_square(self.shape())?;
        Ok(Elements::new(self.as_rows(), DiagonalCursor::lu2rd(self.rows())))
    }

    /// Anti-diagonal, top-right first; fails on a non-square matrix
    pub fn stream_ru2ld(&self) -> Result<Elements<'_, T, DiagonalCursor>> {
        check_square(self.shape())?;
        Ok(Elements::new(self.as_rows(), DiagonalCursor::ru2ld(self.rows())))
    }

    /// Row slices
    pub fn stream_r(&self) -> Rows<'_, T> {
        Rows { rows: self.as_rows() }
    }

    pub fn stream_r_range(&self, rows: Range<usize>) -> Result<Rows<'_, T>> {
        check_range(&rows, self.rows())?;
        Ok(Rows {
            rows: &self.as_rows()[rows],
        })
    }

    /// One element iterator per column
    pub fn stream_c(&self) -> Columns<'_, T> {
        Columns {
            data: self.as_rows(),
            cols: 0..self.cols(),
        }
    }

    pub fn stream_c_range(&self, cols: Range<usize>) -> Result<Columns<'_, T>> {
        check_range(&cols, self.cols())?;
        Ok(Columns {
            data: self.as_rows(),
            cols,
        })
    }

    pub fn points_h(&self) -> Positions<RowMajorCursor> {
        Positions::new(RowMajorCursor::new(0..self.rows(), self.cols()))
    }

    pub fn points_h_rows(&self, rows: Range<usize>) -> Result<Positions<RowMajorCursor>> {
        check_range(&rows, self.rows())?;
        Ok(Positions::new(RowMajorCursor::new(rows, self.cols())))
    }

    pub fn points_v(&self) -> Positions<ColumnMajorCursor> {
        Positions::new(ColumnMajorCursor::new(0..self.cols(), self.rows()))
    }

    pub fn points_v_columns(&self, cols: Range<usize>) -> Result<Positions<ColumnMajorCursor>> {
        check_range(&cols, self.cols())?;
        Ok(Positions::new(ColumnMajorCursor::new(cols, self.rows())))
    }

    /// One position stream per row
    pub fn points_r(&self) -> RowPoints {
        RowPoints {
            rows: 0..self.rows(),
            cols: self.cols(),
        }
    }

    pub fn points_r_range(&self, rows: Range<usize>) -> Result<RowPoints> {
        check_range(&rows, self.rows())?;
        Ok(RowPoints {
            rows,
            cols: self.cols(),
        })
    }

    /// One position stream per column
    pub fn points_c(&self) -> ColumnPoints {
        ColumnPoints {
            cols: 0..self.cols(),
            rows: self.rows(),
        }
    }

    pub fn points_c_range(&self, cols: Range<usize>) -> Result<ColumnPoints> {
        check_range(&cols, self.cols())?;
        Ok(ColumnPoints {
            cols,
            rows: self.rows(),
        })
    }

    pub fn points_lu2rd(&self) -> Result<Positions<DiagonalCursor>> {
        check_square(self.shape())?;
        Ok(Positions::new(DiagonalCursor::lu2rd(self.rows())))
    }

    pub fn points_ru2ld(&self) -> Result<Positions<DiagonalCursor>> {
        check_square(self.shape())?;
        Ok(Positions::new(DiagonalCursor::ru2ld(self.rows())))
    }
}
