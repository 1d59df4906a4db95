//! Bounds-checked element access
//!
//! Every accessor validates its indices and returns a
//! [`MatrixError`](primat_core::MatrixError) instead of panicking. The
//! `Index<(usize, usize)>` impl on [`Matrix`] is the panicking shortcut.

use primat_core::{
    validation::{check_index, check_position},
    MatrixElement, MatrixError, Position, Result,
};

use super::Matrix;

impl<T: MatrixElement> Matrix<T> {
    pub fn get(&self, row: usize, col: usize) -> Result<&T> {
        self.get_at(Position::new(row, col))
    }

    pub fn get_at(&self, position: Position) -> Result<&T> {
        check_position(position, self.shape())?;
        Ok(&self.as_rows()[position.row][position.col])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut T> {
        check_position(Position::new(row, col), self.shape())?;
        Ok(&mut self.rows_mut()[row][col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    pub fn set_at(&mut self, position: Position, value: T) -> Result<()> {
        self.set(position.row, position.col, value)
    }

    /// Borrow row `row` in place
    pub fn row(&self, row: usize) -> Result<&[T]> {
        check_index(row, self.rows())?;
        Ok(&self.as_rows()[row])
    }

    pub fn row_mut(&mut self, row: usize) -> Result<&mut [T]> {
        check_index(row, self.rows())?;
        Ok(&mut self.rows_mut()[row])
    }

    /// Copy of column `col`
    pub fn column(&self, col: usize) -> Result<Vec<T>> {
        check_index(col, self.cols())?;
        Ok(self.as_rows().iter().map(|row| row[col].clone()).collect())
    }

    /// Overwrite row `row` with `values`, which must hold exactly `cols` elements
    pub fn set_row(&mut self, row: usize, values: &[T]) -> Result<()> {
        check_index(row, self.rows())?;
        check_len(values.len(), self.cols())?;
        self.rows_mut()[row].clone_from_slice(values);
        Ok(())
    }

    /// Overwrite column `col` with `values`, which must hold exactly `rows` elements
    pub fn set_column(&mut self, col: usize, values: &[T]) -> Result<()> {
        check_index(col, self.cols())?;
        check_len(values.len(), self.rows())?;
        for (row, value) in self.rows_mut().iter_mut().zip(values) {
            row[col] = value.clone();
        }
        Ok(())
    }

    pub fn update_row<F>(&mut self, row: usize, mut f: F) -> Result<()>
    where
        F: FnMut(&T) -> T,
    {
        check_index(row, self.rows())?;
        for value in self.rows_mut()[row].iter_mut() {
            let updated = f(value);
            *value = updated;
        }
        Ok(())
    }

    pub fn update_column<F>(&mut self, col: usize, mut f: F) -> Result<()>
    where
        F: FnMut(&T) -> T,
    {
        check_index(col, self.cols())?;
        for row in self.rows_mut().iter_mut() {
            let updated = f(&row[col]);
            row[col] = updated;
        }
        Ok(())
    }

    /// Set every cell to `value`
    pub fn fill(&mut self, value: T) {
        for row in self.rows_mut().iter_mut() {
            row.fill(value.clone());
        }
    }

    /// Copy `source` into this matrix with its top-left corner at `(row, col)`
    ///
    /// Only the part of `source` that overlaps this matrix is copied; the
    /// source rows may differ in length.
    pub fn fill_from<R: AsRef<[T]>>(&mut self, row: usize, col: usize, source: &[R]) -> Result<()> {
        if row > self.rows() {
            return Err(MatrixError::IndexOutOfBounds {
                index: row,
                len: self.rows(),
            });
        }
        if col > self.cols() {
            return Err(MatrixError::IndexOutOfBounds {
                index: col,
                len: self.cols(),
            });
        }

        let width = self.cols() - col;
        for (dst, src) in self.rows_mut()[row..].iter_mut().zip(source) {
            let src = src.as_ref();
            let len = src.len().min(width);
            dst[col..col + len].clone_from_slice(&src[..len]);
        }
        Ok(())
    }

    /// Cell above `(row, col)`, `None` on the top edge
    pub fn up_of(&self, row: usize, col: usize) -> Result<Option<&T>> {
        self.neighbour(row, col, |p| p.row.checked_sub(1).map(|r| Position::new(r, p.col)))
    }

    /// Cell below `(row, col)`, `None` on the bottom edge
    pub fn down_of(&self, row: usize, col: usize) -> Result<Option<&T>> {
        self.neighbour(row, col, |p| Some(Position::new(p.row + 1, p.col)))
    }

    /// Cell left of `(row, col)`, `None` on the left edge
    pub fn left_of(&self, row: usize, col: usize) -> Result<Option<&T>> {
        self.neighbour(row, col, |p| p.col.checked_sub(1).map(|c| Position::new(p.row, c)))
    }

    /// Cell right of `(row, col)`, `None` on the right edge
    pub fn right_of(&self, row: usize, col: usize) -> Result<Option<&T>> {
        self.neighbour(row, col, |p| Some(Position::new(p.row, p.col + 1)))
    }

    fn neighbour<F>(&self, row: usize, col: usize, step: F) -> Result<Option<&T>>
    where
        F: FnOnce(Position) -> Option<Position>,
    {
        let position = Position::new(row, col);
        check_position(position, self.shape())?;
        Ok(step(position)
            .filter(|p| self.shape().contains(*p))
            .map(|p| &self.as_rows()[p.row][p.col]))
    }

    /// In-bounds 4-neighbourhood in the order up, right, down, left
    pub fn adjacent4_points(&self, row: usize, col: usize) -> Result<[Option<Position>; 4]> {
        let position = Position::new(row, col);
        check_position(position, self.shape())?;
        Ok([(-1, 0), (0, 1), (1, 0), (0, -1)].map(|offset| self.offset(position, offset)))
    }

    /// In-bounds 8-neighbourhood in the order left-up, up, right-up, right,
    /// right-down, down, left-down, left
    pub fn adjacent8_points(&self, row: usize, col: usize) -> Result<[Option<Position>; 8]> {
        let position = Position::new(row, col);
        check_position(position, self.shape())?;
        Ok([
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
            (1, 0),
            (1, -1),
            (0, -1),
        ]
        .map(|offset| self.offset(position, offset)))
    }

    fn offset(&self, position: Position, (dr, dc): (isize, isize)) -> Option<Position> {
        let row = position.row.checked_add_signed(dr)?;
        let col = position.col.checked_add_signed(dc)?;
        let target = Position::new(row, col);
        self.shape().contains(target).then_some(target)
    }
}

fn check_len(actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(MatrixError::LengthMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use primat_core::Shape;

    use super::*;

    fn sample() -> Matrix<i32> {
        Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap()
    }

    #[test]
    fn test_get_and_set() {
        let mut m = sample();
        assert_eq!(m.get(1, 2), Ok(&6));
        assert_eq!(m.get_at(Position::new(2, 0)), Ok(&7));
        assert_eq!(
            m.get(3, 0),
            Err(MatrixError::PositionOutOfBounds {
                position: Position::new(3, 0),
                shape: Shape::new(3, 3)
            })
        );

        m.set(0, 0, 10).unwrap();
        m.set_at((2, 2).into(), 90).unwrap();
        *m.get_mut(1, 1).unwrap() += 50;
        assert_eq!(m.to_string(), "[[10, 2, 3], [4, 55, 6], [7, 8, 90]]");
        assert!(m.set(0, 3, 0).is_err());
    }

    #[test]
    fn test_row_and_column() {
        let mut m = sample();
        assert_eq!(m.row(1).unwrap(), &[4, 5, 6]);
        assert_eq!(m.column(2).unwrap(), vec![3, 6, 9]);
        assert!(m.row(3).is_err());
        assert!(m.column(3).is_err());

        m.row_mut(0).unwrap()[1] = 20;
        assert_eq!(m[(0, 1)], 20);
    }

    #[test]
    fn test_set_row_and_column_check_length() {
        let mut m = sample();
        m.set_row(0, &[0, 0, 0]).unwrap();
        m.set_column(2, &[1, 1, 1]).unwrap();
        assert_eq!(m.to_string(), "[[0, 0, 1], [4, 5, 1], [7, 8, 1]]");

        assert_eq!(
            m.set_row(0, &[1, 2]),
            Err(MatrixError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert!(m.set_column(0, &[1, 2, 3, 4]).is_err());
    }

    #[test]
    fn test_update_row_and_column() {
        let mut m = sample();
        m.update_row(0, |v| v * 10).unwrap();
        m.update_column(0, |v| -v).unwrap();
        assert_eq!(m.to_string(), "[[-10, 20, 30], [-4, 5, 6], [-7, 8, 9]]");
        assert!(m.update_row(5, |v| *v).is_err());
    }

    #[test]
    fn test_fill_from_copies_overlap_only() {
        let mut m = Matrix::<i32>::zeros(3, 3).unwrap();
        m.fill_from(1, 1, &[vec![1, 2, 3], vec![4]]).unwrap();
        assert_eq!(m.to_string(), "[[0, 0, 0], [0, 1, 2], [0, 4, 0]]");

        m.fill(7);
        assert_eq!(m.to_string(), "[[7, 7, 7], [7, 7, 7], [7, 7, 7]]");

        m.fill_from(3, 0, &[[1, 2]]).unwrap();
        assert!(m.fill_from(4, 0, &[[1]]).is_err());
    }

    #[test]
    fn test_boundary_queries() {
        let m = sample();
        assert_eq!(m.up_of(0, 1), Ok(None));
        assert_eq!(m.up_of(1, 1), Ok(Some(&2)));
        assert_eq!(m.down_of(1, 1), Ok(Some(&8)));
        assert_eq!(m.down_of(2, 1), Ok(None));
        assert_eq!(m.left_of(1, 0), Ok(None));
        assert_eq!(m.left_of(1, 1), Ok(Some(&4)));
        assert_eq!(m.right_of(1, 1), Ok(Some(&6)));
        assert_eq!(m.right_of(1, 2), Ok(None));
        assert!(m.up_of(3, 0).is_err());
    }

    #[test]
    fn test_adjacent_points() {
        let m = sample();
        assert_eq!(
            m.adjacent4_points(0, 0).unwrap(),
            [None, Some(Position::new(0, 1)), Some(Position::new(1, 0)), None]
        );

        let corner = m.adjacent8_points(2, 2).unwrap();
        assert_eq!(
            corner,
            [
                Some(Position::new(1, 1)),
                Some(Position::new(1, 2)),
                None,
                None,
                None,
                None,
                None,
                Some(Position::new(2, 1)),
            ]
        );

        let center = m.adjacent8_points(1, 1).unwrap();
        assert!(center.iter().all(Option::is_some));
        assert_eq!(center[4], Some(Position::new(2, 2)));
        assert!(m.adjacent8_points(0, 3).is_err());
    }
}
