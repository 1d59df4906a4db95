//! Shape model for dense rectangular matrices
//!
//! A matrix is `rows` row-buffers of exactly `cols` values each. The element
//! count is reported in a wide integer so large shapes never overflow.

/// Matrix dimensions as (rows, cols)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    /// Number of row-buffers
    pub rows: usize,
    /// Length of every row-buffer
    pub cols: usize,
}

impl Shape {
    /// Create a new shape
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Element count, `rows * cols`, saturating at `u64::MAX`
    pub const fn count(&self) -> u64 {
        (self.rows as u64).saturating_mul(self.cols as u64)
    }

    /// Whether the shape holds no elements
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `rows == cols`
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Shape with rows and columns swapped
    pub const fn transposed(&self) -> Self {
        Self::new(self.cols, self.rows)
    }

    /// Check if a position falls inside this shape
    pub const fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self::new(rows, cols)
    }
}

impl core::fmt::Display for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A (row, col) pair addressing one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
