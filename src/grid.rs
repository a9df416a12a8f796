//! Grid coordinates and movement shared by both environments

use serde::{Deserialize, Serialize};

/// A cell on a rectangular grid, addressed as (row, column) from the top-left
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Build a position from a row-major flat index
    pub const fn from_index(index: usize, cols: usize) -> Self {
        Self {
            row: index / cols,
            col: index % cols,
        }
    }

    /// Row-major flat index of this cell
    pub const fn index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// Cell reached by moving one step in `direction`, or `None` when that
    /// step would leave a `rows` x `cols` grid.
    pub fn step(self, direction: Direction, rows: usize, cols: usize) -> Option<Self> {
        let (dr, dc) = direction.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some(Self { row, col })
    }

    /// Like [`Position::step`], but stays in place at the border.
    pub fn step_clamped(self, direction: Direction, rows: usize, cols: usize) -> Self {
        self.step(direction, rows, cols).unwrap_or(self)
    }
}

/// One of the four compass moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (row delta, column delta)
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}
