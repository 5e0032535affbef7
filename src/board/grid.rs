//! Grid representation, line enumeration, and run lengths.
//!
//! The board is a row-major sequence of `N²` cells. Two distinct notions
//! of "line" live here:
//!
//! - **Full lines** (classic mode): the `N` rows, `N` columns, and the two
//!   full-length diagonals, exactly `2N + 2` lines. A side wins when it
//!   fills one of them.
//! - **Runs** (score mode): the contiguous stretch of one side's marks
//!   through a cell along one of four axes, on any row, column, or
//!   diagonal of the board.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::core::{ConfigError, Side};

/// Contents of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Mark(Side),
}

impl Cell {
    /// Check if the cell is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The side occupying this cell, if any.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Mark(side) => Some(side),
        }
    }
}

/// One of the four scan directions through a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Axis {
    /// All four axes, in scoring order.
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// Forward step as (row delta, column delta).
    #[must_use]
    pub const fn step(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }

    /// The line through (row, col) along this axis.
    #[must_use]
    pub fn line_id(self, row: usize, col: usize) -> LineId {
        match self {
            Axis::Horizontal => LineId::Row(row),
            Axis::Vertical => LineId::Col(col),
            Axis::Diagonal => LineId::Diag(row as isize - col as isize),
            Axis::AntiDiagonal => LineId::AntiDiag(row + col),
        }
    }

    /// Position of (row, col) along its line. Unique within a line.
    #[must_use]
    pub const fn position(self, row: usize, col: usize) -> usize {
        match self {
            Axis::Horizontal => col,
            Axis::Vertical | Axis::Diagonal | Axis::AntiDiagonal => row,
        }
    }
}

/// Stable identity of a line along one axis.
///
/// Diagonals are identified by `row - col` (main direction) and
/// `row + col` (anti direction), so every diagonal of the board, not just
/// the two full-length ones, has an identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineId {
    Row(usize),
    Col(usize),
    Diag(isize),
    AntiDiag(usize),
}

/// A contiguous run of one side's marks along an axis.
///
/// `start` and `end` are inclusive positions along the axis
/// (see `Axis::position`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub line: LineId,
    pub length: usize,
    pub start: usize,
    pub end: usize,
}

/// An N×N board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

/// Unchecked wire form of `Board`.
#[derive(Deserialize)]
struct BoardRepr {
    size: usize,
    cells: Vec<Cell>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = ConfigError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        if repr.size == 0 || repr.size.checked_mul(repr.size) != Some(repr.cells.len()) {
            return Err(ConfigError::MalformedBoard {
                size: repr.size,
                cells: repr.cells.len(),
            });
        }
        Ok(Self {
            size: repr.size,
            cells: repr.cells,
        })
    }
}

impl Board {
    /// Create an empty board of side length `size`.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(size)
            .map(Self::with_size)
            .ok_or(ConfigError::ZeroBoardSize)
    }

    /// Create an empty board of a size known to be positive.
    #[must_use]
    pub fn with_size(size: NonZeroUsize) -> Self {
        let size = size.get();
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Build a board from explicit cells (row-major).
    ///
    /// Returns `None` unless `cells.len()` is a positive perfect square.
    #[must_use]
    pub fn from_cells(cells: Vec<Cell>) -> Option<Self> {
        let size = (cells.len() as f64).sqrt() as usize;
        if size == 0 || size * size != cells.len() {
            return None;
        }
        Some(Self { size, cells })
    }

    /// Side length N.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (N²).
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at `index`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Overwrite a cell. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = cell;
        }
    }

    /// Exchange the contents of two cells.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.cells.len() && b < self.cells.len() {
            self.cells.swap(a, b);
        }
    }

    /// Check whether `index` is on the board.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index < self.cells.len()
    }

    /// (row, col) of a cell index.
    #[must_use]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    /// Cell index of (row, col).
    #[must_use]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Check if no empty cell remains.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Indices of empty cells, row-major.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
    }

    /// Indices of cells holding `side`'s mark, row-major.
    pub fn cells_of(&self, side: Side) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == Cell::Mark(side))
            .map(|(i, _)| i)
    }

    /// Enumerate the `2N + 2` full lines as cell-index lists:
    /// rows, then columns, then the main and anti diagonals.
    #[must_use]
    pub fn lines(size: usize) -> Vec<Vec<usize>> {
        let mut lines = Vec::with_capacity(2 * size + 2);
        for r in 0..size {
            lines.push((0..size).map(|c| r * size + c).collect());
        }
        for c in 0..size {
            lines.push((0..size).map(|r| r * size + c).collect());
        }
        lines.push((0..size).map(|i| i * size + i).collect());
        lines.push((0..size).map(|i| i * size + (size - 1 - i)).collect());
        lines
    }

    /// Contiguous run of `side` through `index` along `axis`.
    ///
    /// Walks backward then forward from `index` while cells hold `side`;
    /// `index` is counted once. Length is 0 when `index` does not hold
    /// `side` or is off the board.
    #[must_use]
    pub fn run_length(&self, index: usize, side: Side, axis: Axis) -> Run {
        let (row, col) = self.coords(index);
        let line = axis.line_id(row, col);
        let pos = axis.position(row, col);

        if self.get(index) != Some(Cell::Mark(side)) {
            return Run { line, length: 0, start: pos, end: pos };
        }

        let (dr, dc) = axis.step();
        let back = self.walk(row, col, -dr, -dc, side);
        let forward = self.walk(row, col, dr, dc, side);

        Run {
            line,
            length: back + forward + 1,
            start: pos - back,
            end: pos + forward,
        }
    }

    /// Count matching cells from (row, col), exclusive, stepping (dr, dc).
    fn walk(&self, row: usize, col: usize, dr: isize, dc: isize, side: Side) -> usize {
        let n = self.size as isize;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        let mut count = 0;
        while r >= 0 && r < n && c >= 0 && c < n {
            if self.cells[(r * n + c) as usize] != Cell::Mark(side) {
                break;
            }
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }
}

/// The side filling some full line, if any.
///
/// Only the `2N + 2` lines from `Board::lines` count; shorter diagonals
/// never win.
#[must_use]
pub fn check_full_line_winner(board: &Board) -> Option<Side> {
    Board::lines(board.size()).into_iter().find_map(|line| {
        let first = board.cells[line[0]].side()?;
        line.iter()
            .all(|&i| board.cells[i] == Cell::Mark(first))
            .then_some(first)
    })
}
