//! Board model and lock registry.
//!
//! - `Board`: N×N grid of `Cell`s with full-line and run-length queries
//! - `LockMap`: per-cell countdowns marking cells temporarily unplayable
//!
//! `playable_cells` combines both: the empty, unlocked cells a move may
//! target.

pub mod grid;
pub mod locks;

pub use grid::{check_full_line_winner, Axis, Board, Cell, LineId, Run};
pub use locks::LockMap;

/// Empty, unlocked cells in row-major order.
#[must_use]
pub fn playable_cells(board: &Board, locks: &LockMap) -> Vec<usize> {
    board.empty_cells().filter(|&i| !locks.is_locked(i)).collect()
}
