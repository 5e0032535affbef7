//! Enemy move selection.
//!
//! A fixed-priority heuristic:
//! 1. take the first cell (row-major) that wins for the mover,
//! 2. else block the first cell that would win for the opponent,
//! 3. else pick uniformly among playable cells,
//! 4. else skip (no playable cell).
//!
//! "Wins" is supplied by a `WinProbe`, so the same routine serves the
//! full-line rule and the score threshold.

use crate::board::{check_full_line_winner, playable_cells, Board, Cell, LockMap};
use crate::core::{GameRng, Side};
use crate::scoring::ScoreLedger;

/// Predicate: would placing `side` at `index` win the fight?
pub trait WinProbe {
    /// `board` does not yet hold the mark at `index`.
    fn wins_with(&self, board: &Board, index: usize, side: Side) -> bool;
}

/// Classic rule: the placement completes a full line.
#[derive(Clone, Copy, Debug, Default)]
pub struct FullLineProbe;

impl WinProbe for FullLineProbe {
    fn wins_with(&self, board: &Board, index: usize, side: Side) -> bool {
        let mut probe = board.clone();
        probe.set(index, Cell::Mark(side));
        check_full_line_winner(&probe) == Some(side)
    }
}

/// Score rule: the placement brings the side to the threshold.
#[derive(Clone, Copy, Debug)]
pub struct ScoreProbe<'a> {
    pub ledger: &'a ScoreLedger,
    pub threshold: u32,
}

impl WinProbe for ScoreProbe<'_> {
    fn wins_with(&self, board: &Board, index: usize, side: Side) -> bool {
        let gained = self.ledger.preview_placement(board, index, side);
        gained > 0 && self.ledger.score(side) + gained >= self.threshold
    }
}

/// First playable cell where `side` would win.
#[must_use]
pub fn find_winning_cell(
    board: &Board,
    locks: &LockMap,
    side: Side,
    probe: &impl WinProbe,
) -> Option<usize> {
    playable_cells(board, locks)
        .into_iter()
        .find(|&i| probe.wins_with(board, i, side))
}

/// Pick the cell `own` plays next, or `None` to skip the turn.
pub fn choose_move(
    board: &Board,
    locks: &LockMap,
    own: Side,
    probe: &impl WinProbe,
    rng: &mut GameRng,
) -> Option<usize> {
    if let Some(win) = find_winning_cell(board, locks, own, probe) {
        return Some(win);
    }
    if let Some(block) = find_winning_cell(board, locks, own.other(), probe) {
        return Some(block);
    }
    rng.choose(&playable_cells(board, locks)).copied()
}
