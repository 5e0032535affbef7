//! Game mode policy.
//!
//! A single engine serves both rule sets; `Mode` supplies what differs:
//! - the fight result predicate (full line vs score threshold)
//! - the board size for a floor
//! - whether a drawn fight is representable

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::board::{check_full_line_winner, Board};
use crate::core::Side;
use crate::scoring::ScoreLedger;

/// Result of a finished fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FightResult {
    /// One side won.
    Winner(Side),
    /// Board full with no winner.
    Draw,
}

impl FightResult {
    /// Check if `side` won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, FightResult::Winner(s) if *s == side)
    }
}

/// Rule set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Fill a full row, column, or main diagonal to win.
    #[default]
    Classic,
    /// Score runs of three or more; first to the threshold wins.
    Score,
}

impl Mode {
    /// Board side length on `floor` (floors start at 1).
    ///
    /// Classic grows by one per floor from 3; score mode grows by one
    /// every two floors from 8.
    #[must_use]
    pub fn board_size(self, floor: u32) -> usize {
        let floor = floor.max(1) as usize;
        match self {
            Mode::Classic => 2 + floor,
            Mode::Score => 8 + (floor - 1) / 2,
        }
    }

    /// A fresh empty board for `floor`.
    #[must_use]
    pub fn board_for(self, floor: u32) -> Board {
        let size = NonZeroUsize::new(self.board_size(floor)).unwrap_or(NonZeroUsize::MIN);
        Board::with_size(size)
    }

    /// Whether a full board without a winner ends in `Phase::Draw`.
    ///
    /// Classic mode restarts the fight instead.
    #[must_use]
    pub fn allows_draw(self) -> bool {
        matches!(self, Mode::Score)
    }

    /// Whether `side` has met its win condition.
    #[must_use]
    pub fn has_won(self, side: Side, board: &Board, ledger: &ScoreLedger, threshold: u32) -> bool {
        match self {
            Mode::Classic => check_full_line_winner(board) == Some(side),
            Mode::Score => ledger.score(side) >= threshold,
        }
    }

    /// Decide the fight, checking `acting` first.
    ///
    /// Returns `None` while the fight continues.
    #[must_use]
    pub fn fight_result(
        self,
        acting: Side,
        board: &Board,
        ledger: &ScoreLedger,
        threshold: u32,
    ) -> Option<FightResult> {
        for side in [acting, acting.other()] {
            if self.has_won(side, board, ledger, threshold) {
                return Some(FightResult::Winner(side));
            }
        }

        if !board.is_full() {
            return None;
        }

        match self {
            Mode::Classic => Some(FightResult::Draw),
            Mode::Score => {
                let (x, o) = (ledger.score(Side::X), ledger.score(Side::O));
                Some(match x.cmp(&o) {
                    std::cmp::Ordering::Greater => FightResult::Winner(Side::X),
                    std::cmp::Ordering::Less => FightResult::Winner(Side::O),
                    std::cmp::Ordering::Equal => FightResult::Draw,
                })
            }
        }
    }
}
