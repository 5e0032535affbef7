//! How a decided fight moves the run phase.

use serde::{Deserialize, Serialize};

use crate::core::{Phase, Side};
use crate::progression::{FightResult, Mode};

/// How a fight ended, from the player's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FightEnd {
    /// Player won; rewards are offered.
    Won,
    /// Enemy won; the run is over.
    Lost,
    /// Score-mode tie.
    Drawn,
    /// Classic full board with no line; the same fight starts over.
    Restarted,
}

impl FightEnd {
    /// Classify `result` under `mode`.
    #[must_use]
    pub fn from_result(result: FightResult, mode: Mode) -> Self {
        match result {
            FightResult::Winner(side) if side == Side::PLAYER => FightEnd::Won,
            FightResult::Winner(_) => FightEnd::Lost,
            FightResult::Draw if mode.allows_draw() => FightEnd::Drawn,
            FightResult::Draw => FightEnd::Restarted,
        }
    }

    /// Phase the run enters.
    #[must_use]
    pub const fn next_phase(self) -> Phase {
        match self {
            FightEnd::Won => Phase::Reward,
            FightEnd::Lost => Phase::GameOver,
            FightEnd::Drawn => Phase::Draw,
            FightEnd::Restarted => Phase::Playing,
        }
    }
}
