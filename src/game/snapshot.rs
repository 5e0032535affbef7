//! Read-only view of the run for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cards::{Energy, Hand, PendingCard};
use crate::core::{Phase, Side, SideMap};
use crate::encounters::{Encounter, EncounterId, Passive};
use crate::progression::{Mode, RewardOption};

/// The most recently resolved mark. Informational only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub side: Side,
    pub index: usize,
    /// Points the placement earned (score mode only).
    pub score_delta: Option<u32>,
}

/// Public part of the active encounter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSummary {
    pub id: EncounterId,
    pub name: String,
    pub passives: Vec<Passive>,
    pub is_boss: bool,
}

impl From<&Encounter> for EncounterSummary {
    fn from(encounter: &Encounter) -> Self {
        Self {
            id: encounter.id,
            name: encounter.name.to_string(),
            passives: encounter.passives.to_vec(),
            is_boss: encounter.is_boss,
        }
    }
}

/// Everything an observer may see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: Mode,
    pub phase: Phase,
    pub floor: u32,
    pub turn: Side,
    pub board: Board,
    pub scores: SideMap<u32>,
    pub energy: Energy,
    pub hand: Hand,
    /// `(cell, turns remaining)` for every locked cell.
    pub locks: Vec<(usize, u32)>,
    pub encounter: EncounterSummary,
    pub pending_card: Option<PendingCard>,
    pub reward_offer: Vec<RewardOption>,
    pub enemy_thinking: bool,
    pub history_len: usize,
    pub last_move: Option<LastMove>,
}
