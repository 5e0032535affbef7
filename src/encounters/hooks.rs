//! Passive effects applied at their trigger points.
//!
//! Each hook rolls its chance (if any), picks cells uniformly from the
//! eligible set, and reports what it did. Locked cells are never eligible.
//! Double Tap only rolls here; the extra move itself goes through the
//! engine's normal enemy-move pipeline.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{playable_cells, Board, Cell, LockMap};
use crate::core::{GameRng, Side};

/// A passive that actually fired.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassiveEvent {
    /// Thorns placed an enemy mark.
    Thorns { index: usize },
    /// Lockdown locked these cells.
    Lockdown { cells: Vec<usize>, turns: u32 },
    /// Corrupt removed a player mark.
    Corrupt { index: usize },
    /// Double Tap granted an extra enemy move.
    DoubleTap,
}

/// With probability `chance`, mark a random playable cell for `enemy`.
pub fn apply_thorns(
    board: &mut Board,
    locks: &LockMap,
    enemy: Side,
    chance: f64,
    rng: &mut GameRng,
) -> Option<PassiveEvent> {
    if !rng.gen_bool(chance) {
        return None;
    }
    let index = *rng.choose(&playable_cells(board, locks))?;
    board.set(index, Cell::Mark(enemy));
    debug!(target: "roguetac::passives", index, "thorns.placed");
    Some(PassiveEvent::Thorns { index })
}

/// Lock up to `count` distinct random playable cells for `turns`.
pub fn apply_lockdown(
    board: &Board,
    locks: &mut LockMap,
    count: u32,
    turns: u32,
    rng: &mut GameRng,
) -> Option<PassiveEvent> {
    let cells = rng.choose_multiple(&playable_cells(board, locks), count as usize);
    if cells.is_empty() {
        return None;
    }
    for &i in &cells {
        locks.lock(i, turns);
    }
    debug!(target: "roguetac::passives", ?cells, turns, "lockdown.locked");
    Some(PassiveEvent::Lockdown { cells, turns })
}

/// With probability `chance`, clear a random unlocked mark of `player`.
pub fn apply_corrupt(
    board: &mut Board,
    locks: &LockMap,
    player: Side,
    chance: f64,
    rng: &mut GameRng,
) -> Option<PassiveEvent> {
    if !rng.gen_bool(chance) {
        return None;
    }
    let marks: Vec<usize> = board
        .cells_of(player)
        .filter(|&i| !locks.is_locked(i))
        .collect();
    let index = *rng.choose(&marks)?;
    board.set(index, Cell::Empty);
    debug!(target: "roguetac::passives", index, "corrupt.removed");
    Some(PassiveEvent::Corrupt { index })
}

/// Roll whether the enemy moves again.
pub fn roll_double_tap(chance: f64, rng: &mut GameRng) -> bool {
    rng.gen_bool(chance)
}
