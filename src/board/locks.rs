//! Temporary per-cell locks.
//!
//! A lock is a countdown stored per cell; `0` means unlocked. Every
//! committed move ticks the whole map exactly once. A locked cell cannot
//! receive a move, cannot be targeted by a card, and is invisible to the
//! enemy AI and to passive effects that pick random cells.

use serde::{Deserialize, Serialize};

/// Fixed-size lock countdown map, one slot per board cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockMap {
    turns: Vec<u32>,
}

impl LockMap {
    /// Create an all-unlocked map for `cell_count` cells.
    #[must_use]
    pub fn new(cell_count: usize) -> Self {
        Self {
            turns: vec![0; cell_count],
        }
    }

    /// Lock `index` for `turns` ticks, replacing any current countdown.
    ///
    /// Locking for zero turns unlocks the cell. Out-of-range indices are
    /// ignored.
    pub fn lock(&mut self, index: usize, turns: u32) {
        if let Some(slot) = self.turns.get_mut(index) {
            *slot = turns;
        }
    }

    /// Check if `index` is currently locked.
    #[must_use]
    pub fn is_locked(&self, index: usize) -> bool {
        self.remaining(index) > 0
    }

    /// Remaining turns on `index` (0 when unlocked or out of range).
    #[must_use]
    pub fn remaining(&self, index: usize) -> u32 {
        self.turns.get(index).copied().unwrap_or(0)
    }

    /// Decrement every active countdown by one.
    pub fn tick(&mut self) {
        for t in self.turns.iter_mut().filter(|t| **t > 0) {
            *t -= 1;
        }
    }

    /// Sparse view of locked cells as (index, remaining) pairs.
    #[must_use]
    pub fn active(&self) -> Vec<(usize, u32)> {
        self.turns
            .iter()
            .enumerate()
            .filter(|(_, t)| **t > 0)
            .map(|(i, t)| (i, *t))
            .collect()
    }

    /// Number of locked cells.
    #[must_use]
    pub fn locked_count(&self) -> usize {
        self.turns.iter().filter(|t| **t > 0).count()
    }

    /// Unlock every cell.
    pub fn clear(&mut self) {
        self.turns.iter_mut().for_each(|t| *t = 0);
    }
}
