//! Enemy passives and their floor scaling.
//!
//! Each passive fires at a fixed point in the turn sequence
//! (`PassiveTiming`). Trigger parameters are derived once per fight from
//! the floor number and the encounter's modifiers.
//!
//! ## Scaling
//!
//! With `k = floor - 1`:
//!
//! | Parameter | Base | Cap |
//! |---|---|---|
//! | Thorns chance | `0.10 + 0.04k` | 0.65 |
//! | Corrupt chance | `0.08 + 0.03k` | 0.50 |
//! | Double Tap chance | `0.06 + 0.03k` | 0.45 |
//! | Lockdown count | `1 + k / 3` | 3 |
//! | Lockdown duration | `2 + k / 4` | 4 |
//!
//! Chances then add the encounter modifier and clamp into `[0, 0.9]`;
//! count and duration add theirs and never drop below 1.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::ConfigError;

/// Highest trigger probability any passive may reach.
pub const MAX_CHANCE: f64 = 0.9;

/// When a passive fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassiveTiming {
    /// After the player's own move.
    AfterPlayerMove,
    /// After the enemy's move, before it is committed.
    AfterEnemyMove,
    /// Once the enemy's move is committed and the fight is still on.
    EndOfEnemyTurn,
}

/// Enemy passive ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Passive {
    /// Chance to drop an enemy mark on a random playable cell.
    Thorns,
    /// Lock random empty cells for a few turns.
    Lockdown,
    /// Chance to remove a random unlocked player mark.
    Corrupt,
    /// Chance for the enemy to move again.
    DoubleTap,
}

impl Passive {
    /// Every passive.
    pub const ALL: [Passive; 4] = [
        Passive::Thorns,
        Passive::Lockdown,
        Passive::Corrupt,
        Passive::DoubleTap,
    ];

    #[must_use]
    pub const fn timing(self) -> PassiveTiming {
        match self {
            Passive::Thorns => PassiveTiming::AfterPlayerMove,
            Passive::Lockdown | Passive::Corrupt => PassiveTiming::AfterEnemyMove,
            Passive::DoubleTap => PassiveTiming::EndOfEnemyTurn,
        }
    }

    /// Stable identifier string.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Passive::Thorns => "THORNS",
            Passive::Lockdown => "LOCKDOWN",
            Passive::Corrupt => "CORRUPT",
            Passive::DoubleTap => "DOUBLE_TAP",
        }
    }
}

impl FromStr for Passive {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Passive::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownPassive(s.to_string()))
    }
}

impl std::fmt::Display for Passive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Per-encounter adjustments applied on top of the floor base.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    pub thorns_chance: f64,
    pub corrupt_chance: f64,
    pub double_tap_chance: f64,
    pub lock_count: i32,
    pub lock_duration: i32,
}

/// Trigger parameters for one fight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PassiveParams {
    pub thorns_chance: f64,
    pub corrupt_chance: f64,
    pub double_tap_chance: f64,
    pub lock_count: u32,
    pub lock_duration: u32,
}

fn scaled_chance(base: f64, per_floor: f64, cap: f64, k: u32, modifier: f64) -> f64 {
    ((base + per_floor * f64::from(k)).min(cap) + modifier).clamp(0.0, MAX_CHANCE)
}

fn scaled_count(base: u32, floors_per_step: u32, cap: u32, k: u32, modifier: i32) -> u32 {
    let floor_base = (base + k / floors_per_step).min(cap) as i32;
    (floor_base + modifier).max(1) as u32
}

impl PassiveParams {
    /// Derive parameters for `floor` (1-based) under `modifiers`.
    #[must_use]
    pub fn for_floor(floor: u32, modifiers: &Modifiers) -> Self {
        let k = floor.max(1) - 1;
        Self {
            thorns_chance: scaled_chance(0.10, 0.04, 0.65, k, modifiers.thorns_chance),
            corrupt_chance: scaled_chance(0.08, 0.03, 0.50, k, modifiers.corrupt_chance),
            double_tap_chance: scaled_chance(0.06, 0.03, 0.45, k, modifiers.double_tap_chance),
            lock_count: scaled_count(1, 3, 3, k, modifiers.lock_count),
            lock_duration: scaled_count(2, 4, 4, k, modifiers.lock_duration),
        }
    }
}
