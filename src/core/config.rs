//! Engine configuration and the phase enum.
//!
//! Callers configure the engine at startup through `GameConfig`:
//! - `Mode`: classic full-line rules or score-to-win
//! - Seed for every random stream
//! - Boss interval, score threshold, enemy latency, starting energy
//! - Optionally a fixed encounter for every fight (practice runs, tests)
//!
//! `GameConfig::validate` fails fast on parameters no fight could use.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::encounters::EncounterId;
use crate::progression::Mode;

/// Default floor interval between boss encounters.
pub const DEFAULT_BOSS_INTERVAL: u32 = 3;

/// Default cumulative score needed to win a score-mode fight.
pub const DEFAULT_SCORE_THRESHOLD: u32 = 5;

/// Default delay before a scheduled enemy move fires.
pub const DEFAULT_ENEMY_DELAY_MS: u64 = 350;

/// Run phase. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// A fight is in progress.
    #[default]
    Playing,
    /// The player won; a reward must be chosen to advance.
    Reward,
    /// The player lost; only a restart continues.
    GameOver,
    /// Score-mode tie; only a rematch continues.
    Draw,
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rule set (win predicate, board size, draw support).
    pub mode: Mode,

    /// Seed for every random stream.
    pub seed: u64,

    /// Boss encounters appear on floors divisible by this.
    pub boss_interval: u32,

    /// Points needed to win in score mode.
    pub score_threshold: u32,

    /// Latency of the scheduled enemy move.
    pub enemy_delay_ms: u64,

    /// Energy at the start of a run (current and max).
    pub starting_energy: u32,

    /// Use this encounter on every floor instead of rolling.
    #[serde(default)]
    pub fixed_encounter: Option<EncounterId>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Classic,
            seed: 0,
            boss_interval: DEFAULT_BOSS_INTERVAL,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            enemy_delay_ms: DEFAULT_ENEMY_DELAY_MS,
            starting_energy: 1,
            fixed_encounter: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration for the given mode with default parameters.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the boss interval.
    #[must_use]
    pub fn with_boss_interval(mut self, interval: u32) -> Self {
        self.boss_interval = interval;
        self
    }

    /// Set the score-mode win threshold.
    #[must_use]
    pub fn with_score_threshold(mut self, threshold: u32) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Set the enemy move latency.
    #[must_use]
    pub fn with_enemy_delay_ms(mut self, delay: u64) -> Self {
        self.enemy_delay_ms = delay;
        self
    }

    /// Set the starting energy.
    #[must_use]
    pub fn with_starting_energy(mut self, energy: u32) -> Self {
        self.starting_energy = energy;
        self
    }

    /// Pin every fight to one encounter.
    #[must_use]
    pub fn with_fixed_encounter(mut self, encounter: EncounterId) -> Self {
        self.fixed_encounter = Some(encounter);
        self
    }

    /// Check the parameters before any fight begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.boss_interval == 0 {
            return Err(ConfigError::ZeroBossInterval);
        }
        if self.score_threshold == 0 {
            return Err(ConfigError::ZeroScoreThreshold);
        }
        if self.mode.board_size(1) == 0 {
            return Err(ConfigError::ZeroBoardSize);
        }
        Ok(())
    }

    /// Whether `floor` is a boss floor.
    #[must_use]
    pub fn is_boss_floor(&self, floor: u32) -> bool {
        self.boss_interval > 0 && floor % self.boss_interval == 0
    }
}
