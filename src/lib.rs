//! # roguetac
//!
//! A roguelike tic-tac-toe engine: the player fights a heuristic enemy
//! floor after floor on a growing grid, bending the rules with cards while
//! the enemy bends them back with passives.
//!
//! ## Design Principles
//!
//! 1. **One explicit run state**: `Engine` owns everything and mutates it
//!    only through commands. A rejected command changes nothing.
//!
//! 2. **Closed catalogs**: cards, passives, and encounters are enums, so
//!    every resolution site handles every variant.
//!
//! 3. **Replayable randomness**: one seed feeds separate streams for AI
//!    picks, passive rolls, rewards, and encounter draws.
//!
//! 4. **One engine, two rule sets**: `Mode` supplies the win predicate,
//!    board size, and draw handling for classic and score-to-win play.
//!
//! ## Modules
//!
//! - `core`: RNG, sides, configuration, errors
//! - `board`: Grid, full lines, run lengths, cell locks
//! - `cards`: Card catalog, hand and energy, targeting, resolution
//! - `encounters`: Passives, floor scaling, encounter catalog, passive hooks
//! - `ai`: Win / block / random enemy heuristic
//! - `scoring`: Overlap-safe run scoring for score-to-win mode
//! - `progression`: Mode policy and post-fight rewards
//! - `game`: Engine, scheduler, phase transitions, snapshots
//!
//! ```
//! use roguetac::{Engine, GameConfig, Mode, Outcome, Side};
//!
//! let config = GameConfig::new(Mode::Classic).with_seed(1).with_enemy_delay_ms(0);
//! let mut engine = Engine::new(config).unwrap();
//!
//! assert!(matches!(engine.play_move(4), Ok(Outcome::Played(_))));
//! assert!(engine.is_enemy_thinking());
//! assert!(matches!(engine.advance_clock(0), Ok(Outcome::EnemyPlayed(_))));
//! assert!(!engine.is_enemy_thinking());
//! assert_eq!(engine.turn(), Side::X);
//! ```

pub mod ai;
pub mod board;
pub mod cards;
pub mod core;
pub mod encounters;
pub mod game;
pub mod progression;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{ConfigError, GameConfig, GameRng, Phase, Rejection, Side, SideMap};

pub use crate::board::{check_full_line_winner, playable_cells, Axis, Board, Cell, LineId, LockMap};

pub use crate::cards::{CardKind, CardResolver, CardSlot, Energy, Hand, PendingCard};

pub use crate::encounters::{Encounter, EncounterId, Passive, PassiveEvent, PassiveParams};

pub use crate::ai::{choose_move, FullLineProbe, ScoreProbe, WinProbe};

pub use crate::scoring::{ScoreDelta, ScoreLedger};

pub use crate::progression::{FightResult, Mode, RewardApplied, RewardOption};

pub use crate::game::{
    Engine, EncounterSummary, FightEnd, LastMove, Outcome, ScheduledAction, Snapshot, TurnReport,
};
