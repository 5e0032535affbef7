//! Core building blocks shared by every other module.
//!
//! - `GameRng`: seeded, context-split randomness
//! - `Side` / `SideMap`: the two symbols and per-side storage
//! - `GameConfig` / `Phase`: startup parameters and the run phase
//! - `Rejection` / `ConfigError`: the two error families

pub mod config;
pub mod error;
pub mod rng;
pub mod side;

pub use config::{
    GameConfig, Phase, DEFAULT_BOSS_INTERVAL, DEFAULT_ENEMY_DELAY_MS, DEFAULT_SCORE_THRESHOLD,
};
pub use error::{ConfigError, Rejection};
pub use rng::GameRng;
pub use side::{Side, SideMap};
