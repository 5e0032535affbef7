//! Enemy encounters and their passives.
//!
//! ## Key Components
//!
//! - [`Passive`]: Closed set of enemy passives with their trigger timing
//! - [`PassiveParams`]: Floor-scaled chances, counts, and durations
//! - [`Encounter`]: Name, passives, modifiers, and boss flag for one fight
//! - [`roll_encounter`]: Per-floor draw from the standard or boss pool
//! - hooks: the effects applied when a passive fires
//!
//! After the player's move: Thorns. After the enemy's move, in order:
//! Lockdown, Corrupt. Once the enemy's move is committed: Double Tap.

pub mod catalog;
pub mod hooks;
pub mod passive;

pub use catalog::{roll_encounter, Encounter, EncounterId};
pub use hooks::{apply_corrupt, apply_lockdown, apply_thorns, roll_double_tap, PassiveEvent};
pub use passive::{Modifiers, Passive, PassiveParams, PassiveTiming, MAX_CHANCE};
