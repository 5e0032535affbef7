//! The game state machine and its driver.
//!
//! ## Key Types
//!
//! - [`Engine`]: owns the run; every command returns `Result<Outcome, Rejection>`
//! - [`Scheduler`]: generation-stamped delayed enemy turns on a manual clock
//! - [`FightEnd`]: how a decided fight moves the phase
//! - [`Snapshot`]: serializable read-only view for observers

pub mod engine;
pub mod phase;
pub mod scheduler;
pub mod snapshot;

pub use engine::{Engine, Outcome, TurnReport};
pub use phase::FightEnd;
pub use scheduler::{ActionKind, ScheduledAction, Scheduler};
pub use snapshot::{EncounterSummary, LastMove, Snapshot};
