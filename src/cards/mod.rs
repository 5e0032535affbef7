//! Card system: catalog, hand bookkeeping, targeting, and resolution.
//!
//! ## Key Types
//!
//! - `CardKind`: Closed card catalog (Erase, Swap, Shield)
//! - `CardSlot` / `Hand`: Owned cards with per-fight charges
//! - `Energy`: Pool cards are paid from
//! - `PendingCard`: An armed card collecting targets
//! - `CardResolver`: Applies a card's effect to board and locks
//!
//! Cards never consume a turn and never tick locks.

pub mod definition;
pub mod hand;
pub mod resolver;
pub mod targeting;

pub use definition::{CardDefinition, CardKind, TargetArity, SHIELD_TURNS};
pub use hand::{CardSlot, Energy, Hand};
pub use resolver::{CardEffect, CardResolver};
pub use targeting::PendingCard;
