//! Card target-selection protocol.
//!
//! Arming a card creates a `PendingCard` with no targets. Each clicked
//! cell is appended; once the card's arity is reached the engine attempts
//! resolution. Whether resolution succeeds or fails, the pending state is
//! cleared afterwards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::CardKind;

/// A card waiting for its targets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCard {
    /// The armed card.
    pub kind: CardKind,

    /// Targets accumulated so far, in click order.
    /// SmallVec avoids heap allocation for the at-most-two targets.
    pub targets: SmallVec<[usize; 2]>,
}

impl PendingCard {
    /// Arm `kind` with no targets.
    #[must_use]
    pub fn new(kind: CardKind) -> Self {
        Self {
            kind,
            targets: SmallVec::new(),
        }
    }

    /// Append a target.
    pub fn push_target(&mut self, index: usize) {
        self.targets.push(index);
    }

    /// Check if enough targets are collected to attempt resolution.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.targets.len() >= self.kind.arity().count()
    }

    /// Targets still needed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.kind.arity().count().saturating_sub(self.targets.len())
    }
}
