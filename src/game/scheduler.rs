//! Generation-stamped delayed actions.
//!
//! The enemy never moves synchronously with the player's command. Its turn
//! is queued as a `ScheduledAction` due `delay_ms` after the current clock,
//! and fires either when the clock is advanced past it or when the caller
//! fires it explicitly.
//!
//! Every fight reset bumps the generation and drops the queued action, so
//! an action issued against an older fight can never mutate a newer one.

use serde::{Deserialize, Serialize};

/// What a scheduled action does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// The enemy takes its turn.
    EnemyTurn,
}

/// A delayed action tagged with the generation it was issued against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledAction {
    pub kind: ActionKind,
    pub generation: u64,
    pub due_at_ms: u64,
}

/// Single-slot action queue with a manual clock.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler {
    delay_ms: u64,
    now_ms: u64,
    generation: u64,
    queued: Option<ScheduledAction>,
}

impl Scheduler {
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The queued action, if any.
    #[must_use]
    pub fn queued(&self) -> Option<ScheduledAction> {
        self.queued
    }

    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.queued.is_some()
    }

    /// Invalidate everything issued so far.
    pub fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.queued = None;
        self.generation
    }

    /// Queue `kind` to fire after the configured delay.
    pub fn schedule(&mut self, kind: ActionKind) -> ScheduledAction {
        let action = ScheduledAction {
            kind,
            generation: self.generation,
            due_at_ms: self.now_ms + self.delay_ms,
        };
        self.queued = Some(action);
        action
    }

    /// Move the clock forward and take the queued action if it is due.
    pub fn advance(&mut self, elapsed_ms: u64) -> Option<ScheduledAction> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        match self.queued {
            Some(action) if action.due_at_ms <= self.now_ms => self.queued.take(),
            _ => None,
        }
    }

    /// Take `action` out of the queue if it is the live one.
    ///
    /// Returns `false` for stale or unknown actions; the queue is untouched.
    pub fn claim(&mut self, action: ScheduledAction) -> bool {
        if action.generation != self.generation || self.queued != Some(action) {
            return false;
        }
        self.queued = None;
        true
    }
}
