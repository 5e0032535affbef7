//! Card effect resolution.
//!
//! `CardResolver` validates a card's targets against the board and lock
//! map, then applies the effect. Validation completes before anything is
//! mutated, so a rejected resolution leaves both untouched.

use crate::board::{Board, Cell, LockMap};
use crate::core::Rejection;

use super::definition::{CardKind, SHIELD_TURNS};

/// What a successful resolution changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardEffect {
    /// The board contents differ from before (a snapshot must be appended).
    pub board_changed: bool,
}

/// Resolves cards on a board.
pub struct CardResolver;

impl CardResolver {
    /// Resolve `kind` on `targets`.
    ///
    /// `targets` must hold exactly the card's arity; the caller collects
    /// them through `PendingCard`.
    pub fn resolve(
        kind: CardKind,
        targets: &[usize],
        board: &mut Board,
        locks: &mut LockMap,
    ) -> Result<CardEffect, Rejection> {
        if targets.len() != kind.arity().count() {
            return Err(Rejection::InvalidTarget);
        }
        for &t in targets {
            if !board.contains(t) {
                return Err(Rejection::OutOfRange {
                    index: t,
                    cells: board.cell_count(),
                });
            }
            if locks.is_locked(t) {
                return Err(Rejection::CellLocked(t));
            }
        }

        match kind {
            CardKind::Erase => {
                let target = targets[0];
                if board.get(target) == Some(Cell::Empty) {
                    return Err(Rejection::InvalidTarget);
                }
                board.set(target, Cell::Empty);
                Ok(CardEffect { board_changed: true })
            }

            CardKind::Shield => {
                locks.lock(targets[0], SHIELD_TURNS);
                Ok(CardEffect { board_changed: false })
            }

            CardKind::Swap => {
                let (a, b) = (targets[0], targets[1]);
                if a == b {
                    return Err(Rejection::InvalidTarget);
                }
                let board_changed = board.get(a) != board.get(b);
                board.swap(a, b);
                Ok(CardEffect { board_changed })
            }
        }
    }
}
