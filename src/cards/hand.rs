//! Hand and energy bookkeeping.
//!
//! `CardSlot` is the runtime state of an owned card (charges left this
//! fight). `Hand` keeps owned cards in acquisition order, unique by kind.
//! `Energy` is the pool cards are paid from.
//!
//! All mutators keep `0 ≤ charges ≤ max_charges` and `0 ≤ current ≤ max`.

use serde::{Deserialize, Serialize};

use super::definition::CardKind;

/// An owned card with its charge counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSlot {
    pub kind: CardKind,
    pub charges: u32,
    pub max_charges: u32,
}

impl CardSlot {
    /// A freshly acquired card at 1/1 charge.
    #[must_use]
    pub const fn fresh(kind: CardKind) -> Self {
        Self {
            kind,
            charges: 1,
            max_charges: 1,
        }
    }

    /// Check if at least one charge is left.
    #[must_use]
    pub const fn has_charge(&self) -> bool {
        self.charges > 0
    }
}

/// Ordered collection of owned cards, unique by kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    slots: Vec<CardSlot>,
}

impl Default for Hand {
    fn default() -> Self {
        Self::starting()
    }
}

impl Hand {
    /// The run's starting hand: Erase, Swap, Shield at 1/1.
    #[must_use]
    pub fn starting() -> Self {
        Self {
            slots: vec![
                CardSlot::fresh(CardKind::Erase),
                CardSlot::fresh(CardKind::Swap),
                CardSlot::fresh(CardKind::Shield),
            ],
        }
    }

    /// An empty hand.
    #[must_use]
    pub fn empty() -> Self {
        Self { slots: Vec::new() }
    }

    /// Owned cards in order.
    #[must_use]
    pub fn slots(&self) -> &[CardSlot] {
        &self.slots
    }

    /// Number of owned cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no cards are owned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The slot for `kind`, if owned.
    #[must_use]
    pub fn get(&self, kind: CardKind) -> Option<&CardSlot> {
        self.slots.iter().find(|s| s.kind == kind)
    }

    /// Check if `kind` is owned.
    #[must_use]
    pub fn owns(&self, kind: CardKind) -> bool {
        self.get(kind).is_some()
    }

    /// Catalog cards not yet owned, in catalog order.
    #[must_use]
    pub fn unowned(&self) -> Vec<CardKind> {
        CardKind::ALL
            .into_iter()
            .filter(|k| !self.owns(*k))
            .collect()
    }

    /// Add a card at 1/1. Returns false if it was already owned.
    pub fn acquire(&mut self, kind: CardKind) -> bool {
        if self.owns(kind) {
            return false;
        }
        self.slots.push(CardSlot::fresh(kind));
        true
    }

    /// Spend one charge of `kind`. Returns false if none is available.
    pub fn spend_charge(&mut self, kind: CardKind) -> bool {
        match self.slots.iter_mut().find(|s| s.kind == kind) {
            Some(slot) if slot.charges > 0 => {
                slot.charges -= 1;
                true
            }
            _ => false,
        }
    }

    /// Raise `kind`'s max charges by one and fill it to the new max.
    pub fn raise_max_charges(&mut self, kind: CardKind) -> bool {
        match self.slots.iter_mut().find(|s| s.kind == kind) {
            Some(slot) => {
                slot.max_charges += 1;
                slot.charges = slot.max_charges;
                true
            }
            None => false,
        }
    }

    /// Refill every card to its max charges.
    pub fn refill(&mut self) {
        for slot in &mut self.slots {
            slot.charges = slot.max_charges;
        }
    }
}

/// Energy pool with `0 ≤ current ≤ max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Energy {
    current: u32,
    max: u32,
}

impl Energy {
    /// A full pool of `max`.
    #[must_use]
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Check if `cost` can be paid.
    #[must_use]
    pub const fn can_afford(&self, cost: u32) -> bool {
        self.current >= cost
    }

    /// Pay `cost`. Returns false, leaving the pool unchanged, if short.
    pub fn spend(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.current -= cost;
        true
    }

    /// Raise max by one; current rises by one too.
    pub fn raise_max(&mut self) {
        self.max += 1;
        self.current = (self.current + 1).min(self.max);
    }

    /// Fill to max.
    pub fn refill(&mut self) {
        self.current = self.max;
    }
}
