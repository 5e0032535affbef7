//! Card catalog - static card data.
//!
//! `CardKind` is the closed set of cards; `CardDefinition` holds the
//! immutable properties of each (name, energy cost, target arity).
//! Per-run state (charges) lives in `CardSlot`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::ConfigError;

/// How many cells a card needs before it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetArity {
    Single,
    Double,
}

impl TargetArity {
    /// Number of targets.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            TargetArity::Single => 1,
            TargetArity::Double => 2,
        }
    }
}

/// Identifier for a card in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    /// Clear an occupied, unlocked cell.
    Erase,
    /// Exchange the contents of two distinct, unlocked cells.
    Swap,
    /// Lock an unlocked cell for two turns.
    Shield,
}

/// Static properties of a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardDefinition {
    pub kind: CardKind,
    pub name: &'static str,
    pub cost: u32,
    pub arity: TargetArity,
}

/// Turns a Shield lock lasts.
pub const SHIELD_TURNS: u32 = 2;

impl CardKind {
    /// Every card in the catalog.
    pub const ALL: [CardKind; 3] = [CardKind::Erase, CardKind::Swap, CardKind::Shield];

    /// Static definition of this card.
    #[must_use]
    pub const fn definition(self) -> CardDefinition {
        match self {
            CardKind::Erase => CardDefinition {
                kind: self,
                name: "Erase",
                cost: 1,
                arity: TargetArity::Single,
            },
            CardKind::Swap => CardDefinition {
                kind: self,
                name: "Swap",
                cost: 1,
                arity: TargetArity::Double,
            },
            CardKind::Shield => CardDefinition {
                kind: self,
                name: "Shield",
                cost: 1,
                arity: TargetArity::Single,
            },
        }
    }

    /// Energy cost.
    #[must_use]
    pub const fn cost(self) -> u32 {
        self.definition().cost
    }

    /// Target arity.
    #[must_use]
    pub const fn arity(self) -> TargetArity {
        self.definition().arity
    }

    /// Stable identifier string.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            CardKind::Erase => "ERASE",
            CardKind::Swap => "SWAP",
            CardKind::Shield => "SHIELD",
        }
    }
}

impl FromStr for CardKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardKind::ALL
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownCard(s.to_string()))
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.definition().name)
    }
}
