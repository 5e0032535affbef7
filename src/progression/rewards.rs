//! Post-fight rewards.
//!
//! A won fight offers three options drawn without replacement from
//! {+1 max energy, +1 max charge on a random owned card, a random unowned
//! card}. When every catalog card is owned, the new-card option is
//! replaced by a second charges-up option.

use serde::{Deserialize, Serialize};

use crate::cards::{CardKind, Energy, Hand};
use crate::core::GameRng;

/// Number of options offered after a won fight.
pub const REWARD_CHOICES: usize = 3;

/// A reward the player can pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardOption {
    /// +1 max energy.
    EnergyUp,
    /// +1 max charge on one random owned card.
    ChargesUp,
    /// Gain one random unowned card at 1/1.
    NewCard,
}

impl RewardOption {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            RewardOption::EnergyUp => "+1 Max Energy",
            RewardOption::ChargesUp => "+1 Max Charges (random card)",
            RewardOption::NewCard => "Gain a New Card",
        }
    }
}

/// What applying a reward actually changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardApplied {
    EnergyRaised { max: u32 },
    ChargesRaised { card: CardKind, max_charges: u32 },
    CardGained(CardKind),
    /// The option had no valid target (empty hand, nothing left to gain).
    Nothing,
}

/// Build the offer for a won fight.
pub fn make_offer(hand: &Hand, rng: &mut GameRng) -> Vec<RewardOption> {
    let mut pool = vec![
        RewardOption::EnergyUp,
        RewardOption::ChargesUp,
        RewardOption::NewCard,
    ];
    if hand.unowned().is_empty() {
        pool[2] = RewardOption::ChargesUp;
    }
    rng.shuffle(&mut pool);
    pool.truncate(REWARD_CHOICES);
    pool
}

/// Apply one reward to the run's hand and energy.
pub fn apply_reward(
    option: RewardOption,
    hand: &mut Hand,
    energy: &mut Energy,
    rng: &mut GameRng,
) -> RewardApplied {
    match option {
        RewardOption::EnergyUp => {
            energy.raise_max();
            RewardApplied::EnergyRaised { max: energy.max() }
        }
        RewardOption::ChargesUp => {
            let owned: Vec<CardKind> = hand.slots().iter().map(|s| s.kind).collect();
            match rng.choose(&owned).copied() {
                Some(card) => {
                    hand.raise_max_charges(card);
                    let max_charges = hand.get(card).map_or(0, |s| s.max_charges);
                    RewardApplied::ChargesRaised { card, max_charges }
                }
                None => RewardApplied::Nothing,
            }
        }
        RewardOption::NewCard => match rng.choose(&hand.unowned()).copied() {
            Some(card) => {
                hand.acquire(card);
                RewardApplied::CardGained(card)
            }
            None => RewardApplied::Nothing,
        },
    }
}
