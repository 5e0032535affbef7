//! Encounter catalog and the per-floor roll.
//!
//! Standard floors draw from encounters carrying exactly one passive;
//! boss floors draw from encounters carrying exactly two.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::str::FromStr;

use crate::core::{ConfigError, GameRng};

use super::passive::{Modifiers, Passive, PassiveParams};

/// Identifier for a catalog encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterId {
    BrambleWarden,
    Jailer,
    BlightCaller,
    TwinFang,
    BriarKing,
    WardenOfRot,
    IronHydra,
    ThornedPlague,
}

impl EncounterId {
    /// Single-passive encounters.
    pub const STANDARD: [EncounterId; 4] = [
        EncounterId::BrambleWarden,
        EncounterId::Jailer,
        EncounterId::BlightCaller,
        EncounterId::TwinFang,
    ];

    /// Two-passive encounters.
    pub const BOSSES: [EncounterId; 4] = [
        EncounterId::BriarKing,
        EncounterId::WardenOfRot,
        EncounterId::IronHydra,
        EncounterId::ThornedPlague,
    ];

    /// Stable identifier string.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            EncounterId::BrambleWarden => "BRAMBLE_WARDEN",
            EncounterId::Jailer => "JAILER",
            EncounterId::BlightCaller => "BLIGHT_CALLER",
            EncounterId::TwinFang => "TWIN_FANG",
            EncounterId::BriarKing => "BRIAR_KING",
            EncounterId::WardenOfRot => "WARDEN_OF_ROT",
            EncounterId::IronHydra => "IRON_HYDRA",
            EncounterId::ThornedPlague => "THORNED_PLAGUE",
        }
    }

    /// Full definition of this encounter.
    #[must_use]
    pub fn encounter(self) -> Encounter {
        use Passive::*;

        let (name, passives, modifiers): (&'static str, &[Passive], Modifiers) = match self {
            EncounterId::BrambleWarden => ("Bramble Warden", &[Thorns], Modifiers::default()),
            EncounterId::Jailer => ("Jailer", &[Lockdown], Modifiers::default()),
            EncounterId::BlightCaller => (
                "Blight Caller",
                &[Corrupt],
                Modifiers {
                    corrupt_chance: 0.02,
                    ..Modifiers::default()
                },
            ),
            EncounterId::TwinFang => ("Twin Fang", &[DoubleTap], Modifiers::default()),
            EncounterId::BriarKing => (
                "Briar King",
                &[Thorns, DoubleTap],
                Modifiers {
                    thorns_chance: 0.05,
                    double_tap_chance: 0.05,
                    ..Modifiers::default()
                },
            ),
            EncounterId::WardenOfRot => (
                "Warden of Rot",
                &[Lockdown, Corrupt],
                Modifiers {
                    corrupt_chance: 0.05,
                    lock_duration: 1,
                    ..Modifiers::default()
                },
            ),
            EncounterId::IronHydra => (
                "Iron Hydra",
                &[Lockdown, DoubleTap],
                Modifiers {
                    lock_count: 1,
                    double_tap_chance: 0.03,
                    ..Modifiers::default()
                },
            ),
            EncounterId::ThornedPlague => (
                "Thorned Plague",
                &[Thorns, Corrupt],
                Modifiers {
                    thorns_chance: 0.05,
                    corrupt_chance: 0.05,
                    ..Modifiers::default()
                },
            ),
        };

        Encounter {
            id: self,
            name,
            passives: SmallVec::from_slice(passives),
            modifiers,
            is_boss: EncounterId::BOSSES.contains(&self),
        }
    }
}

impl FromStr for EncounterId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EncounterId::STANDARD
            .into_iter()
            .chain(EncounterId::BOSSES)
            .find(|e| e.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownEncounter(s.to_string()))
    }
}

/// The opponent configuration for one fight.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Encounter {
    pub id: EncounterId,
    pub name: &'static str,
    pub passives: SmallVec<[Passive; 2]>,
    pub modifiers: Modifiers,
    pub is_boss: bool,
}

impl Encounter {
    /// Check if the encounter carries `passive`.
    #[must_use]
    pub fn has(&self, passive: Passive) -> bool {
        self.passives.contains(&passive)
    }

    /// Trigger parameters on `floor`.
    #[must_use]
    pub fn params(&self, floor: u32) -> PassiveParams {
        PassiveParams::for_floor(floor, &self.modifiers)
    }
}

/// Roll the encounter for a floor.
pub fn roll_encounter(is_boss_floor: bool, rng: &mut GameRng) -> Encounter {
    let pool: &[EncounterId] = if is_boss_floor {
        &EncounterId::BOSSES
    } else {
        &EncounterId::STANDARD
    };
    let id = pool[rng.gen_range_usize(0..pool.len())];
    id.encounter()
}
