//! Floor progression: mode policy and rewards.
//!
//! - `Mode`: board size per floor, fight result predicate, draw support
//! - `make_offer` / `apply_reward`: the post-fight reward step

pub mod mode;
pub mod rewards;

pub use mode::{FightResult, Mode};
pub use rewards::{apply_reward, make_offer, RewardApplied, RewardOption, REWARD_CHOICES};
