//! Error types.
//!
//! - `Rejection`: a command that is illegal in the current state. Always a
//!   no-op; the run state is unchanged when one is returned.
//! - `ConfigError`: invalid static parameters, reported before any fight
//!   begins.

use thiserror::Error;

use crate::core::Phase;

/// Reason a command was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("command not allowed in phase {0:?}")]
    WrongPhase(Phase),

    #[error("not the player's turn")]
    NotYourTurn,

    #[error("the enemy is still taking its turn")]
    EnemyThinking,

    #[error("cell {index} is outside a board of {cells} cells")]
    OutOfRange { index: usize, cells: usize },

    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("cell {0} is locked")]
    CellLocked(usize),

    #[error("card is not in hand")]
    CardNotOwned,

    #[error("not enough energy: need {needed}, have {available}")]
    InsufficientEnergy { needed: u32, available: u32 },

    #[error("card has no charges left")]
    NoCharges,

    #[error("no card is armed")]
    NoPendingCard,

    #[error("the card cannot resolve on that target")]
    InvalidTarget,

    #[error("reward option {0} does not exist")]
    InvalidRewardOption(usize),

    #[error("a legal move is still available")]
    MovesAvailable,
}

/// Invalid construction parameters.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size must be positive")]
    ZeroBoardSize,

    #[error("board of size {size} cannot hold {cells} cells")]
    MalformedBoard { size: usize, cells: usize },

    #[error("boss interval must be positive")]
    ZeroBossInterval,

    #[error("score threshold must be positive")]
    ZeroScoreThreshold,

    #[error("unknown card id `{0}`")]
    UnknownCard(String),

    #[error("unknown passive id `{0}`")]
    UnknownPassive(String),

    #[error("unknown encounter id `{0}`")]
    UnknownEncounter(String),
}
