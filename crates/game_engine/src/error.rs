use shared::domain::{Category, PlayerId};
use thiserror::Error;

/// Why an action had no effect. Never sent to participants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionRejected {
    #[error("waiting for both players to join")]
    NotStarted,
    #[error("game has already started")]
    AlreadyStarted,
    #[error("game is over")]
    GameOver,
    #[error("not player {player}'s turn (current player is {current})")]
    NotYourTurn { player: PlayerId, current: PlayerId },
    #[error("no rolls remaining this turn")]
    NoRollsRemaining,
    #[error("dice have not been rolled this turn")]
    NoActiveRoll,
    #[error("category {0} is already recorded")]
    CategoryTaken(Category),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChanceError {
    #[error("dice sequence must not be empty")]
    EmptySequence,
    #[error("dice sequence contains face {0}, expected 1..=6")]
    InvalidFace(u8),
}
