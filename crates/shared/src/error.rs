use thiserror::Error;

use crate::domain::Category;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("player id {0} is not a seat (expected 0 or 1)")]
    InvalidPlayer(u8),
    #[error("die at position {position} has face {face}, expected 1..=6")]
    InvalidDie { position: usize, face: u8 },
    #[error("category {0} is already recorded")]
    CategoryTaken(Category),
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to encode message: {0}")]
    Encode(serde_json::Error),
}
