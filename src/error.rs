use thiserror::Error;

use crate::types::Coord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBoard { row: i32, col: i32 },
    #[error("two pieces placed on {0}")]
    Overlap(Coord),
    #[error("invalid move from {from} to {to}")]
    InvalidMove { from: Coord, to: Coord },
    #[error("no game has been started")]
    NoActiveGame,
    #[error("game state lock is poisoned")]
    StatePoisoned,
    #[error("invalid game options: {0}")]
    InvalidOptions(String),
}
