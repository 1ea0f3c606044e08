//! Error types for the game core

use thiserror::Error;

/// A move symbol that is not one of the five known names
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid move {input:?}: expected rock, paper, scissors, lizard or spock")]
pub struct InvalidMoveError {
    pub input: String,
}

impl InvalidMoveError {
    pub fn new(input: impl Into<String>) -> Self {
        Self { input: input.into() }
    }
}

/// Error types for match control
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error(transparent)]
    InvalidMove(#[from] InvalidMoveError),

    #[error("round cannot start before the human move is submitted")]
    AwaitingHumanMove,

    #[error("match is over ({0} reached the win threshold); a rematch decision is required")]
    MatchOver(String),

    #[error("rematch requested while the match is still in progress")]
    MatchInProgress,

    #[error("session has ended")]
    SessionEnded,

    #[error("win threshold must be at least 1")]
    InvalidThreshold,

    #[error("player name must not be empty")]
    EmptyName,

    #[error("both players are named {0:?}; names must be distinct")]
    DuplicateName(String),
}
