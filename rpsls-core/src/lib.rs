//! RPSLS Core - Rock, Paper, Scissors, Lizard, Spock engine
//!
//! This crate provides the game logic:
//! - Move symbols and the fixed outcome table
//! - Per-player round history (ledgers)
//! - Adaptive computer strategy driven by the human's history
//! - Match controller with scores, rematches, and round results
//! - Session driver for an external I/O shell

pub mod config;
pub mod error;
pub mod game;
pub mod ledger;
pub mod moves;
pub mod session;
pub mod strategy;

// Re-exports for convenient access
pub use config::{MatchConfig, DEFAULT_WIN_THRESHOLD};
pub use error::{InvalidMoveError, MatchError};
pub use game::{MatchController, Player, PlayerId, RoundPhase, RoundResult};
pub use ledger::{HistoryEntry, Ledger, OutcomeLabel};
pub use moves::{resolve, verb, Move, Outcome, OutcomeRule, ALL_MOVES, OUTCOME_RULES};
pub use session::{run_session, SessionSummary, Shell};
pub use strategy::{AdaptiveStrategy, ChoiceContext, MoveChooser, Phase, StrategyState};
