//! Per-player append-only round history

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::moves::Move;

/// Who took the round, as written into a ledger
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeLabel {
    /// Name of the player who won the round
    Winner(String),
    Tie,
}

impl OutcomeLabel {
    pub fn winner(name: impl Into<String>) -> Self {
        OutcomeLabel::Winner(name.into())
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, OutcomeLabel::Tie)
    }

    /// True if the round was won by `name`
    pub fn is_won_by(&self, name: &str) -> bool {
        matches!(self, OutcomeLabel::Winner(w) if w == name)
    }
}

impl fmt::Display for OutcomeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeLabel::Winner(name) => f.write_str(name),
            OutcomeLabel::Tie => f.write_str("tie"),
        }
    }
}

/// One round as seen by the ledger owner
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub mv: Move,
    pub outcome: OutcomeLabel,
}

/// Chronological record of a player's moves and round outcomes.
///
/// Entries are never removed; the ledger lives as long as its player,
/// across rematches.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<HistoryEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one round
    pub fn record(&mut self, mv: Move, outcome: OutcomeLabel) {
        self.entries.push(HistoryEntry { mv, outcome });
    }

    /// Rounds in which `mv` was chosen
    pub fn count_occurrences(&self, mv: Move) -> usize {
        self.entries.iter().filter(|e| e.mv == mv).count()
    }

    /// Rounds in which `mv` was chosen and `opponent_name` won
    pub fn count_losses(&self, mv: Move, opponent_name: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.mv == mv && e.outcome.is_won_by(opponent_name))
            .count()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
