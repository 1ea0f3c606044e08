//! Move symbols and the outcome table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidMoveError;

/// One of the five move symbols
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
    Lizard = 3,
    Spock = 4,
}

/// Number of move symbols
pub const NUM_MOVES: usize = 5;

/// All moves in enumeration order. Sampling walks this order.
pub const ALL_MOVES: [Move; NUM_MOVES] = [
    Move::Rock,
    Move::Paper,
    Move::Scissors,
    Move::Lizard,
    Move::Spock,
];

impl Move {
    /// Position in `ALL_MOVES`
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Move at a position in `ALL_MOVES`
    pub fn from_index(idx: usize) -> Option<Move> {
        ALL_MOVES.get(idx).copied()
    }

    /// Lowercase symbol name, as typed by players
    pub const fn symbol(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
            Move::Lizard => "lizard",
            Move::Spock => "spock",
        }
    }

    /// Does this move beat `other`?
    pub fn beats(self, other: Move) -> bool {
        rule_for(self, other).is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
            Move::Lizard => "Lizard",
            Move::Spock => "Spock",
        };
        f.write_str(name)
    }
}

impl FromStr for Move {
    type Err = InvalidMoveError;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ALL_MOVES
            .iter()
            .copied()
            .find(|m| m.symbol() == normalized)
            .ok_or_else(|| InvalidMoveError::new(s))
    }
}

// ============================================================================
// OUTCOME TABLE
// ============================================================================

/// A directed "winner beats loser" entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutcomeRule {
    pub winner: Move,
    pub loser: Move,
    pub verb: &'static str,
}

impl OutcomeRule {
    const fn new(winner: Move, verb: &'static str, loser: Move) -> Self {
        Self { winner, loser, verb }
    }
}

impl fmt::Display for OutcomeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.winner, self.verb, self.loser)
    }
}

/// All 10 directed rules. Equal symbols tie and never appear here.
pub static OUTCOME_RULES: [OutcomeRule; 10] = [
    OutcomeRule::new(Move::Rock, "crushes", Move::Scissors),
    OutcomeRule::new(Move::Rock, "crushes", Move::Lizard),
    OutcomeRule::new(Move::Paper, "covers", Move::Rock),
    OutcomeRule::new(Move::Paper, "disproves", Move::Spock),
    OutcomeRule::new(Move::Scissors, "cuts", Move::Paper),
    OutcomeRule::new(Move::Scissors, "decapitates", Move::Lizard),
    OutcomeRule::new(Move::Lizard, "poisons", Move::Spock),
    OutcomeRule::new(Move::Lizard, "eats", Move::Paper),
    OutcomeRule::new(Move::Spock, "smashes", Move::Scissors),
    OutcomeRule::new(Move::Spock, "vaporizes", Move::Rock),
];

/// Result of resolving an ordered pair of moves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The first move wins
    FirstWins,
    /// The second move wins
    SecondWins,
    Tie,
}

/// Find the rule where `winner` beats `loser`
pub fn rule_for(winner: Move, loser: Move) -> Option<&'static OutcomeRule> {
    OUTCOME_RULES
        .iter()
        .find(|rule| rule.winner == winner && rule.loser == loser)
}

/// Resolve `a` against `b`
pub fn resolve(a: Move, b: Move) -> Outcome {
    if a == b {
        Outcome::Tie
    } else if a.beats(b) {
        Outcome::FirstWins
    } else {
        Outcome::SecondWins
    }
}

/// Verb describing how `winner` beats `loser` ("crushes", "covers", ...)
///
/// Returns `None` when `winner` does not beat `loser`, including ties.
pub fn verb(winner: Move, loser: Move) -> Option<&'static str> {
    rule_for(winner, loser).map(|rule| rule.verb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("rock".parse::<Move>(), Ok(Move::Rock));
        assert_eq!("SPOCK".parse::<Move>(), Ok(Move::Spock));
        assert_eq!("  Lizard\n".parse::<Move>(), Ok(Move::Lizard));
        assert_eq!(
            "dynamite".parse::<Move>(),
            Err(InvalidMoveError::new("dynamite"))
        );
        assert!("".parse::<Move>().is_err());
    }

    #[test]
    fn test_index_roundtrip() {
        for (i, m) in ALL_MOVES.iter().enumerate() {
            assert_eq!(m.index(), i);
            assert_eq!(Move::from_index(i), Some(*m));
        }
        assert_eq!(Move::from_index(NUM_MOVES), None);
    }

    #[test]
    fn test_resolve_ties() {
        for m in ALL_MOVES {
            assert_eq!(resolve(m, m), Outcome::Tie);
            assert_eq!(verb(m, m), None);
        }
    }

    #[test]
    fn test_resolve_antisymmetric() {
        for a in ALL_MOVES {
            for b in ALL_MOVES {
                if a == b {
                    continue;
                }
                match resolve(a, b) {
                    Outcome::FirstWins => assert_eq!(resolve(b, a), Outcome::SecondWins),
                    Outcome::SecondWins => assert_eq!(resolve(b, a), Outcome::FirstWins),
                    Outcome::Tie => panic!("{} vs {} should not tie", a, b),
                }
                assert!(a.beats(b) != b.beats(a), "{} / {}", a, b);
            }
        }
    }

    #[test]
    fn test_tournament_regular() {
        for m in ALL_MOVES {
            let wins = ALL_MOVES.iter().filter(|o| m.beats(**o)).count();
            let losses = ALL_MOVES.iter().filter(|o| o.beats(m)).count();
            assert_eq!(wins, 2, "{} should beat exactly 2", m);
            assert_eq!(losses, 2, "{} should lose to exactly 2", m);
        }
    }

    #[test]
    fn test_verbs() {
        assert_eq!(verb(Move::Rock, Move::Scissors), Some("crushes"));
        assert_eq!(verb(Move::Paper, Move::Spock), Some("disproves"));
        assert_eq!(verb(Move::Scissors, Move::Lizard), Some("decapitates"));
        assert_eq!(verb(Move::Lizard, Move::Paper), Some("eats"));
        assert_eq!(verb(Move::Spock, Move::Rock), Some("vaporizes"));
        assert_eq!(verb(Move::Rock, Move::Paper), None);
    }

    #[test]
    fn test_rule_display() {
        let rule = rule_for(Move::Paper, Move::Rock).unwrap();
        assert_eq!(rule.to_string(), "Paper covers Rock");
    }
}
