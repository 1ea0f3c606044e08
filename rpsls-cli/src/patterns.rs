//! Scripted human players for simulations

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use rpsls_core::{ChoiceContext, Move, MoveChooser, ALL_MOVES};

/// How a scripted human picks moves
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HumanPattern {
    /// Same move every round
    Always(Move),
    /// Repeat a fixed sequence
    Cycle(Vec<Move>),
    /// Uniform random
    Random,
}

impl FromStr for HumanPattern {
    type Err = String;

    /// `always:<move>`, `cycle:<move>,<move>,...` or `random`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("random") {
            return Ok(HumanPattern::Random);
        }

        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("unknown pattern {:?}: expected always:<move>, cycle:<moves> or random", s))?;

        match kind.to_lowercase().as_str() {
            "always" => rest
                .parse::<Move>()
                .map(HumanPattern::Always)
                .map_err(|e| e.to_string()),
            "cycle" => {
                let moves = rest
                    .split(',')
                    .map(|m| m.parse::<Move>().map_err(|e| e.to_string()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(HumanPattern::Cycle(moves))
            }
            other => Err(format!("unknown pattern kind {:?}", other)),
        }
    }
}

impl fmt::Display for HumanPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HumanPattern::Always(mv) => write!(f, "always:{}", mv.symbol()),
            HumanPattern::Cycle(moves) => {
                let symbols: Vec<&str> = moves.iter().map(|m| m.symbol()).collect();
                write!(f, "cycle:{}", symbols.join(","))
            }
            HumanPattern::Random => f.write_str("random"),
        }
    }
}

/// A human stand-in following a pattern
pub struct PatternPlayer {
    pattern: HumanPattern,
    step: usize,
    rng: ChaCha8Rng,
}

impl PatternPlayer {
    pub fn new(pattern: HumanPattern, seed: u64) -> Self {
        Self {
            pattern,
            step: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl MoveChooser for PatternPlayer {
    fn choose_move(&mut self, _ctx: &ChoiceContext<'_>) -> Move {
        let mv = match &self.pattern {
            HumanPattern::Always(mv) => *mv,
            HumanPattern::Cycle(moves) if !moves.is_empty() => moves[self.step % moves.len()],
            HumanPattern::Cycle(_) | HumanPattern::Random => {
                ALL_MOVES[self.rng.gen_range(0..ALL_MOVES.len())]
            }
        };
        self.step += 1;
        mv
    }
}
