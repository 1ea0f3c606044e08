//! Adaptive computer strategy
//!
//! The computer reads the human's ledger and biases its own random draw:
//! - Cold phase: until every move has been played more than once by the
//!   opponent, pick uniformly.
//! - Warm phase: for each move, look at how often that move lost when the
//!   opponent played it. Moves losing more than half the time get their
//!   weight cut to `0.5 / loss_rate`; the rest keep weight 1.
//!
//! Weights are always derived fresh from the ledger, never carried between
//! rounds.

use std::fmt;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::ledger::Ledger;
use crate::moves::{Move, ALL_MOVES, NUM_MOVES};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Every move must have been seen at least this often before going warm
pub const WARM_UP_OCCURRENCES: usize = 2;

/// Loss rates strictly above this get penalized
pub const RISK_THRESHOLD: f64 = 0.5;

/// Weight of every move before penalties
pub const BASE_WEIGHT: f64 = 1.0;

/// Loss rate of a move the opponent never played
pub const UNSEEN_LOSS_RATE: f64 = 1.0;

// ============================================================================
// PHASE AND LOSS RATES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Not enough opponent history, uniform sampling
    Cold,
    /// Loss-rate weighted sampling
    Warm,
}

/// Phase implied by the opponent's ledger
pub fn phase(opponent: &Ledger) -> Phase {
    let warm = ALL_MOVES
        .iter()
        .all(|&m| opponent.count_occurrences(m) >= WARM_UP_OCCURRENCES);
    if warm {
        Phase::Warm
    } else {
        Phase::Cold
    }
}

/// Fraction of the opponent's rounds with `mv` that `own_name` won.
///
/// A move the opponent never played has loss rate 1.0.
pub fn loss_rate(opponent: &Ledger, mv: Move, own_name: &str) -> f64 {
    let occurrences = opponent.count_occurrences(mv);
    if occurrences == 0 {
        return UNSEEN_LOSS_RATE;
    }
    opponent.count_losses(mv, own_name) as f64 / occurrences as f64
}

// ============================================================================
// STRATEGY STATE
// ============================================================================

/// Per-move sampling weights, indexed in `ALL_MOVES` order
#[derive(Clone, Debug, PartialEq)]
pub struct StrategyState {
    weights: [f64; NUM_MOVES],
}

impl Default for StrategyState {
    fn default() -> Self {
        Self::uniform()
    }
}

impl StrategyState {
    /// All weights at `BASE_WEIGHT`
    pub fn uniform() -> Self {
        Self {
            weights: [BASE_WEIGHT; NUM_MOVES],
        }
    }

    /// Loss-rate weights from the opponent's ledger, regardless of phase
    pub fn from_ledger(opponent: &Ledger, own_name: &str) -> Self {
        let mut state = Self::uniform();
        for m in ALL_MOVES {
            let rate = loss_rate(opponent, m, own_name);
            if rate > RISK_THRESHOLD {
                state.weights[m.index()] = RISK_THRESHOLD / rate;
            }
        }
        state
    }

    /// Weights the engine samples from for this ledger and phase
    pub fn for_opponent(opponent: &Ledger, own_name: &str) -> Self {
        match phase(opponent) {
            Phase::Cold => Self::uniform(),
            Phase::Warm => Self::from_ledger(opponent, own_name),
        }
    }

    pub fn weight(&self, mv: Move) -> f64 {
        self.weights[mv.index()]
    }

    pub fn weights(&self) -> &[f64; NUM_MOVES] {
        &self.weights
    }

    /// Weights normalized to sum to 1
    pub fn probabilities(&self) -> [f64; NUM_MOVES] {
        let total: f64 = self.weights.iter().sum();
        let mut probs = [0.0; NUM_MOVES];
        for (p, w) in probs.iter_mut().zip(self.weights.iter()) {
            *p = w / total;
        }
        probs
    }

    pub fn probability(&self, mv: Move) -> f64 {
        self.probabilities()[mv.index()]
    }

    /// Running sums of `probabilities()` in enumeration order
    pub fn cumulative(&self) -> [f64; NUM_MOVES] {
        let mut cdf = self.probabilities();
        for i in 1..NUM_MOVES {
            cdf[i] += cdf[i - 1];
        }
        cdf
    }

    /// First move whose cumulative weight exceeds `r` (`r` in [0, 1))
    pub fn sample(&self, r: f64) -> Move {
        self.cumulative()
            .iter()
            .position(|&c| c > r)
            .and_then(Move::from_index)
            // Rounding can leave the last boundary just below 1.0
            .unwrap_or(ALL_MOVES[NUM_MOVES - 1])
    }
}

// ============================================================================
// CHOOSERS
// ============================================================================

/// What a chooser sees when picking its move
#[derive(Clone, Copy, Debug)]
pub struct ChoiceContext<'a> {
    /// Name of the choosing player, as written into ledgers
    pub own_name: &'a str,
    pub opponent_ledger: &'a Ledger,
}

/// Picks one move per round
pub trait MoveChooser {
    fn choose_move(&mut self, ctx: &ChoiceContext<'_>) -> Move;
}

/// Computer move selector. Owns its random source.
pub struct AdaptiveStrategy {
    rng: Box<dyn RngCore + Send>,
}

impl AdaptiveStrategy {
    /// Strategy seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Use an arbitrary random source (fixed draws in tests)
    pub fn with_rng<R: RngCore + Send + 'static>(rng: R) -> Self {
        Self { rng: Box::new(rng) }
    }
}

impl MoveChooser for AdaptiveStrategy {
    fn choose_move(&mut self, ctx: &ChoiceContext<'_>) -> Move {
        let state = StrategyState::for_opponent(ctx.opponent_ledger, ctx.own_name);
        let r: f64 = self.rng.gen();
        let mv = state.sample(r);

        tracing::debug!(
            phase = ?phase(ctx.opponent_ledger),
            weights = ?state.weights(),
            r,
            chosen = %mv,
            "computer move"
        );

        mv
    }
}

impl Default for AdaptiveStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AdaptiveStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptiveStrategy").finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
