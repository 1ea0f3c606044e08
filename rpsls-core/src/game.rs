//! Players and the match controller

use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::error::{InvalidMoveError, MatchError};
use crate::ledger::{Ledger, OutcomeLabel};
use crate::moves::{resolve, verb, Move, Outcome};
use crate::strategy::{AdaptiveStrategy, ChoiceContext, MoveChooser};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Side of the table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    Human,
    Computer,
}

impl PlayerId {
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::Human => PlayerId::Computer,
            PlayerId::Computer => PlayerId::Human,
        }
    }
}

/// Where the current round stands.
///
/// `play_round` passes through `Resolving` and `Recording` without
/// returning, so between calls only `AwaitingMoves` and `Scored` are seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    AwaitingMoves,
    Resolving,
    Recording,
    Scored,
}

/// A named participant with a score and a history
#[derive(Clone, Debug)]
pub struct Player {
    name: String,
    score: u32,
    current_move: Option<Move>,
    ledger: Ledger,
}

impl Player {
    fn new(name: String) -> Self {
        Self {
            name,
            score: 0,
            current_move: None,
            ledger: Ledger::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Move of the round in progress, or of the last round played
    pub fn current_move(&self) -> Option<Move> {
        self.current_move
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn win_round(&mut self) {
        self.score += 1;
    }
}

/// What happened in one round
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundResult {
    /// 1-based round number within the match
    pub round: u32,
    pub human_move: Move,
    pub computer_move: Move,
    /// None on a tie
    pub winner: Option<PlayerId>,
    /// None on a tie
    pub verb: Option<&'static str>,
    pub human_score: u32,
    pub computer_score: u32,
}

impl RoundResult {
    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }

    /// Action line such as "Paper covers Rock"
    pub fn description(&self) -> Option<String> {
        let winner = self.winner?;
        let verb = self.verb?;
        let (winning, losing) = match winner {
            PlayerId::Human => (self.human_move, self.computer_move),
            PlayerId::Computer => (self.computer_move, self.human_move),
        };
        Some(format!("{} {} {}", winning, verb, losing))
    }
}

// ============================================================================
// MATCH CONTROLLER
// ============================================================================

/// Drives rounds between a human and the adaptive computer.
///
/// Scores reset on every rematch; ledgers never do, so the computer keeps
/// learning for the life of the controller.
#[derive(Debug)]
pub struct MatchController {
    human: Player,
    computer: Player,
    strategy: AdaptiveStrategy,
    config: MatchConfig,

    /// Moves collected for the round in progress
    human_pending: Option<Move>,
    computer_pending: Option<Move>,

    phase: RoundPhase,
    /// Rounds played in the current match
    round: u32,
    rounds_played: u32,
    matches_played: u32,
    session_over: bool,
}

impl MatchController {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a controller whose computer is seeded from `config.seed`
    pub fn new(human_name: &str, computer_name: &str, config: MatchConfig) -> Result<Self, MatchError> {
        let strategy = match config.seed {
            Some(seed) => AdaptiveStrategy::with_seed(seed),
            None => AdaptiveStrategy::new(),
        };
        Self::with_strategy(human_name, computer_name, config, strategy)
    }

    /// Create a controller with an explicit computer strategy
    pub fn with_strategy(
        human_name: &str,
        computer_name: &str,
        config: MatchConfig,
        strategy: AdaptiveStrategy,
    ) -> Result<Self, MatchError> {
        let human_name = validate_name(human_name)?;
        let computer_name = validate_name(computer_name)?;
        if human_name == computer_name {
            return Err(MatchError::DuplicateName(human_name));
        }
        if config.win_threshold == 0 {
            return Err(MatchError::InvalidThreshold);
        }

        Ok(Self {
            human: Player::new(human_name),
            computer: Player::new(computer_name),
            strategy,
            config,
            human_pending: None,
            computer_pending: None,
            phase: RoundPhase::AwaitingMoves,
            round: 0,
            rounds_played: 0,
            matches_played: 0,
            session_over: false,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn human(&self) -> &Player {
        &self.human
    }

    pub fn computer(&self) -> &Player {
        &self.computer
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        match id {
            PlayerId::Human => &self.human,
            PlayerId::Computer => &self.computer,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn round_phase(&self) -> RoundPhase {
        self.phase
    }

    /// Rounds played across all matches
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Completed matches
    pub fn matches_played(&self) -> u32 {
        self.matches_played
    }

    pub fn is_session_over(&self) -> bool {
        self.session_over
    }

    /// Context a chooser for `id` decides from
    pub fn choice_context(&self, id: PlayerId) -> ChoiceContext<'_> {
        ChoiceContext {
            own_name: self.player(id).name(),
            opponent_ledger: self.player(id.opponent()).ledger(),
        }
    }

    // ========================================================================
    // MOVE COLLECTION
    // ========================================================================

    /// Submit the human's move for the next round by symbol name
    pub fn submit_human_move(&mut self, symbol: &str) -> Result<(), InvalidMoveError> {
        let mv = symbol.parse::<Move>().map_err(|err| {
            tracing::warn!(input = symbol, "rejected move");
            err
        })?;
        self.set_human_move(mv);
        Ok(())
    }

    /// Submit the human's move for the next round.
    ///
    /// Ignored once the match or session is over.
    pub fn set_human_move(&mut self, mv: Move) {
        if !self.accepting_moves() {
            tracing::debug!(%mv, "move ignored, no round open");
            return;
        }
        self.begin_round();
        self.human_pending = Some(mv);
        self.human.current_move = Some(mv);
    }

    /// The computer's move for the round in progress.
    ///
    /// Drawn on first call; later calls in the same round return the same move.
    /// Once the match or session is over this returns the last move played
    /// without drawing.
    pub fn get_computer_move(&mut self) -> Move {
        if !self.accepting_moves() {
            if let Some(mv) = self.computer.current_move {
                return mv;
            }
        }
        self.begin_round();
        if let Some(mv) = self.computer_pending {
            return mv;
        }

        let ctx = ChoiceContext {
            own_name: &self.computer.name,
            opponent_ledger: &self.human.ledger,
        };
        let mv = self.strategy.choose_move(&ctx);

        self.computer_pending = Some(mv);
        self.computer.current_move = Some(mv);
        mv
    }

    fn accepting_moves(&self) -> bool {
        !self.session_over && !self.is_match_over()
    }

    fn begin_round(&mut self) {
        if self.phase == RoundPhase::Scored {
            self.phase = RoundPhase::AwaitingMoves;
        }
    }

    // ========================================================================
    // ROUNDS
    // ========================================================================

    /// Play one round with the submitted human move
    pub fn play_round(&mut self) -> Result<RoundResult, MatchError> {
        if self.session_over {
            return Err(MatchError::SessionEnded);
        }
        if let Some(winner) = self.match_winner() {
            return Err(MatchError::MatchOver(self.player(winner).name.clone()));
        }

        self.begin_round();
        let human_move = self.human_pending.ok_or(MatchError::AwaitingHumanMove)?;
        let computer_move = self.get_computer_move();
        self.human_pending = None;
        self.computer_pending = None;

        self.phase = RoundPhase::Resolving;
        let winner = match resolve(human_move, computer_move) {
            Outcome::FirstWins => Some(PlayerId::Human),
            Outcome::SecondWins => Some(PlayerId::Computer),
            Outcome::Tie => None,
        };

        self.phase = RoundPhase::Recording;
        let label = match winner {
            Some(id) => OutcomeLabel::winner(self.player(id).name()),
            None => OutcomeLabel::Tie,
        };
        self.human.ledger.record(human_move, label.clone());
        self.computer.ledger.record(computer_move, label);

        let action_verb = match winner {
            Some(PlayerId::Human) => {
                self.human.win_round();
                verb(human_move, computer_move)
            }
            Some(PlayerId::Computer) => {
                self.computer.win_round();
                verb(computer_move, human_move)
            }
            None => None,
        };
        self.phase = RoundPhase::Scored;
        self.round += 1;
        self.rounds_played += 1;

        let result = RoundResult {
            round: self.round,
            human_move,
            computer_move,
            winner,
            verb: action_verb,
            human_score: self.human.score,
            computer_score: self.computer.score,
        };

        match result.description() {
            Some(action) => tracing::info!(round = result.round, %action, ?winner, "round won"),
            None => tracing::info!(round = result.round, mv = %human_move, "round tied"),
        }

        if let Some(match_winner) = self.match_winner() {
            self.matches_played += 1;
            tracing::info!(
                winner = self.player(match_winner).name(),
                human_score = self.human.score,
                computer_score = self.computer.score,
                rounds = self.round,
                "match finished"
            );
        }

        Ok(result)
    }

    /// Side that reached the win threshold, if any
    pub fn match_winner(&self) -> Option<PlayerId> {
        let threshold = self.config.win_threshold;
        if self.human.score >= threshold {
            Some(PlayerId::Human)
        } else if self.computer.score >= threshold {
            Some(PlayerId::Computer)
        } else {
            None
        }
    }

    pub fn is_match_over(&self) -> bool {
        self.match_winner().is_some()
    }

    /// Answer the play-again question once a match is over.
    ///
    /// Accepting resets both scores; declining ends the session. Ledgers
    /// are kept either way.
    pub fn request_rematch(&mut self, accept: bool) -> Result<(), MatchError> {
        if self.session_over {
            return Err(MatchError::SessionEnded);
        }
        if !self.is_match_over() {
            return Err(MatchError::MatchInProgress);
        }

        if accept {
            self.human.score = 0;
            self.computer.score = 0;
            self.round = 0;
            self.human_pending = None;
            self.computer_pending = None;
            self.phase = RoundPhase::AwaitingMoves;
            tracing::info!(match_number = self.matches_played + 1, "rematch");
        } else {
            self.session_over = true;
            tracing::info!(matches = self.matches_played, "session ended");
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String, MatchError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MatchError::EmptyName);
    }
    Ok(name.to_string())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    /// Computer that draws `r` every time
    fn forced_computer(r: f64) -> AdaptiveStrategy {
        let bits = (r * (1u64 << 53) as f64) as u64;
        AdaptiveStrategy::with_rng(StepRng::new(bits << 11, 0))
    }

    /// Computer forced to Paper while in the cold phase
    fn paper_controller() -> MatchController {
        MatchController::with_strategy("Alice", "Hal", MatchConfig::default(), forced_computer(0.3))
            .unwrap()
    }

    #[test]
    fn test_name_validation() {
        assert_eq!(
            MatchController::new("  ", "Hal", MatchConfig::default()).unwrap_err(),
            MatchError::EmptyName
        );
        assert_eq!(
            MatchController::new("Hal", " Hal ", MatchConfig::default()).unwrap_err(),
            MatchError::DuplicateName("Hal".to_string())
        );
        let ctrl = MatchController::new(" Alice ", "Hal", MatchConfig::default()).unwrap();
        assert_eq!(ctrl.human().name(), "Alice");
    }

    #[test]
    fn test_invalid_move_rejected() {
        let mut ctrl = paper_controller();
        let err = ctrl.submit_human_move("dynamite").unwrap_err();
        assert_eq!(err.input, "dynamite");
        assert_eq!(ctrl.play_round().unwrap_err(), MatchError::AwaitingHumanMove);
        // Nothing recorded, no computer draw consumed
        assert!(ctrl.human().ledger().is_empty());
        assert_eq!(ctrl.computer().current_move(), None);
    }

    #[test]
    fn test_decisive_round() {
        let mut ctrl = paper_controller();
        ctrl.submit_human_move("Rock").unwrap();
        let result = ctrl.play_round().unwrap();

        assert_eq!(result.round, 1);
        assert_eq!(result.human_move, Move::Rock);
        assert_eq!(result.computer_move, Move::Paper);
        assert_eq!(result.winner, Some(PlayerId::Computer));
        assert_eq!(result.verb, Some("covers"));
        assert_eq!(result.description().as_deref(), Some("Paper covers Rock"));
        assert_eq!((result.human_score, result.computer_score), (0, 1));
        assert_eq!(ctrl.round_phase(), RoundPhase::Scored);

        let human_entry = ctrl.human().ledger().last().unwrap();
        assert_eq!(human_entry.mv, Move::Rock);
        assert_eq!(human_entry.outcome, OutcomeLabel::winner("Hal"));
        let computer_entry = ctrl.computer().ledger().last().unwrap();
        assert_eq!(computer_entry.mv, Move::Paper);
        assert_eq!(computer_entry.outcome, OutcomeLabel::winner("Hal"));
    }

    #[test]
    fn test_tie_round() {
        let mut ctrl = paper_controller();
        ctrl.submit_human_move("paper").unwrap();
        let result = ctrl.play_round().unwrap();

        assert!(result.is_tie());
        assert_eq!(result.verb, None);
        assert_eq!(result.description(), None);
        assert_eq!((result.human_score, result.computer_score), (0, 0));
        assert_eq!(ctrl.human().ledger().last().unwrap().outcome, OutcomeLabel::Tie);
        assert_eq!(ctrl.computer().ledger().last().unwrap().outcome, OutcomeLabel::Tie);
    }

    #[test]
    fn test_human_win_round() {
        let mut ctrl = paper_controller();
        ctrl.submit_human_move("scissors").unwrap();
        let result = ctrl.play_round().unwrap();
        assert_eq!(result.winner, Some(PlayerId::Human));
        assert_eq!(result.description().as_deref(), Some("Scissors cuts Paper"));
        assert_eq!(ctrl.human().score(), 1);
        assert_eq!(ctrl.computer().ledger().count_losses(Move::Paper, "Alice"), 1);
    }

    #[test]
    fn test_computer_move_stable_within_round() {
        let mut ctrl = MatchController::new("Alice", "Hal", MatchConfig::default().with_seed(3)).unwrap();
        let first = ctrl.get_computer_move();
        for _ in 0..10 {
            assert_eq!(ctrl.get_computer_move(), first);
        }
        ctrl.set_human_move(Move::Spock);
        assert_eq!(ctrl.play_round().unwrap().computer_move, first);
    }

    #[test]
    fn test_full_match_computer_wins() {
        let mut ctrl = paper_controller();
        let mut rounds = 0;
        while !ctrl.is_match_over() {
            ctrl.submit_human_move("rock").unwrap();
            ctrl.play_round().unwrap();
            rounds += 1;
        }

        assert_eq!(rounds, 3);
        assert_eq!(ctrl.human().score(), 0);
        assert_eq!(ctrl.computer().score(), 3);
        assert_eq!(ctrl.match_winner(), Some(PlayerId::Computer));
        assert_eq!(ctrl.matches_played(), 1);

        ctrl.submit_human_move("rock").unwrap();
        assert_eq!(ctrl.human_pending, None);
        assert_eq!(
            ctrl.play_round().unwrap_err(),
            MatchError::MatchOver("Hal".to_string())
        );
    }

    #[test]
    fn test_rematch_keeps_ledgers() {
        let mut ctrl = paper_controller();
        assert_eq!(ctrl.request_rematch(true).unwrap_err(), MatchError::MatchInProgress);

        while !ctrl.is_match_over() {
            ctrl.set_human_move(Move::Rock);
            ctrl.play_round().unwrap();
        }
        ctrl.request_rematch(true).unwrap();

        assert_eq!(ctrl.human().score(), 0);
        assert_eq!(ctrl.computer().score(), 0);
        assert_eq!(ctrl.match_winner(), None);
        assert_eq!(ctrl.human().ledger().len(), 3);
        assert_eq!(ctrl.computer().ledger().len(), 3);

        ctrl.set_human_move(Move::Rock);
        let result = ctrl.play_round().unwrap();
        assert_eq!(result.round, 1);
        assert_eq!(ctrl.rounds_played(), 4);
        assert_eq!(ctrl.human().ledger().count_losses(Move::Rock, "Hal"), 4);
    }

    #[test]
    fn test_declined_rematch_ends_session() {
        let mut ctrl = paper_controller();
        while !ctrl.is_match_over() {
            ctrl.set_human_move(Move::Rock);
            ctrl.play_round().unwrap();
        }
        ctrl.request_rematch(false).unwrap();

        assert!(ctrl.is_session_over());
        assert_eq!(ctrl.request_rematch(true).unwrap_err(), MatchError::SessionEnded);
        ctrl.set_human_move(Move::Rock);
        assert_eq!(ctrl.play_round().unwrap_err(), MatchError::SessionEnded);
        // History still readable
        assert_eq!(ctrl.human().ledger().count_occurrences(Move::Rock), 3);
        assert_eq!(ctrl.computer().score(), 3);
    }

    #[test]
    fn test_moves_ignored_after_session_end() {
        let mut ctrl = MatchController::new("Alice", "Hal", MatchConfig::default().with_seed(11)).unwrap();
        while !ctrl.is_match_over() {
            ctrl.set_human_move(Move::Spock);
            ctrl.play_round().unwrap();
        }
        ctrl.request_rematch(false).unwrap();
        let last = ctrl.computer().current_move();

        ctrl.submit_human_move("rock").unwrap();
        assert_eq!(ctrl.human_pending, None);
        assert_eq!(ctrl.human().current_move(), Some(Move::Spock));

        assert_eq!(Some(ctrl.get_computer_move()), last);
        assert_eq!(ctrl.computer_pending, None);
        assert_eq!(ctrl.round_phase(), RoundPhase::Scored);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = MatchConfig {
            win_threshold: 0,
            seed: Some(1),
        };
        assert_eq!(
            MatchController::new("Alice", "Hal", config.clone()).unwrap_err(),
            MatchError::InvalidThreshold
        );
        assert_eq!(
            MatchController::with_strategy("Alice", "Hal", config, forced_computer(0.3)).unwrap_err(),
            MatchError::InvalidThreshold
        );
    }

    #[test]
    fn test_observable_phases() {
        let mut ctrl = paper_controller();
        assert_eq!(ctrl.round_phase(), RoundPhase::AwaitingMoves);
        ctrl.set_human_move(Move::Lizard);
        ctrl.play_round().unwrap();
        assert_eq!(ctrl.round_phase(), RoundPhase::Scored);
        ctrl.set_human_move(Move::Rock);
        assert_eq!(ctrl.round_phase(), RoundPhase::AwaitingMoves);
        ctrl.play_round().unwrap();
        assert_eq!(ctrl.round_phase(), RoundPhase::Scored);
    }

    #[test]
    fn test_custom_threshold() {
        let config = MatchConfig::default().with_win_threshold(1);
        let mut ctrl = MatchController::with_strategy("Alice", "Hal", config, forced_computer(0.3)).unwrap();
        ctrl.set_human_move(Move::Lizard);
        let result = ctrl.play_round().unwrap();
        assert_eq!(result.winner, Some(PlayerId::Human));
        assert_eq!(ctrl.match_winner(), Some(PlayerId::Human));
    }

    #[test]
    fn test_choice_context() {
        let mut ctrl = paper_controller();
        ctrl.set_human_move(Move::Rock);
        ctrl.play_round().unwrap();

        let ctx = ctrl.choice_context(PlayerId::Computer);
        assert_eq!(ctx.own_name, "Hal");
        assert_eq!(ctx.opponent_ledger.count_occurrences(Move::Rock), 1);

        let ctx = ctrl.choice_context(PlayerId::Human);
        assert_eq!(ctx.own_name, "Alice");
        assert_eq!(ctx.opponent_ledger.count_occurrences(Move::Paper), 1);
    }
}
