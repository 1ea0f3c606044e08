//! Session driver
//!
//! Runs matches and rematches against a `Shell`, which supplies the human's
//! moves and play-again answers and receives round results. The driver never
//! retries anything; a shell validates its own input before answering.

use serde::Serialize;

use crate::error::MatchError;
use crate::game::{MatchController, PlayerId, RoundResult};
use crate::strategy::MoveChooser;

/// The outer I/O layer: picks the human's moves and shows what happened
pub trait Shell: MoveChooser {
    fn round_played(&mut self, _controller: &MatchController, _result: &RoundResult) {}

    fn match_finished(&mut self, _controller: &MatchController, _winner: PlayerId) {}

    /// Whether to start another match
    fn play_again(&mut self, controller: &MatchController) -> bool;
}

/// Totals over one session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub matches: u32,
    pub human_match_wins: u32,
    pub computer_match_wins: u32,
    pub rounds: u32,
    pub human_round_wins: u32,
    pub computer_round_wins: u32,
    pub ties: u32,
}

impl SessionSummary {
    fn record_round(&mut self, result: &RoundResult) {
        self.rounds += 1;
        match result.winner {
            Some(PlayerId::Human) => self.human_round_wins += 1,
            Some(PlayerId::Computer) => self.computer_round_wins += 1,
            None => self.ties += 1,
        }
    }

    fn record_match(&mut self, winner: PlayerId) {
        self.matches += 1;
        match winner {
            PlayerId::Human => self.human_match_wins += 1,
            PlayerId::Computer => self.computer_match_wins += 1,
        }
    }
}

/// Play matches until the shell declines a rematch
pub fn run_session<S: Shell + ?Sized>(
    controller: &mut MatchController,
    shell: &mut S,
) -> Result<SessionSummary, MatchError> {
    if controller.is_session_over() {
        return Err(MatchError::SessionEnded);
    }

    let mut summary = SessionSummary::default();
    loop {
        while !controller.is_match_over() {
            let mv = shell.choose_move(&controller.choice_context(PlayerId::Human));
            controller.set_human_move(mv);
            let result = controller.play_round()?;
            summary.record_round(&result);
            shell.round_played(controller, &result);
        }

        if let Some(winner) = controller.match_winner() {
            summary.record_match(winner);
            shell.match_finished(controller, winner);
        }

        let again = shell.play_again(controller);
        controller.request_rematch(again)?;
        if !again {
            break;
        }
    }

    Ok(summary)
}
