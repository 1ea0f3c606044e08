//! Play command - interactive console session against the computer
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: setup_controller(), play_match()
//! - Level 3: prompts (name, move, play again)
//! - Level 4: message formatting

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{Confirm, Input};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rpsls_core::{MatchConfig, MatchController, Move, RoundResult};

use crate::naming::computer_name;

const SEPARATOR: &str = "-----------------------------";

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Your name (prompted for when omitted)
    #[arg(long)]
    pub name: Option<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Set up both players
/// 2. Play matches until the human declines a rematch
/// 3. Say goodbye
pub fn run(args: PlayArgs, config: MatchConfig) -> Result<()> {
    let mut controller = setup_controller(args, config)?;

    println!("{}", welcome_message(controller.config().win_threshold));

    loop {
        play_match(&mut controller)?;
        let again = prompt_play_again()?;
        controller.request_rematch(again)?;
        if !again {
            break;
        }
    }

    println!("{}", goodbye_message());
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Name both players and build the controller
fn setup_controller(args: PlayArgs, config: MatchConfig) -> Result<MatchController> {
    let human_name = match args.name {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => prompt_name()?,
    };

    let mut rng = create_rng(config.seed);
    let computer = computer_name(&mut rng, &human_name);

    tracing::info!(human = %human_name, computer, "starting session");

    let controller = MatchController::new(&human_name, computer, config)?;
    Ok(controller)
}

/// Play rounds until someone reaches the threshold
fn play_match(controller: &mut MatchController) -> Result<()> {
    while !controller.is_match_over() {
        let symbol = prompt_move()?;
        controller.submit_human_move(&symbol)?;
        let result = controller.play_round()?;

        for line in round_report(controller, &result) {
            println!("{}", line);
        }
    }

    if let Some(winner) = controller.match_winner() {
        println!("{} won the match!", controller.player(winner).name());
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - PROMPTS
// ============================================================================

fn prompt_name() -> Result<String> {
    let name: String = Input::new()
        .with_prompt("What's your name?")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Sorry, must enter a value.")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .context("Failed to read name")?;
    Ok(name.trim().to_string())
}

/// Re-prompts until the input names a move
fn prompt_move() -> Result<String> {
    let symbol: String = Input::new()
        .with_prompt("Please choose rock, paper, scissors, lizard or spock")
        .validate_with(|input: &String| -> Result<(), &str> {
            match input.parse::<Move>() {
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::debug!(%err, "invalid move entered");
                    Err("Sorry, invalid choice.")
                }
            }
        })
        .interact_text()
        .context("Failed to read move")?;
    Ok(symbol)
}

fn prompt_play_again() -> Result<bool> {
    Confirm::new()
        .with_prompt("Would you like to play again?")
        .interact()
        .context("Failed to read play-again answer")
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn welcome_message(win_threshold: u32) -> String {
    format!(
        "Welcome to Rock, Paper, Scissors, Lizard, Spock!\nThe first to get {} points wins.",
        win_threshold
    )
}

fn goodbye_message() -> &'static str {
    "Thanks for playing Rock, Paper, Scissors, Lizard, Spock. Good bye!"
}

/// Lines printed after each round
fn round_report(controller: &MatchController, result: &RoundResult) -> Vec<String> {
    let human = controller.human().name();
    let computer = controller.computer().name();

    let mut lines = vec![
        SEPARATOR.to_string(),
        format!("{} chose {}", human, result.human_move),
        format!("{} chose {}", computer, result.computer_move),
    ];

    match (result.winner, result.description()) {
        (Some(winner), Some(action)) => {
            lines.push(action);
            lines.push(format!("{} won the round!", controller.player(winner).name()));
        }
        _ => lines.push("This round is a tie.".to_string()),
    }

    lines.push(format!(
        "The score is: {}: {}, {}: {}",
        human, result.human_score, computer, result.computer_score
    ));
    lines.push(SEPARATOR.to_string());
    lines
}

// ============================================================================
// TESTS
// ============================================================================
