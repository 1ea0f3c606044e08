//! Simulate command - pit the adaptive computer against scripted humans
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_sessions(), report_results()
//! - Level 3: play_single_session(), compute_statistics()
//! - Level 4: seeding and formatting utilities

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use rpsls_core::{
    run_session, ChoiceContext, MatchConfig, MatchController, Move, MoveChooser, SessionSummary,
    Shell,
};

use crate::naming::computer_name;
use crate::patterns::{HumanPattern, PatternPlayer};

const SIMULATED_HUMAN: &str = "Player";

/// Mixed into the session seed so each consumer gets its own stream
const NAME_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;
const PATTERN_STREAM: u64 = 0xD1B5_4A32_D192_ED03;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimulateArgs {
    /// Human pattern: always:<move>, cycle:<move>,<move>,... or random
    #[arg(long, default_value = "always:rock")]
    pub pattern: HumanPattern,

    /// Number of independent sessions
    #[arg(long, default_value = "100")]
    pub sessions: usize,

    /// Matches per session (the computer keeps learning across them)
    #[arg(long, default_value = "5")]
    pub matches: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of one simulated session
#[derive(Clone, Debug)]
struct SessionRecord {
    seed: u64,
    computer_name: &'static str,
    summary: SessionSummary,
}

/// Aggregated simulation results
#[derive(Clone, Debug)]
struct SimulationResults {
    sessions: Vec<SessionRecord>,
    matches: u32,
    computer_match_wins: u32,
    rounds: u32,
    computer_round_wins: u32,
    human_round_wins: u32,
    ties: u32,
}

// ============================================================================
// SHELL
// ============================================================================

/// Shell that answers from a pattern and stops after a fixed number of matches
struct SimulatedShell {
    player: PatternPlayer,
    matches: u32,
}

impl MoveChooser for SimulatedShell {
    fn choose_move(&mut self, ctx: &ChoiceContext<'_>) -> Move {
        self.player.choose_move(ctx)
    }
}

impl Shell for SimulatedShell {
    fn play_again(&mut self, controller: &MatchController) -> bool {
        controller.matches_played() < self.matches
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run simulate command
pub fn run(args: SimulateArgs, config: MatchConfig) -> Result<()> {
    let base_seed = config.seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Simulating {} sessions of {} matches against {} (seed={})",
        args.sessions,
        args.matches,
        args.pattern,
        base_seed
    );

    let results = play_sessions(&args, &config, base_seed)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all sessions in parallel
fn play_sessions(args: &SimulateArgs, config: &MatchConfig, base_seed: u64) -> Result<SimulationResults> {
    let matches = args.matches.max(1);

    let sessions = (0..args.sessions)
        .into_par_iter()
        .map(|i| {
            let seed = session_seed(base_seed, i);
            play_single_session(&args.pattern, matches, config, seed)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(compute_statistics(sessions))
}

fn report_results(results: &SimulationResults, args: &SimulateArgs) {
    if args.json {
        print_json_results(results, args);
    } else {
        print_text_results(results, args);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one session of `matches` matches
fn play_single_session(
    pattern: &HumanPattern,
    matches: u32,
    config: &MatchConfig,
    seed: u64,
) -> Result<SessionRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(stream_seed(seed, NAME_STREAM));
    let computer = computer_name(&mut rng, SIMULATED_HUMAN);

    let session_config = config.clone().with_seed(seed);
    let mut controller = MatchController::new(SIMULATED_HUMAN, computer, session_config)
        .context("Failed to create match controller")?;

    let mut shell = SimulatedShell {
        player: PatternPlayer::new(pattern.clone(), stream_seed(seed, PATTERN_STREAM)),
        matches,
    };
    let summary = run_session(&mut controller, &mut shell)
        .with_context(|| format!("Session with seed {} failed", seed))?;

    tracing::debug!(seed, computer, ?summary, "session finished");

    Ok(SessionRecord {
        seed,
        computer_name: computer,
        summary,
    })
}

/// Compute aggregate statistics from session records
fn compute_statistics(sessions: Vec<SessionRecord>) -> SimulationResults {
    let total = |f: fn(&SessionSummary) -> u32| -> u32 { sessions.iter().map(|s| f(&s.summary)).sum() };

    let matches = total(|s| s.matches);
    let computer_match_wins = total(|s| s.computer_match_wins);
    let rounds = total(|s| s.rounds);
    let computer_round_wins = total(|s| s.computer_round_wins);
    let human_round_wins = total(|s| s.human_round_wins);
    let ties = total(|s| s.ties);

    SimulationResults {
        sessions,
        matches,
        computer_match_wins,
        rounds,
        computer_round_wins,
        human_round_wins,
        ties,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Seed for the i-th session
fn session_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add(index as u64)
}

/// Seed for one RNG consumer within a session; the strategy uses `seed` itself
fn stream_seed(seed: u64, stream: u64) -> u64 {
    seed ^ stream
}

fn rate(count: u32, total: u32) -> f32 {
    if total > 0 {
        count as f32 / total as f32
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &SimulationResults, args: &SimulateArgs) {
    #[derive(serde::Serialize)]
    struct JsonSession<'a> {
        seed: u64,
        computer_name: &'a str,
        #[serde(flatten)]
        summary: &'a SessionSummary,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        pattern: String,
        total_sessions: usize,
        total_matches: u32,
        total_rounds: u32,
        computer_match_win_rate: f32,
        computer_round_win_rate: f32,
        human_round_win_rate: f32,
        tie_rate: f32,
        sessions: Vec<JsonSession<'a>>,
    }

    let output = JsonOutput {
        pattern: args.pattern.to_string(),
        total_sessions: results.sessions.len(),
        total_matches: results.matches,
        total_rounds: results.rounds,
        computer_match_win_rate: rate(results.computer_match_wins, results.matches),
        computer_round_win_rate: rate(results.computer_round_wins, results.rounds),
        human_round_win_rate: rate(results.human_round_wins, results.rounds),
        tie_rate: rate(results.ties, results.rounds),
        sessions: results
            .sessions
            .iter()
            .map(|s| JsonSession {
                seed: s.seed,
                computer_name: s.computer_name,
                summary: &s.summary,
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(err) => tracing::error!(%err, "failed to serialize results"),
    }
}

/// Print results as text
fn print_text_results(results: &SimulationResults, args: &SimulateArgs) {
    println!("\n=== Simulation Results ===");
    println!("Pattern:         {}", args.pattern);
    println!("Sessions:        {}", results.sessions.len());
    println!("Matches:         {}", results.matches);
    println!(
        "Computer wins:   {} ({:.1}%)",
        results.computer_match_wins,
        rate(results.computer_match_wins, results.matches) * 100.0
    );
    println!("Rounds:          {}", results.rounds);
    println!(
        "Rounds won:      computer {:.1}%, human {:.1}%, ties {:.1}%",
        rate(results.computer_round_wins, results.rounds) * 100.0,
        rate(results.human_round_wins, results.rounds) * 100.0,
        rate(results.ties, results.rounds) * 100.0
    );
    println!(
        "Avg rounds/match: {:.1}",
        if results.matches > 0 {
            results.rounds as f32 / results.matches as f32
        } else {
            0.0
        }
    );
}

// ============================================================================
// TESTS
// ============================================================================
