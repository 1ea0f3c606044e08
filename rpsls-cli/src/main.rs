//! RPSLS CLI - Command-line interface
//!
//! Commands:
//! - play: Interactive console session against the adaptive computer
//! - simulate: Scripted human patterns against the computer, in bulk

mod naming;
mod patterns;
mod play_cmd;
mod simulate_cmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rpsls_core::MatchConfig;

#[derive(Parser)]
#[command(name = "rpsls")]
#[command(about = "Rock, Paper, Scissors, Lizard, Spock against an adaptive computer")]
struct Cli {
    /// Random seed for reproducible computer play
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Match configuration JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (e.g. "info", "rpsls_core=debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively in the terminal
    Play(play_cmd::PlayArgs),
    /// Run scripted sessions and report win rates
    Simulate(simulate_cmd::SimulateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let config = load_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, config),
        Commands::Simulate(args) => simulate_cmd::run(args, config),
    }
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file (or defaults), with `--seed` taking precedence
fn load_config(path: Option<&std::path::Path>, seed: Option<u64>) -> Result<MatchConfig> {
    let config = match path {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => MatchConfig::default(),
    };

    Ok(match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    })
}
