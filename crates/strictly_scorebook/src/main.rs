//! Strictly Scorebook - Unified CLI
//!
//! Replays a stored op log and prints derived views.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_cricket::{ChaseInfo, WagonWheel};
use strictly_scorebook::{ReplayedMatch, render_scorecard, render_wagon_wheel};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay { config, ops, json } => run_replay(&config, &ops, json),
        Command::Chase { config, ops } => run_chase(&config, &ops),
        Command::WagonWheel {
            config,
            ops,
            batsman,
        } => run_wagon_wheel(&config, &ops, &batsman),
    }
}

fn load(config: &Path, ops: &Path) -> Result<ReplayedMatch> {
    ReplayedMatch::load(config, ops).with_context(|| {
        format!(
            "Replaying {} with config {}",
            ops.display(),
            config.display()
        )
    })
}

/// Prints the scorecard, or the state as JSON
#[instrument(skip_all)]
fn run_replay(config: &Path, ops: &Path, json: bool) -> Result<()> {
    let replayed = load(config, ops)?;
    if json {
        println!("{}", serde_json::to_string_pretty(replayed.state())?);
    } else {
        print!("{}", render_scorecard(replayed.config(), replayed.state()));
    }
    Ok(())
}

/// Prints chase information
#[instrument(skip_all)]
fn run_chase(config: &Path, ops: &Path) -> Result<()> {
    let replayed = load(config, ops)?;
    match ChaseInfo::from_state(replayed.state()) {
        Some(chase) => println!("{}", chase),
        None => {
            warn!("First innings still in progress");
            println!("No target set yet");
        }
    }
    Ok(())
}

/// Prints the wagon wheel for one batsman
#[instrument(skip_all, fields(batsman = %batsman))]
fn run_wagon_wheel(config: &Path, ops: &Path, batsman: &str) -> Result<()> {
    let replayed = load(config, ops)?;
    let wheel = WagonWheel::for_batsman(replayed.state(), batsman);
    info!(shots = wheel.total_shots, "Wagon wheel built");
    print!("{}", render_wagon_wheel(&wheel));
    Ok(())
}
