//! Command-line interface for strictly_scorebook.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Scorebook - replay cricket op logs through the scoring engine
#[derive(Parser, Debug)]
#[command(name = "strictly_scorebook")]
#[command(about = "Offline cricket scorebook", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay an op log and print the scorecard
    Replay {
        /// Path to match configuration file
        #[arg(short, long, default_value = "match.toml")]
        config: PathBuf,

        /// Path to the JSON op log
        #[arg(short, long)]
        ops: PathBuf,

        /// Print the final match state as JSON instead of a scorecard
        #[arg(long)]
        json: bool,
    },

    /// Print what the chasing side needs
    Chase {
        /// Path to match configuration file
        #[arg(short, long, default_value = "match.toml")]
        config: PathBuf,

        /// Path to the JSON op log
        #[arg(short, long)]
        ops: PathBuf,
    },

    /// Print a batsman's shot distribution
    WagonWheel {
        /// Path to match configuration file
        #[arg(short, long, default_value = "match.toml")]
        config: PathBuf,

        /// Path to the JSON op log
        #[arg(short, long)]
        ops: PathBuf,

        /// Batsman id
        #[arg(short, long)]
        batsman: String,
    },
}
