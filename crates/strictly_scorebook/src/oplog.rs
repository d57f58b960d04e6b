//! Loading a stored op log and replaying it against a match config.

use derive_getters::Getters;
use derive_more::{Display, Error, From};
use std::path::Path;
use strictly_cricket::{MatchOp, MatchState, ReplayError, replay};
use tracing::{debug, info, instrument};

use crate::config::MatchConfig;

/// Error reading or replaying an op log.
#[derive(Debug, Display, Error, From)]
pub enum OpLogError {
    /// The file could not be read.
    #[display("Failed to read op log: {}", _0)]
    Io(std::io::Error),

    /// The file is not a JSON array of operations.
    #[display("Failed to parse op log: {}", _0)]
    Parse(serde_json::Error),

    /// The engine rejected an operation.
    #[display("{}", _0)]
    Replay(ReplayError),
}

/// Reads a JSON array of [`MatchOp`]s.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_ops(path: impl AsRef<Path>) -> Result<Vec<MatchOp>, OpLogError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let ops: Vec<MatchOp> = serde_json::from_str(&content)?;
    debug!(count = ops.len(), "Op log parsed");
    Ok(ops)
}

/// A configured match rebuilt from its op log.
#[derive(Debug, Clone, Getters)]
pub struct ReplayedMatch {
    /// Match configuration.
    config: MatchConfig,
    /// Operations as stored, undo entries included.
    ops: Vec<MatchOp>,
    /// State after replay.
    state: MatchState,
}

impl ReplayedMatch {
    /// Replays `ops` under `config`.
    #[instrument(skip(config, ops), fields(overs = config.overs(), count = ops.len()))]
    pub fn replay(config: MatchConfig, ops: Vec<MatchOp>) -> Result<Self, OpLogError> {
        let state = replay(*config.overs(), *config.team1_batting_first(), &ops)?;
        info!(
            balls = state.ball_history.len(),
            complete = state.is_match_complete,
            "Op log replayed"
        );
        Ok(Self { config, ops, state })
    }

    /// Loads the config and op log from disk and replays them.
    pub fn load(
        config_path: impl AsRef<Path>,
        ops_path: impl AsRef<Path>,
    ) -> anyhow::Result<Self> {
        let config = MatchConfig::from_file(config_path)?;
        let ops = load_ops(ops_path)?;
        Ok(Self::replay(config, ops)?)
    }
}
