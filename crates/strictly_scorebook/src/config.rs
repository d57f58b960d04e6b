//! Match configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_cricket::{TeamSide, rules};
use tracing::{debug, info, instrument};

/// Static facts about a match, fixed before the first ball.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct MatchConfig {
    /// Overs per innings.
    #[serde(default = "default_overs")]
    overs: u32,

    /// Whether team 1 bats first.
    #[serde(default = "default_team1_batting_first")]
    team1_batting_first: bool,

    /// Display name for team 1.
    #[serde(default = "default_team1_name")]
    team1_name: String,

    /// Display name for team 2.
    #[serde(default = "default_team2_name")]
    team2_name: String,
}

#[instrument]
fn default_overs() -> u32 {
    20
}

#[instrument]
fn default_team1_batting_first() -> bool {
    true
}

#[instrument]
fn default_team1_name() -> String {
    TeamSide::Team1.to_string()
}

#[instrument]
fn default_team2_name() -> String {
    TeamSide::Team2.to_string()
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(
            default_overs(),
            default_team1_batting_first(),
            default_team1_name(),
            default_team2_name(),
        )
    }
}

impl MatchConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading match config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.overs == 0 {
            return Err(ConfigError::new(
                "A match needs at least one over per innings".to_string(),
            ));
        }
        if config.overs > rules::MAX_MATCH_OVERS {
            return Err(ConfigError::new(format!(
                "A match can have at most {} overs per innings, got {}",
                rules::MAX_MATCH_OVERS,
                config.overs
            )));
        }

        info!(
            overs = config.overs,
            team1 = %config.team1_name,
            team2 = %config.team2_name,
            "Match config loaded"
        );
        Ok(config)
    }

    /// Display name for `side`.
    pub fn team_name(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::Team1 => &self.team1_name,
            TeamSide::Team2 => &self.team2_name,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
