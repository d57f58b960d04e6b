//! Match phase and result types.

use serde::{Deserialize, Serialize};

use crate::types::{Innings, TeamSide};

/// How far the match has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// An innings is being played.
    InProgress(Innings),
    /// The match has finished.
    Complete(MatchResult),
}

/// Winning margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Margin {
    /// The side batting first defended its total.
    #[display("{} runs", _0)]
    Runs(u32),
    /// The chasing side reached the target with wickets in hand.
    #[display("{} wickets", _0)]
    Wickets(u32),
}

/// Outcome of a finished match.
///
/// The winner is decided by comparing the two physical teams' totals,
/// whichever innings each batted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum MatchResult {
    /// One team scored more runs.
    Won {
        /// Winning team.
        winner: TeamSide,
        /// Winning margin.
        margin: Margin,
    },
    /// Totals were level.
    Tied,
}

impl MatchResult {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<TeamSide> {
        match self {
            MatchResult::Won { winner, .. } => Some(*winner),
            MatchResult::Tied => None,
        }
    }

    /// Returns true if the match was tied.
    pub fn is_tie(&self) -> bool {
        matches!(self, MatchResult::Tied)
    }

    /// Long-form description including the margin.
    pub fn describe(&self) -> String {
        match self {
            MatchResult::Won { winner, margin } => format!("{} won by {}", winner, margin),
            MatchResult::Tied => "Match Tied".to_string(),
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Won { winner, .. } => write!(f, "{} Wins", winner),
            MatchResult::Tied => write!(f, "Match Tied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_display() {
        let won = MatchResult::Won {
            winner: TeamSide::Team2,
            margin: Margin::Wickets(4),
        };
        assert_eq!(won.to_string(), "Team 2 Wins");
        assert_eq!(won.describe(), "Team 2 won by 4 wickets");
        assert_eq!(won.winner(), Some(TeamSide::Team2));
        assert_eq!(MatchResult::Tied.to_string(), "Match Tied");
        assert!(MatchResult::Tied.is_tie());
    }
}
