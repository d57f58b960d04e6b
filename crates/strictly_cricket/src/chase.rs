//! Second-innings chase summary.

use serde::{Deserialize, Serialize};

use crate::rules;
use crate::state::MatchState;
use crate::types::Innings;

/// What the chasing side still needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChaseInfo {
    /// Runs needed to win, set when the first innings closed.
    pub target: u32,
    /// Runs still required, never negative.
    pub required_runs: u32,
    /// Legal balls left in the innings.
    pub remaining_balls: u32,
    /// Runs per over needed from here, 0 when no balls remain.
    pub required_run_rate: f64,
}

impl ChaseInfo {
    /// Chase summary, or `None` while the first innings is still going.
    pub fn from_state(state: &MatchState) -> Option<Self> {
        let target = state.target?;
        let chasing = state.score(state.side_batting_in(Innings::Second));
        let required_runs = target.saturating_sub(chasing.runs);
        let remaining_balls = rules::innings_balls(state.match_overs).saturating_sub(chasing.balls);
        Some(Self {
            target,
            required_runs,
            remaining_balls,
            required_run_rate: rules::required_run_rate(required_runs, remaining_balls),
        })
    }
}

impl std::fmt::Display for ChaseInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Target {}: need {} from {} balls (RRR {:.2})",
            self.target, self.required_runs, self.remaining_balls, self.required_run_rate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_chase_in_first_innings() {
        assert!(ChaseInfo::from_state(&MatchState::new(20, true)).is_none());
    }

    #[test]
    fn test_chase_figures() {
        let mut state = MatchState::new(20, false);
        state.current_innings = Innings::Second;
        state.target = Some(151);
        state.team1_score.runs = 91;
        state.team1_score.balls = 60;

        let chase = ChaseInfo::from_state(&state).unwrap();
        assert_eq!(chase.required_runs, 60);
        assert_eq!(chase.remaining_balls, 60);
        assert!((chase.required_run_rate - 6.0).abs() < f64::EPSILON);
        assert_eq!(
            chase.to_string(),
            "Target 151: need 60 from 60 balls (RRR 6.00)"
        );
    }

    #[test]
    fn test_chase_clamps_at_zero() {
        let mut state = MatchState::new(1, true);
        state.current_innings = Innings::Second;
        state.target = Some(10);
        state.team2_score.runs = 14;
        state.team2_score.balls = 6;

        let chase = ChaseInfo::from_state(&state).unwrap();
        assert_eq!(chase.required_runs, 0);
        assert_eq!(chase.remaining_balls, 0);
        assert_eq!(chase.required_run_rate, 0.0);
    }
}
