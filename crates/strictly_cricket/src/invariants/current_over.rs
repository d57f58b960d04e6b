//! Current over invariant: the over tokens are the tail of the history.

use super::Invariant;
use crate::rules::BALLS_PER_OVER;
use crate::state::MatchState;

/// Invariant: `current_over` mirrors the display tokens of the most
/// recent history records, and holds fewer than six legal deliveries.
pub struct CurrentOverMatchesHistory;

impl Invariant<MatchState> for CurrentOverMatchesHistory {
    fn holds(state: &MatchState) -> bool {
        let Some(start) = state
            .ball_history
            .len()
            .checked_sub(state.current_over.len())
        else {
            return false;
        };
        let tail = &state.ball_history[start..];
        let tokens_match = tail
            .iter()
            .zip(&state.current_over)
            .all(|(record, token)| record.display_text == *token);
        let legal = tail.iter().filter(|r| r.is_legal).count();
        tokens_match && legal < BALLS_PER_OVER as usize
    }

    fn description() -> &'static str {
        "Current over mirrors recent history with fewer than six legal balls"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BallInput, PlayerInfo, process_balls};

    fn ready() -> MatchState {
        let mut state = MatchState::new(20, true);
        state.select_striker(PlayerInfo::new("b1", "Batsman 1"));
        state.select_non_striker(PlayerInfo::new("b2", "Batsman 2"));
        state.select_bowler(PlayerInfo::new("bw1", "Bowler 1"));
        state
    }

    #[test]
    fn test_partial_over_holds() {
        let state = process_balls(&ready(), &[BallInput::runs(2), BallInput::wide(0)]).unwrap();
        assert_eq!(state.current_over, vec!["2", "Wd"]);
        assert!(CurrentOverMatchesHistory::holds(&state));
    }

    #[test]
    fn test_tokens_without_history_violate() {
        let mut state = ready();
        state.current_over.push("1".to_string());
        assert!(!CurrentOverMatchesHistory::holds(&state));
    }
}
