//! Wicket invariant: no side loses more than ten wickets, and every
//! wicket down is an applied dismissal in the history.

use super::Invariant;
use crate::rules::MAX_WICKETS;
use crate::state::MatchState;
use crate::types::TeamSide;

/// Invariant: both teams have between 0 and 10 wickets down, matching
/// the applied dismissals recorded for the innings they batted.
pub struct WicketsBounded;

impl Invariant<MatchState> for WicketsBounded {
    fn holds(state: &MatchState) -> bool {
        [TeamSide::Team1, TeamSide::Team2].into_iter().all(|side| {
            let wickets = state.score(side).wickets;
            let applied = state
                .ball_history
                .iter()
                .filter(|r| r.wicket_applied && state.side_batting_in(r.innings) == side)
                .count();
            wickets <= MAX_WICKETS && usize::try_from(wickets).is_ok_and(|w| w == applied)
        })
    }

    fn description() -> &'static str {
        "Wickets stay within 0-10 and match applied dismissals"
    }
}
