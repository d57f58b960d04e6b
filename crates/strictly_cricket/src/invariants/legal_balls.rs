//! Ball count invariant: team balls equal legal deliveries recorded.

use super::Invariant;
use crate::state::MatchState;
use crate::types::TeamSide;

/// Invariant: each team's legal ball count matches the legal records
/// in the history for the innings it batted.
///
/// Wides and no-balls are recorded but never counted.
pub struct LegalBallsCounted;

impl Invariant<MatchState> for LegalBallsCounted {
    fn holds(state: &MatchState) -> bool {
        [TeamSide::Team1, TeamSide::Team2].into_iter().all(|side| {
            let legal = state
                .ball_history
                .iter()
                .filter(|r| r.is_legal && state.side_batting_in(r.innings) == side)
                .count();
            usize::try_from(state.score(side).balls).is_ok_and(|balls| balls == legal)
        })
    }

    fn description() -> &'static str {
        "Legal ball counts match legal deliveries in history"
    }
}
