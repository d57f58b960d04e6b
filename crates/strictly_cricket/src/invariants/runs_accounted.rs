//! Run accounting invariant: every run on the board has an owner.

use super::Invariant;
use crate::state::MatchState;
use crate::types::TeamSide;

/// Invariant: for each team, the total equals the runs in its history
/// records, and also equals batsmen's runs plus extras.
pub struct RunsAccounted;

impl Invariant<MatchState> for RunsAccounted {
    fn holds(state: &MatchState) -> bool {
        [TeamSide::Team1, TeamSide::Team2].into_iter().all(|side| {
            let score = state.score(side);
            let recorded: u64 = state
                .ball_history
                .iter()
                .filter(|r| state.side_batting_in(r.innings) == side)
                .map(|r| u64::from(r.completed_runs) + u64::from(r.automatic_runs))
                .sum();
            let credited: u64 = state
                .batting_card(side)
                .iter()
                .map(|b| u64::from(b.runs))
                .sum();
            let extras = &score.extras;
            let extras_total = [extras.wides, extras.no_balls, extras.byes, extras.leg_byes]
                .into_iter()
                .map(u64::from)
                .sum::<u64>();
            let runs = u64::from(score.runs);
            runs == recorded && runs == credited + extras_total
        })
    }

    fn description() -> &'static str {
        "Team runs equal recorded runs and batsmen's runs plus extras"
    }
}
