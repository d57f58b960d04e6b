//! Contract-based validation for deliveries.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} ball {Q}

use tracing::{instrument, warn};

use crate::action::{BallInput, ScoringError, Slot};
use crate::invariants::{InvariantSet, ScoringInvariants};
use crate::rules;
use crate::state::MatchState;
use crate::types::PlayerInfo;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), ScoringError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), ScoringError>;
}

// ─────────────────────────────────────────────────────────────
//  Delivery Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the match has not finished.
pub struct MatchInProgress;

impl MatchInProgress {
    /// Checks the precondition.
    pub fn check(state: &MatchState) -> Result<(), ScoringError> {
        if state.is_match_complete {
            Err(ScoringError::MatchComplete)
        } else {
            Ok(())
        }
    }
}

/// Precondition: striker, non-striker and bowler are all selected.
pub struct CreaseFilled;

impl CreaseFilled {
    /// Checks the precondition.
    pub fn check(state: &MatchState) -> Result<(), ScoringError> {
        let slots = [
            (Slot::Striker, &state.strike_batsman),
            (Slot::NonStriker, &state.non_strike_batsman),
            (Slot::Bowler, &state.current_bowler),
        ];
        match slots.iter().find(|(_, player)| player.is_none()) {
            Some((slot, _)) => Err(ScoringError::SlotUnfilled(*slot)),
            None => Ok(()),
        }
    }
}

/// Precondition: selected players belong to the right rosters and the
/// batsmen are distinct and not out.
pub struct PlayersRostered;

impl PlayersRostered {
    /// Checks the precondition.
    #[instrument(skip(state))]
    pub fn check(state: &MatchState) -> Result<(), ScoringError> {
        let batting = state.batting_side();
        let batsmen = [&state.strike_batsman, &state.non_strike_batsman];
        for player in batsmen.into_iter().flatten() {
            let stats = state
                .batsman(batting, player.id())
                .ok_or_else(|| ScoringError::UnknownBatsman(player.id().clone()))?;
            if stats.is_out {
                return Err(ScoringError::BatsmanAlreadyOut(player.id().clone()));
            }
        }

        if let (Some(striker), Some(non_striker)) = (&state.strike_batsman, &state.non_strike_batsman)
            && striker.id() == non_striker.id()
        {
            return Err(ScoringError::SameBatsmanBothEnds(striker.id().clone()));
        }

        if let Some(bowler) = &state.current_bowler
            && state.bowler(state.bowling_side(), bowler.id()).is_none()
        {
            return Err(ScoringError::UnknownBowler(bowler.id().clone()));
        }
        Ok(())
    }
}

/// Precondition: the match length and the delivery's runs fit the
/// counters they feed.
///
/// The batting total bounds every other run tally in the innings, and the
/// target is one more than it, so the total must stay below `u32::MAX`.
pub struct WithinRange;

impl WithinRange {
    /// Checks the precondition.
    #[instrument(skip(state, ball), fields(overs = state.match_overs, runs = ball.completed_runs))]
    pub fn check(state: &MatchState, ball: &BallInput) -> Result<(), ScoringError> {
        if state.match_overs > rules::MAX_MATCH_OVERS {
            return Err(ScoringError::OversOutOfRange(state.match_overs));
        }
        rules::delivery_runs(ball.extra_type, ball.completed_runs)
            .and_then(|runs| state.score(state.batting_side()).runs.checked_add(runs))
            .and_then(|total| total.checked_add(1))
            .map(|_| ())
            .ok_or(ScoringError::RunsOutOfRange(ball.completed_runs))
    }
}

/// Composite precondition: a ball may be bowled.
pub struct LegalDelivery;

impl LegalDelivery {
    /// Validates all preconditions for a delivery.
    pub fn check(state: &MatchState) -> Result<(), ScoringError> {
        MatchInProgress::check(state)?;
        CreaseFilled::check(state)?;
        PlayersRostered::check(state)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Delivery Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for ball deliveries.
///
/// Preconditions:
/// - Match still in progress
/// - Every slot filled with a rostered, not-out player
/// - Match length and runs within counter range
///
/// Postconditions:
/// - All scoring invariants hold
/// - Exactly one history record was added
/// - The batting side's ball count grew by at most one
pub struct DeliveryContract;

impl Contract<MatchState, BallInput> for DeliveryContract {
    fn pre(state: &MatchState, ball: &BallInput) -> Result<(), ScoringError> {
        LegalDelivery::check(state)?;
        WithinRange::check(state, ball)
    }

    fn post(before: &MatchState, after: &MatchState) -> Result<(), ScoringError> {
        ScoringInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            ScoringError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        if after.ball_history.len() != before.ball_history.len() + 1 {
            return Err(ScoringError::InvariantViolation(
                "History must grow by exactly one record per ball".to_string(),
            ));
        }

        let side = before.batting_side();
        let grew = after
            .score(side)
            .balls
            .checked_sub(before.score(side).balls);
        if !matches!(grew, Some(0 | 1)) {
            return Err(ScoringError::InvariantViolation(
                "Legal ball count must grow by zero or one".to_string(),
            ));
        }
        Ok(())
    }
}

/// Whether `player` occupies either crease slot.
pub fn at_crease(state: &MatchState, player: &PlayerInfo) -> bool {
    [&state.strike_batsman, &state.non_strike_batsman]
        .into_iter()
        .flatten()
        .any(|p| p.id() == player.id())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{DismissalType, WicketEvent};
    use crate::engine::process_ball;
    use crate::types::TeamSide;

    fn ready_state() -> MatchState {
        let mut state = MatchState::new(2, true);
        state.select_striker(PlayerInfo::new("b1", "Batsman 1"));
        state.select_non_striker(PlayerInfo::new("b2", "Batsman 2"));
        state.select_bowler(PlayerInfo::new("bw1", "Bowler 1"));
        state
    }

    #[test]
    fn test_precondition_ready() {
        assert!(DeliveryContract::pre(&ready_state(), &BallInput::dot()).is_ok());
    }

    #[test]
    fn test_precondition_missing_bowler() {
        let mut state = ready_state();
        state.current_bowler = None;
        assert_eq!(
            DeliveryContract::pre(&state, &BallInput::dot()),
            Err(ScoringError::SlotUnfilled(Slot::Bowler))
        );
    }

    #[test]
    fn test_precondition_unknown_batsman() {
        let mut state = ready_state();
        state.strike_batsman = Some(PlayerInfo::new("ghost", "Ghost"));
        assert_eq!(
            DeliveryContract::pre(&state, &BallInput::dot()),
            Err(ScoringError::UnknownBatsman("ghost".to_string()))
        );
    }

    #[test]
    fn test_precondition_bowler_from_wrong_side() {
        let mut state = ready_state();
        state.add_bowler(TeamSide::Team1, &PlayerInfo::new("own", "Own Bowler"));
        state.current_bowler = Some(PlayerInfo::new("own", "Own Bowler"));
        assert_eq!(
            DeliveryContract::pre(&state, &BallInput::dot()),
            Err(ScoringError::UnknownBowler("own".to_string()))
        );
    }

    #[test]
    fn test_precondition_same_batsman_twice() {
        let mut state = ready_state();
        state.non_strike_batsman = state.strike_batsman.clone();
        assert_eq!(
            DeliveryContract::pre(&state, &BallInput::dot()),
            Err(ScoringError::SameBatsmanBothEnds("b1".to_string()))
        );
    }

    #[test]
    fn test_precondition_dismissed_batsman_returns() {
        let ball = BallInput::dot().with_wicket(WicketEvent::striker(DismissalType::Caught));
        let mut state = process_ball(&ready_state(), &ball).unwrap();
        state.strike_batsman = Some(PlayerInfo::new("b1", "Batsman 1"));
        assert_eq!(
            DeliveryContract::pre(&state, &BallInput::dot()),
            Err(ScoringError::BatsmanAlreadyOut("b1".to_string()))
        );
    }

    #[test]
    fn test_precondition_overs_beyond_ball_range() {
        let mut state = ready_state();
        state.match_overs = rules::MAX_MATCH_OVERS + 1;
        assert_eq!(
            DeliveryContract::pre(&state, &BallInput::dot()),
            Err(ScoringError::OversOutOfRange(rules::MAX_MATCH_OVERS + 1))
        );
        state.match_overs = rules::MAX_MATCH_OVERS;
        assert!(DeliveryContract::pre(&state, &BallInput::dot()).is_ok());
    }

    #[test]
    fn test_precondition_runs_beyond_total_range() {
        let state = ready_state();
        assert_eq!(
            DeliveryContract::pre(&state, &BallInput::wide(u32::MAX)),
            Err(ScoringError::RunsOutOfRange(u32::MAX))
        );
        assert_eq!(
            DeliveryContract::pre(&state, &BallInput::runs(u32::MAX)),
            Err(ScoringError::RunsOutOfRange(u32::MAX))
        );
        assert!(DeliveryContract::pre(&state, &BallInput::runs(u32::MAX - 1)).is_ok());

        let mut near_full = ready_state();
        near_full.team1_score.runs = u32::MAX - 3;
        assert!(DeliveryContract::pre(&near_full, &BallInput::runs(2)).is_ok());
        assert_eq!(
            DeliveryContract::pre(&near_full, &BallInput::runs(3)),
            Err(ScoringError::RunsOutOfRange(3))
        );
    }

    #[test]
    fn test_postcondition_holds_after_ball() {
        let before = ready_state();
        let after = process_ball(&before, &BallInput::runs(2)).unwrap();
        assert!(DeliveryContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = ready_state();
        let mut after = process_ball(&before, &BallInput::runs(2)).unwrap();
        after.team1_score.runs += 5;
        assert!(matches!(
            DeliveryContract::post(&before, &after),
            Err(ScoringError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_postcondition_detects_missing_history() {
        let before = ready_state();
        let mut after = process_ball(&before, &BallInput::runs(2)).unwrap();
        after.ball_history.clear();
        after.team1_score = before.team1_score;
        after.team1_batting = before.team1_batting.clone();
        assert!(DeliveryContract::post(&before, &after).is_err());
    }

    #[test]
    fn test_at_crease() {
        let state = ready_state();
        assert!(at_crease(&state, &PlayerInfo::new("b2", "Batsman 2")));
        assert!(!at_crease(&state, &PlayerInfo::new("b3", "Batsman 3")));
    }
}
