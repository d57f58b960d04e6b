//! Ball-by-ball scoring transition.
//!
//! [`process_ball`] is a pure function of `(state, ball)`: it borrows the
//! input state, builds a structurally independent copy, applies the laws
//! in a fixed order and returns the new state.

use tracing::{debug, info, instrument, warn};

use crate::action::{
    BallInput, CreaseEnd, DismissalType, DismissedBatsman, ExtraType, ScoringError, Slot,
};
use crate::contracts::{Contract, DeliveryContract};
use crate::phases::{Margin, MatchResult};
use crate::rules;
use crate::state::{BallEventRecord, MatchState};
use crate::types::{FallOfWicket, Innings, Partnership, PlayerInfo, TeamSide};

/// Applies one delivery and returns the resulting state.
///
/// Order of resolution:
/// 1. Legality and automatic runs
/// 2. Strike rotation from completed runs
/// 3. Wicket, resolved against the batsmen *before* rotation
/// 4. Ball count
/// 5. Over completion (not on the final ball of the innings)
/// 6. Free hit for the next ball
/// 7. Team score and extras
/// 8. Batsman figures
/// 9. Bowler figures
/// 10. History and over tokens
/// 11. Innings and match completion
///
/// # Errors
///
/// Returns a [`ScoringError`] without touching `state` if the match is
/// over, a slot is unfilled or holds a player missing from the roster,
/// or the match length or the delivery's runs overflow the counters. In debug builds, postcondition failures are reported as
/// [`ScoringError::InvariantViolation`].
#[instrument(skip(state), fields(innings = state.current_innings.number(), ball = %ball))]
pub fn process_ball(state: &MatchState, ball: &BallInput) -> Result<MatchState, ScoringError> {
    DeliveryContract::pre(state, ball).inspect_err(|e| warn!(error = %e, "Ball rejected"))?;

    let striker_before = filled(&state.strike_batsman, Slot::Striker)?;
    let non_striker_before = filled(&state.non_strike_batsman, Slot::NonStriker)?;
    let bowler = filled(&state.current_bowler, Slot::Bowler)?;

    let mut next = state.clone();
    let batting = state.batting_side();
    let bowling = state.bowling_side();

    // 1. Legality
    let is_legal = rules::is_legal(ball.extra_type);
    let automatic_runs = rules::automatic_runs(ball.extra_type);
    let total_runs = rules::delivery_runs(ball.extra_type, ball.completed_runs)
        .ok_or(ScoringError::RunsOutOfRange(ball.completed_runs))?;
    let was_free_hit = state.is_free_hit;

    // 2. Rotation from completed runs only
    if rules::rotates_strike(ball.completed_runs) {
        std::mem::swap(&mut next.strike_batsman, &mut next.non_strike_batsman);
    }

    // 3. Wicket
    let applied_wicket = ball
        .wicket
        .as_ref()
        .filter(|w| !rules::suppressed_by_free_hit(w.kind, was_free_hit));
    if ball.wicket.is_some() && applied_wicket.is_none() {
        debug!("Dismissal cancelled by free hit");
    }
    if let Some(wicket) = applied_wicket {
        let dismissed = match wicket.dismissed_batsman {
            DismissedBatsman::Striker => &striker_before,
            DismissedBatsman::NonStriker => &non_striker_before,
        };
        if let Some(stats) = next
            .batting_card_mut(batting)
            .iter_mut()
            .find(|b| b.id == *dismissed.id())
        {
            stats.dismiss(wicket, bowler.name());
        }
        match (wicket.kind, wicket.dismissed_at_end) {
            (DismissalType::RunOut, CreaseEnd::NonStrikerEnd) => next.non_strike_batsman = None,
            _ => next.strike_batsman = None,
        }
        let score = next.score_mut(batting);
        score.wickets = score.wickets.saturating_add(1);
        debug!(batsman = %dismissed, kind = %wicket.kind, "Wicket applied");
    }

    // 4. Ball count
    if is_legal {
        let score = next.score_mut(batting);
        score.balls = score.balls.saturating_add(1);
    }
    let balls = next.score(batting).balls;
    let innings_balls = rules::innings_balls(next.match_overs);

    // 5. Over completion
    let over_complete = rules::completes_over(is_legal, balls);
    if over_complete && balls < innings_balls {
        std::mem::swap(&mut next.strike_batsman, &mut next.non_strike_batsman);
        next.last_bowler = Some(bowler.id().clone());
        next.current_bowler = None;
        debug!(overs = %rules::format_overs(balls), "Over complete, new bowler required");
    }

    // 6. Free hit lasts exactly one delivery
    next.is_free_hit = ball.extra_type == ExtraType::NoBall;

    // 7. Score and extras
    {
        let score = next.score_mut(batting);
        score.runs = score.runs.saturating_add(total_runs);
        let extras = &mut score.extras;
        match ball.extra_type {
            ExtraType::Wide => extras.wides = extras.wides.saturating_add(total_runs),
            ExtraType::NoBall => extras.no_balls = extras.no_balls.saturating_add(automatic_runs),
            ExtraType::Bye => extras.byes = extras.byes.saturating_add(ball.completed_runs),
            ExtraType::LegBye => {
                extras.leg_byes = extras.leg_byes.saturating_add(ball.completed_runs)
            }
            ExtraType::None => {}
        }
    }

    // 8. Batsman figures (wides are not faced)
    let bat_runs = rules::batsman_runs(ball.extra_type, ball.completed_runs);
    let faced = ball.extra_type != ExtraType::Wide;
    if faced
        && let Some(stats) = next
            .batting_card_mut(batting)
            .iter_mut()
            .find(|b| b.id == *striker_before.id())
    {
        stats.face(bat_runs, ball.is_boundary);
    }

    // 9. Bowler figures
    let conceded = rules::bowler_runs(ball.extra_type, total_runs);
    next.current_over_conceded = next.current_over_conceded.saturating_add(conceded);
    let maiden = over_complete && next.current_over_conceded == 0;
    if let Some(stats) = next
        .bowling_card_mut(bowling)
        .iter_mut()
        .find(|b| b.id == *bowler.id())
    {
        if is_legal {
            stats.balls = stats.balls.saturating_add(1);
        }
        stats.overs = rules::format_overs(stats.balls);
        stats.runs = stats.runs.saturating_add(conceded);
        if applied_wicket.is_some_and(|w| w.kind != DismissalType::RunOut) {
            stats.wickets = stats.wickets.saturating_add(1);
        }
        stats.economy = rules::economy(stats.runs, stats.balls);
        match ball.extra_type {
            ExtraType::Wide => stats.wides = stats.wides.saturating_add(1),
            ExtraType::NoBall => stats.no_balls = stats.no_balls.saturating_add(1),
            _ => {}
        }
        if maiden {
            stats.maidens = stats.maidens.saturating_add(1);
        }
    }
    if over_complete {
        next.current_over_conceded = 0;
    }

    // Partnership
    let partnership = next
        .current_partnership
        .get_or_insert_with(|| Partnership::new(&striker_before, &non_striker_before));
    partnership.total_runs = partnership.total_runs.saturating_add(total_runs);
    if is_legal {
        partnership.total_balls = partnership.total_balls.saturating_add(1);
    }
    if faced {
        partnership.credit(striker_before.id(), bat_runs);
    }

    // Fall of wicket closes the partnership
    if let Some(wicket) = applied_wicket {
        let dismissed = match wicket.dismissed_batsman {
            DismissedBatsman::Striker => &striker_before,
            DismissedBatsman::NonStriker => &non_striker_before,
        };
        let score = *next.score(batting);
        next.fall_of_wickets.push(FallOfWicket {
            innings_number: state.current_innings.number(),
            wicket_number: score.wickets,
            batsman_id: dismissed.id().clone(),
            batsman_name: dismissed.name().clone(),
            score: score.runs,
            overs: score.overs(),
        });
        if let Some(closed) = next.current_partnership.take() {
            next.partnerships.push(closed);
        }
    }

    // 10. History
    let display_text =
        rules::display_text(ball.extra_type, ball.completed_runs, applied_wicket.is_some());
    let last_ball = balls.saturating_sub(1);
    next.ball_history.push(BallEventRecord {
        innings: state.current_innings,
        ball_number: last_ball % rules::BALLS_PER_OVER,
        over_number: last_ball / rules::BALLS_PER_OVER,
        is_legal,
        completed_runs: ball.completed_runs,
        automatic_runs,
        extra_type: ball.extra_type,
        wicket: ball.wicket.clone(),
        is_boundary: ball.is_boundary,
        wicket_applied: applied_wicket.is_some(),
        striker_before: Some(striker_before.clone()),
        non_striker_before: Some(non_striker_before.clone()),
        striker_after: next.strike_batsman.clone(),
        non_striker_after: next.non_strike_batsman.clone(),
        is_free_hit: was_free_hit,
        bowler_id: bowler.id().clone(),
        bowler_name: bowler.name().clone(),
        display_text: display_text.clone(),
        shot: ball.shot,
    });
    next.current_over.push(display_text);
    if over_complete {
        next.current_over.clear();
    }

    // 11. Innings and match completion
    let score = *next.score(batting);
    let is_last_ball_of_innings = is_legal && score.balls >= innings_balls;
    let is_all_out = score.wickets >= rules::MAX_WICKETS;
    let target_reached = next.current_innings == Innings::Second
        && next.target.is_some_and(|target| score.runs >= target);

    if is_last_ball_of_innings || is_all_out || target_reached {
        match next.current_innings {
            Innings::First => start_second_innings(&mut next),
            Innings::Second => finish_match(&mut next),
        }
    }

    #[cfg(debug_assertions)]
    DeliveryContract::post(state, &next)?;

    Ok(next)
}

/// Replays `balls` from `state`, stopping at the first rejected ball.
#[instrument(skip(state, balls), fields(count = balls.len()))]
pub fn process_balls(state: &MatchState, balls: &[BallInput]) -> Result<MatchState, ScoringError> {
    balls
        .iter()
        .try_fold(state.clone(), |current, ball| process_ball(&current, ball))
}

fn filled(slot: &Option<PlayerInfo>, which: Slot) -> Result<PlayerInfo, ScoringError> {
    slot.clone().ok_or(ScoringError::SlotUnfilled(which))
}

/// Sets the target and clears the crease for the chasing side.
fn start_second_innings(state: &mut MatchState) {
    let target = state.score(state.batting_side()).runs.saturating_add(1);
    state.current_innings = Innings::Second;
    state.target = Some(target);
    state.strike_batsman = None;
    state.non_strike_batsman = None;
    state.current_bowler = None;
    state.last_bowler = None;
    state.current_over.clear();
    state.current_over_conceded = 0;
    state.is_free_hit = false;
    if let Some(closed) = state.current_partnership.take() {
        state.partnerships.push(closed);
    }
    info!(
        target,
        chasing = %state.batting_side(),
        "First innings complete"
    );
}

/// Decides the result by comparing the two physical teams' totals.
fn finish_match(state: &mut MatchState) {
    let team1_runs = state.team1_score.runs;
    let team2_runs = state.team2_score.runs;
    let first = state.side_batting_in(Innings::First);

    let result = match team1_runs.cmp(&team2_runs) {
        std::cmp::Ordering::Equal => MatchResult::Tied,
        ordering => {
            let winner = if ordering.is_gt() {
                TeamSide::Team1
            } else {
                TeamSide::Team2
            };
            let margin = if winner == first {
                Margin::Runs(team1_runs.abs_diff(team2_runs))
            } else {
                Margin::Wickets(rules::MAX_WICKETS.saturating_sub(state.score(winner).wickets))
            };
            MatchResult::Won { winner, margin }
        }
    };

    state.is_match_complete = true;
    state.result = Some(result);
    info!(result = %result.describe(), "Match complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::WicketEvent;

    fn base_state() -> MatchState {
        let mut state = MatchState::new(20, true);
        for i in 1..=3 {
            state.add_batsman(
                TeamSide::Team1,
                &PlayerInfo::new(format!("b{}", i), format!("Batsman {}", i)),
            );
        }
        state.select_striker(PlayerInfo::new("b1", "Batsman 1"));
        state.select_non_striker(PlayerInfo::new("b2", "Batsman 2"));
        state.select_bowler(PlayerInfo::new("bw1", "Bowler 1"));
        state
    }

    fn striker_id(state: &MatchState) -> Option<&str> {
        state.strike_batsman.as_ref().map(|p| p.id().as_str())
    }

    #[test]
    fn test_input_state_is_not_mutated() {
        let state = base_state();
        let snapshot = state.clone();
        let next = process_ball(&state, &BallInput::runs(1)).unwrap();
        assert_eq!(state, snapshot);
        assert_ne!(state, next);
    }

    #[test]
    fn test_single_rotates_strike() {
        let next = process_ball(&base_state(), &BallInput::runs(1)).unwrap();
        assert_eq!(striker_id(&next), Some("b2"));
        assert_eq!(next.team1_score.runs, 1);
        assert_eq!(next.team1_score.balls, 1);
    }

    #[test]
    fn test_wide_runs_are_all_extras() {
        let next = process_ball(&base_state(), &BallInput::wide(2)).unwrap();
        assert_eq!(next.team1_score.runs, 3);
        assert_eq!(next.team1_score.extras.wides, 3);
        assert_eq!(next.team1_score.balls, 0);
        let bowler = next.bowler(TeamSide::Team2, "bw1").unwrap();
        assert_eq!(bowler.runs, 3);
        assert_eq!(bowler.wides, 1);
        assert_eq!(next.batsman(TeamSide::Team1, "b1").unwrap().balls, 0);
    }

    #[test]
    fn test_no_ball_credits_bat_runs_and_sets_free_hit() {
        let next = process_ball(&base_state(), &BallInput::no_ball(4).boundary()).unwrap();
        assert_eq!(next.team1_score.runs, 5);
        assert_eq!(next.team1_score.extras.no_balls, 1);
        assert!(next.is_free_hit);
        let b1 = next.batsman(TeamSide::Team1, "b1").unwrap();
        assert_eq!(b1.runs, 4);
        assert_eq!(b1.balls, 1);
        assert_eq!(b1.fours, 1);

        let after = process_ball(&next, &BallInput::dot()).unwrap();
        assert!(!after.is_free_hit);
        assert!(after.ball_history[1].is_free_hit);
    }

    #[test]
    fn test_leg_byes_go_to_team_only() {
        let next = process_ball(&base_state(), &BallInput::leg_bye(2)).unwrap();
        assert_eq!(next.team1_score.runs, 2);
        assert_eq!(next.team1_score.extras.leg_byes, 2);
        assert_eq!(striker_id(&next), Some("b1"));
        let b1 = next.batsman(TeamSide::Team1, "b1").unwrap();
        assert_eq!(b1.runs, 0);
        assert_eq!(b1.balls, 1);
        assert_eq!(next.bowler(TeamSide::Team2, "bw1").unwrap().runs, 0);
    }

    #[test]
    fn test_maiden_over_is_credited() {
        let state = process_balls(&base_state(), &vec![BallInput::leg_bye(1); 6]).unwrap();
        let bowler = state.bowler(TeamSide::Team2, "bw1").unwrap();
        assert_eq!(bowler.maidens, 1);
        assert_eq!(bowler.overs, "1.0");
        assert_eq!(state.last_bowler.as_deref(), Some("bw1"));
        assert!(state.current_bowler.is_none());
        assert!(state.current_over.is_empty());
    }

    #[test]
    fn test_wide_spoils_maiden() {
        let mut balls = vec![BallInput::dot(); 6];
        balls.insert(2, BallInput::wide(0));
        let state = process_balls(&base_state(), &balls).unwrap();
        assert_eq!(state.bowler(TeamSide::Team2, "bw1").unwrap().maidens, 0);
    }

    #[test]
    fn test_bowled_credits_bowler_and_records_fall_of_wicket() {
        let state = process_ball(&base_state(), &BallInput::runs(2)).unwrap();
        let ball = BallInput::dot().with_wicket(WicketEvent::striker(DismissalType::Bowled));
        let next = process_ball(&state, &ball).unwrap();

        assert!(next.strike_batsman.is_none());
        assert_eq!(next.bowler(TeamSide::Team2, "bw1").unwrap().wickets, 1);
        let b1 = next.batsman(TeamSide::Team1, "b1").unwrap();
        assert!(b1.is_out);
        assert_eq!(b1.bowler.as_deref(), Some("Bowler 1"));

        assert_eq!(next.fall_of_wickets.len(), 1);
        let fow = &next.fall_of_wickets[0];
        assert_eq!(fow.wicket_number, 1);
        assert_eq!(fow.batsman_id, "b1");
        assert_eq!(fow.score, 2);
        assert_eq!(fow.overs, "0.2");

        assert!(next.current_partnership.is_none());
        assert_eq!(next.partnerships.len(), 1);
        assert_eq!(next.partnerships[0].total_runs, 2);
        assert_eq!(next.partnerships[0].batsman1_runs, 2);
    }

    #[test]
    fn test_run_out_not_credited_to_bowler() {
        let ball = BallInput::runs(0).with_wicket(WicketEvent::run_out(
            DismissedBatsman::NonStriker,
            CreaseEnd::NonStrikerEnd,
            0,
        ));
        let next = process_ball(&base_state(), &ball).unwrap();
        assert_eq!(next.team1_score.wickets, 1);
        assert_eq!(next.bowler(TeamSide::Team2, "bw1").unwrap().wickets, 0);
        assert!(next.non_strike_batsman.is_none());
        assert_eq!(striker_id(&next), Some("b1"));
        assert!(next.batsman(TeamSide::Team1, "b2").unwrap().is_out);
    }

    #[test]
    fn test_unfilled_striker_rejected() {
        let state = process_ball(
            &base_state(),
            &BallInput::dot().with_wicket(WicketEvent::striker(DismissalType::Lbw)),
        )
        .unwrap();
        let err = process_ball(&state, &BallInput::dot()).unwrap_err();
        assert_eq!(err, ScoringError::SlotUnfilled(Slot::Striker));
    }

    #[test]
    fn test_overflowing_runs_rejected_without_change() {
        let state = base_state();
        let snapshot = state.clone();
        for ball in [BallInput::wide(u32::MAX), BallInput::no_ball(u32::MAX)] {
            assert_eq!(
                process_ball(&state, &ball),
                Err(ScoringError::RunsOutOfRange(u32::MAX))
            );
        }
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_runs_up_to_counter_limit_are_scored() {
        let next = process_ball(&base_state(), &BallInput::runs(u32::MAX - 1)).unwrap();
        assert_eq!(next.team1_score.runs, u32::MAX - 1);
        assert_eq!(next.partnerships.len(), 0);
        assert_eq!(
            next.current_partnership.as_ref().map(|p| p.total_runs),
            Some(u32::MAX - 1)
        );

        assert_eq!(
            process_ball(&next, &BallInput::runs(1)),
            Err(ScoringError::RunsOutOfRange(1))
        );
        let after_dot = process_ball(&next, &BallInput::dot()).unwrap();
        assert_eq!(after_dot.team1_score.balls, 2);
    }

    #[test]
    fn test_oversized_match_rejected() {
        let mut state = base_state();
        state.match_overs = u32::MAX;
        assert_eq!(
            process_ball(&state, &BallInput::dot()),
            Err(ScoringError::OversOutOfRange(u32::MAX))
        );

        state.match_overs = rules::MAX_MATCH_OVERS;
        let next = process_ball(&state, &BallInput::dot()).unwrap();
        assert_eq!(next.team1_score.balls, 1);
    }

    #[test]
    fn test_history_records_before_and_after() {
        let next = process_ball(&base_state(), &BallInput::runs(3)).unwrap();
        let record = &next.ball_history[0];
        assert_eq!(record.striker_before.as_ref().unwrap().id(), "b1");
        assert_eq!(record.striker_after.as_ref().unwrap().id(), "b2");
        assert_eq!(record.display_text, "3");
        assert_eq!(record.extra_type, ExtraType::None);
        assert_eq!((record.over_number, record.ball_number), (0, 0));
    }
}
