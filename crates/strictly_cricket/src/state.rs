//! Complete, serializable match state.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::action::{ExtraType, ShotPlacement, WicketEvent};
use crate::phases::{MatchPhase, MatchResult};
use crate::types::{
    BatsmanStats, BowlerStats, FallOfWicket, Innings, Partnership, PlayerInfo, TeamScore,
    TeamSide,
};

/// One processed delivery, kept for replay and shot analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallEventRecord {
    /// Innings the ball was bowled in.
    pub innings: Innings,
    /// Zero-based ball within the over, from the legal ball count.
    pub ball_number: u32,
    /// Zero-based over number.
    pub over_number: u32,
    /// Whether the ball counted toward the over.
    pub is_legal: bool,
    /// Runs physically completed.
    pub completed_runs: u32,
    /// Automatic extra run (wide or no-ball).
    pub automatic_runs: u32,
    /// Extra attached to the ball.
    pub extra_type: ExtraType,
    /// Dismissal as reported, even if a free hit cancelled it.
    pub wicket: Option<WicketEvent>,
    /// Whether the runs were a boundary.
    #[serde(default)]
    pub is_boundary: bool,
    /// Whether the reported dismissal was applied.
    #[serde(default)]
    pub wicket_applied: bool,
    /// Striker when the ball was bowled.
    pub striker_before: Option<PlayerInfo>,
    /// Non-striker when the ball was bowled.
    pub non_striker_before: Option<PlayerInfo>,
    /// Striker after the ball.
    pub striker_after: Option<PlayerInfo>,
    /// Non-striker after the ball.
    pub non_striker_after: Option<PlayerInfo>,
    /// Free-hit status in effect when the ball was bowled.
    pub is_free_hit: bool,
    /// Bowler id.
    pub bowler_id: String,
    /// Bowler name.
    pub bowler_name: String,
    /// Scorer's shorthand.
    pub display_text: String,
    /// Shot placement, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot: Option<ShotPlacement>,
}

impl BallEventRecord {
    /// All runs the ball added to the total.
    pub fn total_runs(&self) -> u32 {
        self.completed_runs.saturating_add(self.automatic_runs)
    }
}

/// Snapshot of one match in progress.
///
/// Created once with [`MatchState::new`], then threaded through
/// [`crate::process_ball`]. Each call returns a new value and leaves its
/// input untouched, so earlier snapshots stay valid for undo and audit.
///
/// An empty crease or bowling slot (`None`) must be filled by the caller
/// before the next ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    /// Innings in progress.
    pub current_innings: Innings,
    /// Team 1 total.
    pub team1_score: TeamScore,
    /// Team 2 total.
    pub team2_score: TeamScore,
    /// Team 1 batting card.
    pub team1_batting: Vec<BatsmanStats>,
    /// Team 2 batting card.
    pub team2_batting: Vec<BatsmanStats>,
    /// Team 1 bowling figures.
    pub team1_bowling: Vec<BowlerStats>,
    /// Team 2 bowling figures.
    pub team2_bowling: Vec<BowlerStats>,
    /// Batsman on strike.
    pub strike_batsman: Option<PlayerInfo>,
    /// Batsman at the bowler's end.
    pub non_strike_batsman: Option<PlayerInfo>,
    /// Bowler of the over in progress.
    pub current_bowler: Option<PlayerInfo>,
    /// Bowler of the last completed over.
    #[serde(default)]
    pub last_bowler: Option<String>,
    /// Tokens for the over in progress.
    pub current_over: Vec<String>,
    /// Runs charged to the bowler in the over in progress.
    #[serde(default)]
    pub current_over_conceded: u32,
    /// Overs per innings.
    pub match_overs: u32,
    /// Whether team 1 bats in the first innings.
    pub team1_batting_first: bool,
    /// Whether the match has finished.
    pub is_match_complete: bool,
    /// Result once complete.
    #[serde(default)]
    pub result: Option<MatchResult>,
    /// Runs needed by the chasing side, set when the first innings ends.
    #[serde(default)]
    pub target: Option<u32>,
    /// Whether the next ball is a free hit.
    pub is_free_hit: bool,
    /// Every processed ball, in order.
    pub ball_history: Vec<BallEventRecord>,
    /// Wickets in the order they fell.
    #[serde(default)]
    pub fall_of_wickets: Vec<FallOfWicket>,
    /// Closed partnerships.
    #[serde(default)]
    pub partnerships: Vec<Partnership>,
    /// Partnership in progress.
    #[serde(default)]
    pub current_partnership: Option<Partnership>,
}

/// Creates a fresh match state.
///
/// Rosters are empty and every slot is unfilled; the caller selects
/// players before the first ball.
#[instrument]
pub fn initial_match_state(match_overs: u32, team1_batting_first: bool) -> MatchState {
    MatchState::new(match_overs, team1_batting_first)
}

impl MatchState {
    /// Creates a fresh match state.
    #[instrument]
    pub fn new(match_overs: u32, team1_batting_first: bool) -> Self {
        Self {
            current_innings: Innings::First,
            team1_score: TeamScore::default(),
            team2_score: TeamScore::default(),
            team1_batting: Vec::new(),
            team2_batting: Vec::new(),
            team1_bowling: Vec::new(),
            team2_bowling: Vec::new(),
            strike_batsman: None,
            non_strike_batsman: None,
            current_bowler: None,
            last_bowler: None,
            current_over: Vec::new(),
            current_over_conceded: 0,
            match_overs,
            team1_batting_first,
            is_match_complete: false,
            result: None,
            target: None,
            is_free_hit: false,
            ball_history: Vec::new(),
            fall_of_wickets: Vec::new(),
            partnerships: Vec::new(),
            current_partnership: None,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Side resolution
    // ─────────────────────────────────────────────────────────────

    /// Team batting in `innings`.
    pub fn side_batting_in(&self, innings: Innings) -> TeamSide {
        match (innings, self.team1_batting_first) {
            (Innings::First, true) | (Innings::Second, false) => TeamSide::Team1,
            _ => TeamSide::Team2,
        }
    }

    /// Team currently batting.
    pub fn batting_side(&self) -> TeamSide {
        self.side_batting_in(self.current_innings)
    }

    /// Team currently bowling.
    pub fn bowling_side(&self) -> TeamSide {
        self.batting_side().opponent()
    }

    /// Total for `side`.
    pub fn score(&self, side: TeamSide) -> &TeamScore {
        match side {
            TeamSide::Team1 => &self.team1_score,
            TeamSide::Team2 => &self.team2_score,
        }
    }

    pub(crate) fn score_mut(&mut self, side: TeamSide) -> &mut TeamScore {
        match side {
            TeamSide::Team1 => &mut self.team1_score,
            TeamSide::Team2 => &mut self.team2_score,
        }
    }

    /// Batting card for `side`.
    pub fn batting_card(&self, side: TeamSide) -> &[BatsmanStats] {
        match side {
            TeamSide::Team1 => &self.team1_batting,
            TeamSide::Team2 => &self.team2_batting,
        }
    }

    pub(crate) fn batting_card_mut(&mut self, side: TeamSide) -> &mut Vec<BatsmanStats> {
        match side {
            TeamSide::Team1 => &mut self.team1_batting,
            TeamSide::Team2 => &mut self.team2_batting,
        }
    }

    /// Bowling figures for `side`.
    pub fn bowling_card(&self, side: TeamSide) -> &[BowlerStats] {
        match side {
            TeamSide::Team1 => &self.team1_bowling,
            TeamSide::Team2 => &self.team2_bowling,
        }
    }

    pub(crate) fn bowling_card_mut(&mut self, side: TeamSide) -> &mut Vec<BowlerStats> {
        match side {
            TeamSide::Team1 => &mut self.team1_bowling,
            TeamSide::Team2 => &mut self.team2_bowling,
        }
    }

    /// Looks up a batsman by id in `side`'s card.
    pub fn batsman(&self, side: TeamSide, id: &str) -> Option<&BatsmanStats> {
        self.batting_card(side).iter().find(|b| b.id == id)
    }

    /// Looks up a bowler by id in `side`'s figures.
    pub fn bowler(&self, side: TeamSide, id: &str) -> Option<&BowlerStats> {
        self.bowling_card(side).iter().find(|b| b.id == id)
    }

    /// Current phase of the match.
    pub fn phase(&self) -> MatchPhase {
        match self.result {
            Some(result) if self.is_match_complete => MatchPhase::Complete(result),
            _ => MatchPhase::InProgress(self.current_innings),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Roster and slot selection (caller's side of the contract)
    // ─────────────────────────────────────────────────────────────

    /// Adds a player to `side`'s batting card if not already present.
    #[instrument(skip(self), fields(player = %player))]
    pub fn add_batsman(&mut self, side: TeamSide, player: &PlayerInfo) {
        if self.batsman(side, player.id()).is_none() {
            debug!(?side, "Adding batsman to card");
            self.batting_card_mut(side).push(BatsmanStats::new(player));
        }
    }

    /// Adds a player to `side`'s bowling figures if not already present.
    #[instrument(skip(self), fields(player = %player))]
    pub fn add_bowler(&mut self, side: TeamSide, player: &PlayerInfo) {
        if self.bowler(side, player.id()).is_none() {
            debug!(?side, "Adding bowler to figures");
            self.bowling_card_mut(side).push(BowlerStats::new(player));
        }
    }

    /// Puts `player` on strike, registering them with the batting side.
    #[instrument(skip(self), fields(player = %player))]
    pub fn select_striker(&mut self, player: PlayerInfo) {
        self.add_batsman(self.batting_side(), &player);
        self.strike_batsman = Some(player);
    }

    /// Puts `player` at the bowler's end, registering them with the batting side.
    #[instrument(skip(self), fields(player = %player))]
    pub fn select_non_striker(&mut self, player: PlayerInfo) {
        self.add_batsman(self.batting_side(), &player);
        self.non_strike_batsman = Some(player);
    }

    /// Hands the ball to `player`, registering them with the bowling side.
    ///
    /// Eligibility (no consecutive overs) is the caller's rule; see
    /// [`MatchState::may_bowl_next_over`].
    #[instrument(skip(self), fields(player = %player))]
    pub fn select_bowler(&mut self, player: PlayerInfo) {
        self.add_bowler(self.bowling_side(), &player);
        self.current_bowler = Some(player);
    }

    /// Whether `bowler_id` did not bowl the previous over.
    pub fn may_bowl_next_over(&self, bowler_id: &str) -> bool {
        self.last_bowler.as_deref() != Some(bowler_id)
    }

    /// Runs still needed by the chasing side, if a target is set.
    pub fn runs_needed(&self) -> Option<u32> {
        let target = self.target?;
        let chasing = self.side_batting_in(Innings::Second);
        Some(target.saturating_sub(self.score(chasing).runs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_empty() {
        let state = initial_match_state(20, true);
        assert_eq!(state.current_innings, Innings::First);
        assert_eq!(state.team1_score, TeamScore::default());
        assert!(state.strike_batsman.is_none());
        assert!(state.non_strike_batsman.is_none());
        assert!(state.current_bowler.is_none());
        assert!(!state.is_match_complete);
        assert!(!state.is_free_hit);
        assert!(state.ball_history.is_empty());
        assert_eq!(state.phase(), MatchPhase::InProgress(Innings::First));
    }

    #[test]
    fn test_side_resolution() {
        let mut state = MatchState::new(20, false);
        assert_eq!(state.batting_side(), TeamSide::Team2);
        assert_eq!(state.bowling_side(), TeamSide::Team1);
        state.current_innings = Innings::Second;
        assert_eq!(state.batting_side(), TeamSide::Team1);
    }

    #[test]
    fn test_selection_registers_players_once() {
        let mut state = MatchState::new(20, true);
        let b1 = PlayerInfo::new("b1", "Batsman 1");
        state.select_striker(b1.clone());
        state.select_striker(b1.clone());
        state.select_bowler(PlayerInfo::new("bw1", "Bowler 1"));
        assert_eq!(state.team1_batting.len(), 1);
        assert_eq!(state.team2_bowling.len(), 1);
        assert!(state.team2_batting.is_empty());
        assert_eq!(state.strike_batsman, Some(b1));
    }

    #[test]
    fn test_consecutive_over_check() {
        let mut state = MatchState::new(20, true);
        assert!(state.may_bowl_next_over("bw1"));
        state.last_bowler = Some("bw1".to_string());
        assert!(!state.may_bowl_next_over("bw1"));
        assert!(state.may_bowl_next_over("bw2"));
    }
}
