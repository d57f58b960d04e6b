//! Core domain types for cricket scoring.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::action::{DismissalType, WicketEvent};
use crate::rules;

/// A player occupying a crease or bowling slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct PlayerInfo {
    /// Stable player identifier supplied by the caller.
    id: String,
    /// Display name.
    name: String,
}

impl PlayerInfo {
    /// Creates a new player reference.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for PlayerInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// One of the two physical teams in a match.
///
/// Team identity is fixed for the whole match; which innings a team
/// bats in is decided by [`crate::MatchState::team1_batting_first`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "camelCase")]
pub enum TeamSide {
    /// The first team.
    #[display("Team 1")]
    Team1,
    /// The second team.
    #[display("Team 2")]
    Team2,
}

impl TeamSide {
    /// Returns the other team.
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Team1 => TeamSide::Team2,
            TeamSide::Team2 => TeamSide::Team1,
        }
    }
}

/// Which innings is being played.
///
/// Serialized as the innings number (`1` or `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Innings {
    /// Team batting first sets the target.
    First,
    /// Team batting second chases.
    Second,
}

impl Innings {
    /// Returns the innings number, starting at 1.
    pub fn number(self) -> u8 {
        match self {
            Innings::First => 1,
            Innings::Second => 2,
        }
    }
}

impl From<Innings> for u8 {
    fn from(innings: Innings) -> Self {
        innings.number()
    }
}

impl TryFrom<u8> for Innings {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Innings::First),
            2 => Ok(Innings::Second),
            other => Err(format!("innings must be 1 or 2, got {}", other)),
        }
    }
}

/// Runs conceded as extras, split by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extras {
    /// Runs from wides (the automatic run plus anything run off a wide).
    pub wides: u32,
    /// Automatic runs from no-balls.
    pub no_balls: u32,
    /// Byes.
    pub byes: u32,
    /// Leg-byes.
    pub leg_byes: u32,
}

impl Extras {
    /// Total extras.
    pub fn total(&self) -> u32 {
        self.wides
            .saturating_add(self.no_balls)
            .saturating_add(self.byes)
            .saturating_add(self.leg_byes)
    }
}

/// Running total for one team's innings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamScore {
    /// Total runs including extras.
    pub runs: u32,
    /// Wickets fallen (0-10).
    pub wickets: u32,
    /// Legal balls bowled.
    pub balls: u32,
    /// Extras breakdown.
    pub extras: Extras,
}

impl TeamScore {
    /// Overs bowled as `"N.b"`.
    pub fn overs(&self) -> String {
        rules::format_overs(self.balls)
    }
}

/// Batting figures for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatsmanStats {
    /// Player id.
    pub id: String,
    /// Player name.
    pub name: String,
    /// Runs credited to the batsman.
    pub runs: u32,
    /// Balls faced (wides excluded).
    pub balls: u32,
    /// Boundary fours.
    pub fours: u32,
    /// Boundary sixes.
    pub sixes: u32,
    /// Runs per hundred balls.
    pub strike_rate: f64,
    /// Whether the batsman has been dismissed.
    pub is_out: bool,
    /// How the batsman was dismissed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismissal_type: Option<DismissalType>,
    /// Name of the bowler at the time of dismissal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bowler: Option<String>,
    /// Fielder involved in the dismissal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fielder: Option<String>,
}

impl BatsmanStats {
    /// Creates an empty batting entry for a player.
    pub fn new(player: &PlayerInfo) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            strike_rate: 0.0,
            is_out: false,
            dismissal_type: None,
            bowler: None,
            fielder: None,
        }
    }

    /// Records a ball faced.
    #[instrument(skip(self), fields(batsman = %self.id))]
    pub(crate) fn face(&mut self, runs: u32, is_boundary: bool) {
        self.balls = self.balls.saturating_add(1);
        self.runs = self.runs.saturating_add(runs);
        if is_boundary && runs == 4 {
            self.fours = self.fours.saturating_add(1);
        }
        if is_boundary && runs == 6 {
            self.sixes = self.sixes.saturating_add(1);
        }
        self.strike_rate = rules::strike_rate(self.runs, self.balls);
    }

    /// Marks the batsman out.
    pub(crate) fn dismiss(&mut self, wicket: &WicketEvent, bowler: &str) {
        self.is_out = true;
        self.dismissal_type = Some(wicket.kind);
        self.bowler = Some(bowler.to_string());
        self.fielder = wicket.fielder.clone();
    }
}

/// Bowling figures for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowlerStats {
    /// Player id.
    pub id: String,
    /// Player name.
    pub name: String,
    /// Overs bowled as `"N.b"`.
    pub overs: String,
    /// Legal balls bowled.
    pub balls: u32,
    /// Completed overs without a run charged to the bowler.
    pub maidens: u32,
    /// Runs conceded (byes and leg-byes excluded).
    pub runs: u32,
    /// Wickets credited (run-outs excluded).
    pub wickets: u32,
    /// Runs conceded per over.
    pub economy: f64,
    /// Wides bowled.
    pub wides: u32,
    /// No-balls bowled.
    pub no_balls: u32,
}

impl BowlerStats {
    /// Creates an empty bowling entry for a player.
    pub fn new(player: &PlayerInfo) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            overs: rules::format_overs(0),
            balls: 0,
            maidens: 0,
            runs: 0,
            wickets: 0,
            economy: 0.0,
            wides: 0,
            no_balls: 0,
        }
    }
}

/// Score at which a wicket fell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallOfWicket {
    /// Innings number (1 or 2).
    pub innings_number: u8,
    /// Wicket number within the innings, starting at 1.
    pub wicket_number: u32,
    /// Dismissed player id.
    pub batsman_id: String,
    /// Dismissed player name.
    pub batsman_name: String,
    /// Team score after the ball.
    pub score: u32,
    /// Overs bowled after the ball.
    pub overs: String,
}

/// Runs added while a pair of batsmen were together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partnership {
    /// Batsman on strike when the partnership began.
    pub batsman1_id: String,
    /// Name of `batsman1_id`.
    pub batsman1_name: String,
    /// Runs credited to batsman 1 during the partnership.
    pub batsman1_runs: u32,
    /// Balls faced by batsman 1 during the partnership.
    pub batsman1_balls: u32,
    /// Non-striker when the partnership began.
    pub batsman2_id: String,
    /// Name of `batsman2_id`.
    pub batsman2_name: String,
    /// Runs credited to batsman 2 during the partnership.
    pub batsman2_runs: u32,
    /// Balls faced by batsman 2 during the partnership.
    pub batsman2_balls: u32,
    /// All runs added to the total, extras included.
    pub total_runs: u32,
    /// Legal balls bowled.
    pub total_balls: u32,
}

impl Partnership {
    /// Starts a new partnership.
    pub fn new(striker: &PlayerInfo, non_striker: &PlayerInfo) -> Self {
        Self {
            batsman1_id: striker.id.clone(),
            batsman1_name: striker.name.clone(),
            batsman1_runs: 0,
            batsman1_balls: 0,
            batsman2_id: non_striker.id.clone(),
            batsman2_name: non_striker.name.clone(),
            batsman2_runs: 0,
            batsman2_balls: 0,
            total_runs: 0,
            total_balls: 0,
        }
    }

    /// Credits a ball faced by `striker_id` to the matching partner.
    pub(crate) fn credit(&mut self, striker_id: &str, runs: u32) {
        if striker_id == self.batsman1_id {
            self.batsman1_runs = self.batsman1_runs.saturating_add(runs);
            self.batsman1_balls = self.batsman1_balls.saturating_add(1);
        } else if striker_id == self.batsman2_id {
            self.batsman2_runs = self.batsman2_runs.saturating_add(runs);
            self.batsman2_balls = self.batsman2_balls.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{CreaseEnd, DismissedBatsman};

    #[test]
    fn test_innings_serializes_as_number() {
        let json = serde_json::to_string(&Innings::Second).unwrap();
        assert_eq!(json, "2");
        let parsed: Innings = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, Innings::First);
        assert!(serde_json::from_str::<Innings>("3").is_err());
    }

    #[test]
    fn test_team_side_display() {
        assert_eq!(TeamSide::Team1.to_string(), "Team 1");
        assert_eq!(TeamSide::Team2.opponent(), TeamSide::Team1);
    }

    #[test]
    fn test_face_counts_boundaries_only_when_flagged() {
        let mut stats = BatsmanStats::new(&PlayerInfo::new("b1", "Batsman 1"));
        stats.face(4, false);
        stats.face(6, true);
        assert_eq!(stats.runs, 10);
        assert_eq!(stats.balls, 2);
        assert_eq!(stats.fours, 0);
        assert_eq!(stats.sixes, 1);
        assert_eq!(stats.strike_rate, 500.0);
    }

    #[test]
    fn test_dismiss_records_details() {
        let mut stats = BatsmanStats::new(&PlayerInfo::new("b1", "Batsman 1"));
        let wicket = WicketEvent {
            kind: DismissalType::Caught,
            dismissed_batsman: DismissedBatsman::Striker,
            dismissed_at_end: CreaseEnd::StrikerEnd,
            runs_before_dismissal: 0,
            fielder: Some("Fielder".to_string()),
        };
        stats.dismiss(&wicket, "Bowler 1");
        assert!(stats.is_out);
        assert_eq!(stats.dismissal_type, Some(DismissalType::Caught));
        assert_eq!(stats.bowler.as_deref(), Some("Bowler 1"));
        assert_eq!(stats.fielder.as_deref(), Some("Fielder"));
    }

    #[test]
    fn test_partnership_credits_matching_partner() {
        let a = PlayerInfo::new("b1", "A");
        let b = PlayerInfo::new("b2", "B");
        let mut p = Partnership::new(&a, &b);
        p.credit("b2", 3);
        p.credit("b9", 4);
        assert_eq!(p.batsman2_runs, 3);
        assert_eq!(p.batsman2_balls, 1);
        assert_eq!(p.batsman1_balls, 0);
    }
}
