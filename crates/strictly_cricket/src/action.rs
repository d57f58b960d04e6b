//! First-class delivery types for cricket scoring.
//!
//! A ball is a domain event, not a side effect. It carries what happened
//! on the field and is resolved against the match state by the engine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Kind of extra attached to a delivery.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
    strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExtraType {
    /// A fair delivery with no extra.
    #[default]
    None,
    /// Wide: one automatic run, not a legal ball.
    Wide,
    /// No-ball: one automatic run, not a legal ball, next ball is a free hit.
    #[serde(rename = "noball")]
    #[strum(serialize = "noball")]
    NoBall,
    /// Byes: runs to the team, not the batsman or bowler.
    Bye,
    /// Leg-byes: runs to the team, not the batsman or bowler.
    #[serde(rename = "legbye")]
    #[strum(serialize = "legbye")]
    LegBye,
}

/// How a batsman was dismissed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
    strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DismissalType {
    /// Bowled.
    Bowled,
    /// Caught.
    Caught,
    /// Leg before wicket.
    Lbw,
    /// Stumped.
    Stumped,
    /// Run out: the only dismissal allowed on a free hit.
    RunOut,
    /// Hit wicket.
    HitWicket,
}

/// Which of the two batsmen at the crease was dismissed, by identity
/// at the moment the ball was bowled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DismissedBatsman {
    /// The batsman on strike when the ball was bowled.
    Striker,
    /// The batsman at the bowler's end when the ball was bowled.
    NonStriker,
}

/// Physical crease end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CreaseEnd {
    /// The end the next ball is faced from.
    StrikerEnd,
    /// The bowler's end.
    NonStrikerEnd,
}

/// A reported dismissal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WicketEvent {
    /// Dismissal type.
    #[serde(rename = "type")]
    pub kind: DismissalType,
    /// Who was dismissed.
    pub dismissed_batsman: DismissedBatsman,
    /// Which end was left empty. Only consulted for run-outs.
    pub dismissed_at_end: CreaseEnd,
    /// Runs completed before the dismissal.
    pub runs_before_dismissal: u32,
    /// Fielder involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fielder: Option<String>,
}

impl WicketEvent {
    /// Dismisses the striker with a non-run-out dismissal.
    pub fn striker(kind: DismissalType) -> Self {
        Self {
            kind,
            dismissed_batsman: DismissedBatsman::Striker,
            dismissed_at_end: CreaseEnd::StrikerEnd,
            runs_before_dismissal: 0,
            fielder: None,
        }
    }

    /// Run-out of `batsman`, leaving `end` empty.
    pub fn run_out(batsman: DismissedBatsman, end: CreaseEnd, runs_before: u32) -> Self {
        Self {
            kind: DismissalType::RunOut,
            dismissed_batsman: batsman,
            dismissed_at_end: end,
            runs_before_dismissal: runs_before,
            fielder: None,
        }
    }

    /// Sets the fielder.
    pub fn with_fielder(mut self, fielder: impl Into<String>) -> Self {
        self.fielder = Some(fielder.into());
        self
    }
}

/// Fielding region a shot was played into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    JsonSchema, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ShotZone {
    /// Fine leg.
    FineLeg,
    /// Square leg.
    SquareLeg,
    /// Mid-wicket.
    MidWicket,
    /// Long on.
    LongOn,
    /// Straight down the ground.
    Straight,
    /// Long off.
    LongOff,
    /// Cover.
    Cover,
    /// Point.
    Point,
    /// Third man.
    ThirdMan,
}

/// Where a shot went, for the wagon wheel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShotPlacement {
    /// Fielding region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<ShotZone>,
    /// Angle in degrees, 0-360.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
    /// Normalized distance, 0-1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f32>,
}

impl ShotPlacement {
    /// A shot into a zone with no precise coordinates.
    pub fn zone(zone: ShotZone) -> Self {
        Self {
            zone: Some(zone),
            angle: None,
            distance: None,
        }
    }
}

/// A single delivery as reported by the scorer.
///
/// Balls are first-class domain events that can be:
/// - Validated before application
/// - Serialized into an op log for replay
/// - Reasoned about by contracts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BallInput {
    /// Runs physically run or hit, excluding the automatic extra.
    pub completed_runs: u32,
    /// Extra attached to the delivery.
    #[serde(default)]
    pub extra_type: ExtraType,
    /// Reported dismissal, if any.
    #[serde(default)]
    pub wicket: Option<WicketEvent>,
    /// Whether the runs came from a boundary rather than running.
    #[serde(default)]
    pub is_boundary: bool,
    /// Optional shot placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot: Option<ShotPlacement>,
}

impl BallInput {
    /// A fair delivery with `runs` completed.
    #[instrument]
    pub fn runs(runs: u32) -> Self {
        Self::with_extra(runs, ExtraType::None)
    }

    /// A dot ball.
    pub fn dot() -> Self {
        Self::runs(0)
    }

    /// A boundary four.
    pub fn four() -> Self {
        Self::runs(4).boundary()
    }

    /// A boundary six.
    pub fn six() -> Self {
        Self::runs(6).boundary()
    }

    /// A wide with `runs` completed on top of the automatic run.
    pub fn wide(runs: u32) -> Self {
        Self::with_extra(runs, ExtraType::Wide)
    }

    /// A no-ball with `runs` completed on top of the automatic run.
    pub fn no_ball(runs: u32) -> Self {
        Self::with_extra(runs, ExtraType::NoBall)
    }

    /// Byes.
    pub fn bye(runs: u32) -> Self {
        Self::with_extra(runs, ExtraType::Bye)
    }

    /// Leg-byes.
    pub fn leg_bye(runs: u32) -> Self {
        Self::with_extra(runs, ExtraType::LegBye)
    }

    fn with_extra(completed_runs: u32, extra_type: ExtraType) -> Self {
        Self {
            completed_runs,
            extra_type,
            wicket: None,
            is_boundary: false,
            shot: None,
        }
    }

    /// Attaches a dismissal.
    pub fn with_wicket(mut self, wicket: WicketEvent) -> Self {
        self.wicket = Some(wicket);
        self
    }

    /// Marks the runs as a boundary.
    pub fn boundary(mut self) -> Self {
        self.is_boundary = true;
        self
    }

    /// Attaches a shot placement.
    pub fn with_shot(mut self, shot: ShotPlacement) -> Self {
        self.shot = Some(shot);
        self
    }
}

impl std::fmt::Display for BallInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} run(s), extra {}", self.completed_runs, self.extra_type)?;
        if let Some(wicket) = &self.wicket {
            write!(f, ", wicket {}", wicket.kind)?;
        }
        Ok(())
    }
}

/// A crease or bowling slot that the caller fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Slot {
    /// Batsman on strike.
    #[display("striker")]
    Striker,
    /// Batsman at the bowler's end.
    #[display("non-striker")]
    NonStriker,
    /// Bowler of the current over.
    #[display("bowler")]
    Bowler,
}

/// Error returned when a delivery cannot be applied.
///
/// The input state is never modified when an error is returned.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ScoringError {
    /// The match has already finished.
    #[display("Match is already complete")]
    MatchComplete,

    /// A slot must be filled before the next ball.
    #[display("The {} slot must be filled before the next ball", _0)]
    SlotUnfilled(#[error(not(source))] Slot),

    /// The player at the crease is not in the batting side's roster.
    #[display("Unknown batsman id '{}'", _0)]
    UnknownBatsman(#[error(not(source))] String),

    /// The bowler is not in the bowling side's roster.
    #[display("Unknown bowler id '{}'", _0)]
    UnknownBowler(#[error(not(source))] String),

    /// A dismissed batsman is still occupying a crease slot.
    #[display("Batsman '{}' is already out", _0)]
    BatsmanAlreadyOut(#[error(not(source))] String),

    /// The same player is at both ends.
    #[display("Batsman '{}' cannot occupy both ends", _0)]
    SameBatsmanBothEnds(#[error(not(source))] String),

    /// The delivery's runs would push a total past `u32::MAX`.
    #[display("A delivery of {} completed run(s) cannot be scored", _0)]
    RunsOutOfRange(#[error(not(source))] u32),

    /// The match is longer than the engine can count in balls.
    #[display("A match of {} overs exceeds the supported maximum", _0)]
    OversOutOfRange(#[error(not(source))] u32),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}
