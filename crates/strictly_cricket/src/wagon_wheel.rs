//! Shot distribution for a single batsman.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::action::{ExtraType, ShotZone};
use crate::rules;
use crate::state::{BallEventRecord, MatchState};

/// One ball faced, as plotted on the wagon wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WagonWheelShot {
    /// Zero-based over number.
    pub over_number: u32,
    /// Zero-based ball within the over.
    pub ball_number: u32,
    /// Runs credited to the batsman.
    pub runs: u32,
    /// Fielding region.
    pub zone: Option<ShotZone>,
    /// Angle in degrees.
    pub angle: Option<f32>,
    /// Normalized distance.
    pub distance: Option<f32>,
    /// Whether the shot reached the boundary.
    pub is_boundary: bool,
    /// Whether the shot cleared the boundary.
    pub is_six: bool,
    /// Whether the batsman was out on this ball.
    pub is_wicket: bool,
    /// Bowler name.
    pub bowler_name: String,
    /// Extra attached to the ball.
    pub extra_type: ExtraType,
}

impl WagonWheelShot {
    fn from_record(record: &BallEventRecord) -> Self {
        let runs = rules::batsman_runs(record.extra_type, record.completed_runs);
        let shot = record.shot.unwrap_or_default();
        Self {
            over_number: record.over_number,
            ball_number: record.ball_number,
            runs,
            zone: shot.zone,
            angle: shot.angle,
            distance: shot.distance,
            is_boundary: record.is_boundary,
            is_six: record.is_boundary && runs == 6,
            is_wicket: record.wicket_applied,
            bowler_name: record.bowler_name.clone(),
            extra_type: record.extra_type,
        }
    }
}

/// Aggregate for one fielding region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    /// Region.
    pub zone: ShotZone,
    /// Shots played into it.
    pub shot_count: u32,
    /// Runs scored from those shots.
    pub runs: u32,
    /// Fours and sixes.
    pub boundaries: u32,
    /// Share of all shots, rounded to a whole percent.
    pub percentage: u32,
}

/// Every ball a batsman faced, with totals and a per-zone breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WagonWheel {
    /// Batsman id.
    pub batsman_id: String,
    /// Balls faced, in order.
    pub shots: Vec<WagonWheelShot>,
    /// Number of balls faced.
    pub total_shots: u32,
    /// Runs off the bat.
    pub total_runs: u32,
    /// Fours.
    pub boundaries: u32,
    /// Sixes.
    pub sixes: u32,
    /// Zones ordered by shot count, busiest first.
    pub zone_summary: Vec<ZoneSummary>,
}

impl WagonWheel {
    /// Builds the wagon wheel for `batsman_id` from the ball history.
    ///
    /// Wides are not balls faced and are left out.
    #[instrument(skip(state))]
    pub fn for_batsman(state: &MatchState, batsman_id: &str) -> Self {
        let shots: Vec<WagonWheelShot> = state
            .ball_history
            .iter()
            .filter(|r| r.extra_type != ExtraType::Wide)
            .filter(|r| {
                r.striker_before
                    .as_ref()
                    .is_some_and(|p| p.id() == batsman_id)
            })
            .map(WagonWheelShot::from_record)
            .collect();

        let total_shots = shots.len() as u32;
        let total_runs = shots.iter().fold(0u32, |acc, s| acc.saturating_add(s.runs));
        let boundaries = shots.iter().filter(|s| s.is_boundary && !s.is_six).count() as u32;
        let sixes = shots.iter().filter(|s| s.is_six).count() as u32;

        let mut zones: BTreeMap<ShotZone, ZoneSummary> = BTreeMap::new();
        for shot in &shots {
            let Some(zone) = shot.zone else { continue };
            let entry = zones.entry(zone).or_insert(ZoneSummary {
                zone,
                shot_count: 0,
                runs: 0,
                boundaries: 0,
                percentage: 0,
            });
            entry.shot_count += 1;
            entry.runs = entry.runs.saturating_add(shot.runs);
            if shot.is_boundary {
                entry.boundaries += 1;
            }
        }

        let mut zone_summary: Vec<ZoneSummary> = zones
            .into_values()
            .map(|mut z| {
                z.percentage = percentage(z.shot_count, total_shots);
                z
            })
            .collect();
        zone_summary.sort_by(|a, b| b.shot_count.cmp(&a.shot_count));

        Self {
            batsman_id: batsman_id.to_string(),
            shots,
            total_shots,
            total_runs,
            boundaries,
            sixes,
            zone_summary,
        }
    }
}

fn percentage(count: u32, total: u32) -> u32 {
    if total == 0 {
        0
    } else {
        (f64::from(count) / f64::from(total) * 100.0).round() as u32
    }
}
