//! Plain-text rendering of match state.

use std::fmt;

use strictly_cricket::contracts::at_crease;
use strictly_cricket::{
    BatsmanStats, ChaseInfo, DismissalType, Innings, MatchResult, MatchState, PlayerInfo,
    WagonWheel,
};
use tracing::instrument;

use crate::config::MatchConfig;

/// Both innings, then the chase and result.
#[derive(Debug, Clone, Copy)]
pub struct Scorecard<'a> {
    config: &'a MatchConfig,
    state: &'a MatchState,
}

impl<'a> Scorecard<'a> {
    /// Scorecard for `state` under `config`.
    pub fn new(config: &'a MatchConfig, state: &'a MatchState) -> Self {
        Self { config, state }
    }

    fn write_innings(&self, f: &mut fmt::Formatter<'_>, innings: Innings) -> fmt::Result {
        let state = self.state;
        let batting = state.side_batting_in(innings);
        let bowling = batting.opponent();
        let score = state.score(batting);
        let live = innings == state.current_innings && !state.is_match_complete;

        writeln!(
            f,
            "{} innings: {} {}/{} ({} ov)",
            ordinal(innings),
            self.config.team_name(batting),
            score.runs,
            score.wickets,
            score.overs()
        )?;

        for b in state.batting_card(batting) {
            let player = PlayerInfo::new(b.id.clone(), b.name.clone());
            let status = dismissal(b, live && at_crease(state, &player));
            writeln!(
                f,
                "  {:<20} {:<24} {:>3} ({:>3}) 4s:{} 6s:{} SR:{:.2}",
                b.name, status, b.runs, b.balls, b.fours, b.sixes, b.strike_rate
            )?;
        }

        let extras = &score.extras;
        writeln!(
            f,
            "  Extras {} (w {}, nb {}, b {}, lb {})",
            extras.total(),
            extras.wides,
            extras.no_balls,
            extras.byes,
            extras.leg_byes
        )?;

        let fow: Vec<String> = state
            .fall_of_wickets
            .iter()
            .filter(|w| w.innings_number == innings.number())
            .map(|w| format!("{}-{} ({}, {} ov)", w.wicket_number, w.score, w.batsman_name, w.overs))
            .collect();
        if !fow.is_empty() {
            writeln!(f, "  FoW: {}", fow.join(", "))?;
        }

        for bw in state.bowling_card(bowling) {
            writeln!(
                f,
                "  {:<20} {:>5}-{}-{}-{} Econ:{:.2} (wd {}, nb {})",
                bw.name, bw.overs, bw.maidens, bw.runs, bw.wickets, bw.economy, bw.wides, bw.no_balls
            )?;
        }

        if live && !state.current_over.is_empty() {
            writeln!(f, "  This over: {}", state.current_over.join(" "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Scorecard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_innings(f, Innings::First)?;
        if self.state.current_innings == Innings::Second {
            self.write_innings(f, Innings::Second)?;
        }

        if let Some(chase) = ChaseInfo::from_state(self.state)
            && !self.state.is_match_complete
        {
            writeln!(f, "{}", chase)?;
        }
        if let Some(result) = self.state.result {
            writeln!(f, "Result: {}", describe_result(self.config, &result))?;
        }
        Ok(())
    }
}

/// Renders the full scorecard: both innings, then the chase and result.
#[instrument(skip_all)]
pub fn render_scorecard(config: &MatchConfig, state: &MatchState) -> String {
    Scorecard::new(config, state).to_string()
}

/// Dismissal column: run-outs name the fielder, other dismissals the bowler.
fn dismissal(b: &BatsmanStats, batting_now: bool) -> String {
    match (b.dismissal_type, batting_now) {
        (Some(DismissalType::RunOut), _) => match &b.fielder {
            Some(fielder) => format!("run out ({})", fielder),
            None => "run out".to_string(),
        },
        (Some(kind), _) => format!("{} b {}", kind, b.bowler.as_deref().unwrap_or("-")),
        (None, true) => "not out*".to_string(),
        (None, false) => "not out".to_string(),
    }
}

fn ordinal(innings: Innings) -> &'static str {
    match innings {
        Innings::First => "First",
        Innings::Second => "Second",
    }
}

/// Result line using the configured team names.
pub fn describe_result(config: &MatchConfig, result: &MatchResult) -> String {
    match result {
        MatchResult::Won { winner, margin } => {
            format!("{} won by {}", config.team_name(*winner), margin)
        }
        MatchResult::Tied => result.to_string(),
    }
}

/// A batsman's wagon wheel as a zone table.
#[derive(Debug, Clone, Copy)]
pub struct WagonWheelTable<'a>(pub &'a WagonWheel);

impl fmt::Display for WagonWheelTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wheel = self.0;
        writeln!(
            f,
            "{}: {} runs off {} balls (4s: {}, 6s: {})",
            wheel.batsman_id, wheel.total_runs, wheel.total_shots, wheel.boundaries, wheel.sixes
        )?;
        for zone in &wheel.zone_summary {
            writeln!(
                f,
                "  {:<12} {:>3} shots {:>4} runs {:>3} boundaries {:>3}%",
                zone.zone, zone.shot_count, zone.runs, zone.boundaries, zone.percentage
            )?;
        }
        Ok(())
    }
}

/// Renders a batsman's wagon wheel as a zone table.
#[instrument(skip_all, fields(batsman = %wheel.batsman_id))]
pub fn render_wagon_wheel(wheel: &WagonWheel) -> String {
    WagonWheelTable(wheel).to_string()
}
