//! Over and innings arithmetic.

use tracing::instrument;

/// Legal balls in an over.
pub const BALLS_PER_OVER: u32 = 6;

/// Wickets that end an innings.
pub const MAX_WICKETS: u32 = 10;

/// Longest match whose ball count fits in a `u32`.
pub const MAX_MATCH_OVERS: u32 = u32::MAX / BALLS_PER_OVER;

/// Legal balls available in an innings of `overs` overs.
///
/// Saturates above [`MAX_MATCH_OVERS`]; the engine rejects such matches
/// before any ball is bowled.
pub fn innings_balls(overs: u32) -> u32 {
    overs.saturating_mul(BALLS_PER_OVER)
}

/// Whether a delivery closes an over, given the team's ball count after it.
pub fn completes_over(is_legal: bool, balls: u32) -> bool {
    is_legal && balls % BALLS_PER_OVER == 0
}

/// Formats a legal ball count as `"overs.balls"`.
#[instrument]
pub fn format_overs(balls: u32) -> String {
    format!("{}.{}", balls / BALLS_PER_OVER, balls % BALLS_PER_OVER)
}

/// Runs per hundred balls, 0 before the first ball faced.
pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        0.0
    } else {
        f64::from(runs) / f64::from(balls) * 100.0
    }
}

/// Runs per over, 0 before the first legal ball.
pub fn economy(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        0.0
    } else {
        f64::from(runs) / (f64::from(balls) / f64::from(BALLS_PER_OVER))
    }
}

/// Runs per over needed to score `runs` from `balls` balls.
pub fn required_run_rate(runs: u32, balls: u32) -> f64 {
    economy(runs, balls)
}
