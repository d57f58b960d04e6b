//! Scoring rules for cricket.
//!
//! This module contains pure functions for evaluating a delivery
//! according to the laws of the game. Rules are kept apart from state
//! storage so the engine and the contracts can share them.

pub mod delivery;
pub mod display;
pub mod over;

pub use delivery::{
    automatic_runs, batsman_runs, bowler_runs, delivery_runs, is_legal, rotates_strike,
    suppressed_by_free_hit,
};
pub use display::display_text;
pub use over::{
    BALLS_PER_OVER, MAX_MATCH_OVERS, MAX_WICKETS, completes_over, economy, format_overs,
    innings_balls, required_run_rate, strike_rate,
};
