//! Strictly Scorebook - offline replay of cricket op logs
//!
//! Loads a match configuration (TOML) and an op log (JSON array of
//! operations), replays the log through the scoring engine and renders
//! the result as a text scorecard.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod oplog;
mod scorecard;

// Crate-level exports - Configuration
pub use config::{ConfigError, MatchConfig};

// Crate-level exports - Op log
pub use oplog::{OpLogError, ReplayedMatch, load_ops};

// Crate-level exports - Rendering
pub use scorecard::{
    Scorecard, WagonWheelTable, describe_result, render_scorecard, render_wagon_wheel,
};
