//! Strictly Cricket - ball-by-ball scoring engine
//!
//! A pure state-transition engine for limited-overs cricket. Each call to
//! [`process_ball`] takes the current [`MatchState`] and one [`BallInput`]
//! and returns the next state, leaving the input untouched.
//!
//! # Architecture
//!
//! - **Rules**: Pure functions for legality, run crediting and over arithmetic
//! - **Contracts**: Preconditions checked before a ball, postconditions after
//! - **Invariants**: Properties of a valid state, checked in debug builds
//! - **Replay**: Op-log folding with undo
//! - **Views**: Chase summary and wagon wheel derived from history
//!
//! # Example
//!
//! ```
//! use strictly_cricket::{BallInput, PlayerInfo, initial_match_state, process_ball};
//!
//! # fn example() -> Result<(), strictly_cricket::ScoringError> {
//! let mut state = initial_match_state(20, true);
//! state.select_striker(PlayerInfo::new("b1", "Batsman 1"));
//! state.select_non_striker(PlayerInfo::new("b2", "Batsman 2"));
//! state.select_bowler(PlayerInfo::new("bw1", "Bowler 1"));
//!
//! let state = process_ball(&state, &BallInput::runs(1))?;
//! assert_eq!(state.team1_score.runs, 1);
//! assert_eq!(state.strike_batsman, Some(PlayerInfo::new("b2", "Batsman 2")));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod chase;
mod engine;
mod phases;
mod replay;
mod state;
mod types;
mod wagon_wheel;

pub mod contracts;
pub mod invariants;
pub mod rules;

// Crate-level exports - Engine
pub use engine::{process_ball, process_balls};

// Crate-level exports - State
pub use state::{BallEventRecord, MatchState, initial_match_state};

// Crate-level exports - Ball input and errors
pub use action::{
    BallInput, CreaseEnd, DismissalType, DismissedBatsman, ExtraType, ScoringError,
    ShotPlacement, ShotZone, Slot, WicketEvent,
};

// Crate-level exports - Domain types
pub use types::{
    BatsmanStats, BowlerStats, Extras, FallOfWicket, Innings, Partnership, PlayerInfo,
    TeamScore, TeamSide,
};

// Crate-level exports - Match phase
pub use phases::{Margin, MatchPhase, MatchResult};

// Crate-level exports - Replay
pub use replay::{MatchOp, ReplayError, Scorebook, apply_op, replay, surviving_ops};

// Crate-level exports - Derived views
pub use chase::ChaseInfo;
pub use wagon_wheel::{WagonWheel, WagonWheelShot, ZoneSummary};
