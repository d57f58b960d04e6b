//! Operation log and replay.
//!
//! The scorer's actions are stored as an ordered log. State is never
//! persisted on its own: it is rebuilt by folding the surviving
//! operations through the engine, which makes undo a truncation.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::action::{BallInput, ScoringError};
use crate::engine::process_ball;
use crate::state::MatchState;
use crate::types::{PlayerInfo, TeamSide};

/// One entry in a match's operation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchOp {
    /// Registers a batsman with a side.
    AddBatsman {
        /// Team the player bats for.
        side: TeamSide,
        /// The player.
        player: PlayerInfo,
    },
    /// Registers a bowler with a side.
    AddBowler {
        /// Team the player bowls for.
        side: TeamSide,
        /// The player.
        player: PlayerInfo,
    },
    /// Fills the striker slot.
    SelectStriker {
        /// Incoming striker.
        player: PlayerInfo,
    },
    /// Fills the non-striker slot.
    SelectNonStriker {
        /// Incoming non-striker.
        player: PlayerInfo,
    },
    /// Fills the bowler slot.
    SelectBowler {
        /// Bowler of the next over.
        player: PlayerInfo,
    },
    /// Bowls a ball.
    DeliverBall {
        /// What happened.
        ball: BallInput,
    },
    /// Removes the most recent operation that has not been undone.
    Undo,
}

/// Error raised while replaying an operation log.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Operation {} rejected: {}", index, source)]
pub struct ReplayError {
    /// Position of the failing operation in the log.
    pub index: usize,
    /// Why it was rejected.
    pub source: ScoringError,
}

/// Operations that survive undo, with their positions in `ops`.
///
/// Each `Undo` pops the latest surviving operation; an `Undo` with
/// nothing left to remove is ignored.
#[instrument(skip(ops), fields(count = ops.len()))]
pub fn surviving_ops(ops: &[MatchOp]) -> Vec<(usize, &MatchOp)> {
    let mut valid = Vec::with_capacity(ops.len());
    for (index, op) in ops.iter().enumerate() {
        match op {
            MatchOp::Undo => {
                if valid.pop().is_none() {
                    debug!(index, "Undo with empty log ignored");
                }
            }
            _ => valid.push((index, op)),
        }
    }
    valid
}

/// Applies a single operation to `state`, returning the new state.
///
/// `Undo` cannot be applied to a state in isolation; it is resolved by
/// [`surviving_ops`] and is a no-op here.
pub fn apply_op(state: &MatchState, op: &MatchOp) -> Result<MatchState, ScoringError> {
    let mut next = state.clone();
    match op {
        MatchOp::AddBatsman { side, player } => next.add_batsman(*side, player),
        MatchOp::AddBowler { side, player } => next.add_bowler(*side, player),
        MatchOp::SelectStriker { player } => next.select_striker(player.clone()),
        MatchOp::SelectNonStriker { player } => next.select_non_striker(player.clone()),
        MatchOp::SelectBowler { player } => next.select_bowler(player.clone()),
        MatchOp::DeliverBall { ball } => return process_ball(state, ball),
        MatchOp::Undo => {}
    }
    Ok(next)
}

/// Rebuilds match state from an operation log.
///
/// # Errors
///
/// Returns the first operation the engine rejects, with its index in `ops`.
#[instrument(skip(ops), fields(count = ops.len()))]
pub fn replay(
    match_overs: u32,
    team1_batting_first: bool,
    ops: &[MatchOp],
) -> Result<MatchState, ReplayError> {
    let initial = MatchState::new(match_overs, team1_batting_first);
    surviving_ops(ops)
        .into_iter()
        .try_fold(initial, |state, (index, op)| {
            apply_op(&state, op).map_err(|source| {
                warn!(index, error = %source, "Replay stopped");
                ReplayError { index, source }
            })
        })
}

/// A match's operation log together with its current state.
///
/// This is the single writer for one match: every accepted operation is
/// appended to the log and reflected in the state.
#[derive(Debug, Clone)]
pub struct Scorebook {
    match_overs: u32,
    team1_batting_first: bool,
    ops: Vec<MatchOp>,
    state: MatchState,
}

impl Scorebook {
    /// Opens an empty scorebook.
    #[instrument]
    pub fn new(match_overs: u32, team1_batting_first: bool) -> Self {
        Self {
            match_overs,
            team1_batting_first,
            ops: Vec::new(),
            state: MatchState::new(match_overs, team1_batting_first),
        }
    }

    /// Opens a scorebook from a stored log.
    ///
    /// # Errors
    ///
    /// Fails if the log does not replay cleanly.
    #[instrument(skip(ops), fields(count = ops.len()))]
    pub fn from_ops(
        match_overs: u32,
        team1_batting_first: bool,
        ops: Vec<MatchOp>,
    ) -> Result<Self, ReplayError> {
        let state = replay(match_overs, team1_batting_first, &ops)?;
        Ok(Self {
            match_overs,
            team1_batting_first,
            ops,
            state,
        })
    }

    /// Current state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Full log, undo entries included.
    pub fn ops(&self) -> &[MatchOp] {
        &self.ops
    }

    /// Records an operation.
    ///
    /// Rejected operations are not logged and leave the state unchanged.
    #[instrument(skip(self, op))]
    pub fn record(&mut self, op: MatchOp) -> Result<&MatchState, ReplayError> {
        if op == MatchOp::Undo {
            return self.undo();
        }
        let index = self.ops.len();
        self.state = apply_op(&self.state, &op).map_err(|source| ReplayError { index, source })?;
        self.ops.push(op);
        Ok(&self.state)
    }

    /// Undoes the most recent surviving operation.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<&MatchState, ReplayError> {
        self.ops.push(MatchOp::Undo);
        match replay(self.match_overs, self.team1_batting_first, &self.ops) {
            Ok(state) => {
                self.state = state;
                Ok(&self.state)
            }
            Err(e) => {
                self.ops.pop();
                Err(e)
            }
        }
    }
}
