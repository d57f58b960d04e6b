//! Run crediting and legality for a single delivery.

use crate::action::{DismissalType, ExtraType};

/// A delivery is legal unless it is a wide or a no-ball.
pub fn is_legal(extra: ExtraType) -> bool {
    !matches!(extra, ExtraType::Wide | ExtraType::NoBall)
}

/// Runs added automatically by the extra itself.
pub fn automatic_runs(extra: ExtraType) -> u32 {
    if is_legal(extra) { 0 } else { 1 }
}

/// Completed plus automatic runs, or `None` if the sum does not fit.
pub fn delivery_runs(extra: ExtraType, completed_runs: u32) -> Option<u32> {
    completed_runs.checked_add(automatic_runs(extra))
}

/// Odd completed runs put the other batsman on strike.
///
/// Only runs physically completed count; the automatic extra never
/// rotates strike.
pub fn rotates_strike(completed_runs: u32) -> bool {
    completed_runs % 2 == 1
}

/// Runs credited to the striker. Byes and leg-byes go to the team only.
pub fn batsman_runs(extra: ExtraType, completed_runs: u32) -> u32 {
    match extra {
        ExtraType::Bye | ExtraType::LegBye => 0,
        _ => completed_runs,
    }
}

/// Runs charged to the bowler. Byes and leg-byes are not the bowler's fault.
pub fn bowler_runs(extra: ExtraType, total_runs: u32) -> u32 {
    match extra {
        ExtraType::Bye | ExtraType::LegBye => 0,
        _ => total_runs,
    }
}

/// On a free hit only a run-out dismisses the batsman.
pub fn suppressed_by_free_hit(kind: DismissalType, is_free_hit: bool) -> bool {
    is_free_hit && kind != DismissalType::RunOut
}
