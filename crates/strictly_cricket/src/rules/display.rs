//! Scorer's shorthand for a single delivery.

use crate::action::ExtraType;

/// Returns the over-by-over token for a delivery.
///
/// `"W"` for an applied wicket, `"Wd"`/`"Wd+n"` and `"Nb"`/`"Nb+n"` for
/// wides and no-balls, `"B{n}"`/`"Lb{n}"` for byes and leg-byes,
/// otherwise the runs as a numeral.
///
/// A dismissal cancelled by a free hit is not applied, so its token shows
/// the runs rather than `"W"`.
pub fn display_text(extra: ExtraType, completed_runs: u32, wicket_applied: bool) -> String {
    if wicket_applied {
        return "W".to_string();
    }
    match extra {
        ExtraType::Wide if completed_runs > 0 => format!("Wd+{}", completed_runs),
        ExtraType::Wide => "Wd".to_string(),
        ExtraType::NoBall if completed_runs > 0 => format!("Nb+{}", completed_runs),
        ExtraType::NoBall => "Nb".to_string(),
        ExtraType::Bye => format!("B{}", completed_runs),
        ExtraType::LegBye => format!("Lb{}", completed_runs),
        ExtraType::None => completed_runs.to_string(),
    }
}
