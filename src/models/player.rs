//! Player identifiers and per-player derived counts.

use std::collections::HashMap;

/// Opaque unique token for a player (used in courts, histories and rosters).
pub type PlayerId = String;

/// Rounds sat out per roster player.
pub type RestCounts = HashMap<PlayerId, u32>;

/// Check that a roster lists every player at most once.
pub(crate) fn ensure_unique_roster(
    roster: &[PlayerId],
) -> Result<(), crate::models::RoundError> {
    let mut seen = std::collections::HashSet::with_capacity(roster.len());
    for p in roster {
        if !seen.insert(p.as_str()) {
            return Err(crate::models::RoundError::DuplicateRosterEntry(p.clone()));
        }
    }
    Ok(())
}
