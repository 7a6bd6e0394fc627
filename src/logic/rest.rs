//! Rest accounting: rounds each roster player has sat out.

use crate::models::{PlayerId, RestCounts, RoundState};
use std::collections::HashSet;

/// Count, per roster player, the rounds in which they were on no court.
///
/// Players in history but not on the roster are ignored. Players added to the
/// roster later accrue rest for every round they missed, so they are picked to
/// play soon.
pub fn calculate_rest_counts(all_players: &[PlayerId], previous_rounds: &[RoundState]) -> RestCounts {
    let mut counts: RestCounts = all_players.iter().map(|p| (p.clone(), 0)).collect();
    for round in previous_rounds {
        let playing: HashSet<&str> = round.player_set();
        for p in all_players {
            if !playing.contains(p.as_str()) {
                if let Some(n) = counts.get_mut(p) {
                    *n += 1;
                }
            }
        }
    }
    counts
}

/// Pick who plays: the `slots` players with the most rest, ties kept in roster order.
///
/// Returns `(playing, resting)`, both in roster order.
pub(crate) fn select_by_rest(
    all_players: &[PlayerId],
    rest_counts: &RestCounts,
    slots: usize,
) -> (Vec<PlayerId>, Vec<PlayerId>) {
    if all_players.len() <= slots {
        return (all_players.to_vec(), Vec::new());
    }
    let mut order: Vec<usize> = (0..all_players.len()).collect();
    // Stable sort keeps roster order among equal rest counts.
    order.sort_by_key(|&i| std::cmp::Reverse(rest_counts.get(&all_players[i]).copied().unwrap_or(0)));
    let mut chosen = vec![false; all_players.len()];
    for &i in order.iter().take(slots) {
        chosen[i] = true;
    }
    let (playing, resting): (Vec<_>, Vec<_>) = all_players
        .iter()
        .zip(chosen)
        .partition(|(_, c)| *c);
    (
        playing.into_iter().map(|(p, _)| p.clone()).collect(),
        resting.into_iter().map(|(p, _)| p.clone()).collect(),
    )
}
