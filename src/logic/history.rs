//! Partner and opponent history derived from completed rounds.

use crate::models::{PlayerId, RoundState};
use std::collections::{BTreeMap, HashMap};

/// Symmetric pair counts: `count(a, b) == count(b, a)`.
///
/// Used both for partnerships (same team) and for opponents (across the net).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PairHistory {
    counts: HashMap<PlayerId, HashMap<PlayerId, u32>>,
}

impl PairHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `a` and `b` have been paired.
    pub fn count(&self, a: &str, b: &str) -> u32 {
        self.counts
            .get(a)
            .and_then(|m| m.get(b))
            .copied()
            .unwrap_or(0)
    }

    pub fn record(&mut self, a: &str, b: &str) {
        *self
            .counts
            .entry(a.to_string())
            .or_default()
            .entry(b.to_string())
            .or_insert(0) += 1;
        *self
            .counts
            .entry(b.to_string())
            .or_default()
            .entry(a.to_string())
            .or_insert(0) += 1;
    }

    /// Each unordered pair once, keyed `(smaller, larger)`.
    pub fn pair_counts(&self) -> BTreeMap<(PlayerId, PlayerId), u32> {
        self.counts
            .iter()
            .flat_map(|(a, others)| {
                others
                    .iter()
                    .filter(move |(b, _)| a < *b)
                    .map(move |(b, n)| ((a.clone(), b.clone()), *n))
            })
            .collect()
    }

    /// Highest count over all pairs (0 when empty).
    pub fn max_count(&self) -> u32 {
        self.counts
            .values()
            .flat_map(|m| m.values())
            .copied()
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Count how often each pair of players shared a team.
pub fn build_partner_history(previous_rounds: &[RoundState]) -> PairHistory {
    let mut history = PairHistory::new();
    for court in previous_rounds.iter().flat_map(|r| r.courts.iter()) {
        for team in [&court.team_a, &court.team_b] {
            // A player listed twice is not a partnership.
            if team.first() != team.second() {
                history.record(team.first(), team.second());
            }
        }
    }
    history
}

/// Count how often each pair of players faced each other across the net.
pub fn build_opponent_history(previous_rounds: &[RoundState]) -> PairHistory {
    let mut history = PairHistory::new();
    for court in previous_rounds.iter().flat_map(|r| r.courts.iter()) {
        for a in court.team_a.players() {
            for b in court.team_b.players() {
                history.record(a, b);
            }
        }
    }
    history
}

/// The last `window` rounds (all of them if fewer).
pub fn recent_rounds(rounds: &[RoundState], window: usize) -> &[RoundState] {
    &rounds[rounds.len().saturating_sub(window)..]
}
