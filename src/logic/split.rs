//! Splitting four players into two teams with the fewest repeated partnerships.

use crate::logic::history::PairHistory;
use crate::models::{PlayerId, Team};

/// The three ways to split four players into two unordered pairs: {01|23}, {02|13}, {03|12}.
const SPLITS: [([usize; 2], [usize; 2]); 3] = [([0, 1], [2, 3]), ([0, 2], [1, 3]), ([0, 3], [1, 2])];

/// Cost of a split: partner repeats first, opponent repeats as tie-break.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) struct SplitScore {
    pub partner: u32,
    pub opponent: u32,
}

impl SplitScore {
    pub const ZERO: SplitScore = SplitScore {
        partner: 0,
        opponent: 0,
    };
}

/// Score every split of `group` and return the cheapest, first one on ties.
///
/// `opponents` is optional; without it only partner repeats count.
pub(crate) fn best_split(
    group: [&PlayerId; 4],
    partners: &PairHistory,
    opponents: Option<&PairHistory>,
) -> (Team, Team, SplitScore) {
    let mut best: Option<(usize, SplitScore)> = None;
    for (idx, (a, b)) in SPLITS.iter().enumerate() {
        let score = split_score(&group, *a, *b, partners, opponents);
        if best.map_or(true, |(_, s)| score < s) {
            best = Some((idx, score));
        }
    }
    let (idx, score) = best.unwrap_or((0, SplitScore::ZERO));
    let (a, b) = SPLITS[idx];
    (
        Team::new(group[a[0]].clone(), group[a[1]].clone()),
        Team::new(group[b[0]].clone(), group[b[1]].clone()),
        score,
    )
}

/// Visit every split of `group` in enumeration order with its partner score.
pub(crate) fn for_each_split(
    group: [&PlayerId; 4],
    partners: &PairHistory,
    mut visit: impl FnMut(usize, u32) -> bool,
) {
    for (idx, (a, b)) in SPLITS.iter().enumerate() {
        let score = partners.count(group[a[0]], group[a[1]]) + partners.count(group[b[0]], group[b[1]]);
        if !visit(idx, score) {
            return;
        }
    }
}

/// Teams for split number `idx` of `group`.
pub(crate) fn split_teams(group: [&PlayerId; 4], idx: usize) -> (Team, Team) {
    let (a, b) = SPLITS[idx % SPLITS.len()];
    (
        Team::new(group[a[0]].clone(), group[a[1]].clone()),
        Team::new(group[b[0]].clone(), group[b[1]].clone()),
    )
}

fn split_score(
    group: &[&PlayerId; 4],
    a: [usize; 2],
    b: [usize; 2],
    partners: &PairHistory,
    opponents: Option<&PairHistory>,
) -> SplitScore {
    let partner = partners.count(group[a[0]], group[a[1]]) + partners.count(group[b[0]], group[b[1]]);
    let opponent = opponents.map_or(0, |o| {
        a.iter()
            .flat_map(|&x| b.iter().map(move |&y| (x, y)))
            .map(|(x, y)| o.count(group[x], group[y]))
            .sum()
    });
    SplitScore { partner, opponent }
}
