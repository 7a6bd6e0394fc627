//! Wildcard rounds: random reshuffles of a generated round's courts.

use crate::models::{CourtMatch, PlayerId, RoundError, Team, WildcardIntensity};
use log::debug;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use std::collections::HashSet;

/// Reshuffle players across courts and clear every score.
///
/// Players are flattened in court order (team A then team B), permuted according
/// to `intensity`, and sliced back into courts of four: first two team A, next two
/// team B. Partner history is not consulted; repeats are allowed.
///
/// - `Mild`: `total / 4` swaps, each between a random slot on a random court and a
///   random slot on the court below it.
/// - `Medium`: `total / 2` distinct slots are drawn and their players shuffled
///   among those slots; the other half stay put.
/// - `Mayhem`: Fisher-Yates over everyone.
///
/// The result is checked before returning: any player repeated within a court or
/// across courts is an error.
pub fn apply_wildcard_shuffle<R: Rng + ?Sized>(
    courts: &[CourtMatch],
    intensity: WildcardIntensity,
    rng: &mut R,
) -> Result<Vec<CourtMatch>, RoundError> {
    let mut slots: Vec<PlayerId> = courts.iter().flat_map(|c| c.players().cloned()).collect();
    let total = slots.len();

    match intensity {
        WildcardIntensity::Mild => mild(&mut slots, courts.len(), rng),
        WildcardIntensity::Medium => medium(&mut slots, rng),
        WildcardIntensity::Mayhem => slots.shuffle(rng),
    }
    debug!("wildcard {:?} over {} players", intensity, total);

    let shuffled: Vec<CourtMatch> = courts
        .iter()
        .zip(slots.chunks_exact(4))
        .map(|(court, four)| {
            CourtMatch::new(
                court.court_num,
                Team::new(four[0].clone(), four[1].clone()),
                Team::new(four[2].clone(), four[3].clone()),
            )
        })
        .collect();
    ensure_no_duplicates(&shuffled)?;
    Ok(shuffled)
}

/// Swap players between adjacent courts only.
fn mild<R: Rng + ?Sized>(slots: &mut [PlayerId], num_courts: usize, rng: &mut R) {
    let swaps = slots.len() / 4;
    for _ in 0..swaps {
        if num_courts < 2 {
            // No court below: reshuffle the teams within the only court.
            let (i, j) = (rng.gen_range(0..4), rng.gen_range(0..4));
            slots.swap(i, j);
            continue;
        }
        let court = rng.gen_range(0..num_courts - 1);
        let upper = court * 4 + rng.gen_range(0..4);
        let lower = (court + 1) * 4 + rng.gen_range(0..4);
        slots.swap(upper, lower);
    }
}

/// Shuffle the occupants of half of the slots among themselves.
fn medium<R: Rng + ?Sized>(slots: &mut [PlayerId], rng: &mut R) {
    let picks = slots.len() / 2;
    if picks < 2 {
        return;
    }
    let positions = index::sample(rng, slots.len(), picks).into_vec();
    let mut occupants: Vec<PlayerId> = positions.iter().map(|&i| slots[i].clone()).collect();
    occupants.shuffle(rng);
    for (pos, player) in positions.into_iter().zip(occupants) {
        slots[pos] = player;
    }
}

/// Fail on any player repeated within a court or across the round.
fn ensure_no_duplicates(courts: &[CourtMatch]) -> Result<(), RoundError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for court in courts {
        let mut on_court: HashSet<&str> = HashSet::with_capacity(4);
        for p in court.players() {
            if !on_court.insert(p.as_str()) || !seen.insert(p.as_str()) {
                return Err(RoundError::DuplicatePlayer {
                    court_num: court.court_num,
                    player: p.clone(),
                });
            }
        }
    }
    Ok(())
}
