//! Integration tests for wildcard shuffles.

use padel_rounds_web::{apply_wildcard_shuffle, CourtMatch, RoundError, Team, WildcardIntensity};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

const INTENSITIES: [WildcardIntensity; 3] = [
    WildcardIntensity::Mild,
    WildcardIntensity::Medium,
    WildcardIntensity::Mayhem,
];

fn scored_courts(num_courts: usize) -> Vec<CourtMatch> {
    (0..num_courts)
        .map(|i| {
            let p = |k: usize| format!("p{}", i * 4 + k);
            CourtMatch::new(i as u32 + 1, Team::new(p(0), p(1)), Team::new(p(2), p(3))).with_score(21, 10)
        })
        .collect()
}

fn flat(courts: &[CourtMatch]) -> Vec<String> {
    courts.iter().flat_map(|c| c.players().cloned()).collect()
}

fn assert_valid(before: &[CourtMatch], after: &[CourtMatch]) {
    assert_eq!(before.len(), after.len());
    let mut everyone = HashSet::new();
    for (old, new) in before.iter().zip(after) {
        assert_eq!(old.court_num, new.court_num);
        assert!(!new.is_scored());
        let on_court: HashSet<&String> = new.players().collect();
        assert_eq!(on_court.len(), 4);
        for p in new.players() {
            assert!(everyone.insert(p.clone()), "{p} appears twice");
        }
    }
    let original: HashSet<String> = flat(before).into_iter().collect();
    assert_eq!(everyone, original);
}

#[test]
fn a_thousand_seeds_never_duplicate_a_player() {
    let courts = scored_courts(4);
    for intensity in INTENSITIES {
        for seed in 0..1000u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let shuffled = apply_wildcard_shuffle(&courts, intensity, &mut rng).unwrap();
            assert_valid(&courts, &shuffled);
        }
    }
}

#[test]
fn same_seed_gives_same_shuffle() {
    let courts = scored_courts(3);
    for intensity in INTENSITIES {
        let a = apply_wildcard_shuffle(&courts, intensity, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = apply_wildcard_shuffle(&courts, intensity, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn medium_leaves_half_the_slots_alone() {
    let courts = scored_courts(4);
    let before = flat(&courts);
    for seed in 0..200u64 {
        let shuffled =
            apply_wildcard_shuffle(&courts, WildcardIntensity::Medium, &mut StdRng::seed_from_u64(seed))
                .unwrap();
        let after = flat(&shuffled);
        let unchanged = before.iter().zip(&after).filter(|(a, b)| a == b).count();
        assert!(unchanged >= before.len() / 2, "seed {seed}: only {unchanged} unchanged");
    }
}

#[test]
fn mild_with_one_swap_stays_between_neighbours() {
    // 4 players -> one swap, within the only court.
    let courts = scored_courts(1);
    for seed in 0..50u64 {
        let shuffled =
            apply_wildcard_shuffle(&courts, WildcardIntensity::Mild, &mut StdRng::seed_from_u64(seed))
                .unwrap();
        assert_valid(&courts, &shuffled);
    }

    // 8 players -> two swaps between court 1 and court 2: at most 2 players cross each way.
    let courts = scored_courts(2);
    let top: HashSet<String> = courts[0].players().cloned().collect();
    for seed in 0..200u64 {
        let shuffled =
            apply_wildcard_shuffle(&courts, WildcardIntensity::Mild, &mut StdRng::seed_from_u64(seed))
                .unwrap();
        let moved_down = shuffled[1].players().filter(|p| top.contains(*p)).count();
        assert!(moved_down <= 2, "seed {seed}: {moved_down} players left court 1");
    }
}

#[test]
fn duplicate_input_is_reported() {
    let mut courts = scored_courts(2);
    courts[1].team_a = Team::new("p0", "p5");
    let err = apply_wildcard_shuffle(&courts, WildcardIntensity::Mayhem, &mut StdRng::seed_from_u64(1))
        .unwrap_err();
    assert!(matches!(
        err,
        RoundError::DuplicatePlayer { ref player, .. } if player == "p0"
    ));
}

proptest! {
    #[test]
    fn shuffle_is_safe_for_any_court_count(
        num_courts in 1usize..=6,
        seed in any::<u64>(),
        which in 0usize..3,
    ) {
        let courts = scored_courts(num_courts);
        let mut rng = StdRng::seed_from_u64(seed);
        let shuffled = apply_wildcard_shuffle(&courts, INTENSITIES[which], &mut rng).unwrap();
        prop_assert_eq!(shuffled.len(), num_courts);
        prop_assert!(shuffled.iter().all(|c| !c.is_scored()));
        let everyone: HashSet<String> = flat(&shuffled).into_iter().collect();
        prop_assert_eq!(everyone.len(), num_courts * 4);
    }
}
