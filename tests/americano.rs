//! Integration tests for Americano round generation.

use padel_rounds_web::{
    build_partner_history, calculate_rest_counts, form_fixed_teams,
    generate_americano_individual_pairings, next_americano_round, AmericanoPairingOptions,
    AmericanoVariant, PairHistory, PlayerId, RestCounts, RoundError, RoundState, Team,
};
use std::collections::HashSet;

fn roster(n: usize) -> Vec<PlayerId> {
    (0..n).map(|i| format!("p{i}")).collect()
}

fn run_rounds(
    players: &[PlayerId],
    num_courts: u32,
    rounds: u32,
    options: &AmericanoPairingOptions,
) -> Vec<RoundState> {
    let mut history: Vec<RoundState> = Vec::new();
    for round_num in 1..=rounds {
        let round = next_americano_round(round_num, num_courts, players, &history, options).unwrap();
        history.push(round);
    }
    history
}

fn resting(players: &[PlayerId], round: &RoundState) -> Vec<PlayerId> {
    let playing = round.player_set();
    players
        .iter()
        .filter(|p| !playing.contains(p.as_str()))
        .cloned()
        .collect()
}

#[test]
fn first_round_takes_roster_order() {
    let players = roster(8);
    let courts =
        generate_americano_individual_pairings(&players, 2, &PairHistory::new(), &RestCounts::new())
            .unwrap();
    assert_eq!(courts.len(), 2);
    assert_eq!(courts[0].court_num, 1);
    assert_eq!(courts[0].team_a, Team::new("p0", "p1"));
    assert_eq!(courts[0].team_b, Team::new("p2", "p3"));
    assert_eq!(courts[1].team_a, Team::new("p4", "p5"));
    assert_eq!(courts[1].team_b, Team::new("p6", "p7"));
    assert!(courts.iter().all(|c| c.score_a.is_none() && c.score_b.is_none()));
}

#[test]
fn previous_partners_are_split() {
    let players = roster(8);
    let first = run_rounds(&players, 2, 1, &AmericanoPairingOptions::default());
    let partners = build_partner_history(&first);
    let rest = calculate_rest_counts(&players, &first);
    let courts = generate_americano_individual_pairings(&players, 2, &partners, &rest).unwrap();
    for c in &courts {
        for team in [&c.team_a, &c.team_b] {
            assert_eq!(partners.count(team.first(), team.second()), 0);
        }
    }
}

#[test]
fn most_rested_players_play_first() {
    let players = roster(9);
    let mut rest = RestCounts::new();
    rest.insert("p8".to_string(), 2);
    rest.insert("p3".to_string(), 1);
    let courts = generate_americano_individual_pairings(&players, 2, &PairHistory::new(), &rest).unwrap();
    let playing: HashSet<&str> = courts.iter().flat_map(|c| c.players()).map(String::as_str).collect();
    assert!(playing.contains("p8"));
    assert!(playing.contains("p3"));
    // Ties among zero-rest players keep roster order, so the last of them sits out.
    assert!(!playing.contains("p7"));
}

#[test]
fn all_28_pairs_partner_exactly_once_over_7_rounds() {
    let players = roster(8);
    let rounds = run_rounds(&players, 2, 7, &AmericanoPairingOptions::default());
    let pairs = build_partner_history(&rounds).pair_counts();
    assert_eq!(pairs.len(), 28);
    assert!(pairs.values().all(|&n| n == 1), "{pairs:?}");
}

#[test]
fn nine_players_each_rest_once_over_nine_rounds() {
    let players = roster(9);
    let rounds = run_rounds(&players, 2, 9, &AmericanoPairingOptions::default());
    for round in &rounds {
        round.validate().unwrap();
        assert_eq!(round.players().count(), 8);
        assert_eq!(resting(&players, round).len(), 1);
    }
    let rest = calculate_rest_counts(&players, &rounds);
    assert!(rest.values().all(|&n| n == 1), "{rest:?}");
}

#[test]
fn nobody_rests_twice_in_a_row() {
    let players = roster(11);
    let rounds = run_rounds(&players, 2, 12, &AmericanoPairingOptions::default());
    for pair in rounds.windows(2) {
        let before: HashSet<PlayerId> = resting(&players, &pair[0]).into_iter().collect();
        let after: HashSet<PlayerId> = resting(&players, &pair[1]).into_iter().collect();
        assert!(before.is_disjoint(&after));
    }
}

#[test]
fn round_index_becomes_round_number() {
    let players = roster(8);
    let round = next_americano_round(4, 2, &players, &[], &AmericanoPairingOptions::default()).unwrap();
    assert_eq!(round.round_num, 4);
}

#[test]
fn zero_window_ignores_history() {
    let players = roster(8);
    let options = AmericanoPairingOptions {
        anti_repeat_window: Some(0),
        ..AmericanoPairingOptions::default()
    };
    let rounds = run_rounds(&players, 2, 2, &options);
    assert_eq!(rounds[0].courts, rounds[1].courts);
}

#[test]
fn rotation_without_rest_balancing() {
    let players = roster(9);
    let options = AmericanoPairingOptions {
        rest_balancing: false,
        ..AmericanoPairingOptions::default()
    };
    let rounds = run_rounds(&players, 2, 3, &options);
    assert_eq!(resting(&players, &rounds[0]), vec!["p8".to_string()]);
    assert_eq!(resting(&players, &rounds[1]), vec!["p0".to_string()]);
    assert_eq!(resting(&players, &rounds[2]), vec!["p1".to_string()]);
}

#[test]
fn too_few_players_is_an_error() {
    let players = roster(7);
    let err = next_americano_round(1, 2, &players, &[], &AmericanoPairingOptions::default()).unwrap_err();
    assert_eq!(
        err,
        RoundError::InsufficientPlayers {
            needed: 8,
            available: 7
        }
    );
}

#[test]
fn zero_courts_is_an_error() {
    let players = roster(8);
    let err = generate_americano_individual_pairings(&players, 0, &PairHistory::new(), &RestCounts::new())
        .unwrap_err();
    assert_eq!(err, RoundError::InvalidCourtCount);
}

#[test]
fn duplicate_roster_entry_is_an_error() {
    let mut players = roster(8);
    players[5] = "p1".to_string();
    let err = next_americano_round(1, 2, &players, &[], &AmericanoPairingOptions::default()).unwrap_err();
    assert_eq!(err, RoundError::DuplicateRosterEntry("p1".to_string()));
}

fn team_options() -> AmericanoPairingOptions {
    AmericanoPairingOptions {
        variant: AmericanoVariant::Team,
        ..AmericanoPairingOptions::default()
    }
}

#[test]
fn fixed_teams_come_from_consecutive_pairs() {
    let teams = form_fixed_teams(&roster(6)).unwrap();
    assert_eq!(
        teams,
        vec![Team::new("p0", "p1"), Team::new("p2", "p3"), Team::new("p4", "p5")]
    );
    assert_eq!(
        form_fixed_teams(&roster(5)).unwrap_err(),
        RoundError::OddTeamRoster { players: 5 }
    );
}

#[test]
fn team_variant_meets_every_other_team_once() {
    let players = roster(8);
    let teams = form_fixed_teams(&players).unwrap();
    let rounds = run_rounds(&players, 2, 3, &team_options());

    let mut meetings = HashSet::new();
    for round in &rounds {
        for c in &round.courts {
            assert!(teams.contains(&c.team_a));
            assert!(teams.contains(&c.team_b));
            let (a, b) = (c.team_a.first().clone(), c.team_b.first().clone());
            assert!(meetings.insert(if a < b { (a, b) } else { (b, a) }));
        }
    }
    assert_eq!(meetings.len(), 6);
}

#[test]
fn team_variant_rotates_resting_teams() {
    let players = roster(10);
    let rounds = run_rounds(&players, 2, 5, &team_options());
    let rest = calculate_rest_counts(&players, &rounds);
    assert!(rest.values().all(|&n| n == 1), "{rest:?}");
    for round in &rounds {
        let out = resting(&players, round);
        assert_eq!(out.len(), 2);
        // Partners rest together.
        assert!(form_fixed_teams(&players)
            .unwrap()
            .contains(&Team::new(out[0].clone(), out[1].clone())));
    }
}

#[test]
fn team_variant_needs_an_even_roster() {
    let players = roster(9);
    let err = next_americano_round(1, 2, &players, &[], &team_options()).unwrap_err();
    assert_eq!(err, RoundError::OddTeamRoster { players: 9 });
}
