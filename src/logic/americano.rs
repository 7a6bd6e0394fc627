//! Americano: rotating partners with rest rotation, plus the fixed-team variant.

use crate::logic::history::{build_opponent_history, build_partner_history, recent_rounds, PairHistory};
use crate::logic::rest::{calculate_rest_counts, select_by_rest};
use crate::logic::split::{for_each_split, split_teams};
use crate::models::{
    ensure_unique_roster, AmericanoPairingOptions, AmericanoVariant, CourtMatch, PlayerId,
    RestCounts, RoundError, RoundState, Team,
};
use log::debug;

/// Assign players to courts for one Americano round.
///
/// 1. `num_courts * 4` players play; with more on the roster, those with the most
///    rest play (ties in roster order) and the rest sit out.
/// 2. Courts are filled in order. For each court every 4-player combination of the
///    players still available is tried with all three team splits; the split with
///    the fewest previous partnerships wins, the first one found on ties.
///
/// Greedy per court, so an early court can block a better overall arrangement.
pub fn generate_americano_individual_pairings(
    all_players: &[PlayerId],
    num_courts: u32,
    partner_history: &PairHistory,
    rest_counts: &RestCounts,
) -> Result<Vec<CourtMatch>, RoundError> {
    let slots = check_roster(all_players, num_courts, 4)?;
    let (playing, resting) = select_by_rest(all_players, rest_counts, slots);
    if !resting.is_empty() {
        debug!("americano: resting {:?}", resting);
    }
    pair_individuals(&playing, num_courts, partner_history)
}

fn pair_individuals(
    playing: &[PlayerId],
    num_courts: u32,
    partner_history: &PairHistory,
) -> Result<Vec<CourtMatch>, RoundError> {
    let mut used = vec![false; playing.len()];
    let mut courts = Vec::with_capacity(num_courts as usize);

    for court_num in 1..=num_courts {
        let available: Vec<usize> = (0..playing.len()).filter(|&i| !used[i]).collect();
        if available.len() < 4 {
            return Err(RoundError::NotEnoughForCourt {
                court_num,
                available: available.len(),
            });
        }

        // (combination, split index, score)
        let mut best: Option<([usize; 4], usize, u32)> = None;
        'search: for (w, &i) in available.iter().enumerate() {
            for (x, &j) in available.iter().enumerate().skip(w + 1) {
                for (y, &k) in available.iter().enumerate().skip(x + 1) {
                    for &l in available.iter().skip(y + 1) {
                        let quad = [i, j, k, l];
                        let group = quad.map(|q| &playing[q]);
                        for_each_split(group, partner_history, |split, score| {
                            if best.map_or(true, |(_, _, s)| score < s) {
                                best = Some((quad, split, score));
                            }
                            score > 0
                        });
                        // Nothing can beat a fresh split; later candidates would only tie.
                        if matches!(best, Some((_, _, 0))) {
                            break 'search;
                        }
                    }
                }
            }
        }

        // Unreachable with 4+ available; keeps the court full if it ever happens.
        let (quad, split, score) =
            best.unwrap_or(([available[0], available[1], available[2], available[3]], 0, 0));
        let (team_a, team_b) = split_teams(quad.map(|q| &playing[q]), split);
        debug!(
            "americano court {}: {:?} vs {:?} (repeat score {})",
            court_num, team_a, team_b, score
        );
        for q in quad {
            used[q] = true;
        }
        courts.push(CourtMatch::new(court_num, team_a, team_b));
    }

    Ok(courts)
}

/// Fixed pairs from consecutive roster entries: (0,1), (2,3), ...
pub fn form_fixed_teams(all_players: &[PlayerId]) -> Result<Vec<Team>, RoundError> {
    if all_players.len() % 2 != 0 {
        return Err(RoundError::OddTeamRoster {
            players: all_players.len(),
        });
    }
    Ok(all_players
        .chunks_exact(2)
        .map(|pair| Team::new(pair[0].clone(), pair[1].clone()))
        .collect())
}

/// Assign fixed teams to courts for one team-Americano round.
///
/// `num_courts * 2` teams play, picked by rest count like individual Americano
/// (a team's rest is the larger of its players'). Courts are filled in order with
/// the pair of available teams whose players have faced each other least.
pub fn generate_americano_team_pairings(
    teams: &[Team],
    num_courts: u32,
    opponent_history: &PairHistory,
    rest_counts: &RestCounts,
) -> Result<Vec<CourtMatch>, RoundError> {
    let players: Vec<PlayerId> = teams
        .iter()
        .flat_map(|t| t.players().iter().cloned())
        .collect();
    ensure_unique_roster(&players)?;
    let slots = check_team_count(teams.len(), num_courts)?;

    let team_rest = |t: &Team| {
        t.players()
            .iter()
            .map(|p| rest_counts.get(p).copied().unwrap_or(0))
            .max()
            .unwrap_or(0)
    };
    let mut order: Vec<usize> = (0..teams.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(team_rest(&teams[i])));
    let mut playing: Vec<usize> = order.into_iter().take(slots).collect();
    playing.sort_unstable();

    let mut used = vec![false; teams.len()];
    let mut courts = Vec::with_capacity(num_courts as usize);
    for court_num in 1..=num_courts {
        let available: Vec<usize> = playing.iter().copied().filter(|&i| !used[i]).collect();
        if available.len() < 2 {
            return Err(RoundError::NotEnoughForCourt {
                court_num,
                available: available.len() * 2,
            });
        }
        let mut best: Option<(usize, usize, u32)> = None;
        for (x, &i) in available.iter().enumerate() {
            for &j in available.iter().skip(x + 1) {
                let score = meetings(&teams[i], &teams[j], opponent_history);
                if best.map_or(true, |(_, _, s)| score < s) {
                    best = Some((i, j, score));
                }
            }
        }
        let (i, j, score) = best.unwrap_or((available[0], available[1], 0));
        debug!(
            "team americano court {}: {:?} vs {:?} (repeat score {})",
            court_num, teams[i], teams[j], score
        );
        used[i] = true;
        used[j] = true;
        courts.push(CourtMatch::new(court_num, teams[i].clone(), teams[j].clone()));
    }
    Ok(courts)
}

/// Sum of previous meetings over the four cross-net pairs.
fn meetings(a: &Team, b: &Team, opponents: &PairHistory) -> u32 {
    a.players()
        .iter()
        .flat_map(|x| b.players().iter().map(move |y| opponents.count(x, y)))
        .sum()
}

/// Build round `round_index` of an Americano event from its history.
///
/// Partner (or, for the team variant, opponent) history comes from the last
/// `anti_repeat_window` rounds, or all of them when unset. Rest counts always
/// use the whole history. With rest balancing off the roster is rotated by
/// round instead.
pub fn next_americano_round(
    round_index: u32,
    num_courts: u32,
    all_players: &[PlayerId],
    previous_rounds: &[RoundState],
    options: &AmericanoPairingOptions,
) -> Result<RoundState, RoundError> {
    let window = match options.anti_repeat_window {
        Some(w) => recent_rounds(previous_rounds, w),
        None => previous_rounds,
    };

    let (roster, rest_counts) = roster_for_round(
        all_players,
        previous_rounds,
        round_index,
        num_courts as usize * 4,
        options,
    )?;
    let courts = match options.variant {
        AmericanoVariant::Individual => {
            let partners = build_partner_history(window);
            generate_americano_individual_pairings(&roster, num_courts, &partners, &rest_counts)?
        }
        AmericanoVariant::Team => {
            let teams = form_fixed_teams(&roster)?;
            let opponents = build_opponent_history(window);
            generate_americano_team_pairings(&teams, num_courts, &opponents, &rest_counts)?
        }
    };

    let round = RoundState::new(round_index, courts);
    round.validate()?;
    debug!(
        "americano round {}: {} courts, {} players",
        round.round_num,
        round.courts.len(),
        round.players().count()
    );
    Ok(round)
}

/// Roster order and rest counts to feed the pairing step.
fn roster_for_round(
    all_players: &[PlayerId],
    previous_rounds: &[RoundState],
    round_index: u32,
    slots: usize,
    options: &AmericanoPairingOptions,
) -> Result<(Vec<PlayerId>, RestCounts), RoundError> {
    if options.rest_balancing {
        return Ok((
            all_players.to_vec(),
            calculate_rest_counts(all_players, previous_rounds),
        ));
    }
    let mut roster = all_players.to_vec();
    let unit = match options.variant {
        AmericanoVariant::Individual => 1,
        AmericanoVariant::Team => 2,
    };
    let resting = roster.len().saturating_sub(slots);
    if resting > 0 {
        // Rotate in whole units so fixed teams stay adjacent.
        let units = roster.len() / unit;
        let offset = (round_index.saturating_sub(1) as usize * (resting / unit).max(1)) % units.max(1);
        roster.rotate_left(offset * unit);
    }
    let rest_counts = roster.iter().map(|p| (p.clone(), 0)).collect();
    Ok((roster, rest_counts))
}

/// Validate roster and court count; returns the number of playing slots.
fn check_roster(all_players: &[PlayerId], num_courts: u32, per_court: usize) -> Result<usize, RoundError> {
    if num_courts == 0 {
        return Err(RoundError::InvalidCourtCount);
    }
    ensure_unique_roster(all_players)?;
    let slots = num_courts as usize * per_court;
    if all_players.len() < slots {
        return Err(RoundError::InsufficientPlayers {
            needed: slots,
            available: all_players.len(),
        });
    }
    Ok(slots)
}

fn check_team_count(teams: usize, num_courts: u32) -> Result<usize, RoundError> {
    if num_courts == 0 {
        return Err(RoundError::InvalidCourtCount);
    }
    let slots = num_courts as usize * 2;
    if teams < slots {
        return Err(RoundError::InsufficientPlayers {
            needed: slots * 2,
            available: teams * 2,
        });
    }
    Ok(slots)
}
