//! Winner's Court: promotion and relegation between adjacent courts.

use crate::logic::history::{build_opponent_history, build_partner_history, recent_rounds};
use crate::logic::split::best_split;
use crate::models::{
    ensure_unique_roster, validate_court, CourtMatch, LadderConfig, PlayerId, RoundError,
    RoundState, Side, Team,
};
use log::{debug, info};

/// Winners and losers of one scored court.
struct Outcome<'a> {
    winners: &'a Team,
    losers: &'a Team,
}

/// Opening ladder round: players seeded down the courts in roster order.
///
/// Court 1 takes the first four players, court 2 the next four, and so on.
pub fn initial_ladder_round(roster: &[PlayerId], num_courts: u32) -> Result<RoundState, RoundError> {
    if num_courts == 0 {
        return Err(RoundError::InvalidCourtCount);
    }
    ensure_unique_roster(roster)?;
    let needed = num_courts as usize * 4;
    if roster.len() != needed {
        return Err(RoundError::InsufficientPlayers {
            needed,
            available: roster.len(),
        });
    }
    let courts = roster
        .chunks_exact(4)
        .zip(1..)
        .map(|(four, court_num)| {
            CourtMatch::new(
                court_num,
                Team::new(four[0].clone(), four[1].clone()),
                Team::new(four[2].clone(), four[3].clone()),
            )
        })
        .collect();
    let round = RoundState::new(1, courts);
    round.validate()?;
    Ok(round)
}

/// Build the next Winner's Court round from the scored `current_round`.
///
/// New court 1 gets the winners of courts 1 and 2. Each middle court `k` gets the
/// losers from court `k - 1` and the winners from court `k + 1`. The bottom court
/// gets the losers of the two lowest courts. A single court keeps its four players.
///
/// Each new group of four is split into teams with the fewest partner repeats over
/// the last `anti_repeat_window` rounds (including `current_round`), then the
/// fewest opponent repeats, then the first split.
///
/// Every court must hold two distinct pairs and a decided score.
pub fn next_round(
    current_round: &RoundState,
    config: &LadderConfig,
    previous_rounds: &[RoundState],
) -> Result<RoundState, RoundError> {
    if current_round.courts.is_empty() {
        return Err(RoundError::InvalidCourtCount);
    }
    let outcomes = decide_courts(current_round)?;

    let mut rounds: Vec<RoundState> = previous_rounds
        .iter()
        .filter(|r| r.round_num < current_round.round_num)
        .cloned()
        .collect();
    rounds.push(current_round.clone());
    let window = recent_rounds(&rounds, config.anti_repeat_window);
    let partners = build_partner_history(window);
    let opponents = build_opponent_history(window);

    let courts = regroup(&outcomes)
        .into_iter()
        .zip(1..)
        .map(|(group, court_num)| {
            let (team_a, team_b, score) = best_split(group, &partners, Some(&opponents));
            debug!(
                "ladder court {}: {:?} vs {:?} (partner repeats {}, opponent repeats {})",
                court_num, team_a, team_b, score.partner, score.opponent
            );
            CourtMatch::new(court_num, team_a, team_b)
        })
        .collect();

    let next = RoundState::new(current_round.round_num + 1, courts);
    next.validate()?;
    next.ensure_same_players(current_round)?;
    info!(
        "ladder advanced to round {} ({} courts)",
        next.round_num,
        next.courts.len()
    );
    Ok(next)
}

/// Validate every court and find its winners and losers, top court first.
fn decide_courts(round: &RoundState) -> Result<Vec<Outcome<'_>>, RoundError> {
    let mut outcomes = Vec::with_capacity(round.courts.len());
    for court in &round.courts {
        validate_court(court)?;
        let (Some(a), Some(b)) = (court.score_a, court.score_b) else {
            return Err(RoundError::MissingScore {
                court_num: court.court_num,
            });
        };
        let side = match court.winner() {
            Some(side) => side,
            None => {
                return Err(RoundError::TiedScore {
                    court_num: court.court_num,
                    score: a.min(b),
                })
            }
        };
        let loser = match side {
            Side::A => Side::B,
            Side::B => Side::A,
        };
        outcomes.push(Outcome {
            winners: court.team(side),
            losers: court.team(loser),
        });
    }
    round.validate()?;
    Ok(outcomes)
}

/// New groups of four, top court first.
fn regroup<'a>(outcomes: &[Outcome<'a>]) -> Vec<[&'a PlayerId; 4]> {
    let join = |up: &'a Team, down: &'a Team| -> [&'a PlayerId; 4] {
        [up.first(), up.second(), down.first(), down.second()]
    };
    let n = outcomes.len();
    if n == 1 {
        return vec![join(outcomes[0].winners, outcomes[0].losers)];
    }
    (0..n)
        .map(|k| {
            if k == 0 {
                join(outcomes[0].winners, outcomes[1].winners)
            } else if k == n - 1 {
                join(outcomes[n - 2].losers, outcomes[n - 1].losers)
            } else {
                join(outcomes[k - 1].losers, outcomes[k + 1].winners)
            }
        })
        .collect()
}
