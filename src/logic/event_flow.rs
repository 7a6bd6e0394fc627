//! Event flow: advancing rounds, recording scores, undoing a round.

use crate::logic::americano::next_americano_round;
use crate::logic::ladder::{initial_ladder_round, next_round};
use crate::logic::wildcard::apply_wildcard_shuffle;
use crate::models::{Event, EventFormat, EventId, RoundError, RoundState};
use crate::store::RoundStore;
use log::info;
use rand::Rng;

/// Generate, validate and store the event's next round.
///
/// The first round is seeded from the roster (Winner's Court) or generated with an
/// empty history (Americano). Later rounds need the latest round fully scored.
/// Winner's Court rounds whose number matches the wildcard schedule are shuffled.
/// Nothing is stored if any step fails.
pub fn advance_event<S, R>(event: &Event, store: &mut S, rng: &mut R) -> Result<RoundState, RoundError>
where
    S: RoundStore + ?Sized,
    R: Rng + ?Sized,
{
    let history = store.history(event.id)?;
    let mut round = match (event.format, history.split_last()) {
        (EventFormat::WinnersCourt, None) => initial_ladder_round(&event.roster, event.num_courts)?,
        (EventFormat::Americano, None) => next_americano_round(
            1,
            event.num_courts,
            &event.roster,
            &[],
            &event.settings.americano,
        )?,
        (_, Some((last, _))) if !last.is_fully_scored() => {
            return Err(RoundError::RoundNotScored {
                round_num: last.round_num,
            })
        }
        (EventFormat::WinnersCourt, Some((last, earlier))) => {
            next_round(last, &event.settings.ladder_config(), earlier)?
        }
        (EventFormat::Americano, Some((last, _))) => next_americano_round(
            last.round_num + 1,
            event.num_courts,
            &event.roster,
            &history,
            &event.settings.americano,
        )?,
    };

    if event.format == EventFormat::WinnersCourt {
        if let Some(wildcard) = event.settings.wildcard {
            if wildcard.applies_to(round.round_num) {
                let courts = apply_wildcard_shuffle(&round.courts, wildcard.intensity, rng)?;
                round = RoundState::new(round.round_num, courts);
                info!(
                    "event {}: round {} is a {:?} wildcard round",
                    event.id, round.round_num, wildcard.intensity
                );
            }
        }
    }

    round.validate()?;
    store.append_round(event.id, round.clone())?;
    info!("event {}: generated round {}", event.id, round.round_num);
    Ok(round)
}

/// Record the score of one court of the latest round. Ties are rejected.
///
/// Earlier rounds are locked: later rounds were built from their results.
pub fn record_score<S>(
    store: &mut S,
    event_id: EventId,
    round_num: u32,
    court_num: u32,
    score_a: u32,
    score_b: u32,
) -> Result<RoundState, RoundError>
where
    S: RoundStore + ?Sized,
{
    if score_a == score_b {
        return Err(RoundError::TiedScore {
            court_num,
            score: score_a,
        });
    }
    let history = store.history(event_id)?;
    let Some(mut round) = history.last().cloned() else {
        return Err(RoundError::RoundNotFound { round_num });
    };
    if round.round_num != round_num {
        if history.iter().any(|r| r.round_num == round_num) {
            return Err(RoundError::RoundLocked {
                round_num,
                latest: round.round_num,
            });
        }
        return Err(RoundError::RoundNotFound { round_num });
    }
    let court = round
        .court_mut(court_num)
        .ok_or(RoundError::CourtNotFound { court_num })?;
    court.score_a = Some(score_a);
    court.score_b = Some(score_b);
    store.replace_round(event_id, round.clone())?;
    Ok(round)
}

/// Drop the latest round so the previous one becomes current again.
pub fn undo_last_round<S>(store: &mut S, event_id: EventId) -> Result<Option<RoundState>, RoundError>
where
    S: RoundStore + ?Sized,
{
    let removed = store.undo_last_round(event_id)?;
    if let Some(r) = &removed {
        info!("event {}: undid round {}", event_id, r.round_num);
    }
    Ok(removed)
}
