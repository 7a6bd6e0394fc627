//! Round storage: the interface the engine reads history from and writes rounds to.

use crate::models::{EventId, RoundError, RoundState};
use std::collections::HashMap;

/// Persistence of rounds per event.
///
/// Implementations must keep round numbers unique and increasing by one per event.
pub trait RoundStore {
    /// Start an empty history for a new event.
    fn register_event(&mut self, event_id: EventId);

    /// All stored rounds of an event, oldest first.
    fn history(&self, event_id: EventId) -> Result<Vec<RoundState>, RoundError>;

    /// Append the next round; its number must follow the last stored round.
    fn append_round(&mut self, event_id: EventId, round: RoundState) -> Result<(), RoundError>;

    /// Overwrite a stored round with the same round number (e.g. after scoring).
    fn replace_round(&mut self, event_id: EventId, round: RoundState) -> Result<(), RoundError>;

    /// Remove and return the latest round, if any.
    fn undo_last_round(&mut self, event_id: EventId) -> Result<Option<RoundState>, RoundError>;

    /// Forget an event and its rounds.
    fn remove_event(&mut self, event_id: EventId);
}

/// Rounds kept in memory, keyed by event.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRoundStore {
    rounds: HashMap<EventId, Vec<RoundState>>,
}

impl InMemoryRoundStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn rounds_mut(&mut self, event_id: EventId) -> Result<&mut Vec<RoundState>, RoundError> {
        self.rounds
            .get_mut(&event_id)
            .ok_or(RoundError::EventNotFound(event_id))
    }
}

impl RoundStore for InMemoryRoundStore {
    fn register_event(&mut self, event_id: EventId) {
        self.rounds.entry(event_id).or_default();
    }

    fn history(&self, event_id: EventId) -> Result<Vec<RoundState>, RoundError> {
        self.rounds
            .get(&event_id)
            .cloned()
            .ok_or(RoundError::EventNotFound(event_id))
    }

    fn append_round(&mut self, event_id: EventId, round: RoundState) -> Result<(), RoundError> {
        let rounds = self.rounds_mut(event_id)?;
        let expected = rounds.last().map_or(1, |r| r.round_num + 1);
        if round.round_num != expected {
            return Err(RoundError::NonSequentialRound {
                expected,
                got: round.round_num,
            });
        }
        rounds.push(round);
        Ok(())
    }

    fn replace_round(&mut self, event_id: EventId, round: RoundState) -> Result<(), RoundError> {
        let rounds = self.rounds_mut(event_id)?;
        let slot = rounds
            .iter_mut()
            .find(|r| r.round_num == round.round_num)
            .ok_or(RoundError::RoundNotFound {
                round_num: round.round_num,
            })?;
        *slot = round;
        Ok(())
    }

    fn undo_last_round(&mut self, event_id: EventId) -> Result<Option<RoundState>, RoundError> {
        Ok(self.rounds_mut(event_id)?.pop())
    }

    fn remove_event(&mut self, event_id: EventId) {
        self.rounds.remove(&event_id);
    }
}
