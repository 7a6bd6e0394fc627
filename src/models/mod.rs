//! Data structures for padel rounds: players, courts, rounds, options and events.

mod court;
mod event;
mod options;
mod player;
mod round;

pub use court::{CourtMatch, Side, Team};
pub use event::{Event, EventFormat, EventId, EventSettings};
pub use options::{
    AmericanoPairingOptions, AmericanoVariant, LadderConfig, WildcardConfig, WildcardIntensity,
    DEFAULT_ANTI_REPEAT_WINDOW,
};
pub use player::{PlayerId, RestCounts};
pub(crate) use player::ensure_unique_roster;
pub use round::{validate_court, RoundError, RoundState};
