//! Padel round organizer: library with models, round generation and round storage.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    advance_event, apply_wildcard_shuffle, build_opponent_history, build_partner_history,
    calculate_rest_counts, form_fixed_teams, generate_americano_individual_pairings,
    generate_americano_team_pairings, initial_ladder_round, next_americano_round, next_round,
    recent_rounds, record_score, undo_last_round, PairHistory,
};
pub use models::{
    validate_court, AmericanoPairingOptions, AmericanoVariant, CourtMatch, Event, EventFormat,
    EventId, EventSettings, LadderConfig, PlayerId, RestCounts, RoundError, RoundState, Side,
    Team, WildcardConfig, WildcardIntensity, DEFAULT_ANTI_REPEAT_WINDOW,
};
pub use store::{InMemoryRoundStore, RoundStore};
