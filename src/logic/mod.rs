//! Round generation: history, rest accounting, Winner's Court, Americano and wildcard rounds.

mod americano;
mod event_flow;
mod history;
mod ladder;
mod rest;
mod split;
mod wildcard;

pub use americano::{
    form_fixed_teams, generate_americano_individual_pairings, generate_americano_team_pairings,
    next_americano_round,
};
pub use event_flow::{advance_event, record_score, undo_last_round};
pub use history::{build_opponent_history, build_partner_history, recent_rounds, PairHistory};
pub use ladder::{initial_ladder_round, next_round};
pub use rest::calculate_rest_counts;
pub use wildcard::apply_wildcard_shuffle;
