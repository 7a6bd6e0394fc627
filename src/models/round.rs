//! RoundState, RoundError and round validation.

use crate::models::court::CourtMatch;
use crate::models::event::EventId;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Errors raised while generating, validating or storing rounds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RoundError {
    /// Zero courts requested.
    InvalidCourtCount,
    /// Roster does not fit the courts.
    InsufficientPlayers { needed: usize, available: usize },
    /// Fewer than 4 players (or 2 teams) left while filling a court.
    NotEnoughForCourt { court_num: u32, available: usize },
    /// A court whose teams are not two distinct pairs, or a repeated court number.
    MalformedCourt { court_num: u32, reason: String },
    /// Ladder generation needs every court scored.
    MissingScore { court_num: u32 },
    /// Equal scores leave winner and loser undefined.
    TiedScore { court_num: u32, score: u32 },
    /// Scores set on one side only.
    InvalidScore { court_num: u32, reason: String },
    /// A player repeated within a court or across courts of one round.
    DuplicatePlayer { court_num: u32, player: PlayerId },
    /// The roster lists this player more than once.
    DuplicateRosterEntry(PlayerId),
    /// Team variant needs an even roster to form fixed pairs.
    OddTeamRoster { players: usize },
    EventNotFound(EventId),
    RoundNotFound { round_num: u32 },
    CourtNotFound { court_num: u32 },
    /// Appended round does not follow the last stored round.
    NonSequentialRound { expected: u32, got: u32 },
    /// The latest round still has unscored courts.
    RoundNotScored { round_num: u32 },
    /// Later rounds were generated from this round's results.
    RoundLocked { round_num: u32, latest: u32 },
    /// A generated round holds a player its source round did not.
    UnexpectedPlayer { court_num: u32, player: PlayerId },
    /// A generated round lost a player of its source round.
    MissingPlayer(PlayerId),
}

impl std::fmt::Display for RoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundError::InvalidCourtCount => write!(f, "At least one court is required"),
            RoundError::InsufficientPlayers { needed, available } => write!(
                f,
                "Need {} players to fill the courts (have {})",
                needed, available
            ),
            RoundError::NotEnoughForCourt {
                court_num,
                available,
            } => write!(
                f,
                "Not enough players left for court {} (have {})",
                court_num, available
            ),
            RoundError::MalformedCourt { court_num, reason } => {
                write!(f, "Court {} is malformed: {}", court_num, reason)
            }
            RoundError::MissingScore { court_num } => {
                write!(f, "Court {} has no score", court_num)
            }
            RoundError::TiedScore { court_num, score } => write!(
                f,
                "Court {} is tied {}-{}; a winner is required",
                court_num, score, score
            ),
            RoundError::InvalidScore { court_num, reason } => {
                write!(f, "Court {} has an invalid score: {}", court_num, reason)
            }
            RoundError::DuplicatePlayer { court_num, player } => write!(
                f,
                "Player {} appears more than once (court {})",
                player, court_num
            ),
            RoundError::DuplicateRosterEntry(p) => {
                write!(f, "Player {} is listed twice in the roster", p)
            }
            RoundError::OddTeamRoster { players } => write!(
                f,
                "Team Americano needs an even number of players (have {})",
                players
            ),
            RoundError::EventNotFound(id) => write!(f, "Event {} not found", id),
            RoundError::RoundNotFound { round_num } => {
                write!(f, "Round {} not found", round_num)
            }
            RoundError::CourtNotFound { court_num } => {
                write!(f, "Court {} not found", court_num)
            }
            RoundError::NonSequentialRound { expected, got } => write!(
                f,
                "Expected round {} next, got round {}",
                expected, got
            ),
            RoundError::RoundNotScored { round_num } => {
                write!(f, "Round {} is not fully scored", round_num)
            }
            RoundError::RoundLocked { round_num, latest } => write!(
                f,
                "Round {} is locked; only the latest round ({}) can be scored",
                round_num, latest
            ),
            RoundError::UnexpectedPlayer { court_num, player } => write!(
                f,
                "Player {} on court {} was not in the previous round",
                player, court_num
            ),
            RoundError::MissingPlayer(p) => {
                write!(f, "Player {} is missing from the new round", p)
            }
        }
    }
}

impl std::error::Error for RoundError {}

/// One round of a tournament: every court played simultaneously.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundState {
    /// 1-based, increasing by one per round within an event.
    pub round_num: u32,
    /// Ordered by court number.
    pub courts: Vec<CourtMatch>,
}

impl RoundState {
    pub fn new(round_num: u32, mut courts: Vec<CourtMatch>) -> Self {
        courts.sort_by_key(|c| c.court_num);
        Self { round_num, courts }
    }

    /// Every player on any court, in court order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.courts.iter().flat_map(|c| c.players())
    }

    pub fn player_set(&self) -> HashSet<&str> {
        self.players().map(String::as_str).collect()
    }

    pub fn court(&self, court_num: u32) -> Option<&CourtMatch> {
        self.courts.iter().find(|c| c.court_num == court_num)
    }

    pub fn court_mut(&mut self, court_num: u32) -> Option<&mut CourtMatch> {
        self.courts.iter_mut().find(|c| c.court_num == court_num)
    }

    pub fn is_fully_scored(&self) -> bool {
        self.courts.iter().all(CourtMatch::is_scored)
    }

    /// Check the structural invariants of a round.
    ///
    /// Courts are numbered 1..=n without gaps, each court holds 4 distinct
    /// players split 2/2, no player appears on two courts, and scores are
    /// either both absent or both present and different.
    pub fn validate(&self) -> Result<(), RoundError> {
        let mut seen = HashSet::new();
        for (idx, court) in self.courts.iter().enumerate() {
            let expected = idx as u32 + 1;
            if court.court_num != expected {
                return Err(RoundError::MalformedCourt {
                    court_num: court.court_num,
                    reason: format!("expected court number {}", expected),
                });
            }
            validate_court(court)?;
            for p in court.players() {
                if !seen.insert(p.as_str()) {
                    return Err(RoundError::DuplicatePlayer {
                        court_num: court.court_num,
                        player: p.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Check that this round holds exactly the players of `previous`.
    pub fn ensure_same_players(&self, previous: &RoundState) -> Result<(), RoundError> {
        let old = previous.player_set();
        for court in &self.courts {
            if let Some(p) = court.players().find(|p| !old.contains(p.as_str())) {
                return Err(RoundError::UnexpectedPlayer {
                    court_num: court.court_num,
                    player: p.clone(),
                });
            }
        }
        let new = self.player_set();
        match previous.players().find(|p| !new.contains(p.as_str())) {
            Some(p) => Err(RoundError::MissingPlayer(p.clone())),
            None => Ok(()),
        }
    }
}

/// Check one court: two distinct players per team, four distinct overall, sane scores.
pub fn validate_court(court: &CourtMatch) -> Result<(), RoundError> {
    for team in [&court.team_a, &court.team_b] {
        if team.first() == team.second() {
            return Err(RoundError::MalformedCourt {
                court_num: court.court_num,
                reason: format!("team lists {} twice", team.first()),
            });
        }
    }
    for p in court.team_a.players() {
        if court.team_b.contains(p) {
            return Err(RoundError::DuplicatePlayer {
                court_num: court.court_num,
                player: p.clone(),
            });
        }
    }
    match (court.score_a, court.score_b) {
        (None, None) => Ok(()),
        (Some(a), Some(b)) if a == b => Err(RoundError::TiedScore {
            court_num: court.court_num,
            score: a,
        }),
        (Some(_), Some(_)) => Ok(()),
        _ => Err(RoundError::InvalidScore {
            court_num: court.court_num,
            reason: "both scores must be set together".to_string(),
        }),
    }
}
