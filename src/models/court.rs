//! Court match, Team, and Side for 2v2 padel courts.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Which side of the net won the court.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

/// Two players sharing one side of a court.
///
/// Serialized as a JSON array; anything but exactly two entries is rejected
/// when deserializing.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PlayerId>", into = "Vec<PlayerId>")]
pub struct Team([PlayerId; 2]);

impl Team {
    pub fn new(first: impl Into<PlayerId>, second: impl Into<PlayerId>) -> Self {
        Self([first.into(), second.into()])
    }

    pub fn players(&self) -> &[PlayerId; 2] {
        &self.0
    }

    pub fn first(&self) -> &PlayerId {
        &self.0[0]
    }

    pub fn second(&self) -> &PlayerId {
        &self.0[1]
    }

    pub fn contains(&self, player: &str) -> bool {
        self.0.iter().any(|p| p == player)
    }
}

impl TryFrom<Vec<PlayerId>> for Team {
    type Error = String;

    fn try_from(players: Vec<PlayerId>) -> Result<Self, Self::Error> {
        let len = players.len();
        let pair: [PlayerId; 2] = players
            .try_into()
            .map_err(|_| format!("a team needs exactly 2 players, got {}", len))?;
        Ok(Self(pair))
    }
}

impl From<Team> for Vec<PlayerId> {
    fn from(team: Team) -> Self {
        team.0.into()
    }
}

/// One court's assignment for one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtMatch {
    /// 1-based; court 1 is the top of the ladder.
    pub court_num: u32,
    pub team_a: Team,
    pub team_b: Team,
    /// None until scored. Both scores are set together.
    #[serde(default)]
    pub score_a: Option<u32>,
    #[serde(default)]
    pub score_b: Option<u32>,
}

impl CourtMatch {
    /// Unscored court.
    pub fn new(court_num: u32, team_a: Team, team_b: Team) -> Self {
        Self {
            court_num,
            team_a,
            team_b,
            score_a: None,
            score_b: None,
        }
    }

    /// Same court with both scores set.
    pub fn with_score(mut self, score_a: u32, score_b: u32) -> Self {
        self.score_a = Some(score_a);
        self.score_b = Some(score_b);
        self
    }

    pub fn clear_scores(&mut self) {
        self.score_a = None;
        self.score_b = None;
    }

    pub fn is_scored(&self) -> bool {
        self.score_a.is_some() && self.score_b.is_some()
    }

    /// All four players: team A first, then team B.
    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.team_a.players().iter().chain(self.team_b.players().iter())
    }

    /// Winning side, or None if the court is unscored or tied.
    pub fn winner(&self) -> Option<Side> {
        match (self.score_a, self.score_b) {
            (Some(a), Some(b)) if a > b => Some(Side::A),
            (Some(a), Some(b)) if b > a => Some(Side::B),
            _ => None,
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }
}
