//! Event: roster, court count, format and pairing settings.

use crate::models::options::{
    AmericanoPairingOptions, LadderConfig, WildcardConfig, DEFAULT_ANTI_REPEAT_WINDOW,
};
use crate::models::player::{ensure_unique_roster, PlayerId};
use crate::models::round::RoundError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an event.
pub type EventId = Uuid;

/// Tournament format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFormat {
    /// Ladder: winners move up a court, losers move down.
    #[default]
    WinnersCourt,
    /// Rotating partners with optional rest rotation.
    Americano,
}

/// Per-event pairing settings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventSettings {
    /// Winner's Court anti-repeat window.
    pub anti_repeat_window: usize,
    pub americano: AmericanoPairingOptions,
    /// Winner's Court only.
    pub wildcard: Option<WildcardConfig>,
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            anti_repeat_window: DEFAULT_ANTI_REPEAT_WINDOW,
            americano: AmericanoPairingOptions::default(),
            wildcard: None,
        }
    }
}

impl EventSettings {
    pub fn ladder_config(&self) -> LadderConfig {
        LadderConfig {
            anti_repeat_window: self.anti_repeat_window,
        }
    }
}

/// An event. Rounds live in the round store, keyed by `id`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub format: EventFormat,
    /// Full roster in sign-up order. Winner's Court seeds the ladder from this order.
    pub roster: Vec<PlayerId>,
    pub num_courts: u32,
    pub settings: EventSettings,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Create an event, rejecting a roster that cannot fill the courts.
    ///
    /// Winner's Court needs exactly `num_courts * 4` players; Americano needs at
    /// least that many (extra players rest in rotation).
    pub fn new(
        name: impl Into<String>,
        format: EventFormat,
        roster: Vec<PlayerId>,
        num_courts: u32,
        settings: EventSettings,
    ) -> Result<Self, RoundError> {
        if num_courts == 0 {
            return Err(RoundError::InvalidCourtCount);
        }
        ensure_unique_roster(&roster)?;
        let needed = num_courts as usize * 4;
        let fits = match format {
            EventFormat::WinnersCourt => roster.len() == needed,
            EventFormat::Americano => roster.len() >= needed,
        };
        if !fits {
            return Err(RoundError::InsufficientPlayers {
                needed,
                available: roster.len(),
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            format,
            roster,
            num_courts,
            settings,
            created_at: Utc::now(),
        })
    }
}
