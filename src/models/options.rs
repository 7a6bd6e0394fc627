//! Pairing configuration supplied by event settings.

use serde::{Deserialize, Serialize};

/// Rounds of history weighed by the anti-repeat scoring unless configured otherwise.
pub const DEFAULT_ANTI_REPEAT_WINDOW: usize = 3;

/// Americano flavour: rotating partners, or fixed pairs rotating opponents.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmericanoVariant {
    #[default]
    Individual,
    Team,
}

/// Options for Americano round generation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AmericanoPairingOptions {
    pub variant: AmericanoVariant,
    /// Most recent rounds counted for anti-repeat scoring. None counts the whole event.
    pub anti_repeat_window: Option<usize>,
    /// Let rest counts decide who sits out; otherwise rotate the roster.
    pub rest_balancing: bool,
}

impl Default for AmericanoPairingOptions {
    fn default() -> Self {
        Self {
            variant: AmericanoVariant::Individual,
            anti_repeat_window: None,
            rest_balancing: true,
        }
    }
}

/// Winner's Court configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LadderConfig {
    pub anti_repeat_window: usize,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            anti_repeat_window: DEFAULT_ANTI_REPEAT_WINDOW,
        }
    }
}

/// How hard a wildcard round scrambles the courts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildcardIntensity {
    /// Swaps between adjacent courts only.
    Mild,
    /// Half of the positions reshuffled among themselves.
    Medium,
    /// Everyone reshuffled.
    Mayhem,
}

/// Periodic wildcard rounds for Winner's Court events.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WildcardConfig {
    /// Every n-th round (by round number) is a wildcard round.
    pub every: u32,
    pub intensity: WildcardIntensity,
}

impl WildcardConfig {
    pub fn applies_to(&self, round_num: u32) -> bool {
        self.every > 0 && round_num % self.every == 0
    }
}
