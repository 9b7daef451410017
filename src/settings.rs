//! Session configuration
//!
//! Timing knobs and rule switches. Hosts pass it as JSON when creating a
//! game; it is never persisted (the high score is the only stored value).

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How many levels a single pop may award
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LevelUpRule {
    /// At most one level per pop, even when the score jumps past several
    /// thresholds. Large jumps therefore skip levels.
    #[default]
    SinglePerPop,
    /// Keep levelling while the score is above the threshold
    Cascade,
}

impl LevelUpRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelUpRule::SinglePerPop => "single_per_pop",
            LevelUpRule::Cascade => "cascade",
        }
    }
}

/// What happens to achievement notifications that arrive while one is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPolicy {
    /// Show each in turn
    #[default]
    Queue,
    /// The newest replaces whatever is pending
    LatestOnly,
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Timing (ms) ===
    /// Motion tick period
    pub motion_tick_ms: u64,
    /// Combo decays this long after the last pop
    pub combo_window_ms: u64,
    /// How long an achievement notification stays up
    pub notification_ms: u64,
    /// Particle lifetime
    pub particle_lifetime_ms: u64,
    /// Score popup lifetime
    pub score_popup_ms: u64,
    /// Most game time simulated by a single `advance` call
    pub max_catch_up_ms: u64,

    // === Rules ===
    pub level_up_rule: LevelUpRule,
    pub notification_policy: NotificationPolicy,

    // === Visual Effects ===
    /// Particle bursts on pop
    pub particles: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            motion_tick_ms: MOTION_TICK_MS,
            combo_window_ms: COMBO_WINDOW_MS,
            notification_ms: NOTIFICATION_MS,
            particle_lifetime_ms: PARTICLE_LIFETIME_MS,
            score_popup_ms: SCORE_POPUP_MS,
            max_catch_up_ms: MAX_CATCH_UP_MS,

            level_up_rule: LevelUpRule::SinglePerPop,
            notification_policy: NotificationPolicy::Queue,

            particles: true,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Parse, logging and falling back to defaults on bad input
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(str::trim).filter(|s| !s.is_empty()) {
            Some(json) => match Self::from_json(json) {
                Ok(config) => {
                    log::info!("Loaded game config");
                    config
                }
                Err(e) => {
                    log::warn!("Invalid game config ({e}), using defaults");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Zero periods would stall the scheduler; clamp them to 1ms
    pub(crate) fn sanitized(mut self) -> Self {
        self.motion_tick_ms = self.motion_tick_ms.max(1);
        self.max_catch_up_ms = self.max_catch_up_ms.max(self.motion_tick_ms);
        self
    }
}
