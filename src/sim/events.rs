//! Events emitted for the presentation layer (sounds, banners, popups)

use std::collections::VecDeque;

use serde::Serialize;

use super::achievements::AchievementId;
use super::state::BubbleKind;

/// Maximum undrained events kept; older ones are dropped
pub const MAX_PENDING_EVENTS: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Started { resumed: bool },
    Paused,
    BubbleSpawned { id: u32, kind: BubbleKind },
    /// Fell off the bottom, no penalty
    BubbleMissed { id: u32 },
    BubblePopped {
        id: u32,
        kind: BubbleKind,
        delta: i64,
        combo: u32,
        multiplier: u32,
    },
    ComboReset,
    LevelUp { level: u32 },
    HighScore { score: u64 },
    AchievementUnlocked { id: AchievementId },
    NotificationDismissed { id: AchievementId },
    Ended,
}

/// Bounded FIFO of undrained events
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
