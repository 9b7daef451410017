//! Game state and core simulation types
//!
//! Everything a session mutates lives here. Presentation-only entities
//! (particles, score popups) sit next to gameplay entities but never feed
//! back into scoring.

use std::collections::VecDeque;

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::highscores::HighScore;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    /// Created, never started (or reset for a new game)
    Idle,
    /// Timers running, pops accepted
    Active,
    /// Frozen; progress kept
    Paused,
    /// Torn down, every timer cancelled
    Ended,
}

/// Bubble types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleKind {
    #[default]
    Normal,
    /// Fixed +50 points
    Bonus,
    /// Fixed -20 points
    Bomb,
}

/// Two-tone bubble fill (gradient from primary to secondary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BubbleColor {
    pub primary: &'static str,
    pub secondary: &'static str,
}

impl BubbleColor {
    pub const fn new(primary: &'static str, secondary: &'static str) -> Self {
        Self { primary, secondary }
    }
}

/// Palette for normal bubbles
pub const BUBBLE_COLORS: [BubbleColor; 7] = [
    BubbleColor::new("#FF6B6B", "#FF8E8E"), // Red
    BubbleColor::new("#4ECDC4", "#6EDDD6"), // Teal
    BubbleColor::new("#45B7D1", "#67C5E1"), // Blue
    BubbleColor::new("#96CEB4", "#B8E6C1"), // Green
    BubbleColor::new("#FFEAA7", "#FDCB6E"), // Yellow
    BubbleColor::new("#DDA0DD", "#E6B8E6"), // Purple
    BubbleColor::new("#FFB347", "#FFC470"), // Orange
];

pub const BONUS_COLOR: BubbleColor = BubbleColor::new("#FFD700", "#FFA500");
pub const BOMB_COLOR: BubbleColor = BubbleColor::new("#FF4444", "#CC0000");

/// A falling bubble
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bubble {
    pub id: u32,
    /// Top-left corner, play-area coordinates
    pub pos: Vec2,
    /// Diameter
    pub size: f32,
    /// Units per motion tick
    pub speed: f32,
    pub color: BubbleColor,
    pub points: i64,
    pub kind: BubbleKind,
}

impl Bubble {
    /// Centre point (where particles and popups originate)
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per second
    pub vel: Vec2,
    pub color: &'static str,
    /// Milliseconds lived so far (advanced by the motion tick)
    pub age_ms: u64,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

/// Floating "+12" / "-20" text left where a bubble was popped
#[derive(Debug, Clone, Serialize)]
pub struct ScorePopup {
    pub id: u32,
    pub pos: Vec2,
    pub delta: i64,
    pub kind: BubbleKind,
    /// Wall-clock deadline (ms)
    #[serde(skip)]
    pub expires_at: u64,
}

/// Play area bounds, origin at top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// False for zero, negative or non-finite bounds
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Fixed-capacity ring of recent pop timestamps (oldest evicted first)
#[derive(Debug, Clone, Default)]
pub struct PopRing {
    times: VecDeque<u64>,
}

impl PopRing {
    pub fn new() -> Self {
        Self {
            times: VecDeque::with_capacity(RECENT_POP_CAPACITY),
        }
    }

    pub fn record(&mut self, now: u64) {
        if self.times.len() == RECENT_POP_CAPACITY {
            self.times.pop_front();
        }
        self.times.push_back(now);
    }

    /// Pops strictly younger than `window_ms` at `now`
    pub fn count_within(&self, now: u64, window_ms: u64) -> usize {
        self.times
            .iter()
            .filter(|&&t| now.saturating_sub(t) < window_ms)
            .count()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn clear(&mut self) {
        self.times.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.times.iter().copied()
    }
}

/// Complete gameplay state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current phase
    pub phase: SessionPhase,
    /// Score (never negative)
    pub score: u64,
    /// Consecutive pops inside the combo window
    pub combo: u32,
    /// Level (starts at 1)
    pub level: u32,
    /// Bubbles popped since the session was created
    pub total_popped: u64,
    /// Best score ever, mirrored to the durable store
    pub high_score: HighScore,
    /// Timestamps of the last pops
    pub recent_pops: PopRing,
    /// Live bubbles (sorted by id)
    pub bubbles: Vec<Bubble>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Floating score deltas
    pub popups: Vec<ScorePopup>,
    /// None once the session is torn down
    pub play_area: Option<PlayArea>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    pub fn new(play_area: PlayArea, high_score: HighScore) -> Self {
        Self {
            phase: SessionPhase::Idle,
            score: 0,
            combo: 0,
            level: 1,
            total_popped: 0,
            high_score,
            recent_pops: PopRing::new(),
            bubbles: Vec::new(),
            particles: Vec::new(),
            popups: Vec::new(),
            play_area: Some(play_area),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Back to run defaults. Lifetime counters and the high score survive.
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.combo = 0;
        self.level = 1;
        self.recent_pops.clear();
        self.bubbles.clear();
        self.particles.clear();
        self.popups.clear();
    }

    pub fn bubble(&self, id: u32) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| b.id == id)
    }

    /// Remove and return a bubble by id
    pub fn take_bubble(&mut self, id: u32) -> Option<Bubble> {
        let index = self.bubbles.iter().position(|b| b.id == id)?;
        Some(self.bubbles.remove(index))
    }

    /// Progress toward the next level threshold, as shown on the HUD bar
    pub fn level_progress(&self) -> u64 {
        self.score % POINTS_PER_LEVEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_ring_evicts_oldest() {
        let mut ring = PopRing::new();
        for t in 0..15 {
            ring.record(t * 100);
        }
        assert_eq!(ring.len(), RECENT_POP_CAPACITY);
        assert_eq!(ring.iter().next(), Some(500));
        assert_eq!(ring.iter().last(), Some(1400));
    }

    #[test]
    fn test_pop_ring_window_is_exclusive() {
        let mut ring = PopRing::new();
        ring.record(0);
        ring.record(1000);
        assert_eq!(ring.count_within(4999, 5000), 2);
        assert_eq!(ring.count_within(5000, 5000), 1);
    }

    #[test]
    fn test_play_area_usable() {
        assert!(PlayArea::new(800.0, 600.0).is_usable());
        assert!(!PlayArea::new(0.0, 600.0).is_usable());
        assert!(!PlayArea::new(800.0, -1.0).is_usable());
        assert!(!PlayArea::new(f32::NAN, 600.0).is_usable());
    }

    #[test]
    fn test_reset_run_keeps_lifetime_stats() {
        let mut state = GameState::new(PlayArea::new(800.0, 600.0), HighScore { best: 900 });
        state.score = 320;
        state.combo = 4;
        state.level = 2;
        state.total_popped = 37;
        state.recent_pops.record(10);

        state.reset_run();
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.level, 1);
        assert!(state.recent_pops.is_empty());
        assert_eq!(state.total_popped, 37);
        assert_eq!(state.high_score.best, 900);
    }

    #[test]
    fn test_bubble_center() {
        let bubble = Bubble {
            id: 1,
            pos: Vec2::new(10.0, 20.0),
            size: 40.0,
            speed: 1.0,
            color: BUBBLE_COLORS[0],
            points: 10,
            kind: BubbleKind::Normal,
        };
        assert_eq!(bubble.center(), Vec2::new(30.0, 40.0));
    }
}
