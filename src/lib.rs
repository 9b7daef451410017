//! Bubble Pop - a casual bubble popping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic session engine (spawning, motion, scoring, achievements)
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `highscores`: The single persisted high score
//! - `settings`: Timing knobs and rule switches
//! - `platform`: Browser/native platform abstraction

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::HighScore;
pub use settings::{GameConfig, LevelUpRule, NotificationPolicy};
pub use sim::{GameEvent, PopOutcome, Session, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Motion tick period (ms)
    pub const MOTION_TICK_MS: u64 = 50;
    /// Combo resets this long after the last pop (ms)
    pub const COMBO_WINDOW_MS: u64 = 2000;
    /// Achievement notification display time (ms)
    pub const NOTIFICATION_MS: u64 = 3000;
    /// Particle lifetime (ms)
    pub const PARTICLE_LIFETIME_MS: u64 = 600;
    /// Score popup lifetime (ms)
    pub const SCORE_POPUP_MS: u64 = 1000;
    /// Most game time a single advance simulates (ms)
    pub const MAX_CATCH_UP_MS: u64 = 10_000;

    /// Spawn period: 1000ms minus 50ms per level, never below 300ms
    pub const SPAWN_BASE_INTERVAL_MS: u64 = 1000;
    pub const SPAWN_INTERVAL_STEP_MS: u64 = 50;
    pub const SPAWN_MIN_INTERVAL_MS: u64 = 300;
    /// Live bubble cap is this plus the level
    pub const BASE_POPULATION_CAP: usize = 8;

    /// Bubble diameter range [40, 80)
    pub const BUBBLE_MIN_SIZE: f32 = 40.0;
    pub const BUBBLE_SIZE_RANGE: f32 = 40.0;
    /// Fall speed range [1, 3) units per tick
    pub const BUBBLE_MIN_SPEED: f32 = 1.0;
    pub const BUBBLE_SPEED_RANGE: f32 = 2.0;

    /// Spawn chances
    pub const BONUS_CHANCE: f64 = 0.10;
    pub const BOMB_CHANCE: f64 = 0.05;
    /// Kind rolls below this (and not bonus) are bombs
    pub const BOMB_THRESHOLD: f64 = 0.15;
    pub const BONUS_POINTS: i64 = 50;
    pub const BOMB_POINTS: i64 = -20;

    /// Multiplier grows by one every this many combo pops
    pub const COMBO_STEP: u32 = 5;
    /// Score a level must exceed, per level
    pub const POINTS_PER_LEVEL: u64 = 500;

    /// Recent pop timestamps kept for Speed Demon
    pub const RECENT_POP_CAPACITY: usize = 10;
    pub const SPEED_DEMON_WINDOW_MS: u64 = 5000;
    pub const SPEED_DEMON_POPS: usize = 10;

    /// Particles per pop burst
    pub const PARTICLES_PER_POP: usize = 8;
    pub const BONUS_PARTICLES: usize = 12;
    /// Particle velocity spread (units/s, centred on zero)
    pub const PARTICLE_SPREAD: f32 = 200.0;
}
