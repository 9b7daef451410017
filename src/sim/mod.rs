//! Deterministic game session engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clock supplied by the host, timers are deadlines on it
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod achievements;
pub mod events;
pub mod motion;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod timers;

pub use achievements::{ALL_ACHIEVEMENTS, AchievementDef, AchievementId, Achievements, PopStats};
pub use events::{EventQueue, GameEvent};
pub use scoring::{apply_delta, combo_multiplier, level_after};
pub use session::{PopOutcome, Session};
pub use snapshot::Snapshot;
pub use spawn::{RandomSource, population_cap, spawn_bubble, spawn_interval_ms};
pub use state::{Bubble, BubbleColor, BubbleKind, GameState, Particle, PlayArea, PopRing, SessionPhase};
pub use timers::{TimerKind, Timers};
