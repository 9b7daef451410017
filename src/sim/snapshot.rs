//! Read-only view of a session for the renderer and HUD

use serde::Serialize;

use super::achievements::{ALL_ACHIEVEMENTS, AchievementDef, AchievementId};
use super::session::Session;
use super::state::{BubbleKind, PlayArea, SessionPhase};
use crate::consts::POINTS_PER_LEVEL;

#[derive(Debug, Clone, Serialize)]
pub struct BubbleView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub kind: BubbleKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: &'static str,
    /// Remaining life, 1.0 fresh to 0.0 expired
    pub life: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopupView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// "+12", "-20"
    pub text: String,
    pub kind: BubbleKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievementView {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub unlocked: bool,
}

impl AchievementView {
    fn new(def: &AchievementDef, unlocked: bool) -> Self {
        Self {
            id: def.id,
            title: def.title,
            description: def.description,
            icon: def.icon,
            unlocked,
        }
    }
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub score: u64,
    pub high_score: u64,
    pub combo: u32,
    pub multiplier: u32,
    pub level: u32,
    /// `score % 500`, for the progress bar
    pub level_progress: u64,
    pub points_per_level: u64,
    pub total_popped: u64,
    /// Show "Resume Game" rather than "Start Game"
    pub can_resume: bool,
    pub play_area: Option<PlayArea>,
    pub bubbles: Vec<BubbleView>,
    pub particles: Vec<ParticleView>,
    pub popups: Vec<PopupView>,
    pub achievements: Vec<AchievementView>,
    pub notification: Option<AchievementView>,
}

/// Signed display text for a score delta
pub fn delta_text(delta: i64) -> String {
    if delta > 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}

impl Session {
    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        let lifetime = self.config().particle_lifetime_ms.max(1) as f32;

        Snapshot {
            phase: state.phase,
            score: state.score,
            high_score: state.high_score.best,
            combo: state.combo,
            multiplier: self.multiplier(),
            level: state.level,
            level_progress: state.level_progress(),
            points_per_level: POINTS_PER_LEVEL,
            total_popped: state.total_popped,
            can_resume: self.can_resume(),
            play_area: state.play_area,
            bubbles: state
                .bubbles
                .iter()
                .map(|b| BubbleView {
                    id: b.id,
                    x: b.pos.x,
                    y: b.pos.y,
                    size: b.size,
                    primary: b.color.primary,
                    secondary: b.color.secondary,
                    kind: b.kind,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    x: p.pos.x,
                    y: p.pos.y,
                    vx: p.vel.x,
                    vy: p.vel.y,
                    color: p.color,
                    life: (1.0 - p.age_ms as f32 / lifetime).clamp(0.0, 1.0),
                })
                .collect(),
            popups: state
                .popups
                .iter()
                .map(|p| PopupView {
                    id: p.id,
                    x: p.pos.x,
                    y: p.pos.y,
                    text: delta_text(p.delta),
                    kind: p.kind,
                })
                .collect(),
            achievements: ALL_ACHIEVEMENTS
                .iter()
                .map(|def| AchievementView::new(def, self.achievements.is_unlocked(def.id)))
                .collect(),
            notification: self.notification().map(|def| AchievementView::new(def, true)),
        }
    }
}
