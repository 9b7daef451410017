//! Session lifecycle and timer-driven game loop
//!
//! A `Session` owns the game state, its timer deadlines, the RNG and the
//! high-score store. The host feeds it a millisecond clock: `advance(now)`
//! fires every timer due by `now` in deadline order, `pop(id, now)` resolves
//! a click. Each call runs to completion before the next, so no callback
//! ever sees a half-applied update.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::achievements::{AchievementDef, AchievementId, Achievements, PopStats};
use super::events::{EventQueue, GameEvent};
use super::motion::{advance_bubbles, advance_particles, emit_burst};
use super::scoring::{apply_delta, combo_multiplier, level_after};
use super::spawn::{population_cap, spawn_bubble, spawn_interval_ms};
use super::state::{BubbleKind, GameState, PlayArea, ScorePopup, SessionPhase};
use super::timers::{TimerKind, Timers};
use crate::consts::*;
use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::settings::{GameConfig, NotificationPolicy};

/// Result of a successful pop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopOutcome {
    pub bubble_id: u32,
    /// Points after the combo multiplier (negative for bombs)
    pub score_delta: i64,
    pub new_score: u64,
    pub new_combo: u32,
    pub multiplier: u32,
    pub leveled_up: bool,
    pub new_level: u32,
    /// Achievements unlocked by this pop, in evaluation order
    pub unlocked: Vec<AchievementId>,
}

pub struct Session {
    /// Gameplay state (public for hosts that render directly)
    pub state: GameState,
    pub achievements: Achievements,
    config: GameConfig,
    timers: Timers,
    rng: Pcg32,
    store: Box<dyn KeyValueStore>,
    /// Pending achievement notifications; the head is the visible one
    notifications: VecDeque<AchievementId>,
    events: EventQueue,
    /// Session clock (ms), never moves backwards
    clock: u64,
}

impl Session {
    /// Create an idle session. The high score is read from `store` here and
    /// nowhere else.
    pub fn new(area: PlayArea, config: GameConfig, seed: u64, store: Box<dyn KeyValueStore>) -> Self {
        let high_score = HighScore::load(store.as_ref());
        log::info!("Session created with seed {} ({}x{})", seed, area.width, area.height);
        Self {
            state: GameState::new(area, high_score),
            achievements: Achievements::new(),
            config: config.sanitized(),
            timers: Timers::new(),
            rng: Pcg32::seed_from_u64(seed),
            store,
            notifications: VecDeque::new(),
            events: EventQueue::new(),
            clock: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn is_active(&self) -> bool {
        self.state.phase == SessionPhase::Active
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Start label hint: a non-zero score means start resumes
    pub fn can_resume(&self) -> bool {
        self.state.score > 0
    }

    /// Multiplier the current combo earns
    pub fn multiplier(&self) -> u32 {
        combo_multiplier(self.state.combo)
    }

    // === Lifecycle ===

    /// Begin or resume play.
    ///
    /// With a zero score the run is reinitialised first; otherwise progress
    /// (score, level, combo, bubbles) carries over.
    pub fn start(&mut self, now: u64) {
        match self.state.phase {
            SessionPhase::Active => return,
            SessionPhase::Ended => {
                log::warn!("start() after shutdown ignored");
                return;
            }
            SessionPhase::Idle | SessionPhase::Paused => {}
        }
        self.advance(now);
        let now = self.clock;

        let resumed = self.state.score > 0;
        if !resumed {
            self.state.reset_run();
            self.timers.suspended_combo = None;
        }

        self.state.phase = SessionPhase::Active;
        self.timers.restore_combo(now);
        self.timers.motion = Some(now + self.config.motion_tick_ms);

        self.try_spawn();
        self.timers.spawn = Some(now + spawn_interval_ms(self.state.level));

        self.events.push(GameEvent::Started { resumed });
        if resumed {
            log::info!("Resumed at score {} (level {})", self.state.score, self.state.level);
        } else {
            log::info!("New run started");
        }
    }

    /// Freeze play; nothing is cleared
    pub fn pause(&mut self, now: u64) {
        if self.state.phase != SessionPhase::Active {
            return;
        }
        self.advance(now);
        self.timers.suspend_gameplay(self.clock);
        self.state.phase = SessionPhase::Paused;
        self.events.push(GameEvent::Paused);
        log::info!("Paused at score {}", self.state.score);
    }

    /// New game: back to Idle with a zeroed run, so the next start reinitialises
    pub fn reset(&mut self, now: u64) {
        if self.state.phase == SessionPhase::Ended {
            return;
        }
        self.advance(now);
        self.timers.suspend_gameplay(self.clock);
        self.timers.suspended_combo = None;
        self.state.reset_run();
        self.state.phase = SessionPhase::Idle;
        log::info!("Run reset");
    }

    /// Tear down: cancel every timer and drop live entities. Terminal.
    pub fn shutdown(&mut self) {
        if self.state.phase == SessionPhase::Ended {
            return;
        }
        self.timers.cancel_all();
        self.notifications.clear();
        self.state.bubbles.clear();
        self.state.particles.clear();
        self.state.popups.clear();
        self.state.play_area = None;
        self.state.phase = SessionPhase::Ended;
        self.events.push(GameEvent::Ended);
        log::info!(
            "Session ended (score {}, high score {})",
            self.state.score,
            self.state.high_score.best
        );
    }

    /// Update play-area bounds (window resize)
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.state.phase == SessionPhase::Ended {
            return;
        }
        let area = PlayArea::new(width, height);
        if !area.is_usable() {
            log::warn!("Play area {}x{} is empty, spawning suspended", width, height);
        }
        self.state.play_area = Some(area);
    }

    // === Clock ===

    /// Fire every timer due at or before `now`
    pub fn advance(&mut self, now: u64) {
        if self.state.phase == SessionPhase::Ended {
            return;
        }
        let now = self.catch_up(now);

        while let Some((kind, at)) = self.timers.next_due(now) {
            *self.timers.slot(kind) = None;
            self.clock = at;
            self.fire(kind, at);
        }

        self.clock = now;
        self.state.popups.retain(|p| p.expires_at > now);
    }

    /// Clamp how much game time one call may simulate; returns the target clock
    fn catch_up(&mut self, now: u64) -> u64 {
        let now = now.max(self.clock);
        let gap = now - self.clock;
        if gap > self.config.max_catch_up_ms {
            let skipped = gap - self.config.max_catch_up_ms;
            log::debug!("Clock jumped {}ms, skipping {}ms", gap, skipped);
            self.timers.shift(skipped);
            self.clock += skipped;
        }
        now
    }

    fn fire(&mut self, kind: TimerKind, at: u64) {
        match kind {
            TimerKind::Spawn => {
                if self.is_active() {
                    self.try_spawn();
                    self.timers.spawn = Some(at + spawn_interval_ms(self.state.level));
                }
            }
            TimerKind::Motion => {
                if self.is_active() {
                    self.motion_tick();
                    self.timers.motion = Some(at + self.config.motion_tick_ms);
                }
            }
            TimerKind::ComboDecay => {
                if self.state.combo > 0 {
                    self.state.combo = 0;
                    self.events.push(GameEvent::ComboReset);
                }
            }
            TimerKind::NotificationDismiss => self.dismiss_front(at),
        }
    }

    // === Spawner / motion ===

    /// One spawn attempt. Returns the new bubble's id, or None when the
    /// population cap is reached or the play area is unusable.
    pub fn try_spawn(&mut self) -> Option<u32> {
        let area = self.state.play_area.filter(PlayArea::is_usable)?;
        if self.state.bubbles.len() >= population_cap(self.state.level) {
            return None;
        }
        let id = self.state.next_entity_id();
        let bubble = spawn_bubble(id, area, &mut self.rng)?;
        log::debug!("Spawned {:?} bubble {} ({} pts)", bubble.kind, id, bubble.points);
        self.events.push(GameEvent::BubbleSpawned {
            id,
            kind: bubble.kind,
        });
        self.state.bubbles.push(bubble);
        Some(id)
    }

    fn motion_tick(&mut self) {
        let Some(area) = self.state.play_area else {
            return;
        };
        for id in advance_bubbles(&mut self.state.bubbles, area.height) {
            self.events.push(GameEvent::BubbleMissed { id });
        }
        advance_particles(
            &mut self.state.particles,
            self.config.motion_tick_ms,
            self.config.particle_lifetime_ms,
        );
    }

    // === Pop resolver ===

    /// Resolve a click on bubble `id`. None if the session is not active or
    /// the bubble is gone.
    pub fn pop(&mut self, id: u32, now: u64) -> Option<PopOutcome> {
        if !self.is_active() {
            log::debug!("Pop of {} ignored ({:?})", id, self.state.phase);
            return None;
        }
        self.advance(now);
        let now = self.clock;

        let Some(bubble) = self.state.take_bubble(id) else {
            log::debug!("Pop of missing bubble {}", id);
            return None;
        };

        self.state.recent_pops.record(now);

        self.state.combo += 1;
        let multiplier = combo_multiplier(self.state.combo);
        let score_delta = bubble.points * i64::from(multiplier);
        self.state.score = apply_delta(self.state.score, score_delta);
        self.state.total_popped += 1;

        self.events.push(GameEvent::BubblePopped {
            id,
            kind: bubble.kind,
            delta: score_delta,
            combo: self.state.combo,
            multiplier,
        });

        if self.state.high_score.submit(self.state.score, self.store.as_mut()) {
            self.events.push(GameEvent::HighScore {
                score: self.state.score,
            });
        }

        let previous_level = self.state.level;
        self.state.level = level_after(previous_level, self.state.score, self.config.level_up_rule);
        let leveled_up = self.state.level > previous_level;
        if leveled_up {
            log::info!("Level up: {} -> {}", previous_level, self.state.level);
            self.events.push(GameEvent::LevelUp {
                level: self.state.level,
            });
        }

        self.timers.combo_decay = Some(now + self.config.combo_window_ms);

        let stats = PopStats {
            score: self.state.score,
            combo: self.state.combo,
            total_popped: self.state.total_popped,
        };
        let unlocked = self
            .achievements
            .evaluate(&stats, &self.state.recent_pops, now);
        for &achievement in &unlocked {
            self.notify(achievement, now);
        }

        if self.config.particles {
            let count = if bubble.kind == BubbleKind::Bonus {
                BONUS_PARTICLES
            } else {
                PARTICLES_PER_POP
            };
            emit_burst(
                &mut self.state.particles,
                bubble.center(),
                bubble.color.primary,
                count,
                &mut self.rng,
            );
        }
        let popup_id = self.state.next_entity_id();
        self.state.popups.push(ScorePopup {
            id: popup_id,
            pos: bubble.center(),
            delta: score_delta,
            kind: bubble.kind,
            expires_at: now + self.config.score_popup_ms,
        });

        Some(PopOutcome {
            bubble_id: id,
            score_delta,
            new_score: self.state.score,
            new_combo: self.state.combo,
            multiplier,
            leveled_up,
            new_level: self.state.level,
            unlocked,
        })
    }

    // === Notifications ===

    fn notify(&mut self, id: AchievementId, now: u64) {
        log::info!("Achievement unlocked: {} ({})", id.def().title, id.as_str());
        self.events.push(GameEvent::AchievementUnlocked { id });

        match self.config.notification_policy {
            NotificationPolicy::Queue => {
                self.notifications.push_back(id);
                if self.notifications.len() == 1 {
                    self.timers.notification_dismiss = Some(now + self.config.notification_ms);
                }
            }
            NotificationPolicy::LatestOnly => {
                self.notifications.clear();
                self.notifications.push_back(id);
                self.timers.notification_dismiss = Some(now + self.config.notification_ms);
            }
        }
    }

    fn dismiss_front(&mut self, now: u64) {
        if let Some(id) = self.notifications.pop_front() {
            self.events.push(GameEvent::NotificationDismissed { id });
        }
        self.timers.notification_dismiss = if self.notifications.is_empty() {
            None
        } else {
            Some(now + self.config.notification_ms)
        };
    }

    /// Visible achievement notification, if any
    pub fn notification(&self) -> Option<&'static AchievementDef> {
        self.notifications.front().map(|id| id.def())
    }

    /// Notifications waiting, including the visible one
    pub fn pending_notifications(&self) -> impl Iterator<Item = AchievementId> + '_ {
        self.notifications.iter().copied()
    }

    /// Close the visible notification early (user clicked it)
    pub fn dismiss_notification(&mut self) {
        if self.state.phase != SessionPhase::Ended {
            self.dismiss_front(self.clock);
        }
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }
}
