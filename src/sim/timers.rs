//! Deadline bookkeeping for the session's timers
//!
//! Each timer class holds at most one pending deadline on the session clock.
//! Cancelling is clearing the deadline.

/// Timer classes, in tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Spawn,
    Motion,
    ComboDecay,
    NotificationDismiss,
}

#[derive(Debug, Clone, Default)]
pub struct Timers {
    pub spawn: Option<u64>,
    pub motion: Option<u64>,
    pub combo_decay: Option<u64>,
    pub notification_dismiss: Option<u64>,
    /// Remaining combo window while paused
    pub suspended_combo: Option<u64>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest deadline at or before `now`
    pub fn next_due(&self, now: u64) -> Option<(TimerKind, u64)> {
        [
            (TimerKind::Spawn, self.spawn),
            (TimerKind::Motion, self.motion),
            (TimerKind::ComboDecay, self.combo_decay),
            (TimerKind::NotificationDismiss, self.notification_dismiss),
        ]
        .into_iter()
        .filter_map(|(kind, at)| at.filter(|&t| t <= now).map(|t| (kind, t)))
        // min_by_key keeps the first of equal keys, so ties follow array order
        .min_by_key(|&(_, at)| at)
    }

    pub fn slot(&mut self, kind: TimerKind) -> &mut Option<u64> {
        match kind {
            TimerKind::Spawn => &mut self.spawn,
            TimerKind::Motion => &mut self.motion,
            TimerKind::ComboDecay => &mut self.combo_decay,
            TimerKind::NotificationDismiss => &mut self.notification_dismiss,
        }
    }

    /// Freeze the gameplay timers. Spawn and motion are cancelled outright;
    /// the combo window keeps its remaining time.
    pub fn suspend_gameplay(&mut self, now: u64) {
        self.spawn = None;
        self.motion = None;
        if let Some(at) = self.combo_decay.take() {
            self.suspended_combo = Some(at.saturating_sub(now));
        }
    }

    /// Re-arm a suspended combo window relative to `now`
    pub fn restore_combo(&mut self, now: u64) {
        if let Some(remaining) = self.suspended_combo.take() {
            self.combo_decay = Some(now + remaining);
        }
    }

    /// Push every pending deadline `by` ms later
    pub fn shift(&mut self, by: u64) {
        for at in [
            &mut self.spawn,
            &mut self.motion,
            &mut self.combo_decay,
            &mut self.notification_dismiss,
        ]
        .into_iter()
        .flatten()
        {
            *at = at.saturating_add(by);
        }
    }

    pub fn cancel_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_idle(&self) -> bool {
        self.spawn.is_none()
            && self.motion.is_none()
            && self.combo_decay.is_none()
            && self.notification_dismiss.is_none()
            && self.suspended_combo.is_none()
    }
}
