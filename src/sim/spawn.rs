//! Bubble spawning
//!
//! `spawn_bubble` is pure apart from the random source it is handed, so a
//! scripted source pins the exact bubble that comes out.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{BOMB_COLOR, BONUS_COLOR, BUBBLE_COLORS, Bubble, BubbleKind, PlayArea};
use crate::consts::*;

/// Source of uniform draws in `[0, 1)`
pub trait RandomSource {
    fn unit(&mut self) -> f64;
}

impl RandomSource for Pcg32 {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Milliseconds between periodic spawns at a level
pub fn spawn_interval_ms(level: u32) -> u64 {
    let step = u64::from(level).saturating_mul(SPAWN_INTERVAL_STEP_MS);
    SPAWN_BASE_INTERVAL_MS
        .saturating_sub(step)
        .max(SPAWN_MIN_INTERVAL_MS)
}

/// Live bubble count at which spawn attempts stop
pub fn population_cap(level: u32) -> usize {
    BASE_POPULATION_CAP + level as usize
}

/// Map a kind roll to a bubble kind (bonus range first, then bomb)
pub fn kind_for_roll(roll: f64) -> BubbleKind {
    if roll < BONUS_CHANCE {
        BubbleKind::Bonus
    } else if roll < BOMB_THRESHOLD {
        BubbleKind::Bomb
    } else {
        BubbleKind::Normal
    }
}

/// Base point value; normal bubbles are worth more the bigger they are
pub fn points_for(kind: BubbleKind, size: f32) -> i64 {
    match kind {
        BubbleKind::Bonus => BONUS_POINTS,
        BubbleKind::Bomb => BOMB_POINTS,
        BubbleKind::Normal => (size / 8.0).floor() as i64 + 5,
    }
}

/// Build a bubble that fits inside `area`.
///
/// Draw order: size, color, kind, x, y, speed. Returns `None` when the area
/// has no usable extent.
pub fn spawn_bubble<R: RandomSource + ?Sized>(
    id: u32,
    area: PlayArea,
    rng: &mut R,
) -> Option<Bubble> {
    if !area.is_usable() {
        return None;
    }

    let size = BUBBLE_MIN_SIZE + rng.unit() as f32 * BUBBLE_SIZE_RANGE;
    let palette_index =
        ((rng.unit() * BUBBLE_COLORS.len() as f64) as usize).min(BUBBLE_COLORS.len() - 1);
    let kind = kind_for_roll(rng.unit());
    let x = rng.unit() as f32 * (area.width - size).max(0.0);
    let y = rng.unit() as f32 * (area.height - size).max(0.0);
    let speed = BUBBLE_MIN_SPEED + rng.unit() as f32 * BUBBLE_SPEED_RANGE;

    let color = match kind {
        BubbleKind::Bonus => BONUS_COLOR,
        BubbleKind::Bomb => BOMB_COLOR,
        BubbleKind::Normal => BUBBLE_COLORS[palette_index],
    };

    Some(Bubble {
        id,
        pos: Vec2::new(x, y),
        size,
        speed,
        color,
        points: points_for(kind, size),
        kind,
    })
}
