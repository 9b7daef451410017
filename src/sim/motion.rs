//! Fixed-tick motion for bubbles and particles

use glam::Vec2;

use super::spawn::RandomSource;
use super::state::{Bubble, MAX_PARTICLES, Particle};
use crate::consts::*;

/// Move every bubble down by its speed, then drop the ones that left the
/// play area. Returns the ids of the dropped (missed) bubbles.
pub fn advance_bubbles(bubbles: &mut Vec<Bubble>, area_height: f32) -> Vec<u32> {
    for bubble in bubbles.iter_mut() {
        bubble.pos.y += bubble.speed;
    }

    let mut missed = Vec::new();
    bubbles.retain(|b| {
        let inside = b.pos.y < area_height;
        if !inside {
            missed.push(b.id);
        }
        inside
    });
    missed
}

/// Integrate particles over one tick and expire the old ones
pub fn advance_particles(particles: &mut Vec<Particle>, tick_ms: u64, lifetime_ms: u64) {
    let dt = tick_ms as f32 / 1000.0;
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.age_ms += tick_ms;
    }
    particles.retain(|p| p.age_ms < lifetime_ms);
}

/// Burst of particles from a popped bubble's centre
pub fn emit_burst<R: RandomSource + ?Sized>(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    color: &'static str,
    count: usize,
    rng: &mut R,
) {
    for _ in 0..count {
        if particles.len() >= MAX_PARTICLES {
            particles.remove(0);
        }
        let vel = Vec2::new(
            (rng.unit() as f32 - 0.5) * PARTICLE_SPREAD,
            (rng.unit() as f32 - 0.5) * PARTICLE_SPREAD,
        );
        particles.push(Particle {
            pos: origin,
            vel,
            color,
            age_ms: 0,
        });
    }
}
