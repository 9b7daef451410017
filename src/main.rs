//! Bubble Pop entry point
//!
//! The browser build is driven from JavaScript through `bubble_pop::web`.
//! Natively this runs a headless autoplay session as a smoke test.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bubble_pop::persistence::MemoryStore;
    use bubble_pop::sim::{GameEvent, PlayArea, Session};
    use bubble_pop::{GameConfig, platform};

    platform::init_logging();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(platform::now_ms);
    log::info!("Bubble Pop (native autoplay) starting with seed {}", seed);

    let mut session = Session::new(
        PlayArea::new(1280.0, 720.0),
        GameConfig::default(),
        seed,
        Box::new(MemoryStore::new()),
    );

    // Two minutes of play: click the lowest non-bomb bubble every 250ms,
    // taking a ten second break halfway through
    session.start(0);
    let mut missed = 0u32;
    let mut level_ups = 0u32;
    for now in (250..=120_000u64).step_by(250) {
        if now == 60_000 {
            session.pause(now);
        } else if now == 70_000 {
            session.start(now);
        }

        session.advance(now);
        let target = session
            .state
            .bubbles
            .iter()
            .filter(|b| b.points > 0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|b| b.id);
        if let Some(id) = target {
            session.pop(id, now);
        }

        for event in session.drain_events() {
            match event {
                GameEvent::BubbleMissed { .. } => missed += 1,
                GameEvent::LevelUp { .. } => level_ups += 1,
                GameEvent::AchievementUnlocked { id } => {
                    println!("  unlocked: {}", id.def().title);
                }
                _ => {}
            }
        }
    }

    let snap = session.snapshot();
    session.shutdown();

    println!("\nFinal score: {} (level {}, {} level-ups)", snap.score, snap.level, level_ups);
    println!("Bubbles popped: {}, missed: {}", snap.total_popped, missed);
    println!("High score: {}", snap.high_score);
    println!(
        "Achievements: {}/{}",
        snap.achievements.iter().filter(|a| a.unlocked).count(),
        snap.achievements.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
