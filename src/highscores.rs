//! High score persistence
//!
//! A single integer, read once when a session is created and written every
//! time it is beaten.

use crate::persistence::KeyValueStore;

/// Best score ever reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "bubblePopHighScore";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Read from the store; absent or unparsable values count as 0
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(raw) => match parse_score(&raw) {
                Some(best) => {
                    log::info!("Loaded high score {}", best);
                    Self { best }
                }
                None => {
                    log::warn!("Ignoring malformed high score {:?}", raw);
                    Self::new()
                }
            },
            None => {
                log::info!("No high score found, starting fresh");
                Self::new()
            }
        }
    }

    /// Record `score`; persists and returns true if it beats the best
    pub fn submit(&mut self, score: u64, store: &mut dyn KeyValueStore) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Err(e) = store.set(Self::STORAGE_KEY, &score.to_string()) {
            log::warn!("High score {} not saved: {}", score, e);
        }
        true
    }
}

/// Decimal integer; negatives clamp to 0
fn parse_score(raw: &str) -> Option<u64> {
    let value: i64 = raw.trim().parse().ok()?;
    Some(value.max(0) as u64)
}
