//! Browser entry points (wasm32 only)
//!
//! The page owns rendering and input. It calls `frame()` from
//! `requestAnimationFrame`, draws the returned snapshot, and forwards clicks
//! on a bubble element to `pop(id)`.

use wasm_bindgen::prelude::*;

use crate::persistence::LocalStore;
use crate::platform::{init_logging, now_ms};
use crate::settings::GameConfig;
use crate::sim::{PlayArea, Session};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    init_logging();
    log::info!("Bubble Pop starting...");
}

/// A game bound to `window.localStorage` and `Date.now()`
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
}

#[wasm_bindgen]
impl WebGame {
    /// `config_json` may be omitted or partial
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, config_json: Option<String>) -> WebGame {
        let config = GameConfig::from_json_or_default(config_json.as_deref());
        let seed = now_ms();
        let mut session = Session::new(
            PlayArea::new(width, height),
            config,
            seed,
            Box::new(LocalStore::new()),
        );
        // Align the session clock with wall time so the first frame is not a jump
        session.advance(seed);
        WebGame { session }
    }

    pub fn start(&mut self) {
        self.session.start(now_ms());
    }

    pub fn pause(&mut self) {
        self.session.pause(now_ms());
    }

    pub fn reset(&mut self) {
        self.session.reset(now_ms());
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(width, height);
    }

    /// Pop attempt from a click; returns the outcome JSON or `null`
    pub fn pop(&mut self, id: u32) -> String {
        let outcome = self.session.pop(id, now_ms());
        to_json(&outcome)
    }

    /// Advance to now and return the snapshot JSON
    pub fn frame(&mut self) -> String {
        self.session.advance(now_ms());
        to_json(&self.session.snapshot())
    }

    /// Events since the last call, as a JSON array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> String {
        to_json(&self.session.drain_events())
    }

    #[wasm_bindgen(js_name = dismissNotification)]
    pub fn dismiss_notification(&mut self) {
        self.session.dismiss_notification();
    }

    /// Stop all timers (page unload)
    pub fn shutdown(&mut self) {
        self.session.shutdown();
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Snapshot serialization failed: {}", e);
            "null".to_string()
        }
    }
}
