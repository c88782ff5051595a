//! Browser host facade
//!
//! JavaScript owns the canvas and `requestAnimationFrame`; it forwards frame
//! times and key events here and draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use super::input::{InputLayer, Key};
use crate::persistence::LocalStorageStore;
use crate::sim::{GameEvent, Simulation};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Dino Dash starting...");
}

/// One game instance bound to a page
#[wasm_bindgen]
pub struct WebGame {
    sim: Simulation,
    input: InputLayer,
    events: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; `tuning_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str) -> Result<WebGame, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let seed = js_sys::Date::now() as u64;
        let store = LocalStorageStore::open(LocalStorageStore::DEFAULT_KEY);
        log::info!("Game initialized with seed: {}", seed);
        let sim = Simulation::new(tuning, seed, Box::new(store))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebGame {
            sim,
            input: InputLayer::new(),
            events: Vec::new(),
        })
    }

    /// Frame callback: run the fixed ticks covered by `elapsed_ms`
    pub fn frame(&mut self, elapsed_ms: f64) -> u32 {
        self.sim.set_flags(self.input.flags());
        self.sim.advance(elapsed_ms, &mut self.events)
    }

    /// Returns true if the key is handled (caller should preventDefault)
    pub fn key_down(&mut self, code: &str) -> bool {
        let Some(key) = Key::from_code(code) else {
            return false;
        };
        if let Some(intent) = self.input.key_down(key, self.sim.run().is_running()) {
            self.sim.push_intent(intent);
        }
        true
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.input.key_up(key);
        }
    }

    pub fn pointer_down(&mut self) {
        let intent = self.input.pointer_down(self.sim.run().is_running());
        self.sim.push_intent(intent);
    }

    /// Window blur: drop held keys so float does not stick
    pub fn blur(&mut self) {
        self.input.clear();
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.sim.snapshot()).unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {}", e);
            String::from("{}")
        })
    }

    /// Events since the last call, as a JSON array
    pub fn take_events_json(&mut self) -> String {
        let events = std::mem::take(&mut self.events);
        serde_json::to_string(&events).unwrap_or_else(|_| String::from("[]"))
    }
}
