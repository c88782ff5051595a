//! Dino Dash - A side-scrolling dinosaur runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, run state)
//! - `platform`: Input debouncing and the browser host facade
//! - `persistence`: Durable high-score stores
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use error::{StoreError, TuningError};
pub use highscores::{HighScoreStore, MemoryStore};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Maximum wall time accepted per frame, to prevent spiral of death
    pub const MAX_FRAME_MS: f64 = 250.0;

    /// Maximum live particles (cosmetic only)
    pub const MAX_PARTICLES: usize = 256;
    /// Maximum queued intents between ticks
    pub const MAX_PENDING_INTENTS: usize = 16;
}
