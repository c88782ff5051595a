//! Outward notifications from the simulation
//!
//! Hosts react to these (overlays, CSS classes, sounds) instead of the sim
//! reaching into any global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Something the host may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run started (from idle or after game over)
    Started,
    /// The actor jumped; `jump` is 1 for the ground jump, 2 for the double
    Jumped { jump: u32 },
    /// The actor touched down at `feet`
    Landed { feet: Vec2 },
    /// Night mode latched on for this run
    NightModeStarted,
    /// The persisted best score went up
    HighScoreRaised { high_score: u64 },
    AutopilotToggled { enabled: bool },
    /// Terminal: the actor hit an obstacle
    GameOver { score: u64, high_score: u64 },
}

/// Receiver for simulation events
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discards everything
impl EventSink for () {
    fn emit(&mut self, _event: GameEvent) {}
}
