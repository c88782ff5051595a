//! Raw key/pointer events → intents and hold flags
//!
//! Key repeat is debounced: one press yields at most one intent.

use crate::sim::{InputFlags, Intent};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    ArrowUp,
    Enter,
    /// God-mode toggle
    G,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Space" => Some(Key::Space),
            "ArrowUp" => Some(Key::ArrowUp),
            "Enter" | "NumpadEnter" => Some(Key::Enter),
            "KeyG" => Some(Key::G),
            _ => None,
        }
    }

    fn is_jump(self) -> bool {
        matches!(self, Key::Space | Key::ArrowUp)
    }
}

/// Tracks held keys between host events
#[derive(Debug, Clone, Default)]
pub struct InputLayer {
    space: bool,
    arrow_up: bool,
    enter: bool,
    g: bool,
}

impl InputLayer {
    pub fn new() -> Self {
        Self::default()
    }

    fn held_mut(&mut self, key: Key) -> &mut bool {
        match key {
            Key::Space => &mut self.space,
            Key::ArrowUp => &mut self.arrow_up,
            Key::Enter => &mut self.enter,
            Key::G => &mut self.g,
        }
    }

    /// A key went down. `running` selects between jump and restart.
    pub fn key_down(&mut self, key: Key, running: bool) -> Option<Intent> {
        let held = self.held_mut(key);
        if *held {
            // Auto-repeat
            return None;
        }
        *held = true;

        match key {
            Key::G => Some(Intent::ToggleAutopilot),
            k if k.is_jump() && running => Some(Intent::Jump),
            _ if !running => Some(Intent::Restart),
            _ => None,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        *self.held_mut(key) = false;
    }

    /// Tap or click anywhere on the play field
    pub fn pointer_down(&self, running: bool) -> Intent {
        if running { Intent::Jump } else { Intent::Restart }
    }

    /// Release everything (e.g. window lost focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn flags(&self) -> InputFlags {
        InputFlags {
            floating_held: self.space || self.arrow_up,
        }
    }
}
