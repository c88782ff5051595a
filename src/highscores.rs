//! High score storage
//!
//! The simulation reads and writes a single best score through
//! `HighScoreStore`; the host decides where it actually lives.

use serde::{Deserialize, Serialize};

/// Durable home of the best score
pub trait HighScoreStore {
    /// Stored best score; absent or unreadable data is 0
    fn get(&self) -> u64;
    /// Persist a new best score
    fn set(&mut self, score: u64);
}

/// On-disk shape of the high score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

impl HighScoreRecord {
    /// Parse a stored record, accepting the bare integer form as well
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Ok(record) = serde_json::from_str::<HighScoreRecord>(text) {
            return Some(record);
        }
        text.parse::<u64>()
            .ok()
            .map(|high_score| Self { high_score })
    }
}

/// Non-durable store, for tests and hosts without storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    high_score: u64,
    /// Number of `set` calls seen
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(high_score: u64) -> Self {
        Self {
            high_score,
            writes: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn get(&self) -> u64 {
        self.high_score
    }

    fn set(&mut self, score: u64) {
        self.high_score = score;
        self.writes += 1;
    }
}
