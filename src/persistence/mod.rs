//! Durable high score stores
//!
//! - `FileStore`: JSON record on disk, written via tmp file + rename
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)
//!
//! Both read unreadable or missing data as 0 and never fail the game.

use crate::highscores::HighScoreStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::HighScoreStore;
    use crate::error::StoreError;
    use crate::highscores::HighScoreRecord;

    /// High score kept in a small JSON file
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
        cached: u64,
    }

    impl FileStore {
        /// Open (or lazily create) the store at `path`
        pub fn open(path: impl Into<PathBuf>) -> Self {
            let path = path.into();
            let cached = match Self::read(&path) {
                Ok(score) => score,
                Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => 0,
                Err(e) => {
                    log::warn!("Ignoring high score at {}: {}", path.display(), e);
                    0
                }
            };
            Self { path, cached }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read(path: &Path) -> Result<u64, StoreError> {
            let text = fs::read_to_string(path)?;
            HighScoreRecord::parse(&text)
                .map(|record| record.high_score)
                .ok_or_else(|| StoreError::Malformed(text.chars().take(32).collect()))
        }

        fn write(&self, score: u64) -> Result<(), StoreError> {
            if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })?;
            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, json)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

    impl HighScoreStore for FileStore {
        fn get(&self) -> u64 {
            self.cached
        }

        fn set(&mut self, score: u64) {
            self.cached = score;
            match self.write(score) {
                Ok(()) => log::debug!("High score {} saved", score),
                Err(e) => log::warn!("Failed to save high score: {}", e),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::HighScoreStore;
    use crate::highscores::HighScoreRecord;

    /// High score in browser LocalStorage, stored as a bare integer
    #[derive(Debug, Clone)]
    pub struct LocalStorageStore {
        key: String,
        cached: u64,
    }

    impl LocalStorageStore {
        pub const DEFAULT_KEY: &'static str = "dinoHighScore";

        pub fn open(key: &str) -> Self {
            let cached = Self::storage()
                .and_then(|s| s.get_item(key).ok().flatten())
                .and_then(|text| HighScoreRecord::parse(&text))
                .map(|r| r.high_score)
                .unwrap_or_else(|| {
                    log::info!("No high score found, starting fresh");
                    0
                });
            Self {
                key: key.to_string(),
                cached,
            }
        }

        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl HighScoreStore for LocalStorageStore {
        fn get(&self) -> u64 {
            self.cached
        }

        fn set(&mut self, score: u64) {
            self.cached = score;
            match Self::storage() {
                Some(storage) => {
                    if storage.set_item(&self.key, &score.to_string()).is_err() {
                        log::warn!("Failed to save high score");
                    }
                }
                None => log::warn!("LocalStorage unavailable, high score not saved"),
            }
        }
    }
}
