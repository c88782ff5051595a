//! Errors for the host-facing edges (tuning files, high-score storage).
//!
//! The simulation itself has no error paths.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuningError {
    #[error("Failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("High score storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed high score record: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unrecognized high score data: {0:?}")]
    Malformed(String),
}
