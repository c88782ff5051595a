//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (debounced into intents)
//! - The wasm32 host facade driven by `requestAnimationFrame`

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{InputLayer, Key};
