//! Game balance and field geometry
//!
//! Every constant the runner uses lives here so a host can inject a
//! different balance (or load one from JSON) without touching the sim.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TuningError;
use crate::sim::Insets;

/// Tunable game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Height of the ground strip at the bottom of the field
    pub ground_height: f32,

    // === Actor physics ===
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_impulse: f32,
    /// Gravity multiplier while floating down
    pub float_gravity_factor: f32,
    pub max_jumps: u32,
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    /// Hitbox inset from the actor's sprite bounds
    pub hitbox_inset: Insets,

    // === Run pacing ===
    pub initial_speed: f32,
    pub speed_increment: f32,
    pub max_speed: f32,
    pub score_per_tick: f64,
    pub night_mode_threshold: f64,

    // === Obstacles ===
    /// Per-tick spawn probability, multiplied by current speed
    pub obstacle_spawn_rate: f64,
    /// Minimum distance from the last spawn before another may appear
    pub obstacle_min_gap: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,

    // === Autopilot ===
    pub autopilot_interval_ticks: u32,
    /// Jump once the nearest obstacle is this close to the actor's front edge
    pub autopilot_trigger_distance: f32,

    // === Effects ===
    pub particle_gravity: f32,
    pub dust_count: u32,
    pub dust_life: u32,
    pub trail_chance: f64,
    pub trail_life: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 1200.0,
            field_height: 300.0,
            ground_height: 30.0,

            gravity: 0.5,
            jump_impulse: -14.0,
            float_gravity_factor: 0.25,
            max_jumps: 2,
            actor_x: 100.0,
            actor_width: 60.0,
            actor_height: 60.0,
            hitbox_inset: Insets {
                left: 8.0,
                right: 8.0,
                top: 2.0,
                bottom: 4.0,
            },

            initial_speed: 1.5,
            speed_increment: 0.002,
            max_speed: 8.0,
            score_per_tick: 0.1,
            night_mode_threshold: 700.0,

            obstacle_spawn_rate: 0.007,
            obstacle_min_gap: 300.0,
            obstacle_width: 20.0,
            obstacle_height: 30.0,

            autopilot_interval_ticks: 2,
            autopilot_trigger_distance: 6.0,

            particle_gravity: 0.1,
            dust_count: 8,
            dust_life: 30,
            trail_chance: 0.3,
            trail_life: 20,
        }
    }
}

impl Tuning {
    /// Y coordinate of the ground surface
    #[inline]
    pub fn ground_top(&self) -> f32 {
        self.field_height - self.ground_height
    }

    /// Resting y of the actor's top edge
    #[inline]
    pub fn actor_ground_y(&self) -> f32 {
        self.ground_top() - self.actor_height
    }

    /// Spawn y of an obstacle's top edge (obstacles sit on the ground)
    #[inline]
    pub fn obstacle_y(&self) -> f32 {
        self.ground_top() - self.obstacle_height
    }

    /// Parse a (possibly partial) JSON tuning; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject balances the sim cannot run sensibly
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: &str| Err(TuningError::Invalid(msg.to_string()));

        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            return invalid("field dimensions must be positive");
        }
        if self.ground_height < 0.0 || self.ground_height >= self.field_height {
            return invalid("ground must fit inside the field");
        }
        if self.gravity <= 0.0 {
            return invalid("gravity must be positive");
        }
        if self.jump_impulse >= 0.0 {
            return invalid("jump impulse must point up (negative)");
        }
        if !(0.0..=1.0).contains(&self.float_gravity_factor) {
            return invalid("float gravity factor must be within [0, 1]");
        }
        if self.max_jumps == 0 {
            return invalid("max_jumps must be at least 1");
        }
        if self.actor_width <= 0.0 || self.actor_height <= 0.0 {
            return invalid("actor dimensions must be positive");
        }
        if self.actor_ground_y() < 0.0 {
            return invalid("actor does not fit above the ground");
        }
        let inset = &self.hitbox_inset;
        if inset.left + inset.right >= self.actor_width
            || inset.top + inset.bottom >= self.actor_height
        {
            return invalid("hitbox inset consumes the whole actor");
        }
        if self.initial_speed <= 0.0 || self.max_speed < self.initial_speed {
            return invalid("speeds must satisfy 0 < initial_speed <= max_speed");
        }
        if self.speed_increment < 0.0 || self.score_per_tick <= 0.0 {
            return invalid("speed and score increments must not be negative");
        }
        if !(0.0..=1.0).contains(&self.obstacle_spawn_rate) {
            return invalid("obstacle spawn rate must be within [0, 1]");
        }
        if self.obstacle_width <= 0.0 || self.obstacle_height <= 0.0 {
            return invalid("obstacle dimensions must be positive");
        }
        // Spawns at the right edge must never start on top of the actor
        if self.actor_x + self.actor_width >= self.field_width {
            return invalid("actor must leave room at the right edge for spawns");
        }
        if self.autopilot_interval_ticks == 0 {
            return invalid("autopilot interval must be at least one tick");
        }
        if !(0.0..=1.0).contains(&self.trail_chance) {
            return invalid("trail chance must be within [0, 1]");
        }
        Ok(())
    }
}
