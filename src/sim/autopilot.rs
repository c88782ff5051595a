//! Autopilot ("god mode") - jumps over obstacles on the player's behalf
//!
//! It only looks every few ticks, to feel like a player's reaction time,
//! and only considers the nearest obstacle ahead.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::obstacles::ObstacleField;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Autopilot {
    pub enabled: bool,
}

impl Autopilot {
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Decide whether to jump on this tick. Only consulted every
    /// `autopilot_interval_ticks`.
    pub fn wants_jump(
        &self,
        tuning: &Tuning,
        elapsed_ticks: u64,
        actor: &Actor,
        field: &ObstacleField,
    ) -> bool {
        if !self.enabled || !elapsed_ticks.is_multiple_of(tuning.autopilot_interval_ticks as u64) {
            return false;
        }
        if actor.airborne {
            return false;
        }

        field
            .nearest_ahead(actor.pos.x)
            .is_some_and(|o| o.x - actor.front() <= tuning.autopilot_trigger_distance)
    }
}
