//! The player's runner: vertical physics, jumps and the collision hitbox

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{Body, Rect};
use crate::tuning::Tuning;

/// Animation pose (renderer only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pose {
    Running,
    Jumping,
}

/// Result of one actor tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActorStep {
    Grounded,
    Airborne,
    /// Touched down this tick; carries the point under the actor's feet
    Landed { feet: Vec2 },
}

/// The player character
///
/// Holds body state only. Movement rules (gravity, impulse, jump count,
/// hitbox inset) are read from the `Tuning` passed to each call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub velocity_y: f32,
    pub airborne: bool,
    /// Jumps used since last touching the ground
    pub jump_count: u32,
    /// Resting y of the sprite's top edge
    pub ground_y: f32,
    /// Ticks since spawn, drives the leg cycle
    pub animation_frame: u64,
}

impl Actor {
    pub fn new(tuning: &Tuning) -> Self {
        let ground_y = tuning.actor_ground_y();
        Self {
            pos: Vec2::new(tuning.actor_x, ground_y),
            width: tuning.actor_width,
            height: tuning.actor_height,
            velocity_y: 0.0,
            airborne: false,
            jump_count: 0,
            ground_y,
            animation_frame: 0,
        }
    }

    /// Jump (or double-jump). Ignored once all jumps are spent.
    ///
    /// Returns the jump number used, if any.
    pub fn jump(&mut self, tuning: &Tuning) -> Option<u32> {
        if self.jump_count >= tuning.max_jumps {
            return None;
        }
        self.velocity_y = tuning.jump_impulse;
        self.airborne = true;
        self.jump_count += 1;
        Some(self.jump_count)
    }

    /// True when holding jump slows the fall: airborne and past the apex
    #[inline]
    pub fn is_floating(&self, floating_held: bool) -> bool {
        floating_held && self.airborne && self.velocity_y > 0.0
    }

    /// Integrate one tick of gravity (semi-implicit Euler) and clamp to ground
    pub fn tick(&mut self, tuning: &Tuning, floating_held: bool) -> ActorStep {
        let gravity = if self.is_floating(floating_held) {
            tuning.gravity * tuning.float_gravity_factor
        } else {
            tuning.gravity
        };

        self.velocity_y += gravity;
        self.pos.y += self.velocity_y;
        self.animation_frame += 1;

        if self.pos.y >= self.ground_y {
            let was_airborne = self.airborne;
            self.pos.y = self.ground_y;
            self.velocity_y = 0.0;
            self.airborne = false;
            self.jump_count = 0;

            if was_airborne {
                return ActorStep::Landed {
                    feet: Vec2::new(self.pos.x + self.width / 2.0, self.pos.y + self.height),
                };
            }
            return ActorStep::Grounded;
        }

        if self.airborne {
            ActorStep::Airborne
        } else {
            ActorStep::Grounded
        }
    }

    /// Collision rectangle: the solid body only, without tail and limbs
    pub fn hitbox(&self, tuning: &Tuning) -> Rect {
        self.bounds().inset(&tuning.hitbox_inset)
    }

    /// Sprite centre
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width, self.height) / 2.0
    }

    /// Right edge of the sprite (faces oncoming obstacles)
    #[inline]
    pub fn front(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn pose(&self) -> Pose {
        if self.airborne {
            Pose::Jumping
        } else {
            Pose::Running
        }
    }
}

impl Body for Actor {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }
}
