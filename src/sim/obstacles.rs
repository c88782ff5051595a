//! Obstacle spawning, scrolling and culling

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionResult, first_hit};
use super::rect::{Body, Rect};
use crate::tuning::Tuning;

/// A ground obstacle. Only `x` changes after spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

impl Body for Obstacle {
    fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Live obstacles, in spawn order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    /// Whether a spawn at the right edge would keep the minimum gap to the
    /// most recent spawn
    pub fn can_spawn(&self, tuning: &Tuning) -> bool {
        match self.obstacles.last() {
            Some(last) => tuning.field_width - last.x > tuning.obstacle_min_gap,
            None => true,
        }
    }

    /// Spawn trial, scroll and cull. Returns the id of a new obstacle, if any.
    pub fn tick<R: Rng>(&mut self, tuning: &Tuning, speed: f32, rng: &mut R) -> Option<u32> {
        let chance = (tuning.obstacle_spawn_rate * speed as f64).clamp(0.0, 1.0);
        // Roll before the gap check so the stream does not depend on field layout
        let roll = rng.random_bool(chance);

        let spawned = if roll && self.can_spawn(tuning) {
            Some(self.spawn(tuning))
        } else {
            None
        };

        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
        self.obstacles.retain(|o| o.right() >= 0.0);

        spawned
    }

    /// Append an obstacle at the right edge, resting on the ground
    fn spawn(&mut self, tuning: &Tuning) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x: tuning.field_width,
            y: tuning.obstacle_y(),
            width: tuning.obstacle_width,
            height: tuning.obstacle_height,
        });
        log::trace!("Spawned obstacle {id}");
        id
    }

    /// Test `hitbox` against every live obstacle's full bounds
    pub fn collides_with(&self, hitbox: &Rect) -> Option<CollisionResult> {
        first_hit(hitbox, &self.obstacles)
    }

    /// Nearest obstacle still ahead of `x` (its right edge past `x`)
    pub fn nearest_ahead(&self, x: f32) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .filter(|o| o.right() > x)
            .min_by(|a, b| a.x.total_cmp(&b.x))
    }
}
