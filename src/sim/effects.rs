//! Cosmetic particles: landing dust and the jump trail
//!
//! Nothing here feeds back into the simulation.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::{Body, Rect};
use crate::consts::MAX_PARTICLES;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Dust,
    Trail,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Remaining life in 0..=1, for fading
    pub fn life_fraction(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

impl Body for Particle {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectPool {
    pub particles: Vec<Particle>,
}

impl EffectPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Puff of dust kicked up at `feet`
    pub fn spawn_landing_dust<R: Rng>(&mut self, tuning: &Tuning, feet: Vec2, rng: &mut R) {
        for _ in 0..tuning.dust_count {
            let particle = Particle {
                pos: Vec2::new(feet.x + rng.random_range(-10.0f32..10.0), feet.y),
                vel: Vec2::new(rng.random_range(-2.0f32..2.0), -rng.random_range(1.0f32..4.0)),
                life: tuning.dust_life,
                max_life: tuning.dust_life,
                size: rng.random_range(1.0f32..4.0),
                kind: ParticleKind::Dust,
            };
            self.push(particle);
        }
    }

    /// Maybe drop a trail particle behind an airborne actor
    pub fn maybe_spawn_trail<R: Rng>(&mut self, tuning: &Tuning, center: Vec2, rng: &mut R) {
        if !rng.random_bool(tuning.trail_chance) {
            return;
        }
        let particle = Particle {
            pos: center,
            vel: Vec2::new(-2.0, rng.random_range(-1.0f32..1.0)),
            life: tuning.trail_life,
            max_life: tuning.trail_life,
            size: rng.random_range(1.0f32..3.0),
            kind: ParticleKind::Trail,
        };
        self.push(particle);
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Move, age and cull particles
    pub fn tick(&mut self, tuning: &Tuning) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel.y += tuning.particle_gravity;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }
}
