//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod effects;
pub mod events;
pub mod obstacles;
pub mod rect;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorStep, Pose};
pub use autopilot::Autopilot;
pub use clock::Stepper;
pub use collision::{CollisionResult, first_hit};
pub use effects::{EffectPool, Particle, ParticleKind};
pub use events::{EventSink, GameEvent};
pub use obstacles::{Obstacle, ObstacleField};
pub use rect::{Body, Insets, Rect};
pub use state::{GamePhase, RunState, RunTick, SimRng};
pub use tick::{InputFlags, Intent, Simulation, Snapshot};
