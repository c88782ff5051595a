//! Fixed timestep simulation tick
//!
//! Core game loop that advances the run deterministically. Hosts queue
//! intents between ticks and read a `Snapshot` after them.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorStep};
use super::autopilot::Autopilot;
use super::clock::Stepper;
use super::effects::{EffectPool, Particle};
use super::events::{EventSink, GameEvent};
use super::obstacles::{Obstacle, ObstacleField};
use super::state::{GamePhase, RunState, SimRng};
use crate::consts::MAX_PENDING_INTENTS;
use crate::error::TuningError;
use crate::highscores::HighScoreStore;
use crate::tuning::Tuning;

/// One-shot player commands, applied at the start of the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Jump,
    Restart,
    ToggleAutopilot,
}

/// Continuous input state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFlags {
    /// A "hold to float" control is down
    pub floating_held: bool,
}

/// Read-only view for the renderer, taken between ticks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub run: RunState,
    pub actor: Actor,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub autopilot: bool,
    /// Actor is in a slowed fall (sprite tint)
    pub floating: bool,
}

/// The whole game: run state, actor, obstacles, effects and autopilot
pub struct Simulation {
    tuning: Tuning,
    run: RunState,
    actor: Actor,
    field: ObstacleField,
    effects: EffectPool,
    autopilot: Autopilot,
    flags: InputFlags,
    intents: VecDeque<Intent>,
    rng: SimRng,
    stepper: Stepper,
    store: Box<dyn HighScoreStore>,
}

impl Simulation {
    /// New game in the Idle phase; the high score comes from `store`.
    ///
    /// The tuning is validated here and fixed for the simulation's lifetime.
    pub fn new(
        tuning: Tuning,
        seed: u64,
        store: Box<dyn HighScoreStore>,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        let high_score = store.get();
        Ok(Self {
            run: RunState::new(&tuning, high_score),
            actor: Actor::new(&tuning),
            field: ObstacleField::new(),
            effects: EffectPool::new(),
            autopilot: Autopilot::default(),
            flags: InputFlags::default(),
            intents: VecDeque::new(),
            rng: SimRng::new(seed),
            stepper: Stepper::new(),
            store,
            tuning,
        })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    /// Mutable field access for hosts staging scenarios (tests, replays)
    pub fn field_mut(&mut self) -> &mut ObstacleField {
        &mut self.field
    }

    pub fn effects(&self) -> &EffectPool {
        &self.effects
    }

    pub fn autopilot_enabled(&self) -> bool {
        self.autopilot.enabled
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed
    }

    pub fn store(&self) -> &dyn HighScoreStore {
        self.store.as_ref()
    }

    /// Queue an intent for the next tick. Excess intents are dropped.
    pub fn push_intent(&mut self, intent: Intent) {
        if self.intents.len() < MAX_PENDING_INTENTS {
            self.intents.push_back(intent);
        } else {
            log::warn!("Intent queue full, dropping {:?}", intent);
        }
    }

    pub fn set_flags(&mut self, flags: InputFlags) {
        self.flags = flags;
    }

    /// Feed elapsed wall time; runs as many fixed ticks as it covers
    pub fn advance(&mut self, elapsed_ms: f64, sink: &mut dyn EventSink) -> u32 {
        let ticks = self.stepper.advance(elapsed_ms);
        for _ in 0..ticks {
            self.tick(sink);
        }
        ticks
    }

    /// Start over with a new seed (a plain restart keeps the RNG stream)
    pub fn restart_with_seed(&mut self, seed: u64, sink: &mut dyn EventSink) {
        self.rng = SimRng::new(seed);
        self.start(sink);
    }

    /// Advance one fixed timestep
    pub fn tick(&mut self, sink: &mut dyn EventSink) {
        self.apply_intents(sink);

        if !self.run.is_running() {
            return;
        }

        // 1. Score and pacing
        let run_tick = self.run.tick(&self.tuning);
        if run_tick.night_mode_started {
            log::debug!("Night mode at score {}", self.run.floored_score());
            sink.emit(GameEvent::NightModeStarted);
        }
        if let Some(high_score) = run_tick.high_score_raised {
            self.store.set(high_score);
            sink.emit(GameEvent::HighScoreRaised { high_score });
        }

        // 2. Autopilot decision
        if self
            .autopilot
            .wants_jump(&self.tuning, self.run.elapsed_ticks, &self.actor, &self.field)
        {
            self.jump(sink);
        }

        // 3. Actor physics; landing and airtime feed the effect pool
        match self.actor.tick(&self.tuning, self.flags.floating_held) {
            ActorStep::Landed { feet } => {
                self.effects
                    .spawn_landing_dust(&self.tuning, feet, &mut self.rng.effects);
                sink.emit(GameEvent::Landed { feet });
            }
            ActorStep::Airborne => {
                self.effects.maybe_spawn_trail(
                    &self.tuning,
                    self.actor.center(),
                    &mut self.rng.effects,
                );
            }
            ActorStep::Grounded => {}
        }

        // 4. Obstacles
        self.field
            .tick(&self.tuning, self.run.speed, &mut self.rng.spawns);

        // 5. Effects
        self.effects.tick(&self.tuning);

        // 6. Collision
        if let Some(hit) = self.field.collides_with(&self.actor.hitbox(&self.tuning)) {
            if self.run.end() {
                let score = self.run.floored_score();
                log::info!(
                    "Game over: hit obstacle {} at score {} (best {})",
                    hit.obstacle_id,
                    score,
                    self.run.high_score
                );
                sink.emit(GameEvent::GameOver {
                    score,
                    high_score: self.run.high_score,
                });
            }
        }
    }

    fn apply_intents(&mut self, sink: &mut dyn EventSink) {
        while let Some(intent) = self.intents.pop_front() {
            match intent {
                Intent::Jump => {
                    if self.run.is_running() {
                        self.jump(sink);
                    }
                }
                Intent::Restart => {
                    if !self.run.is_running() {
                        self.start(sink);
                    }
                }
                Intent::ToggleAutopilot => {
                    let enabled = self.autopilot.toggle();
                    log::info!("Autopilot: {}", enabled);
                    sink.emit(GameEvent::AutopilotToggled { enabled });
                }
            }
        }
    }

    fn jump(&mut self, sink: &mut dyn EventSink) {
        if let Some(jump) = self.actor.jump(&self.tuning) {
            sink.emit(GameEvent::Jumped { jump });
        }
    }

    /// Fresh run: Idle/Ended → Running
    fn start(&mut self, sink: &mut dyn EventSink) {
        self.run.reset(&self.tuning);
        self.actor = Actor::new(&self.tuning);
        self.field.clear();
        self.effects.clear();
        self.stepper.reset();
        log::info!("Run started (seed {}, best {})", self.rng.seed, self.run.high_score);
        sink.emit(GameEvent::Started);
    }

    pub fn phase(&self) -> GamePhase {
        self.run.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            run: self.run.clone(),
            actor: self.actor.clone(),
            obstacles: self.field.obstacles.clone(),
            particles: self.effects.particles.clone(),
            autopilot: self.autopilot.enabled,
            floating: self.actor.is_floating(self.flags.floating_held),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::sim::effects::ParticleKind;

    fn quiet() -> Tuning {
        Tuning {
            obstacle_spawn_rate: 0.0,
            ..Default::default()
        }
    }

    fn started(tuning: Tuning, seed: u64) -> Simulation {
        let mut sim = Simulation::new(tuning, seed, Box::new(MemoryStore::new())).unwrap();
        sim.push_intent(Intent::Restart);
        sim.tick(&mut ());
        sim
    }

    fn place_obstacle(sim: &mut Simulation, x: f32) {
        let y = sim.tuning().obstacle_y();
        let (width, height) = (sim.tuning().obstacle_width, sim.tuning().obstacle_height);
        sim.field_mut().obstacles.push(Obstacle {
            id: 1000,
            x,
            y,
            width,
            height,
        });
    }

    #[test]
    fn test_rejects_invalid_tuning() {
        let tuning = Tuning {
            trail_chance: 1.5,
            ..Default::default()
        };
        let result = Simulation::new(tuning, 1, Box::new(MemoryStore::new()));
        assert!(matches!(result, Err(TuningError::Invalid(_))));

        let tuning = Tuning {
            obstacle_spawn_rate: -0.1,
            ..Default::default()
        };
        assert!(Simulation::new(tuning, 1, Box::new(MemoryStore::new())).is_err());
    }

    #[test]
    fn test_idle_until_restart() {
        let mut sim = Simulation::new(Tuning::default(), 1, Box::new(MemoryStore::new())).unwrap();
        let mut events: Vec<GameEvent> = Vec::new();
        for _ in 0..10 {
            sim.tick(&mut events);
        }
        assert_eq!(sim.phase(), GamePhase::Idle);
        assert_eq!(sim.run().elapsed_ticks, 0);
        assert!(events.is_empty());

        sim.push_intent(Intent::Restart);
        sim.tick(&mut events);
        assert_eq!(sim.phase(), GamePhase::Running);
        assert_eq!(sim.run().elapsed_ticks, 1);
        assert_eq!(events[0], GameEvent::Started);
    }

    #[test]
    fn test_jump_intent_applied_next_tick() {
        let mut sim = started(quiet(), 1);
        let ground = sim.actor().ground_y;
        let mut events: Vec<GameEvent> = Vec::new();

        sim.push_intent(Intent::Jump);
        assert_eq!(sim.actor().pos.y, ground);
        sim.tick(&mut events);
        assert!(sim.actor().airborne);
        assert!(sim.actor().pos.y < ground);
        assert!(events.contains(&GameEvent::Jumped { jump: 1 }));
    }

    #[test]
    fn test_collision_ends_run_once() {
        let mut sim = started(quiet(), 1);
        // Overlaps the actor's inset hitbox (x 108..152) right away
        place_obstacle(&mut sim, 130.0);

        let mut events: Vec<GameEvent> = Vec::new();
        sim.tick(&mut events);
        assert_eq!(sim.phase(), GamePhase::Ended);
        assert!(!sim.run().is_running());

        let frozen = sim.snapshot();
        for _ in 0..50 {
            sim.tick(&mut events);
        }
        assert_eq!(sim.snapshot(), frozen);

        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_jump_ignored_after_game_over() {
        let mut sim = started(quiet(), 1);
        place_obstacle(&mut sim, 130.0);
        sim.tick(&mut ());
        sim.push_intent(Intent::Jump);
        sim.tick(&mut ());
        assert!(!sim.actor().airborne);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut sim = started(quiet(), 1);
        place_obstacle(&mut sim, 130.0);
        sim.tick(&mut ());
        assert_eq!(sim.phase(), GamePhase::Ended);

        sim.push_intent(Intent::Restart);
        sim.tick(&mut ());
        assert_eq!(sim.phase(), GamePhase::Running);
        assert!(sim.field().obstacles.is_empty());
        assert_eq!(sim.run().elapsed_ticks, 1);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut sim = started(quiet(), 1);
        for _ in 0..20 {
            sim.tick(&mut ());
        }
        sim.push_intent(Intent::Restart);
        sim.tick(&mut ());
        assert_eq!(sim.run().elapsed_ticks, 22);
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut a = started(tuning.clone(), 99_999);
        let mut b = started(tuning, 99_999);

        for i in 0..3_000u32 {
            if i % 37 == 0 {
                a.push_intent(Intent::Jump);
                b.push_intent(Intent::Jump);
            }
            let flags = InputFlags {
                floating_held: i % 5 < 2,
            };
            a.set_flags(flags);
            b.set_flags(flags);
            a.tick(&mut ());
            b.tick(&mut ());
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    #[test]
    fn test_advance_runs_fixed_ticks() {
        let mut sim = started(quiet(), 1);
        let before = sim.run().elapsed_ticks;
        let ticks = sim.advance(1000.0 / 60.0 * 3.0 + 0.5, &mut ());
        assert_eq!(ticks, 3);
        assert_eq!(sim.run().elapsed_ticks, before + 3);
    }

    #[test]
    fn test_autopilot_clears_obstacle() {
        let tuning = Tuning {
            initial_speed: 3.0,
            speed_increment: 0.0,
            ..quiet()
        };
        let mut sim = started(tuning, 1);
        sim.push_intent(Intent::ToggleAutopilot);
        place_obstacle(&mut sim, 400.0);

        let mut events: Vec<GameEvent> = Vec::new();
        for _ in 0..300 {
            sim.tick(&mut events);
        }
        assert!(sim.autopilot_enabled());
        assert!(sim.run().is_running());
        assert!(sim.field().obstacles.is_empty());
        assert!(events.contains(&GameEvent::Jumped { jump: 1 }));
        assert!(events.iter().any(|e| matches!(e, GameEvent::Landed { .. })));
    }

    #[test]
    fn test_default_autopilot_run_ends_past_its_speed_limit() {
        // Default trigger distance stops clearing obstacles a little above speed 4.6
        let mut sim = started(Tuning::default(), 7);
        sim.push_intent(Intent::ToggleAutopilot);
        for _ in 0..60 * 60 * 10 {
            if !sim.run().is_running() {
                break;
            }
            sim.tick(&mut ());
        }
        assert_eq!(sim.phase(), GamePhase::Ended);
        assert!(sim.run().speed > 4.0);
    }

    #[test]
    fn test_without_autopilot_obstacle_hits() {
        let tuning = Tuning {
            initial_speed: 3.0,
            speed_increment: 0.0,
            ..quiet()
        };
        let mut sim = started(tuning, 1);
        place_obstacle(&mut sim, 400.0);
        for _ in 0..300 {
            sim.tick(&mut ());
        }
        assert_eq!(sim.phase(), GamePhase::Ended);
    }

    #[test]
    fn test_high_score_persists_across_restart() {
        let tuning = quiet();
        let mut sim = Simulation::new(tuning, 1, Box::new(MemoryStore::with_score(5))).unwrap();
        assert_eq!(sim.run().high_score, 5);
        sim.push_intent(Intent::Restart);

        // 0.1 per tick: score passes 5 after ~50 ticks
        for _ in 0..80 {
            sim.tick(&mut ());
        }
        place_obstacle(&mut sim, 130.0);
        sim.tick(&mut ());
        assert_eq!(sim.phase(), GamePhase::Ended);
        let best = sim.store().get();
        assert!(best > 5);
        assert_eq!(best, sim.run().high_score);

        // Fresh run that stays below the old best
        sim.push_intent(Intent::Restart);
        for _ in 0..10 {
            sim.tick(&mut ());
        }
        assert_eq!(sim.store().get(), best);
        assert_eq!(sim.run().high_score, best);
    }

    #[test]
    fn test_landing_spawns_dust() {
        let mut sim = started(quiet(), 1);
        sim.push_intent(Intent::Jump);
        let mut landed = false;
        for _ in 0..80 {
            let mut events: Vec<GameEvent> = Vec::new();
            sim.tick(&mut events);
            if events.iter().any(|e| matches!(e, GameEvent::Landed { .. })) {
                landed = true;
                let dust = sim
                    .effects()
                    .particles
                    .iter()
                    .filter(|p| p.kind == ParticleKind::Dust)
                    .count();
                assert_eq!(dust, 8);
                break;
            }
        }
        assert!(landed);
    }

    #[test]
    fn test_effects_do_not_change_outcome() {
        // Same seed, wildly different particle settings: identical obstacles
        let plain = Tuning {
            trail_chance: 0.0,
            dust_count: 0,
            ..Default::default()
        };
        let busy = Tuning {
            trail_chance: 1.0,
            dust_count: 40,
            ..Default::default()
        };
        let mut a = started(plain, 4242);
        let mut b = started(busy, 4242);
        for i in 0..2_000u32 {
            if i % 40 == 0 {
                a.push_intent(Intent::Jump);
                b.push_intent(Intent::Jump);
            }
            a.tick(&mut ());
            b.tick(&mut ());
            assert_eq!(a.field(), b.field());
            assert_eq!(a.run(), b.run());
        }
    }

    #[test]
    fn test_ground_clamp_through_simulation() {
        let mut sim = started(Tuning::default(), 17);
        for i in 0..5_000u32 {
            if i % 3 == 0 {
                sim.push_intent(Intent::Jump);
            }
            sim.set_flags(InputFlags {
                floating_held: i % 2 == 0,
            });
            sim.tick(&mut ());
            assert!(sim.actor().pos.y <= sim.actor().ground_y);
            if !sim.run().is_running() {
                sim.push_intent(Intent::Restart);
            }
        }
    }

    #[test]
    fn test_autopilot_toggle_event() {
        let mut sim = started(quiet(), 1);
        let mut events: Vec<GameEvent> = Vec::new();
        sim.push_intent(Intent::ToggleAutopilot);
        sim.tick(&mut events);
        assert_eq!(events[0], GameEvent::AutopilotToggled { enabled: true });
    }
}
