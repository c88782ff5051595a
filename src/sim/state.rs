//! Run state and RNG streams
//!
//! Score, pacing and the Idle → Running → Ended lifecycle of one run.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Booted, waiting for the first start
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Collided; frozen until an explicit restart
    Ended,
}

/// What changed during a `RunState::tick`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTick {
    pub night_mode_started: bool,
    /// New high score that must be persisted
    pub high_score_raised: Option<u64>,
}

/// Score, speed and timing for the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: GamePhase,
    pub score: f64,
    /// Scroll speed in pixels per tick
    pub speed: f32,
    pub elapsed_ticks: u64,
    /// Latched once the score crosses the night threshold
    pub night_mode: bool,
    /// Best floored score ever seen; survives resets
    pub high_score: u64,
}

impl RunState {
    pub fn new(tuning: &Tuning, high_score: u64) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0.0,
            speed: tuning.initial_speed,
            elapsed_ticks: 0,
            night_mode: false,
            high_score,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Start a fresh run, keeping the high score
    pub fn reset(&mut self, tuning: &Tuning) {
        self.phase = GamePhase::Running;
        self.score = 0.0;
        self.speed = tuning.initial_speed;
        self.elapsed_ticks = 0;
        self.night_mode = false;
    }

    /// Advance score and pacing by one tick (no-op unless running)
    pub fn tick(&mut self, tuning: &Tuning) -> RunTick {
        let mut out = RunTick::default();
        if !self.is_running() {
            return out;
        }

        self.elapsed_ticks += 1;
        self.score += tuning.score_per_tick;
        self.speed = (self.speed + tuning.speed_increment).min(tuning.max_speed);

        if !self.night_mode && self.score >= tuning.night_mode_threshold {
            self.night_mode = true;
            out.night_mode_started = true;
        }

        let floored = self.floored_score();
        if floored > self.high_score {
            self.high_score = floored;
            out.high_score_raised = Some(floored);
        }
        out
    }

    /// Stop the run. Returns true only on the Running → Ended transition.
    pub fn end(&mut self) -> bool {
        if self.is_running() {
            self.phase = GamePhase::Ended;
            true
        } else {
            false
        }
    }

    /// Score as shown to the player
    #[inline]
    pub fn floored_score(&self) -> u64 {
        self.score.floor() as u64
    }
}

/// Independent deterministic RNG streams derived from one run seed.
///
/// Cosmetic effects draw from their own stream so they can never shift
/// obstacle spawns.
#[derive(Debug, Clone)]
pub struct SimRng {
    pub seed: u64,
    pub spawns: Pcg32,
    pub effects: Pcg32,
}

impl SimRng {
    const EFFECTS_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            spawns: Pcg32::seed_from_u64(seed),
            effects: Pcg32::seed_from_u64(seed ^ Self::EFFECTS_STREAM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(tuning: &Tuning) -> RunState {
        let mut run = RunState::new(tuning, 0);
        run.reset(tuning);
        run
    }

    #[test]
    fn test_idle_does_not_tick() {
        let tuning = Tuning::default();
        let mut run = RunState::new(&tuning, 0);
        assert_eq!(run.phase, GamePhase::Idle);
        run.tick(&tuning);
        assert_eq!(run.elapsed_ticks, 0);
        assert_eq!(run.score, 0.0);
    }

    #[test]
    fn test_score_strictly_increases_and_speed_capped() {
        let tuning = Tuning::default();
        let mut run = running(&tuning);
        let mut last_score = run.score;
        let mut last_speed = run.speed;
        for _ in 0..10_000 {
            run.tick(&tuning);
            assert!(run.score > last_score);
            assert!(run.speed >= last_speed);
            assert!(run.speed <= tuning.max_speed);
            last_score = run.score;
            last_speed = run.speed;
        }
        assert_eq!(run.speed, tuning.max_speed);
    }

    #[test]
    fn test_night_mode_latches() {
        let tuning = Tuning {
            night_mode_threshold: 1.0,
            ..Default::default()
        };
        let mut run = running(&tuning);
        let mut started = 0;
        for _ in 0..20 {
            if run.tick(&tuning).night_mode_started {
                started += 1;
            }
        }
        assert!(run.night_mode);
        assert_eq!(started, 1);

        // Even if the score were knocked back, the latch holds
        run.score = 0.0;
        run.tick(&tuning);
        assert!(run.night_mode);

        run.reset(&tuning);
        assert!(!run.night_mode);
    }

    #[test]
    fn test_high_score_raised_on_floor_change() {
        let tuning = Tuning::default();
        let mut run = running(&tuning);
        let raised: Vec<u64> = (0..25)
            .filter_map(|_| run.tick(&tuning).high_score_raised)
            .collect();
        // 0.1 per tick: crosses 1.0 and 2.0 within 25 ticks
        assert_eq!(raised, vec![1, 2]);
        assert_eq!(run.high_score, 2);
    }

    #[test]
    fn test_reset_preserves_high_score() {
        let tuning = Tuning::default();
        let mut run = RunState::new(&tuning, 42);
        run.reset(&tuning);
        run.tick(&tuning);
        assert_eq!(run.high_score, 42);
        run.end();
        run.reset(&tuning);
        assert_eq!(run.high_score, 42);
        assert_eq!(run.score, 0.0);
        assert_eq!(run.speed, tuning.initial_speed);
    }

    #[test]
    fn test_end_is_idempotent() {
        let tuning = Tuning::default();
        let mut run = running(&tuning);
        assert!(run.end());
        assert!(!run.end());
        assert_eq!(run.phase, GamePhase::Ended);

        let before = run.clone();
        run.tick(&tuning);
        assert_eq!(run, before);
    }

    #[test]
    fn test_rng_streams_differ() {
        use rand::Rng;
        let mut rng = SimRng::new(7);
        let a: u64 = rng.spawns.random();
        let b: u64 = rng.effects.random();
        assert_ne!(a, b);
    }
}
