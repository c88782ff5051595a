//! Dino Dash entry point
//!
//! Native builds run a headless autopilot game and report how it went.
//! With the default tuning the autopilot only keeps up to about speed 4.6,
//! so a default run usually ends within the first half minute of game time.
//! The browser build is driven from JavaScript via `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dino_dash::consts::TICK_MS;
    use dino_dash::persistence::FileStore;
    use dino_dash::sim::{GameEvent, Intent, Simulation};
    use dino_dash::Tuning;

    env_logger::init();
    log::info!("Dino Dash (native) starting...");

    // Usage: dino-dash [seed] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(2);
            }
        },
        None => Tuning::default(),
    };

    let store = FileStore::open(std::env::temp_dir().join("dino-dash").join("high_score.json"));
    let mut sim = match Simulation::new(tuning, seed, Box::new(store)) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };
    sim.push_intent(Intent::ToggleAutopilot);
    sim.push_intent(Intent::Restart);

    // Cap at ten simulated minutes of 60 Hz frames; game over normally comes first
    let mut events: Vec<GameEvent> = Vec::new();
    for _ in 0..60 * 60 * 10 {
        sim.advance(TICK_MS, &mut events);
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
        {
            break;
        }
    }

    let run = sim.run();
    println!(
        "seed {}: {:?} after {} ticks, score {}, best {}, night mode {}",
        seed,
        run.phase,
        run.elapsed_ticks,
        run.floored_score(),
        run.high_score,
        run.night_mode
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
