//! Gravity Pong headless runner
//!
//! Stands in for a graphical front end: drives a match at the target tick
//! rate with scripted input and logs what a renderer would draw.
//!
//! Usage: `gravity-pong [settings.json]`, verbosity via `RUST_LOG`.

use std::path::Path;
use std::time::Duration;

use gravity_pong::Settings;
use gravity_pong::consts::FRAME_DELAY;
use gravity_pong::platform::{FramePacer, InputState, Key};
use gravity_pong::sim::{
    Clock, GameRng, ManualClock, MatchState, Player, Snapshot, SystemClock, tick,
};

fn main() {
    env_logger::init();
    log::info!("Gravity Pong (headless) starting...");

    let path = std::env::args().nth(1);
    let settings = Settings::load(path.as_deref().map(Path::new));

    let rng = match settings.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            GameRng::seeded(seed)
        }
        None => GameRng::from_entropy(),
    };

    let snapshot = if settings.realtime {
        let clock = SystemClock::new();
        run(&settings, rng, &clock, |wait| {
            std::thread::sleep(wait.min(Duration::from_millis(1)))
        })
    } else {
        let clock = ManualClock::new();
        run(&settings, rng, &clock, |wait| clock.advance(wait))
    };

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize final snapshot: {}", e),
    }
}

/// Drive one session until quit, game over, or the tick limit.
///
/// `wait` is called with the time left until the next tick whenever the
/// pacer is not yet due.
fn run<C: Clock>(
    settings: &Settings,
    rng: GameRng,
    clock: &C,
    mut wait: impl FnMut(Duration),
) -> Snapshot {
    let mut state = MatchState::new(rng, clock.now());
    let mut pacer = FramePacer::new(FRAME_DELAY, clock.now());
    let mut input = InputState::new();
    let script = settings.sorted_script();
    let mut script = script.iter().peekable();
    let mut ticks: u64 = 0;

    loop {
        let now = clock.now();
        if !pacer.should_tick(now) {
            wait(pacer.until_next(now));
            continue;
        }

        while let Some(step) = script.next_if(|s| s.tick <= ticks) {
            if step.pressed {
                input.press(step.key);
            } else {
                input.release(step.key);
            }
        }

        tick(&mut state, &input.take_tick_input(), now);
        ticks += 1;

        for event in &state.events {
            log::trace!("tick {}: {:?}", ticks, event);
        }

        if settings.snapshot_interval > 0 && ticks % settings.snapshot_interval == 0 {
            match serde_json::to_string(&state.snapshot(now)) {
                Ok(json) => log::info!(
                    "tick {} fps {:.1}: {}",
                    ticks,
                    pacer.fps().unwrap_or(0.0),
                    json
                ),
                Err(e) => log::warn!("Could not serialize snapshot: {}", e),
            }
        }

        if !state.running {
            break;
        }
        if state.game_over {
            if settings.auto_restart {
                input.press(Key::Reset);
            } else {
                break;
            }
        }
        if settings.max_ticks > 0 && ticks >= settings.max_ticks {
            log::info!("Tick limit {} reached", settings.max_ticks);
            break;
        }
    }

    log::info!(
        "Session over after {} ticks: {} : {}",
        ticks,
        state.score.get(Player::One),
        state.score.get(Player::Two)
    );
    state.snapshot(clock.now())
}
