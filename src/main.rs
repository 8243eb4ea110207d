//! Trampoline entry point
//!
//! Runs the game headless against the synthetic camera and hand. Pass a JSON
//! settings file as the only argument to override defaults.

use std::error::Error;

use trampoline::demo::{SweepingHand, SyntheticCamera};
use trampoline::sim::SystemClock;
use trampoline::{Game, Settings, StepOutcome};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Trampoline (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };

    let camera = SyntheticCamera::new(
        settings.frame_width,
        settings.frame_height,
        settings.drop_rate,
        settings.seed,
    );
    let hand = SweepingHand::new(settings.hand_dropout, settings.seed);
    let ticks = settings.ticks;
    let log_every = settings.log_every;

    let mut game = Game::new(settings, camera, hand, SystemClock::new())?;

    for i in 0..ticks {
        match game.step()? {
            StepOutcome::Ticked { report, snapshot } => {
                if report.bounced {
                    log::info!("Bounce at tick {i}: pos=({:.1}, {:.1})", snapshot.pos.x, snapshot.pos.y);
                }
                if log_every > 0 && i % log_every == 0 {
                    log::info!(
                        "tick {i}: pos=({:.1}, {:.1}) vel=({:.2}, {:.2}) cooldown={}",
                        snapshot.pos.x,
                        snapshot.pos.y,
                        snapshot.vel.x,
                        snapshot.vel.y,
                        snapshot.in_cooldown
                    );
                }
            }
            StepOutcome::Skipped => {}
        }

        // Pace ticks like a ~60 fps camera
        std::thread::sleep(std::time::Duration::from_millis(16));
    }

    println!("{}", serde_json::to_string_pretty(&game.stats())?);
    Ok(())
}
