//! Immortal Fox Runtime
//!
//! Boots the simulation core against a headless scene and lets the autopilot
//! play for the configured number of ticks. HUD notifications go through the
//! event bus and end up in the log.
//!
//! Run with: cargo run -p fox_runtime
//!       or: FOX_TICKS=600 FOX_SEED=42 cargo run --bin fox
//!
//! With `realtime = true` the loop runs at wall-clock pace and reads commands
//! from stdin (`reset`, `quit`).

mod boot_config;
mod headless;
mod hud;

use boot_config::BootConfig;
use fox_event::EventBus;
use fox_input::prelude::InputMailbox;
use fox_sim::prelude::{ControlSurface, LoadedCharacter, Simulation};
use headless::{Autopilot, LoggingScene};
use hud::HudObserver;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn main() {
    let config = BootConfig::load();

    let filter = config.as_ref().map(|c| c.log_filter()).unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };
    config.print_summary();

    if let Err(e) = run(&config) {
        log::error!("Runtime failed: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &BootConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = Simulation::new(config.game.clone())?;

    let mut bus = EventBus::new();
    let hud = hud::install(&mut bus);
    let bus = Arc::new(Mutex::new(bus));
    sim.add_observer(Box::new(HudObserver::new(bus.clone())));

    let mut scene = LoggingScene::new();
    let mailbox = InputMailbox::new(config.game.input.clone());
    let mut pilot = Autopilot::new(mailbox.sender());

    let quit = Arc::new(AtomicBool::new(false));
    if config.realtime {
        spawn_console(sim.control(), quit.clone());
    }

    sim.on_assets_loaded(LoadedCharacter::with_model(1), &mut scene)?;

    let dt = config.delta_time();
    let frame = Duration::from_secs_f32(dt);
    let status_every = (config.tick_rate * 10.0).max(1.0) as u64;
    let started = Instant::now();

    for tick in 1..=config.ticks {
        let frame_start = Instant::now();

        pilot.drive(&sim, tick);
        let report = sim.tick(dt, &mailbox.poll(), &mut scene);
        bus.lock().process();

        if report.reset {
            log::info!("Tick {}: session reset", tick);
        }
        if tick % status_every == 0 {
            log::info!(
                "t={:.1}s {:?} count {}/{} hostiles {} pickups {}",
                sim.elapsed(),
                sim.state().phase(),
                sim.state().collected(),
                sim.state().max(),
                sim.world().hostile_count(),
                sim.world().pickups().len()
            );
        }

        if quit.load(Ordering::Relaxed) {
            log::info!("Quit requested at tick {}", tick);
            break;
        }
        if config.realtime {
            if let Some(rest) = frame.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let hud = *hud.lock();
    log::info!(
        "Finished {} ticks in {:.2?}: best {}, resets {}, immortal {}",
        sim.ticks(),
        started.elapsed(),
        hud.best,
        hud.resets,
        hud.immune
    );
    log::debug!(
        "Scene: {} live visuals, {} transform updates",
        scene.recording().len(),
        scene.updates()
    );
    Ok(())
}

/// Read `reset` / `quit` commands from stdin on a background thread
fn spawn_console(control: ControlSurface, quit: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        let mut line = String::new();
        loop {
            line.clear();
            match std::io::stdin().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            match line.trim() {
                "reset" | "r" => {
                    log::info!("Reset requested from console");
                    control.request_reset();
                }
                "quit" | "exit" | "q" => {
                    quit.store(true, Ordering::Relaxed);
                    break;
                }
                "" => {}
                other => log::warn!("Unknown command: {}", other),
            }
        }
    });
}
