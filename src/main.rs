//! Circle Arena headless runner
//!
//! Steps a built-in scene or a JSON settings file and optionally streams one
//! JSON snapshot per frame to stdout for an external renderer.

use std::process::ExitCode;

use clap::Parser;

use circle_arena::sim::{Arena, FrameSnapshot};
use circle_arena::{ArenaSettings, Scenario};

#[derive(Clone, Debug, Parser)]
#[command(name = "circle-arena", author, about, version)]
struct Args {
    /// Built-in scene name or path to a settings JSON file.
    ///
    /// Scenes: cradle, spiral, basic, fountain, gas, popcorn.
    #[arg(default_value = "cradle", value_name = "SCENE|SETTINGS.json")]
    source: String,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 450)]
    frames: u64,

    /// Seed for scenes that place circles randomly.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print one JSON snapshot per frame to stdout.
    #[arg(long)]
    dump: bool,
}

fn load_arena(args: &Args) -> Result<Arena, String> {
    if let Some(scenario) = Scenario::from_str(&args.source) {
        log::info!("Building scene '{}' with seed {}", scenario.as_str(), args.seed);
        return scenario.build(args.seed).map_err(|e| e.to_string());
    }

    let json = std::fs::read_to_string(&args.source).map_err(|e| format!("cannot read '{}': {e}", args.source))?;
    let settings = ArenaSettings::from_json(&json).map_err(|e| e.to_string())?;
    log::info!("Loaded settings from {}", args.source);
    Arena::from_settings(&settings).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut arena = match load_arena(&args) {
        Ok(arena) => arena,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Arena radius {} with {} circles, {} steps per frame",
        arena.radius(),
        arena.len(),
        arena.steps_per_frame()
    );

    for _ in 0..args.frames {
        arena.simulate_frame();
        if args.dump {
            match serde_json::to_string(&FrameSnapshot::capture(&arena)) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    log::error!("Failed to serialize frame {}: {e}", arena.frame_count());
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    log::info!(
        "Finished {} frames ({} steps), {} circles, kinetic energy {:.4}",
        arena.frame_count(),
        arena.step_count(),
        arena.len(),
        arena.total_kinetic_energy()
    );
    for (_, circle) in arena.circles().take(10) {
        log::debug!("{circle}");
    }

    ExitCode::SUCCESS
}
