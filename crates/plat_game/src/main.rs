//! Headless platformer runner.
//!
//! Loads a level, builds the world from real sprite sheets or solid
//! placeholders, and advances it in fixed steps, either from a recorded
//! replay or with no input. Each step runs to completion before the next;
//! the summary logged at the end is the state a renderer would have drawn.
//!
//! Step pipeline (see `World::step`):
//!
//!   1. guarded jump request
//!   2. player gravity, motion, and animation
//!   3. fire animation
//!   4. horizontal probe and commit, vertical resolution, hazards
//!   5. camera scroll

mod assets;
mod camera;
mod collision;
mod controller;
mod level;
mod objects;
mod player;
mod render;
mod replay;
mod sprite;
mod world;

use std::path::PathBuf;

use plat_core::config::SimConfig;

use assets::Assets;
use level::load_level_from_path;
use render::{background_tiles, build_draw_list};
use replay::{load_replay_from_path, ReplayStep};
use world::World;

const DEFAULT_STEPS: usize = 600;

struct RunArgs {
    level_path: PathBuf,
    replay_path: Option<PathBuf>,
    assets_dir: Option<PathBuf>,
    steps: Option<usize>,
}

fn usage() -> String {
    "Usage: cargo run -p plat_game -- <level_json> [--replay <replay_json>] [--assets <asset_dir>] [--steps <count>]\nExample: cargo run -p plat_game -- levels/tutorial.json --replay levels/walk_right.json".to_string()
}

fn parse_args(args: &[String]) -> Result<RunArgs, String> {
    let Some(level_arg) = args.get(1) else {
        return Err(usage());
    };
    let mut run = RunArgs {
        level_path: PathBuf::from(level_arg),
        replay_path: None,
        assets_dir: None,
        steps: None,
    };

    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        let value = rest
            .next()
            .ok_or_else(|| format!("Missing value for '{}'\n{}", flag, usage()))?;
        match flag.as_str() {
            "--replay" => run.replay_path = Some(PathBuf::from(value)),
            "--assets" => run.assets_dir = Some(PathBuf::from(value)),
            "--steps" => {
                let steps = value
                    .parse::<usize>()
                    .map_err(|e| format!("Invalid step count '{}': {e}", value))?;
                run.steps = Some(steps);
            }
            _ => return Err(format!("Unknown argument '{}'\n{}", flag, usage())),
        }
    }
    Ok(run)
}

fn run(args: RunArgs) -> Result<(), String> {
    let config = SimConfig::default();
    let level = load_level_from_path(&args.level_path)?;

    let assets = match &args.assets_dir {
        Some(dir) => Assets::load(dir, config.block_size as u32)?,
        None => {
            log::info!("No asset directory given, using placeholder frames");
            Assets::placeholder(
                level.player.width as u32,
                level.player.height as u32,
                config.block_size as u32,
            )
        }
    };

    let mut steps: Vec<ReplayStep> = match &args.replay_path {
        Some(path) => load_replay_from_path(path)?.expanded_steps(),
        None => Vec::new(),
    };
    let total = args.steps.unwrap_or(if steps.is_empty() {
        DEFAULT_STEPS
    } else {
        steps.len()
    });
    // Past the end of the replay the player stands still.
    steps.resize(total, ReplayStep::default());

    let mut world = World::new(level, assets, config)?;
    log::info!(
        "{} fires in level, {} lit",
        world.fire_count(),
        world.lit_fire_count()
    );

    let mut hazard_steps = 0usize;
    let mut blocked_steps = 0usize;
    let mut ground_contacts = 0usize;
    for step in &steps {
        if step.restart {
            log::info!("Replay restarts the level");
        }
        let contacts = step.apply(&mut world)?;
        if contacts.hazard {
            hazard_steps += 1;
        }
        if contacts.left || contacts.right {
            blocked_steps += 1;
        }
        if contacts.vertical > 0 {
            ground_contacts += 1;
        }
    }

    let tiles = background_tiles(
        world.level().background,
        world.config.viewport_width,
        world.config.viewport_height,
    );
    let draw_count = build_draw_list(&world, &tiles).len();

    let snapshot = world.snapshot();
    let summary = serde_json::to_string(&snapshot)
        .map_err(|e| format!("Failed to serialize run summary: {e}"))?;
    log::info!(
        "Ran {} steps: {} with hazard contact, {} wall-blocked, {} with vertical contact; {} draw commands",
        steps.len(),
        hazard_steps,
        blocked_steps,
        ground_contacts,
        draw_count
    );
    log::info!("Final state: {}", summary);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Platformer simulation starting...");

    let args: Vec<String> = std::env::args().collect();
    let result = parse_args(&args).and_then(run);
    if let Err(err) = result {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
