//! Headless fly-through: streams terrain around an observer moving along +x
//! and logs what the streamer did.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p verdant-app -- --ticks 300 --seed 7`.

mod minimap;

use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use verdant_config::{CliArgs, Config};
use verdant_streaming::{HeadlessBackend, StreamingManager};

/// Verdant headless fly-through.
#[derive(Parser, Debug)]
#[command(name = "verdant", about = "Stream procedural terrain around a moving observer")]
struct AppArgs {
    #[command(flatten)]
    common: CliArgs,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Observer speed in world units per frame.
    #[arg(long, default_value_t = 20.0)]
    speed: f64,

    /// Log a progress line every this many frames (0 disables).
    #[arg(long, default_value_t = 100)]
    report_every: u32,
}

fn main() -> ExitCode {
    let args = AppArgs::parse();

    let config_dir = args.common.config_dir();
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args.common);

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    let log_dir = config_dir.join("logs");
    verdant_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let mut manager = match StreamingManager::from_config(&config, HeadlessBackend::new()) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Failed to start streaming: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        seed = config.world.seed,
        ticks = args.ticks,
        speed = args.speed,
        "starting fly-through"
    );

    let mut x = 0.0;
    let z = 0.0;
    let mut failures = 0u32;
    for frame in 0..args.ticks {
        x = frame as f64 * args.speed;
        let report = manager.tick(x, z);
        if report.failed.is_some() {
            failures += 1;
        }
        if args.report_every > 0 && frame % args.report_every == 0 {
            info!(
                frame,
                observer = %report.observer,
                active = manager.active_count(),
                pending = ?manager.pending(),
                height = manager.height_at(x, z),
                "progress"
            );
        }
    }

    let snapshot = manager.snapshot();
    let ground = snapshot.ground_height(x, z);
    let field = manager.height_at(x, z);
    info!(
        active = snapshot.len(),
        epoch = snapshot.epoch(),
        ?ground,
        field,
        biome = manager.sampler().biome_at(x, z).name(),
        "final position"
    );

    let plants: usize = snapshot
        .chunks()
        .iter()
        .map(|v| v.geometry.vegetation.len())
        .sum();
    let stats = manager.stats();
    info!(
        started = stats.builds_started,
        completed = stats.builds_completed,
        failed = stats.builds_failed,
        cancelled = stats.builds_cancelled,
        evicted = stats.chunks_evicted,
        plants,
        failures,
        "streaming summary"
    );

    let survey_extent = config.streaming.chunk_size * (2 * config.streaming.render_radius + 1) as f64;
    for (biome, count) in minimap::biome_histogram(manager.sampler(), x, z, survey_extent, 32)
        .into_iter()
        .take(5)
    {
        info!(biome = biome.name(), count, "surroundings");
    }

    let backend = manager.shutdown();
    info!(
        allocated = backend.allocated(),
        released = backend.released(),
        "surfaces released"
    );

    ExitCode::SUCCESS
}
