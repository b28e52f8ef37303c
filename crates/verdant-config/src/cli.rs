//! Command-line argument parsing for Verdant.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Verdant command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "verdant", about = "Verdant terrain streamer")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render radius in chunks.
    #[arg(long)]
    pub render_radius: Option<u32>,

    /// Chunk edge length in world units.
    #[arg(long)]
    pub chunk_size: Option<f64>,

    /// Quads per chunk edge.
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Build slice budget in milliseconds.
    #[arg(long)]
    pub slice_budget_ms: Option<f64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// The config directory: `--config` if given, the platform default otherwise.
    pub fn config_dir(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_dir)
    }
}

/// Platform config directory for Verdant, falling back to `./verdant`.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("verdant")
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(radius) = args.render_radius {
            self.streaming.render_radius = radius;
        }
        if let Some(size) = args.chunk_size {
            self.streaming.chunk_size = size;
        }
        if let Some(res) = args.resolution {
            self.mesh.grid_resolution = res;
        }
        if let Some(budget) = args.slice_budget_ms {
            self.streaming.slice_budget_ms = budget;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(123),
            render_radius: Some(5),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, 123);
        assert_eq!(config.streaming.render_radius, 5);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.streaming.chunk_size, 150.0);
        assert_eq!(config.mesh.grid_resolution, 30);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "verdant",
            "--seed",
            "77",
            "--chunk-size",
            "64",
            "--resolution",
            "8",
        ]);
        assert_eq!(args.seed, Some(77));
        assert_eq!(args.chunk_size, Some(64.0));
        assert_eq!(args.resolution, Some(8));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_explicit_config_dir_wins() {
        let args = CliArgs {
            config: Some(PathBuf::from("/tmp/verdant-test")),
            ..Default::default()
        };
        assert_eq!(args.config_dir(), PathBuf::from("/tmp/verdant-test"));
    }
}
