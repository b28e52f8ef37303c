//! Configuration system for Verdant.
//!
//! Every tunable of the terrain synthesis and chunk streaming pipeline lives
//! here: noise octave settings, height and climate coefficients, chunk size,
//! grid resolution, render radius, time-slice budget and vegetation density.
//! Settings persist to disk as RON, accept CLI overrides via clap, and are
//! validated before anything is built from them.

mod cli;
mod config;
mod error;
mod validate;

pub use cli::{CliArgs, default_config_dir};
pub use config::{
    CaveConfig, ClimateConfig, Config, DebugConfig, FractalParams, MeshConfig, RadiusShape,
    StreamingConfig, TerrainConfig, VegetationConfig, WorldConfig,
};
pub use error::ConfigError;
pub use validate::{MAX_GRID_RESOLUTION, MAX_RENDER_RADIUS};
