//! Configuration structs with tuned defaults and RON persistence.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World identity.
    pub world: WorldConfig,
    /// Elevation field coefficients.
    pub terrain: TerrainConfig,
    /// Moisture and volcano fields.
    pub climate: ClimateConfig,
    /// Volumetric cave predicate.
    pub caves: CaveConfig,
    /// Chunk surface synthesis.
    pub mesh: MeshConfig,
    /// Chunk lifecycle around the observer.
    pub streaming: StreamingConfig,
    /// Vegetation scattering.
    pub vegetation: VegetationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// World identity settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for every noise field. Same seed, same world.
    pub seed: u64,
}

/// Octave settings for one fractal noise term.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FractalParams {
    /// Number of octaves summed.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Frequency of the first octave, in cycles per world unit.
    pub frequency: f64,
}

impl FractalParams {
    /// Shorthand constructor used by the default tables.
    pub const fn new(octaves: u32, persistence: f64, lacunarity: f64, frequency: f64) -> Self {
        Self {
            octaves,
            persistence,
            lacunarity,
            frequency,
        }
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self::new(3, 0.5, 2.0, 0.01)
    }
}

/// Coefficients of the elevation field.
///
/// Elevation is the sum of a continent term (biased above sea level and
/// softened near the shoreline), a masked ridged mountain term and a
/// low-amplitude detail term.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Height of the water plane.
    pub sea_level: f64,
    /// Very low frequency continent shape.
    pub continent: FractalParams,
    /// Vertical scale of the continent term.
    pub continent_scale: f64,
    /// Constant added to the continent term; positive values shrink oceans.
    pub continent_bias: f64,
    /// Half-width of the band around zero that gets compressed into beaches.
    pub shore_band: f64,
    /// Compression factor applied at zero elevation (1.0 disables softening).
    pub shore_compression: f64,
    /// Low frequency mask that decides where mountain ranges rise.
    pub mountain_mask: FractalParams,
    /// Mask values below this are flat land.
    pub mountain_threshold: f64,
    /// Slope of the mask ramp above the threshold.
    pub mountain_gain: f64,
    /// Ridged noise used inside masked regions.
    pub ridge: FractalParams,
    /// Vertical scale of the ridged term.
    pub mountain_height: f64,
    /// Local relief added everywhere.
    pub detail: FractalParams,
    /// Vertical scale of the detail term.
    pub detail_amplitude: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            sea_level: -5.0,
            continent: FractalParams::new(3, 0.5, 2.0, 0.000_15),
            continent_scale: 250.0,
            continent_bias: 40.0,
            shore_band: 10.0,
            shore_compression: 0.8,
            mountain_mask: FractalParams::new(2, 0.5, 2.0, 0.000_2),
            mountain_threshold: 0.3,
            mountain_gain: 2.5,
            ridge: FractalParams::new(6, 0.5, 2.0, 0.001),
            mountain_height: 450.0,
            detail: FractalParams::new(3, 0.5, 2.0, 0.01),
            detail_amplitude: 15.0,
        }
    }
}

/// Moisture and volcano fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClimateConfig {
    /// Large-scale moisture noise.
    pub moisture: FractalParams,
    /// Frequency of the single volcano noise sample.
    pub lava_frequency: f64,
    /// Volcano noise above this value marks lava ground.
    pub lava_threshold: f64,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            moisture: FractalParams::new(2, 0.5, 2.0, 0.000_2),
            lava_frequency: 0.000_1,
            lava_threshold: 0.97,
        }
    }
}

/// Tunnel and cavern thresholds for the volumetric cave predicate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaveConfig {
    /// No caves exist below this height.
    pub min_y: f64,
    /// Horizontal frequency of the two tunnel samples.
    pub tunnel_frequency_xz: f64,
    /// Vertical frequency of the two tunnel samples.
    pub tunnel_frequency_y: f64,
    /// Sum of absolute tunnel samples below this value is open space.
    pub tunnel_threshold: f64,
    /// Horizontal frequency of the cavern sample.
    pub cavern_frequency_xz: f64,
    /// Vertical frequency of the cavern sample.
    pub cavern_frequency_y: f64,
    /// Cavern sample above this value is open space.
    pub cavern_threshold: f64,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            min_y: -100.0,
            tunnel_frequency_xz: 0.008,
            tunnel_frequency_y: 0.015,
            tunnel_threshold: 0.22,
            cavern_frequency_xz: 0.003,
            cavern_frequency_y: 0.005,
            cavern_threshold: 0.6,
        }
    }
}

/// Chunk surface synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// Quads per chunk edge.
    pub grid_resolution: u32,
    /// Full width of the per-quad color jitter, in linear color units.
    pub color_jitter: f32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 30,
            color_jitter: 0.03,
        }
    }
}

/// Shape of the needed-chunk region around the observer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RadiusShape {
    /// Every chunk within `render_radius` on both axes.
    #[default]
    Square,
    /// Chunks whose squared distance is at most `render_radius²`.
    Circle,
}

/// Chunk lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamingConfig {
    /// Edge length of a chunk in world units.
    pub chunk_size: f64,
    /// Radius of the needed region, in chunks.
    pub render_radius: u32,
    /// Shape of the needed region.
    pub radius_shape: RadiusShape,
    /// Wall-clock budget of one build slice, in milliseconds.
    pub slice_budget_ms: f64,
}

impl StreamingConfig {
    /// The per-slice budget as a [`Duration`].
    pub fn slice_budget(&self) -> Duration {
        Duration::from_secs_f64(self.slice_budget_ms.max(0.0) / 1000.0)
    }
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 150.0,
            render_radius: 3,
            radius_shape: RadiusShape::Square,
            slice_budget_ms: 12.0,
        }
    }
}

/// Vegetation scattering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VegetationConfig {
    /// Random candidate points tried per chunk.
    pub candidates_per_chunk: u32,
    /// Chance that an eligible candidate becomes a plant.
    pub placement_probability: f64,
    /// Nothing grows above this height.
    pub max_altitude: f64,
    /// Smallest random scale of a placed plant.
    pub scale_min: f64,
    /// Largest random scale of a placed plant.
    pub scale_max: f64,
}

impl Default for VegetationConfig {
    fn default() -> Self {
        Self {
            candidates_per_chunk: 4,
            placement_probability: 0.4,
            max_altitude: 150.0,
            scale_min: 0.5,
            scale_max: 1.3,
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "verdant_streaming=trace").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WorldConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
