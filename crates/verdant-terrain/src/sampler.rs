//! One-stop access to every field of a world.

use std::sync::Arc;

use verdant_config::Config;

use crate::biome::{Biome, classify};
use crate::cave::CaveField;
use crate::climate::ClimateField;
use crate::noise_field::NoiseField;
use crate::terrain_height::TerrainHeightField;

/// The complete set of pure world fields built from one seed.
///
/// Shared read-only between the mesh builder, the streaming manager and any
/// minimap or controller; wrap it in an `Arc`.
#[derive(Debug, Clone)]
pub struct TerrainSampler {
    noise: Arc<NoiseField>,
    height: TerrainHeightField,
    climate: ClimateField,
    caves: CaveField,
}

impl TerrainSampler {
    /// Build every field from the world, terrain, climate and cave sections.
    pub fn from_config(config: &Config) -> Self {
        let noise = Arc::new(NoiseField::new(config.world.seed));
        Self {
            height: TerrainHeightField::new(Arc::clone(&noise), config.terrain.clone()),
            climate: ClimateField::new(Arc::clone(&noise), config.climate.clone()),
            caves: CaveField::new(Arc::clone(&noise), config.caves.clone()),
            noise,
        }
    }

    /// World seed all fields derive from.
    pub fn seed(&self) -> u64 {
        self.noise.seed()
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn sea_level(&self) -> f64 {
        self.height.sea_level()
    }

    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        self.height.height(x, z)
    }

    pub fn moisture_at(&self, x: f64, z: f64) -> f64 {
        self.climate.moisture(x, z)
    }

    pub fn is_lava_at(&self, x: f64, z: f64) -> bool {
        self.climate.is_lava(x, z)
    }

    pub fn is_cave_at(&self, x: f64, y: f64, z: f64) -> bool {
        self.caves.is_cave(x, y, z)
    }

    /// Biome of the surface at a world position.
    pub fn biome_at(&self, x: f64, z: f64) -> Biome {
        classify(
            self.height_at(x, z),
            self.moisture_at(x, z),
            self.is_lava_at(x, z),
        )
    }

    /// The classifier, exposed for callers that already hold the inputs.
    pub fn classify(&self, elevation: f64, moisture: f64, volcanic: bool) -> Biome {
        classify(elevation, moisture, volcanic)
    }

    pub fn height_field(&self) -> &TerrainHeightField {
        &self.height
    }

    pub fn climate_field(&self) -> &ClimateField {
        &self.climate
    }

    pub fn cave_field(&self) -> &CaveField {
        &self.caves
    }
}
