//! Procedural terrain fields: seeded noise, elevation, caves, climate and
//! biome classification, plus per-chunk deterministic randomness.
//!
//! Every function here is pure in its inputs and the world seed. The
//! [`TerrainSampler`] bundles the fields for consumers that need all of them.

mod cave;
mod climate;
mod noise_field;
mod sampler;
mod seed;
mod terrain_height;

pub mod biome;

pub use biome::{Biome, BiomeDef, FloraKey, FloraRecipe, classify};
pub use cave::CaveField;
pub use climate::ClimateField;
pub use noise_field::{NOISE_PERIOD, NoiseField, fold_seed};
pub use sampler::TerrainSampler;
pub use seed::{chunk_rng, derive_chunk_seed};
pub use terrain_height::{TerrainHeightField, soften_shore};
