//! Biomes: the static catalog, the elevation/moisture classifier and the
//! flora recipes each biome grows.

mod classifier;
mod def;
mod flora;

pub use classifier::{GRASSLAND_SPLIT_SCALE, classify};
pub use def::{Biome, BiomeDef};
pub use flora::{
    CactusKind, FloraKey, FloraRecipe, FlowerRecipe, GrowthPattern, LeafShape, PetalShape,
    TreeRecipe,
};
