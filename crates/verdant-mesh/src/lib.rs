//! Chunk surface synthesis: a resumable row-by-row builder that turns the
//! terrain fields into a seam-free flat-shaded surface, a water plane and
//! vegetation placements, plus the time-slice scheduler that drives it.

mod build;
mod coord;
mod error;
mod geometry;
mod scheduler;
mod vertex;

pub use build::{ChunkBuild, ChunkSpec, LAVA_SURFACE_COLOR, RowReport, surface_rgb};
pub use coord::{ChunkCoord, MAX_CHUNK_INDEX};
pub use error::MeshError;
pub use geometry::{ChunkGeometry, VegetationPlacement, WaterPlane};
pub use scheduler::{SliceOutcome, SliceScheduler};
pub use vertex::TerrainVertex;
