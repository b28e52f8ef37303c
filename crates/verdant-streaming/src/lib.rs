//! Chunk streaming: keeps the chunks around an observer built and installed,
//! one time-sliced build at a time, and evicts the rest.

mod backend;
mod manager;
mod region;
mod snapshot;
mod table;

pub use backend::{HeadlessBackend, SurfaceBackend, SurfaceId, SurfaceRecord};
pub use manager::{ChunkState, StreamingManager, StreamingStats, TickReport};
pub use region::{in_region, needed_coords};
pub use snapshot::{ChunkSnapshot, ChunkView};
pub use table::{ActiveChunk, ChunkTable};
