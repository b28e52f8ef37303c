//! Read-only views of the active chunk set for collision and minimap consumers.

use std::sync::Arc;

use verdant_mesh::{ChunkCoord, ChunkGeometry};

/// One active chunk as seen by a snapshot holder.
#[derive(Clone, Debug)]
pub struct ChunkView {
    pub coord: ChunkCoord,
    pub geometry: Arc<ChunkGeometry>,
}

/// The active chunk set as of one tick.
///
/// Holding a snapshot keeps its geometry alive even after the manager evicts
/// the chunk; use the epoch to notice that the world has moved on.
#[derive(Clone, Debug)]
pub struct ChunkSnapshot {
    epoch: u64,
    chunk_size: f64,
    chunks: Vec<ChunkView>,
}

impl ChunkSnapshot {
    /// `chunks` must be sorted by coordinate.
    pub(crate) fn new(epoch: u64, chunk_size: f64, chunks: Vec<ChunkView>) -> Self {
        debug_assert!(chunks.windows(2).all(|w| w[0].coord < w[1].coord));
        Self {
            epoch,
            chunk_size,
            chunks,
        }
    }

    /// Manager epoch at the time the snapshot was taken.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn chunk_size(&self) -> f64 {
        self.chunk_size
    }

    /// Views in coordinate order.
    pub fn chunks(&self) -> &[ChunkView] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&ChunkView> {
        self.chunks
            .binary_search_by_key(&coord, |v| v.coord)
            .ok()
            .map(|i| &self.chunks[i])
    }

    /// Exact surface height under a world position, if its chunk is in the snapshot.
    pub fn ground_height(&self, world_x: f64, world_z: f64) -> Option<f64> {
        let coord = ChunkCoord::from_world(world_x, world_z, self.chunk_size);
        if let Some(h) = self
            .get(coord)
            .and_then(|v| v.geometry.ground_height(world_x, world_z))
        {
            return Some(h);
        }
        // Points within rounding of an edge may belong to a neighbor.
        (-1..=1)
            .flat_map(|dx| (-1..=1).map(move |dz| coord.offset(dx, dz)))
            .filter_map(|c| self.get(c))
            .find_map(|v| v.geometry.ground_height(world_x, world_z))
    }
}
