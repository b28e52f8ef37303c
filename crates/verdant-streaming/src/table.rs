//! Handle table: the single owner of installed chunk geometry.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use verdant_mesh::{ChunkCoord, ChunkGeometry};

/// An installed chunk: shared geometry plus its renderer handle.
#[derive(Debug)]
pub struct ActiveChunk<H> {
    pub geometry: Arc<ChunkGeometry>,
    pub handle: H,
}

/// Active chunks keyed by coordinate.
///
/// `remove` is the only way out; the caller releases the returned handle.
#[derive(Debug)]
pub struct ChunkTable<H> {
    entries: FxHashMap<ChunkCoord, ActiveChunk<H>>,
}

impl<H> ChunkTable<H> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Install a chunk. Returns the previous entry if the coordinate was occupied.
    pub fn insert(&mut self, coord: ChunkCoord, chunk: ActiveChunk<H>) -> Option<ActiveChunk<H>> {
        self.entries.insert(coord, chunk)
    }

    pub fn remove(&mut self, coord: ChunkCoord) -> Option<ActiveChunk<H>> {
        self.entries.remove(&coord)
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&ActiveChunk<H>> {
        self.entries.get(&coord)
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.entries.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Installed coordinates in arbitrary order.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChunkCoord, &ActiveChunk<H>)> {
        self.entries.iter().map(|(c, a)| (*c, a))
    }

    /// Remove every entry, returning them in coordinate order.
    pub fn drain_sorted(&mut self) -> Vec<(ChunkCoord, ActiveChunk<H>)> {
        let mut all: Vec<_> = self.entries.drain().collect();
        all.sort_by_key(|(c, _)| *c);
        all
    }
}

impl<H> Default for ChunkTable<H> {
    fn default() -> Self {
        Self::new()
    }
}
