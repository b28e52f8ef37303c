//! The seam between streaming and whatever draws the surfaces.

use rustc_hash::FxHashMap;
use verdant_mesh::{ChunkCoord, ChunkGeometry};

/// Allocates and releases renderable surfaces for chunk geometry.
///
/// The streaming manager calls `allocate` once per installed chunk and
/// `release` exactly once per handle, when the chunk is evicted.
pub trait SurfaceBackend {
    /// Opaque renderer resource for one chunk.
    type Handle;

    /// Create a surface from the geometry's vertex arrays.
    fn allocate(&mut self, coord: ChunkCoord, geometry: &ChunkGeometry) -> Self::Handle;

    /// Free a surface. The handle is never used again.
    fn release(&mut self, handle: Self::Handle);
}

/// Handle issued by [`HeadlessBackend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

/// What the headless backend remembers about a live surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceRecord {
    pub coord: ChunkCoord,
    pub triangles: usize,
    pub bytes: usize,
}

/// Backend that draws nothing and tracks every live surface.
///
/// Used by tests and the headless fly-through to check that handles are
/// released exactly once.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    live: FxHashMap<SurfaceId, SurfaceRecord>,
    next_id: u64,
    allocated: u64,
    released: u64,
    double_releases: u64,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, id: SurfaceId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn record(&self, id: SurfaceId) -> Option<&SurfaceRecord> {
        self.live.get(&id)
    }

    /// Total surfaces ever allocated.
    pub fn allocated(&self) -> u64 {
        self.allocated
    }

    /// Total surfaces released.
    pub fn released(&self) -> u64 {
        self.released
    }

    /// Releases of handles that were not live. Always zero when the caller is correct.
    pub fn double_releases(&self) -> u64 {
        self.double_releases
    }

    /// Bytes of vertex data currently held by live surfaces.
    pub fn live_bytes(&self) -> usize {
        self.live.values().map(|r| r.bytes).sum()
    }
}

impl SurfaceBackend for HeadlessBackend {
    type Handle = SurfaceId;

    fn allocate(&mut self, coord: ChunkCoord, geometry: &ChunkGeometry) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.allocated += 1;
        self.live.insert(
            id,
            SurfaceRecord {
                coord,
                triangles: geometry.triangle_count(),
                bytes: geometry.vertex_bytes().len(),
            },
        );
        id
    }

    fn release(&mut self, handle: SurfaceId) {
        if self.live.remove(&handle).is_some() {
            self.released += 1;
        } else {
            tracing::warn!(?handle, "release of a surface that is not live");
            self.double_releases += 1;
        }
    }
}
