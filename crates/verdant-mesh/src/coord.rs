//! Integer chunk coordinates on the horizontal plane.

use std::fmt;

/// Largest chunk index on either axis. Observers farther out are clamped to
/// the edge, which keeps lattice indices and neighbor offsets in `i64` range.
pub const MAX_CHUNK_INDEX: i64 = 1 << 40;

/// Identity of a chunk: its cell on the `chunk_size` grid.
///
/// Ordering is lexicographic on `(x, z)` and is used to break distance ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ChunkCoord {
    pub x: i64,
    pub z: i64,
}

impl ChunkCoord {
    pub const fn new(x: i64, z: i64) -> Self {
        Self { x, z }
    }

    /// The chunk containing a world position (floor division), clamped to
    /// `±MAX_CHUNK_INDEX`. NaN maps to 0.
    pub fn from_world(world_x: f64, world_z: f64, chunk_size: f64) -> Self {
        let index = |w: f64| {
            ((w / chunk_size).floor() as i64).clamp(-MAX_CHUNK_INDEX, MAX_CHUNK_INDEX)
        };
        Self {
            x: index(world_x),
            z: index(world_z),
        }
    }

    /// Neighbor offset by whole chunks. Saturates at the `i64` limits.
    pub const fn offset(self, dx: i64, dz: i64) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            z: self.z.saturating_add(dz),
        }
    }

    /// Squared distance in chunk units.
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}
