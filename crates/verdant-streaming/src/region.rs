//! The needed set: chunk coordinates within the render radius.

use verdant_config::RadiusShape;
use verdant_mesh::ChunkCoord;

/// `true` if `coord` lies within `radius` chunks of `center`.
pub fn in_region(center: ChunkCoord, coord: ChunkCoord, radius: u32, shape: RadiusShape) -> bool {
    let r = radius as i64;
    let dx = (coord.x - center.x).abs();
    let dz = (coord.z - center.z).abs();
    match shape {
        RadiusShape::Square => dx <= r && dz <= r,
        RadiusShape::Circle => dx <= r && dz <= r && dx * dx + dz * dz <= r * r,
    }
}

/// Every coordinate in the region, in coordinate order.
pub fn needed_coords(center: ChunkCoord, radius: u32, shape: RadiusShape) -> Vec<ChunkCoord> {
    let r = radius as i64;
    let mut coords = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);
    for dx in -r..=r {
        for dz in -r..=r {
            let coord = center.offset(dx, dz);
            if in_region(center, coord, radius, shape) {
                coords.push(coord);
            }
        }
    }
    coords
}
