//! Finished chunk geometry and exact ground queries against it.

use verdant_terrain::biome::{Biome, FloraKey, FloraRecipe};

use crate::coord::ChunkCoord;
use crate::vertex::TerrainVertex;

/// Flat water quad covering the whole chunk at sea level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterPlane {
    /// Height of the plane.
    pub height: f64,
    /// Edge length; the plane spans `[0, size]` on both local axes.
    pub size: f64,
}

/// One plant to hand to the flora drawer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VegetationPlacement {
    /// World-space base of the plant, on the surface.
    pub position: [f64; 3],
    pub biome: Biome,
    /// Concrete species (never `FlowerMix`).
    pub flora: FloraKey,
    pub recipe: FloraRecipe,
    /// Random size multiplier, applied on top of `recipe.scale()`.
    pub scale: f64,
    /// Yaw in radians, `[0, τ)`.
    pub rotation: f64,
    /// Seed for the drawer's own randomness.
    pub seed: u64,
}

/// Everything a built chunk contributes to the world.
///
/// The surface is a non-indexed triangle list: six vertices per quad, quads
/// in row-major order (row = x index, column = z index), each quad split on
/// the fixed `v00 → v11` diagonal.
#[derive(Clone, Debug)]
pub struct ChunkGeometry {
    pub coord: ChunkCoord,
    pub size: f64,
    pub resolution: u32,
    /// World `(x, z)` of the local origin.
    pub origin: [f64; 2],
    pub vertices: Vec<TerrainVertex>,
    pub water: WaterPlane,
    pub vegetation: Vec<VegetationPlacement>,
    heights: Vec<f64>,
    biomes: Vec<Biome>,
}

impl ChunkGeometry {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        coord: ChunkCoord,
        size: f64,
        resolution: u32,
        origin: [f64; 2],
        vertices: Vec<TerrainVertex>,
        heights: Vec<f64>,
        biomes: Vec<Biome>,
        water: WaterPlane,
    ) -> Self {
        Self {
            coord,
            size,
            resolution,
            origin,
            vertices,
            water,
            vegetation: Vec::new(),
            heights,
            biomes,
        }
    }

    /// Lattice spacing in world units.
    pub fn step(&self) -> f64 {
        self.size / self.resolution as f64
    }

    /// Sampled height at lattice point `(i, j)`, `0..=resolution` on each axis.
    pub fn lattice_height(&self, i: u32, j: u32) -> Option<f64> {
        let n = self.resolution + 1;
        (i < n && j < n).then(|| self.heights[(i * n + j) as usize])
    }

    /// Biome of quad `(i, j)`, `0..resolution` on each axis.
    pub fn quad_biome(&self, i: u32, j: u32) -> Option<Biome> {
        let r = self.resolution;
        (i < r && j < r).then(|| self.biomes[(i * r + j) as usize])
    }

    /// All quad biomes in row-major order.
    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    /// `true` if the world position lies on this chunk (edges inclusive).
    pub fn contains(&self, world_x: f64, world_z: f64) -> bool {
        let lx = world_x - self.origin[0];
        let lz = world_z - self.origin[1];
        (0.0..=self.size).contains(&lx) && (0.0..=self.size).contains(&lz)
    }

    /// Height where a vertical ray at a world position hits the surface.
    ///
    /// Interpolates on the same triangle the renderer draws, so the result
    /// lies exactly on the visible mesh. `None` off the chunk.
    pub fn ground_height(&self, world_x: f64, world_z: f64) -> Option<f64> {
        if !self.contains(world_x, world_z) {
            return None;
        }
        let r = self.resolution;
        let gx = (world_x - self.origin[0]) / self.step();
        let gz = (world_z - self.origin[1]) / self.step();
        let i = (gx.floor() as u32).min(r - 1);
        let j = (gz.floor() as u32).min(r - 1);
        let fx = gx - i as f64;
        let fz = gz - j as f64;

        let h00 = self.lattice_height(i, j)?;
        let h01 = self.lattice_height(i, j + 1)?;
        let h10 = self.lattice_height(i + 1, j)?;
        let h11 = self.lattice_height(i + 1, j + 1)?;

        // Triangle (v00, v01, v11) holds the half with fz >= fx.
        Some(if fz >= fx {
            h00 + fz * (h01 - h00) + fx * (h11 - h01)
        } else {
            h00 + fx * (h10 - h00) + fz * (h11 - h10)
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Raw vertex buffer for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn positions(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    pub fn normals(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.normal).collect()
    }

    pub fn colors(&self) -> Vec<[f32; 3]> {
        self.vertices.iter().map(|v| v.color).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    /// A single 10x10 quad at origin (20, 30) with corner heights
    /// h00 = 0, h01 = 4, h10 = 2, h11 = 8.
    fn one_quad() -> ChunkGeometry {
        ChunkGeometry::new(
            ChunkCoord::new(2, 3),
            10.0,
            1,
            [20.0, 30.0],
            Vec::new(),
            vec![0.0, 4.0, 2.0, 8.0],
            vec![Biome::Plains],
            WaterPlane {
                height: -5.0,
                size: 10.0,
            },
        )
    }

    #[test]
    fn test_ground_height_hits_corners() {
        let g = one_quad();
        assert!((g.ground_height(20.0, 30.0).unwrap() - 0.0).abs() < EPSILON);
        assert!((g.ground_height(20.0, 40.0).unwrap() - 4.0).abs() < EPSILON);
        assert!((g.ground_height(30.0, 30.0).unwrap() - 2.0).abs() < EPSILON);
        assert!((g.ground_height(30.0, 40.0).unwrap() - 8.0).abs() < EPSILON);
    }

    #[test]
    fn test_ground_height_follows_fixed_diagonal() {
        let g = one_quad();
        // On the diagonal both triangles agree: halfway between h00 and h11.
        assert!((g.ground_height(25.0, 35.0).unwrap() - 4.0).abs() < EPSILON);
        // fz > fx lies on (v00, v01, v11): 0 + 0.75*4 + 0.25*(8-4) = 4.
        assert!((g.ground_height(22.5, 37.5).unwrap() - 4.0).abs() < EPSILON);
        // fx > fz lies on (v00, v11, v10): 0 + 0.75*2 + 0.25*(8-2) = 3.
        assert!((g.ground_height(27.5, 32.5).unwrap() - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_ground_height_off_chunk() {
        let g = one_quad();
        assert!(g.ground_height(19.9, 35.0).is_none());
        assert!(g.ground_height(25.0, 40.1).is_none());
        assert!(g.ground_height(f64::NAN, 35.0).is_none());
    }

    #[test]
    fn test_lattice_and_biome_bounds() {
        let g = one_quad();
        assert_eq!(g.lattice_height(1, 1), Some(8.0));
        assert_eq!(g.lattice_height(2, 0), None);
        assert_eq!(g.quad_biome(0, 0), Some(Biome::Plains));
        assert_eq!(g.quad_biome(1, 0), None);
    }
}
