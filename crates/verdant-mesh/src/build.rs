//! Row-by-row chunk surface synthesis.
//!
//! [`ChunkBuild`] is an iterator: each `next()` builds one row of quads, so a
//! caller can stop after any row and resume on a later frame. Nothing is
//! shared between builds except the read-only [`TerrainSampler`].

use std::f64::consts::TAU;
use std::sync::Arc;

use glam::DVec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use verdant_config::{MeshConfig, VegetationConfig};
use verdant_terrain::biome::{Biome, BiomeDef, classify};
use verdant_terrain::{TerrainSampler, chunk_rng};

use crate::coord::ChunkCoord;
use crate::error::MeshError;
use crate::geometry::{ChunkGeometry, VegetationPlacement, WaterPlane};
use crate::vertex::TerrainVertex;

/// Surface colour of volcanic quads, a hotter red than the catalog swatch.
pub const LAVA_SURFACE_COLOR: u32 = 0xff3300;

/// Quad colour before jitter.
pub fn surface_rgb(biome: Biome) -> [f32; 3] {
    match biome {
        Biome::Lava => BiomeDef {
            color: LAVA_SURFACE_COLOR,
            ..*biome.def()
        }
        .rgb(),
        other => other.def().rgb(),
    }
}

/// What to build: which cell, how big, how finely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkSpec {
    pub coord: ChunkCoord,
    pub size: f64,
    /// Quads per edge.
    pub resolution: u32,
}

impl ChunkSpec {
    pub fn new(coord: ChunkCoord, size: f64, resolution: u32) -> Self {
        Self {
            coord,
            size,
            resolution,
        }
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(MeshError::InvalidSpec(format!(
                "chunk size must be finite and > 0, got {}",
                self.size
            )));
        }
        if self.resolution == 0 {
            return Err(MeshError::InvalidSpec("resolution must be at least 1".into()));
        }
        Ok(())
    }

    /// Lattice spacing in world units.
    pub fn step(&self) -> f64 {
        self.size / self.resolution as f64
    }

    /// World coordinate of a global lattice index.
    ///
    /// Both chunks sharing an edge compute that edge from the same integer
    /// index, so their samples are bit-identical.
    pub fn lattice_world(&self, index: i64) -> f64 {
        index as f64 * self.size / self.resolution as f64
    }

    /// World `(x, z)` of the chunk's local origin.
    pub fn origin(&self) -> [f64; 2] {
        let r = self.resolution as i64;
        [
            self.lattice_world(self.coord.x * r),
            self.lattice_world(self.coord.z * r),
        ]
    }
}

/// Progress after one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowReport {
    /// Index of the row just built.
    pub row: u32,
    pub rows_total: u32,
}

/// An in-progress chunk build.
///
/// Yields one `Ok(RowReport)` per row. A non-finite height yields one `Err`
/// and the iterator ends. Call [`ChunkBuild::finish`] once every row is done.
pub struct ChunkBuild {
    spec: ChunkSpec,
    sampler: Arc<TerrainSampler>,
    mesh: MeshConfig,
    vegetation: VegetationConfig,
    rng: ChaCha8Rng,
    heights: Vec<f64>,
    lines_sampled: u32,
    biomes: Vec<Biome>,
    vertices: Vec<TerrainVertex>,
    next_row: u32,
    failed: bool,
}

impl ChunkBuild {
    pub fn new(
        spec: ChunkSpec,
        sampler: Arc<TerrainSampler>,
        mesh: MeshConfig,
        vegetation: VegetationConfig,
    ) -> Result<Self, MeshError> {
        spec.validate()?;
        let r = spec.resolution as usize;
        let rng = chunk_rng(sampler.seed(), spec.coord.x, spec.coord.z);
        tracing::debug!(coord = %spec.coord, resolution = spec.resolution, "chunk build started");
        Ok(Self {
            spec,
            sampler,
            mesh,
            vegetation,
            rng,
            heights: Vec::with_capacity((r + 1) * (r + 1)),
            lines_sampled: 0,
            biomes: Vec::with_capacity(r * r),
            vertices: Vec::with_capacity(r * r * 6),
            next_row: 0,
            failed: false,
        })
    }

    pub fn spec(&self) -> &ChunkSpec {
        &self.spec
    }

    pub fn coord(&self) -> ChunkCoord {
        self.spec.coord
    }

    pub fn rows_done(&self) -> u32 {
        self.next_row
    }

    /// Every row built and no failure.
    pub fn is_complete(&self) -> bool {
        !self.failed && self.next_row == self.spec.resolution
    }

    /// Sample lattice line `i` (all `j`) if it has not been sampled yet.
    fn sample_line(&mut self, i: u32) -> Result<(), MeshError> {
        let r = self.spec.resolution as i64;
        while self.lines_sampled <= i {
            let line = self.lines_sampled;
            let x = self.spec.lattice_world(self.spec.coord.x * r + line as i64);
            for j in 0..=r {
                let z = self.spec.lattice_world(self.spec.coord.z * r + j);
                let h = self.sampler.height_at(x, z);
                if !h.is_finite() {
                    return Err(MeshError::NonFiniteHeight { x, z });
                }
                self.heights.push(h);
            }
            self.lines_sampled += 1;
        }
        Ok(())
    }

    fn height(&self, i: u32, j: u32) -> f64 {
        self.heights[(i * (self.spec.resolution + 1) + j) as usize]
    }

    fn build_row(&mut self, i: u32) -> Result<(), MeshError> {
        self.sample_line(i)?;
        self.sample_line(i + 1)?;

        let step = self.spec.step();
        let [ox, oz] = self.spec.origin();
        let local = |i: u32, j: u32, h: f64| DVec3::new(i as f64 * step, h, j as f64 * step);

        for j in 0..self.spec.resolution {
            let h00 = self.height(i, j);
            let h01 = self.height(i, j + 1);
            let h10 = self.height(i + 1, j);
            let h11 = self.height(i + 1, j + 1);

            let cx = ox + (i as f64 + 0.5) * step;
            let cz = oz + (j as f64 + 0.5) * step;
            let biome = classify(
                (h00 + h01 + h10 + h11) * 0.25,
                self.sampler.moisture_at(cx, cz),
                self.sampler.is_lava_at(cx, cz),
            );
            self.biomes.push(biome);

            let jitter = (self.rng.random::<f32>() - 0.5) * self.mesh.color_jitter;
            let color = surface_rgb(biome).map(|c| (c + jitter).clamp(0.0, 1.0));

            let v00 = local(i, j, h00);
            let v01 = local(i, j + 1, h01);
            let v10 = local(i + 1, j, h10);
            let v11 = local(i + 1, j + 1, h11);
            self.push_triangle(v00, v01, v11, color);
            self.push_triangle(v00, v11, v10, color);
        }
        Ok(())
    }

    fn push_triangle(&mut self, a: DVec3, b: DVec3, c: DVec3, color: [f32; 3]) {
        let normal = (c - b).cross(a - b).try_normalize().unwrap_or(DVec3::Y);
        let normal = normal.as_vec3();
        for p in [a, b, c] {
            self.vertices
                .push(TerrainVertex::new(p.as_vec3(), normal, color));
        }
    }

    /// Assemble the geometry: surface, water plane and vegetation.
    pub fn finish(mut self) -> Result<ChunkGeometry, MeshError> {
        if !self.is_complete() {
            return Err(MeshError::Incomplete {
                rows_done: self.next_row,
                rows_total: self.spec.resolution,
            });
        }

        let water = WaterPlane {
            height: self.sampler.sea_level(),
            size: self.spec.size,
        };
        let mut geometry = ChunkGeometry::new(
            self.spec.coord,
            self.spec.size,
            self.spec.resolution,
            self.spec.origin(),
            std::mem::take(&mut self.vertices),
            std::mem::take(&mut self.heights),
            std::mem::take(&mut self.biomes),
            water,
        );
        let vegetation = self.scatter_vegetation(&geometry);
        geometry.vegetation = vegetation;

        tracing::debug!(
            coord = %geometry.coord,
            triangles = geometry.triangle_count(),
            plants = geometry.vegetation.len(),
            "chunk build finished"
        );
        Ok(geometry)
    }

    fn scatter_vegetation(&mut self, geometry: &ChunkGeometry) -> Vec<VegetationPlacement> {
        let v = &self.vegetation;
        let sea_level = self.sampler.sea_level();
        let [ox, oz] = geometry.origin;
        let mut placements = Vec::new();

        for _ in 0..v.candidates_per_chunk {
            let x = ox + self.rng.random::<f64>() * self.spec.size;
            let z = oz + self.rng.random::<f64>() * self.spec.size;
            let Some(h) = geometry.ground_height(x, z) else {
                continue;
            };
            if h <= sea_level || h > v.max_altitude || self.sampler.is_lava_at(x, z) {
                continue;
            }

            let biome = classify(h, self.sampler.moisture_at(x, z), false);
            let Some(flora) = biome.flora() else {
                continue;
            };
            if self.rng.random::<f64>() >= v.placement_probability {
                continue;
            }

            let flora = flora.resolve(&mut self.rng);
            let Some(recipe) = flora.recipe() else {
                continue;
            };
            placements.push(VegetationPlacement {
                position: [x, h, z],
                biome,
                flora,
                recipe,
                scale: self.rng.random_range(v.scale_min..=v.scale_max),
                rotation: self.rng.random::<f64>() * TAU,
                seed: self.rng.random(),
            });
        }
        placements
    }
}

impl Iterator for ChunkBuild {
    type Item = Result<RowReport, MeshError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_row >= self.spec.resolution {
            return None;
        }
        let row = self.next_row;
        match self.build_row(row) {
            Ok(()) => {
                self.next_row += 1;
                Some(Ok(RowReport {
                    row,
                    rows_total: self.spec.resolution,
                }))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for ChunkBuild {}
