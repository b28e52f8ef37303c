//! Volumetric cave predicate: thin tunnels plus large caverns.
//!
//! Not consulted by surface meshing; exposed for consumers that carve or
//! probe underground space.

use std::sync::Arc;

use verdant_config::CaveConfig;

use crate::noise_field::NoiseField;

/// Offset of the second tunnel sample, applied after frequency scaling.
pub const TUNNEL_SAMPLE_OFFSET: f64 = 100.0;

/// Pure `(x, y, z) -> bool` cave test.
#[derive(Debug, Clone)]
pub struct CaveField {
    noise: Arc<NoiseField>,
    config: CaveConfig,
}

impl CaveField {
    /// Create a cave field over a shared noise field.
    pub fn new(noise: Arc<NoiseField>, config: CaveConfig) -> Self {
        Self { noise, config }
    }

    /// `true` if the point is open underground space.
    pub fn is_cave(&self, x: f64, y: f64, z: f64) -> bool {
        if y < self.config.min_y {
            return false;
        }
        self.tunnel_value(x, y, z) < self.config.tunnel_threshold
            || self.cavern_value(x, y, z) > self.config.cavern_threshold
    }

    /// Sum of two absolute noise samples; small near both zero-surfaces.
    pub fn tunnel_value(&self, x: f64, y: f64, z: f64) -> f64 {
        let c = &self.config;
        let sx = x * c.tunnel_frequency_xz;
        let sy = y * c.tunnel_frequency_y;
        let sz = z * c.tunnel_frequency_xz;
        let a = self.noise.noise_3d(sx, sy, sz);
        let b = self.noise.noise_3d(
            sx + TUNNEL_SAMPLE_OFFSET,
            sy + TUNNEL_SAMPLE_OFFSET,
            sz + TUNNEL_SAMPLE_OFFSET,
        );
        a.abs() + b.abs()
    }

    /// Low-frequency sample whose peaks become caverns.
    pub fn cavern_value(&self, x: f64, y: f64, z: f64) -> f64 {
        let c = &self.config;
        self.noise.noise_3d(
            x * c.cavern_frequency_xz,
            y * c.cavern_frequency_y,
            z * c.cavern_frequency_xz,
        )
    }
}
