//! Moisture and volcanic activity fields.

use std::sync::Arc;

use verdant_config::ClimateConfig;

use crate::noise_field::NoiseField;

/// Domain offset of the moisture field.
pub const MOISTURE_OFFSET: (f64, f64) = (1230.0, -450.0);

/// Domain offset of the volcano field.
pub const LAVA_OFFSET: (f64, f64) = (-7919.0, 3571.0);

/// Pure climate samples, decorrelated from elevation by domain offsets.
#[derive(Debug, Clone)]
pub struct ClimateField {
    noise: Arc<NoiseField>,
    config: ClimateConfig,
}

impl ClimateField {
    /// Create a climate field over a shared noise field.
    pub fn new(noise: Arc<NoiseField>, config: ClimateConfig) -> Self {
        Self { noise, config }
    }

    /// Moisture in `[0, 1]`.
    pub fn moisture(&self, x: f64, z: f64) -> f64 {
        let m = self.noise.fbm(
            x + MOISTURE_OFFSET.0,
            z + MOISTURE_OFFSET.1,
            &self.config.moisture,
        );
        ((m + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// `true` where the ground is volcanic. Rare by construction.
    pub fn is_lava(&self, x: f64, z: f64) -> bool {
        let f = self.config.lava_frequency;
        let v = self
            .noise
            .noise_2d((x + LAVA_OFFSET.0) * f, (z + LAVA_OFFSET.1) * f);
        v > self.config.lava_threshold
    }
}
