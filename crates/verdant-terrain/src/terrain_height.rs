//! Surface elevation: continents, masked ridged mountains and local detail.

use std::sync::Arc;

use verdant_config::TerrainConfig;

use crate::noise_field::NoiseField;

/// Domain offset of the mountain mask, decorrelating it from the continent term.
pub const MOUNTAIN_MASK_OFFSET: f64 = 500.0;

/// Compress elevations near zero toward zero, leaving the rest untouched.
///
/// Inside `|h| < band` the elevation is scaled by a factor that blends from
/// `compression` at `h = 0` to `1.0` at `|h| = band` along a smoothstep, so
/// the mapping is continuous at the band edge. A non-positive band disables
/// the rule.
pub fn soften_shore(h: f64, band: f64, compression: f64) -> f64 {
    if !(band > 0.0) || !(h.abs() < band) {
        return h;
    }
    let t = h.abs() / band;
    let blend = t * t * (3.0 - 2.0 * t);
    h * (compression + (1.0 - compression) * blend)
}

/// Pure elevation function `(x, z) -> height`.
#[derive(Debug, Clone)]
pub struct TerrainHeightField {
    noise: Arc<NoiseField>,
    config: TerrainConfig,
}

impl TerrainHeightField {
    /// Create a height field over a shared noise field.
    pub fn new(noise: Arc<NoiseField>, config: TerrainConfig) -> Self {
        Self { noise, config }
    }

    /// Elevation at a world position. Deterministic and continuous.
    pub fn height(&self, x: f64, z: f64) -> f64 {
        let c = &self.config;
        let mut h = soften_shore(self.continent(x, z), c.shore_band, c.shore_compression);

        let mask = self.mountain_mask(x, z);
        if mask > 0.0 {
            h += self.noise.ridged(x, z, &c.ridge) * c.mountain_height * mask;
        }

        h + self.noise.fbm(x, z, &c.detail) * c.detail_amplitude
    }

    /// Continent term before shoreline softening.
    pub fn continent(&self, x: f64, z: f64) -> f64 {
        let c = &self.config;
        self.noise.fbm(x, z, &c.continent) * c.continent_scale + c.continent_bias
    }

    /// Mountain mask in `[0, ∞)`; zero means flat land.
    pub fn mountain_mask(&self, x: f64, z: f64) -> f64 {
        let c = &self.config;
        let m = self.noise.fbm(
            x + MOUNTAIN_MASK_OFFSET,
            z + MOUNTAIN_MASK_OFFSET,
            &c.mountain_mask,
        );
        ((m - c.mountain_threshold) * c.mountain_gain).max(0.0)
    }

    /// Height of the water plane.
    pub fn sea_level(&self) -> f64 {
        self.config.sea_level
    }

    /// The coefficients this field was built with.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn field(seed: u64) -> TerrainHeightField {
        TerrainHeightField::new(Arc::new(NoiseField::new(seed)), TerrainConfig::default())
    }

    #[test]
    fn test_determinism_across_instances() {
        let a = field(42);
        let b = field(42);
        for i in 0..200 {
            let x = i as f64 * 97.3 - 5000.0;
            let z = i as f64 * -41.9 + 1200.0;
            assert_eq!(a.height(x, z), b.height(x, z), "height differs at ({x}, {z})");
        }
    }

    #[test]
    fn test_different_seeds_different_terrain() {
        let a = field(1);
        let b = field(2);
        let differs = (0..100).any(|i| {
            let x = i as f64 * 333.0;
            (a.height(x, x) - b.height(x, x)).abs() > EPSILON
        });
        assert!(differs, "Different seeds should produce different terrain");
    }

    #[test]
    fn test_height_is_finite() {
        let f = field(7);
        for i in 0..1000 {
            let x = (i as f64 - 500.0) * 523.7;
            let z = (i as f64 - 500.0) * -311.1;
            assert!(f.height(x, z).is_finite());
        }
    }

    #[test]
    fn test_height_is_continuous() {
        let f = field(9);
        for i in 0..100 {
            let x = i as f64 * 157.0;
            let z = i as f64 * 71.0;
            let a = f.height(x, z);
            let b = f.height(x + 0.01, z);
            assert!((a - b).abs() < 1.0, "jump of {} at ({x}, {z})", (a - b).abs());
        }
    }

    #[test]
    fn test_shore_softening_continuous_at_band_edge() {
        let band = 10.0;
        let inside = soften_shore(band - 1e-9, band, 0.8);
        let outside = soften_shore(band + 1e-9, band, 0.8);
        assert!((inside - outside).abs() < 1e-6, "{inside} vs {outside}");

        let neg_inside = soften_shore(-band + 1e-9, band, 0.8);
        let neg_outside = soften_shore(-band - 1e-9, band, 0.8);
        assert!((neg_inside - neg_outside).abs() < 1e-6);
    }

    #[test]
    fn test_shore_softening_compresses_near_zero() {
        let h = 0.5;
        let softened = soften_shore(h, 10.0, 0.8);
        assert!(softened < h, "beaches should be compressed toward 0");
        assert!(softened > 0.8 * h - EPSILON, "no stronger than the compression factor");
        assert_eq!(soften_shore(0.0, 10.0, 0.8), 0.0);
    }

    #[test]
    fn test_shore_softening_preserves_sign_and_order() {
        let mut prev = soften_shore(-10.0, 10.0, 0.8);
        for i in 1..=200 {
            let h = -10.0 + i as f64 * 0.1;
            let s = soften_shore(h, 10.0, 0.8);
            assert!(s >= prev, "softening must be monotonic at h={h}");
            assert_eq!(s.signum(), h.signum());
            prev = s;
        }
    }

    #[test]
    fn test_shore_softening_outside_band_untouched() {
        assert_eq!(soften_shore(25.0, 10.0, 0.8), 25.0);
        assert_eq!(soften_shore(-300.0, 10.0, 0.8), -300.0);
        assert_eq!(soften_shore(3.0, 0.0, 0.8), 3.0);
    }

    #[test]
    fn test_flat_config_is_bias_only() {
        let config = TerrainConfig {
            continent_scale: 0.0,
            mountain_height: 0.0,
            detail_amplitude: 0.0,
            continent_bias: 40.0,
            ..Default::default()
        };
        let f = TerrainHeightField::new(Arc::new(NoiseField::new(3)), config);
        assert!((f.height(123.0, 456.0) - 40.0).abs() < EPSILON);
    }

    #[test]
    fn test_mountain_mask_non_negative() {
        let f = field(5);
        for i in 0..500 {
            let x = i as f64 * 997.0;
            assert!(f.mountain_mask(x, -x) >= 0.0);
        }
    }

    #[test]
    fn test_no_mountains_below_threshold() {
        let config = TerrainConfig {
            mountain_threshold: 10.0,
            ..Default::default()
        };
        let f = TerrainHeightField::new(Arc::new(NoiseField::new(8)), config.clone());
        let flat = TerrainHeightField::new(
            Arc::new(NoiseField::new(8)),
            TerrainConfig {
                mountain_height: 0.0,
                ..config
            },
        );
        for i in 0..50 {
            let x = i as f64 * 1234.5;
            assert_eq!(f.height(x, x), flat.height(x, x));
        }
    }
}
