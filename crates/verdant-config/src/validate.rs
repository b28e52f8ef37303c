//! Startup validation of configuration values.
//!
//! Every check here guards a value that would otherwise surface later as a
//! non-finite height, an empty grid, or a division by zero in the chunk
//! math. Validation runs once before any field or streamer is built.

use crate::config::{Config, FractalParams};
use crate::error::ConfigError;

/// Largest accepted render radius; the needed set holds `(2r + 1)²` chunks.
pub const MAX_RENDER_RADIUS: u32 = 128;

/// Largest accepted grid resolution (quads per chunk edge).
pub const MAX_GRID_RESOLUTION: u32 = 4096;

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite, got {value}")))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite and > 0, got {value}")))
    }
}

fn fractal(field: &'static str, params: &FractalParams) -> Result<(), ConfigError> {
    if params.octaves == 0 {
        return Err(invalid(field, "octaves must be at least 1"));
    }
    if !(params.frequency.is_finite() && params.frequency > 0.0) {
        return Err(invalid(
            field,
            format!("frequency must be finite and > 0, got {}", params.frequency),
        ));
    }
    if !(params.lacunarity.is_finite() && params.lacunarity > 0.0) {
        return Err(invalid(
            field,
            format!("lacunarity must be finite and > 0, got {}", params.lacunarity),
        ));
    }
    if !(params.persistence.is_finite() && params.persistence > 0.0) {
        return Err(invalid(
            field,
            format!("persistence must be finite and > 0, got {}", params.persistence),
        ));
    }
    Ok(())
}

impl Config {
    /// Check every value the pipeline depends on.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.terrain;
        fractal("terrain.continent", &t.continent)?;
        fractal("terrain.mountain_mask", &t.mountain_mask)?;
        fractal("terrain.ridge", &t.ridge)?;
        fractal("terrain.detail", &t.detail)?;
        finite("terrain.sea_level", t.sea_level)?;
        finite("terrain.continent_scale", t.continent_scale)?;
        finite("terrain.continent_bias", t.continent_bias)?;
        finite("terrain.mountain_threshold", t.mountain_threshold)?;
        finite("terrain.mountain_gain", t.mountain_gain)?;
        finite("terrain.mountain_height", t.mountain_height)?;
        finite("terrain.detail_amplitude", t.detail_amplitude)?;
        finite("terrain.shore_compression", t.shore_compression)?;
        if !(t.shore_band.is_finite() && t.shore_band >= 0.0) {
            return Err(invalid(
                "terrain.shore_band",
                format!("must be finite and >= 0, got {}", t.shore_band),
            ));
        }

        fractal("climate.moisture", &self.climate.moisture)?;
        positive("climate.lava_frequency", self.climate.lava_frequency)?;
        finite("climate.lava_threshold", self.climate.lava_threshold)?;

        let c = &self.caves;
        finite("caves.min_y", c.min_y)?;
        positive("caves.tunnel_frequency_xz", c.tunnel_frequency_xz)?;
        positive("caves.tunnel_frequency_y", c.tunnel_frequency_y)?;
        finite("caves.tunnel_threshold", c.tunnel_threshold)?;
        positive("caves.cavern_frequency_xz", c.cavern_frequency_xz)?;
        positive("caves.cavern_frequency_y", c.cavern_frequency_y)?;
        finite("caves.cavern_threshold", c.cavern_threshold)?;

        let resolution = self.mesh.grid_resolution;
        if !(1..=MAX_GRID_RESOLUTION).contains(&resolution) {
            return Err(invalid(
                "mesh.grid_resolution",
                format!("must be within [1, {MAX_GRID_RESOLUTION}], got {resolution}"),
            ));
        }
        if !(self.mesh.color_jitter.is_finite() && self.mesh.color_jitter >= 0.0) {
            return Err(invalid(
                "mesh.color_jitter",
                format!("must be finite and >= 0, got {}", self.mesh.color_jitter),
            ));
        }

        positive("streaming.chunk_size", self.streaming.chunk_size)?;
        let radius = self.streaming.render_radius;
        if radius > MAX_RENDER_RADIUS {
            return Err(invalid(
                "streaming.render_radius",
                format!("must be at most {MAX_RENDER_RADIUS}, got {radius}"),
            ));
        }
        let budget = self.streaming.slice_budget_ms;
        if !(budget.is_finite() && budget >= 0.0) {
            return Err(invalid(
                "streaming.slice_budget_ms",
                format!("must be finite and >= 0, got {budget}"),
            ));
        }

        let v = &self.vegetation;
        if !(0.0..=1.0).contains(&v.placement_probability) {
            return Err(invalid(
                "vegetation.placement_probability",
                format!("must be within [0, 1], got {}", v.placement_probability),
            ));
        }
        finite("vegetation.max_altitude", v.max_altitude)?;
        positive("vegetation.scale_min", v.scale_min)?;
        positive("vegetation.scale_max", v.scale_max)?;
        if v.scale_min > v.scale_max {
            return Err(invalid(
                "vegetation.scale_min",
                format!("{} exceeds scale_max {}", v.scale_min, v.scale_max),
            ));
        }

        Ok(())
    }
}
