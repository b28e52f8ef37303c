//! Seeded gradient noise and the fractal sums built on it.
//!
//! Every other field in the crate samples through a shared [`NoiseField`], so
//! a single seed determines the whole world.

use std::fmt;

use noise::{NoiseFn, Simplex};
use verdant_config::FractalParams;

/// Sample coordinates at or beyond this magnitude are reduced modulo it
/// before reaching the generator, which cannot index cells past `isize`.
pub const NOISE_PERIOD: f64 = 4_294_967_296.0;

/// Seeded 2D/3D simplex noise with fBm and ridged helpers.
///
/// Immutable after construction; share it behind an `Arc`.
pub struct NoiseField {
    seed: u64,
    simplex: Simplex,
}

/// Fold a 64-bit world seed into the 32-bit seed the simplex generator takes.
///
/// Both halves contribute, so seeds differing only in the high word still
/// produce different permutation tables.
pub fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

impl NoiseField {
    /// Build the permutation table for `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            simplex: Simplex::new(fold_seed(seed)),
        }
    }

    /// Rebuild the permutation table. Equivalent to starting a new world.
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// The world seed this field was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Raw 2D noise, approximately in `[-1, 1]`. NaN for non-finite input.
    #[inline]
    pub fn noise_2d(&self, x: f64, y: f64) -> f64 {
        if !(x.is_finite() && y.is_finite()) {
            return f64::NAN;
        }
        self.simplex.get([wrap(x), wrap(y)])
    }

    /// Raw 3D noise, approximately in `[-1, 1]`. NaN for non-finite input.
    #[inline]
    pub fn noise_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return f64::NAN;
        }
        self.simplex.get([wrap(x), wrap(y), wrap(z)])
    }

    /// Fractal Brownian motion over `noise_2d`, normalized by the amplitude sum.
    ///
    /// The result stays in the same range as a single noise sample.
    pub fn fbm(&self, x: f64, z: f64, params: &FractalParams) -> f64 {
        self.octave_sum(x, z, params, |n| n)
    }

    /// Ridged multifractal: each octave contributes `(1 - |n|)³`.
    ///
    /// Output lies in `[0, 1]`, with sharp crests where the noise crosses zero.
    pub fn ridged(&self, x: f64, z: f64, params: &FractalParams) -> f64 {
        self.octave_sum(x, z, params, |n| {
            let r = 1.0 - n.abs();
            r * r * r
        })
    }

    fn octave_sum(&self, x: f64, z: f64, params: &FractalParams, shape: impl Fn(f64) -> f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = params.frequency;
        let mut amplitude = 1.0;
        let mut norm = 0.0;

        for _ in 0..params.octaves {
            total += shape(self.noise_2d(x * frequency, z * frequency)) * amplitude;
            norm += amplitude;
            amplitude *= params.persistence;
            frequency *= params.lacunarity;
        }

        if norm > 0.0 { total / norm } else { 0.0 }
    }
}

/// Identity inside `(-NOISE_PERIOD, NOISE_PERIOD)`, so nearby terrain is unaffected.
#[inline]
fn wrap(v: f64) -> f64 {
    if v.abs() < NOISE_PERIOD { v } else { v % NOISE_PERIOD }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}
