//! Coarse biome survey around a point, sampled straight from the fields.

use rustc_hash::FxHashMap;
use verdant_terrain::{Biome, TerrainSampler};

/// Count biomes on a `samples × samples` grid spanning `extent` around `(cx, cz)`.
///
/// Returned most common first, ties in catalog order.
pub fn biome_histogram(
    sampler: &TerrainSampler,
    cx: f64,
    cz: f64,
    extent: f64,
    samples: u32,
) -> Vec<(Biome, usize)> {
    let mut counts: FxHashMap<Biome, usize> = FxHashMap::default();
    let n = samples.max(1);
    let step = extent / n as f64;
    let start_x = cx - extent * 0.5 + step * 0.5;
    let start_z = cz - extent * 0.5 + step * 0.5;
    for i in 0..n {
        for j in 0..n {
            let biome = sampler.biome_at(start_x + i as f64 * step, start_z + j as f64 * step);
            *counts.entry(biome).or_default() += 1;
        }
    }
    let mut sorted: Vec<_> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_config::Config;

    #[test]
    fn test_histogram_counts_every_sample() {
        let sampler = TerrainSampler::from_config(&Config::default());
        let hist = biome_histogram(&sampler, 0.0, 0.0, 3000.0, 16);
        assert_eq!(hist.iter().map(|(_, n)| n).sum::<usize>(), 256);
        assert!(hist.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_zero_samples_clamped() {
        let sampler = TerrainSampler::from_config(&Config::default());
        assert_eq!(biome_histogram(&sampler, 0.0, 0.0, 100.0, 0).len(), 1);
    }
}
