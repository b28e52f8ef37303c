//! Ordered, first-match-wins mapping from (elevation, moisture, volcanic) to a biome.

use super::def::Biome;

/// Multiplier applied to moisture before taking the fractional part that
/// splits the savanna/drylands rung.
pub const GRASSLAND_SPLIT_SCALE: f64 = 100.0;

/// Elevations strictly below each bound are submerged or coastal.
const LOWLANDS: [(f64, Biome); 3] = [
    (-25.0, Biome::Ocean),
    (-2.0, Biome::Shallows),
    (5.0, Biome::Beach),
];

/// Above this elevation everything is snow.
const SNOW_LINE: f64 = 320.0;

/// Elevation bands above the midlands: `(floor, wet rungs, dry fallback)`.
/// Each rung applies when moisture is strictly above its bound.
const HIGHLANDS: [(f64, [(f64, Biome); 2], Biome); 2] = [
    (
        220.0,
        [(0.6, Biome::Taiga), (0.3, Biome::Tundra)],
        Biome::Stone,
    ),
    (
        140.0,
        [(0.7, Biome::Highlands), (0.4, Biome::AutumnWoods)],
        Biome::Cliff,
    ),
];

#[derive(Clone, Copy)]
enum Rung {
    One(Biome),
    /// Two biomes sharing a moisture band, interleaved deterministically.
    Split(Biome, Biome),
}

/// Midland moisture ladder; moisture strictly below each bound matches.
const MIDLANDS: [(f64, Rung); 14] = [
    (0.15, Rung::One(Biome::Desert)),
    (0.25, Rung::One(Biome::RedDesert)),
    (0.35, Rung::One(Biome::Scorched)),
    (0.45, Rung::Split(Biome::Savanna, Biome::Drylands)),
    (0.55, Rung::One(Biome::Mediterranean)),
    (0.60, Rung::One(Biome::Plains)),
    (0.65, Rung::One(Biome::SunflowerPlains)),
    (0.70, Rung::One(Biome::FlowerField)),
    (0.75, Rung::One(Biome::BirchForest)),
    (0.80, Rung::One(Biome::Forest)),
    (0.85, Rung::One(Biome::CherryGrove)),
    (0.90, Rung::One(Biome::MagicForest)),
    (0.95, Rung::One(Biome::Rainforest)),
    (f64::INFINITY, Rung::One(Biome::Swamp)),
];

/// Biome for a surface point. Total: every input, NaN included, maps to a biome.
pub fn classify(elevation: f64, moisture: f64, volcanic: bool) -> Biome {
    if volcanic {
        return Biome::Lava;
    }

    for (bound, biome) in LOWLANDS {
        if elevation < bound {
            return biome;
        }
    }

    if elevation > SNOW_LINE {
        return Biome::Snow;
    }

    for (floor, rungs, fallback) in HIGHLANDS {
        if elevation > floor {
            return rungs
                .iter()
                .find(|(bound, _)| moisture > *bound)
                .map_or(fallback, |&(_, biome)| biome);
        }
    }

    for (bound, rung) in MIDLANDS {
        if moisture < bound {
            return match rung {
                Rung::One(biome) => biome,
                Rung::Split(first, second) => split(moisture, first, second),
            };
        }
    }

    // NaN moisture fails every comparison above.
    Biome::Swamp
}

fn split(moisture: f64, first: Biome, second: Biome) -> Biome {
    if (moisture * GRASSLAND_SPLIT_SCALE).fract() < 0.5 {
        first
    } else {
        second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volcanic_overrides_everything() {
        for (e, m) in [(-100.0, 0.5), (0.0, 0.0), (500.0, 1.0), (f64::NAN, f64::NAN)] {
            assert_eq!(classify(e, m, true), Biome::Lava);
        }
    }

    #[test]
    fn test_lowland_bands() {
        assert_eq!(classify(-26.0, 0.5, false), Biome::Ocean);
        assert_eq!(classify(-25.0, 0.5, false), Biome::Shallows);
        assert_eq!(classify(-3.0, 0.5, false), Biome::Shallows);
        assert_eq!(classify(-2.0, 0.5, false), Biome::Beach);
        assert_eq!(classify(4.99, 0.5, false), Biome::Beach);
        assert_ne!(classify(5.0, 0.5, false), Biome::Beach);
    }

    #[test]
    fn test_mountain_bands() {
        assert_eq!(classify(321.0, 0.0, false), Biome::Snow);
        assert_eq!(classify(320.0, 0.9, false), Biome::Taiga);
        assert_eq!(classify(250.0, 0.5, false), Biome::Tundra);
        assert_eq!(classify(250.0, 0.3, false), Biome::Stone);
        assert_eq!(classify(200.0, 0.8, false), Biome::Highlands);
        assert_eq!(classify(200.0, 0.5, false), Biome::AutumnWoods);
        assert_eq!(classify(200.0, 0.4, false), Biome::Cliff);
        assert_ne!(classify(140.0, 0.1, false), Biome::Cliff);
    }

    #[test]
    fn test_midland_ladder() {
        let cases = [
            (0.10, Biome::Desert),
            (0.20, Biome::RedDesert),
            (0.30, Biome::Scorched),
            (0.50, Biome::Mediterranean),
            (0.57, Biome::Plains),
            (0.62, Biome::SunflowerPlains),
            (0.67, Biome::FlowerField),
            (0.72, Biome::BirchForest),
            (0.77, Biome::Forest),
            (0.82, Biome::CherryGrove),
            (0.87, Biome::MagicForest),
            (0.92, Biome::Rainforest),
            (0.97, Biome::Swamp),
            (1.0, Biome::Swamp),
        ];
        for (m, expected) in cases {
            assert_eq!(classify(50.0, m, false), expected, "moisture {m}");
        }
    }

    #[test]
    fn test_ladder_bounds_are_exclusive() {
        assert_eq!(classify(50.0, 0.15, false), Biome::RedDesert);
        assert_eq!(classify(50.0, 0.95, false), Biome::Swamp);
    }

    #[test]
    fn test_grassland_split_is_deterministic() {
        for i in 0..100 {
            let m = 0.35 + i as f64 * 0.000_99;
            let a = classify(50.0, m, false);
            let b = classify(50.0, m, false);
            assert_eq!(a, b);
            assert!(matches!(a, Biome::Savanna | Biome::Drylands), "{a:?} at {m}");
        }
    }

    #[test]
    fn test_grassland_split_produces_both() {
        let biomes: Vec<_> = (0..100)
            .map(|i| classify(50.0, 0.35 + i as f64 * 0.000_99, false))
            .collect();
        assert!(biomes.contains(&Biome::Savanna));
        assert!(biomes.contains(&Biome::Drylands));
    }

    #[test]
    fn test_total_over_grid() {
        for ei in -50..=50 {
            for mi in -2..=12 {
                let e = ei as f64 * 10.0;
                let m = mi as f64 * 0.1;
                let _ = classify(e, m, false);
            }
        }
        assert_eq!(classify(f64::NAN, f64::NAN, false), Biome::Swamp);
        assert_eq!(classify(50.0, f64::NAN, false), Biome::Swamp);
        assert_eq!(classify(f64::INFINITY, 0.5, false), Biome::Snow);
        assert_eq!(classify(f64::NEG_INFINITY, 0.5, false), Biome::Ocean);
    }
}
