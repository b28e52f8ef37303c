//! Flora keys and the growth recipes handed to the external flora drawer.
//!
//! Hues are in degrees, saturation and lightness in percent. A hue range whose
//! minimum exceeds its maximum wraps through 360 (e.g. carnation red).

use rand::Rng;

/// Identifies a plant species a biome can grow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloraKey {
    PineNordic,
    SpruceBlue,
    OakClassic,
    Birch,
    Maple,
    Sakura,
    Jacaranda,
    Baobab,
    Acacia,
    Olive,
    PalmCoco,
    BambooGrove,
    SugarCane,
    CactusSaguaro,
    CactusNopal,
    WillowWeeping,
    BushBerry,
    BushSnow,
    Shrub,
    Dead,
    WaterLily,
    Sunflower,
    Tulip,
    Dahlia,
    BlueAster,
    Daisy,
    WhitePoppy,
    Carnation,
    Orchid,
    /// Placeholder for "any of [`FloraKey::FLOWER_MIX`]"; resolve before use.
    FlowerMix,
}

impl FloraKey {
    /// Flowers a [`FloraKey::FlowerMix`] can resolve to.
    pub const FLOWER_MIX: [FloraKey; 7] = [
        FloraKey::Tulip,
        FloraKey::Dahlia,
        FloraKey::BlueAster,
        FloraKey::Daisy,
        FloraKey::WhitePoppy,
        FloraKey::Carnation,
        FloraKey::Orchid,
    ];

    /// Stable snake_case identifier.
    pub fn name(self) -> &'static str {
        match self {
            FloraKey::PineNordic => "pine_nordic",
            FloraKey::SpruceBlue => "spruce_blue",
            FloraKey::OakClassic => "oak_classic",
            FloraKey::Birch => "birch",
            FloraKey::Maple => "maple",
            FloraKey::Sakura => "sakura",
            FloraKey::Jacaranda => "jacaranda",
            FloraKey::Baobab => "baobab",
            FloraKey::Acacia => "acacia",
            FloraKey::Olive => "olive",
            FloraKey::PalmCoco => "palm_coco",
            FloraKey::BambooGrove => "bamboo_grove",
            FloraKey::SugarCane => "sugar_cane",
            FloraKey::CactusSaguaro => "cactus_saguaro",
            FloraKey::CactusNopal => "cactus_nopal",
            FloraKey::WillowWeeping => "willow_weeping",
            FloraKey::BushBerry => "bush_berry",
            FloraKey::BushSnow => "bush_snow",
            FloraKey::Shrub => "shrub",
            FloraKey::Dead => "dead",
            FloraKey::WaterLily => "water_lily",
            FloraKey::Sunflower => "sunflower",
            FloraKey::Tulip => "tulip",
            FloraKey::Dahlia => "dahlia",
            FloraKey::BlueAster => "blue_aster",
            FloraKey::Daisy => "daisy",
            FloraKey::WhitePoppy => "white_poppy",
            FloraKey::Carnation => "carnation",
            FloraKey::Orchid => "orchid",
            FloraKey::FlowerMix => "flower_mix",
        }
    }

    /// Pick a concrete species. Only [`FloraKey::FlowerMix`] consumes randomness.
    pub fn resolve<R: Rng>(self, rng: &mut R) -> FloraKey {
        match self {
            FloraKey::FlowerMix => {
                Self::FLOWER_MIX[rng.random_range(0..Self::FLOWER_MIX.len())]
            }
            other => other,
        }
    }

    /// Growth recipe for a concrete species; `None` for an unresolved mix.
    pub fn recipe(self) -> Option<FloraRecipe> {
        let tree = |recipe: TreeRecipe| Some(FloraRecipe::Tree(recipe));
        let flower = |recipe: FlowerRecipe| Some(FloraRecipe::Flower(recipe));

        match self {
            FloraKey::FlowerMix => None,
            FloraKey::OakClassic | FloraKey::BushSnow => tree(TreeRecipe::BASE),
            FloraKey::PineNordic => tree(TreeRecipe {
                growth: GrowthPattern::Conifer,
                branch_hue: [20.0, 30.0],
                leaf_hue: [140.0, 160.0],
                scale: 1.2,
                ..TreeRecipe::BASE
            }),
            FloraKey::SpruceBlue => tree(TreeRecipe {
                growth: GrowthPattern::Conifer,
                branch_hue: [10.0, 20.0],
                leaf_hue: [170.0, 200.0],
                ..TreeRecipe::BASE
            }),
            FloraKey::Birch => tree(TreeRecipe {
                branch_hue: [220.0, 240.0],
                leaf_hue: [70.0, 90.0],
                branch_angle: [0.2, 0.4],
                length_decay: 0.8,
                width_decay: 0.6,
                gravity: 0.05,
                ..TreeRecipe::BASE
            }),
            FloraKey::Maple => tree(TreeRecipe {
                branch_hue: [20.0, 30.0],
                leaf_hue: [0.0, 20.0],
                branch_angle: [0.5, 0.9],
                length_decay: 0.75,
                gravity: 0.02,
                leaf_shape: LeafShape::Flower,
                start_length_factor: 0.22,
                ..TreeRecipe::BASE
            }),
            FloraKey::Sakura => tree(TreeRecipe {
                branch_hue: [10.0, 20.0],
                leaf_hue: [330.0, 350.0],
                branch_angle: [0.3, 0.6],
                length_decay: 0.8,
                width_decay: 0.6,
                gravity: 0.02,
                leaf_shape: LeafShape::Flower,
                start_length_factor: 0.22,
                ..TreeRecipe::BASE
            }),
            FloraKey::Jacaranda => tree(TreeRecipe {
                branch_hue: [20.0, 30.0],
                leaf_hue: [260.0, 290.0],
                branch_angle: [0.4, 0.7],
                length_decay: 0.75,
                width_decay: 0.65,
                gravity: 0.03,
                leaf_shape: LeafShape::Flower,
                start_length_factor: 0.23,
                ..TreeRecipe::BASE
            }),
            FloraKey::Baobab => tree(TreeRecipe {
                branch_hue: [35.0, 45.0],
                leaf_hue: [80.0, 100.0],
                branch_angle: [0.6, 1.0],
                length_decay: 0.6,
                width_decay: 0.4,
                gravity: 0.01,
                start_length_factor: 0.15,
                ..TreeRecipe::BASE
            }),
            FloraKey::Acacia => tree(TreeRecipe {
                leaf_hue: [60.0, 80.0],
                branch_angle: [0.8, 1.2],
                gravity: -0.02,
                leaf_shape: LeafShape::Line,
                start_length_factor: 0.2,
                ..TreeRecipe::BASE
            }),
            FloraKey::Olive => tree(TreeRecipe {
                branch_hue: [40.0, 50.0],
                leaf_hue: [90.0, 110.0],
                gravity: 0.08,
                start_length_factor: 0.2,
                ..TreeRecipe::BASE
            }),
            FloraKey::PalmCoco => tree(TreeRecipe {
                growth: GrowthPattern::Palm,
                branch_hue: [30.0, 45.0],
                leaf_hue: [70.0, 100.0],
                fruit: true,
                scale: 1.4,
                ..TreeRecipe::BASE
            }),
            FloraKey::BambooGrove => tree(TreeRecipe {
                growth: GrowthPattern::Segmented,
                branch_hue: [80.0, 100.0],
                leaf_hue: [80.0, 120.0],
                cluster_size: 7,
                scale: 1.1,
                ..TreeRecipe::BASE
            }),
            FloraKey::SugarCane => tree(TreeRecipe {
                growth: GrowthPattern::Segmented,
                branch_hue: [60.0, 80.0],
                leaf_hue: [70.0, 90.0],
                cluster_size: 12,
                scale: 0.6,
                ..TreeRecipe::BASE
            }),
            FloraKey::CactusSaguaro => tree(TreeRecipe {
                growth: GrowthPattern::Cactus(CactusKind::Saguaro),
                branch_hue: [0.0, 0.0],
                leaf_hue: [0.0, 0.0],
                scale: 0.4,
                ..TreeRecipe::BASE
            }),
            FloraKey::CactusNopal => tree(TreeRecipe {
                growth: GrowthPattern::Cactus(CactusKind::Pad),
                branch_hue: [0.0, 0.0],
                leaf_hue: [0.0, 0.0],
                scale: 0.25,
                ..TreeRecipe::BASE
            }),
            FloraKey::WillowWeeping => tree(TreeRecipe {
                branch_hue: [40.0, 50.0],
                leaf_hue: [70.0, 100.0],
                branch_angle: [0.2, 0.5],
                length_decay: 0.9,
                width_decay: 0.8,
                gravity: 0.2,
                leaf_shape: LeafShape::Line,
                start_length_factor: 0.2,
                ..TreeRecipe::BASE
            }),
            FloraKey::BushBerry => tree(TreeRecipe {
                growth: GrowthPattern::Bush,
                branch_hue: [20.0, 30.0],
                leaf_hue: [50.0, 80.0],
                scale: 0.4,
                ..TreeRecipe::BASE
            }),
            FloraKey::Shrub => tree(TreeRecipe {
                branch_hue: [40.0, 50.0],
                leaf_hue: [50.0, 70.0],
                branch_angle: [0.5, 1.0],
                length_decay: 0.5,
                width_decay: 0.5,
                gravity: 0.1,
                start_length_factor: 0.1,
                ..TreeRecipe::BASE
            }),
            FloraKey::Dead => tree(TreeRecipe {
                leaf_hue: [0.0, 0.0],
                branch_angle: [0.5, 1.2],
                length_decay: 0.8,
                width_decay: 0.6,
                gravity: 0.1,
                leaf_shape: LeafShape::Bare,
                start_length_factor: 0.2,
                ..TreeRecipe::BASE
            }),
            FloraKey::WaterLily => tree(TreeRecipe {
                growth: GrowthPattern::Floating,
                leaf_hue: [100.0, 140.0],
                has_flower: true,
                ..TreeRecipe::BASE
            }),
            FloraKey::Sunflower => flower(FlowerRecipe {
                petal_count: 400,
                center_ratio: 0.3,
                spread: 6.0,
                petal_hue: [45.0, 60.0],
                center_hue: [20.0, 30.0],
                petal_shape: PetalShape::Pointed,
                petal_width: 1.5,
                petal_bend: [-0.1, 0.1],
                saturation: 85.0,
                lightness: 55.0,
            }),
            FloraKey::Tulip => flower(FlowerRecipe {
                petal_count: 6,
                center_ratio: 0.1,
                spread: 3.0,
                petal_hue: [330.0, 360.0],
                center_hue: [50.0, 60.0],
                petal_shape: PetalShape::Round,
                petal_width: 2.2,
                petal_bend: [-1.0, -0.6],
                saturation: 80.0,
                lightness: 50.0,
            }),
            FloraKey::Dahlia => flower(FlowerRecipe {
                petal_count: 600,
                center_ratio: 0.05,
                spread: 4.0,
                petal_hue: [300.0, 340.0],
                center_hue: [50.0, 60.0],
                petal_shape: PetalShape::Round,
                petal_width: 2.5,
                petal_bend: [0.2, 0.5],
                saturation: 70.0,
                lightness: 60.0,
            }),
            FloraKey::BlueAster => flower(FlowerRecipe {
                petal_count: 200,
                center_ratio: 0.2,
                spread: 7.0,
                petal_hue: [200.0, 240.0],
                center_hue: [40.0, 50.0],
                petal_shape: PetalShape::Thin,
                petal_width: 0.5,
                petal_bend: [-0.05, 0.05],
                saturation: 65.0,
                lightness: 70.0,
            }),
            FloraKey::WhitePoppy => flower(FlowerRecipe {
                petal_count: 6,
                center_ratio: 0.15,
                spread: 4.0,
                petal_hue: [0.0, 0.0],
                center_hue: [50.0, 60.0],
                petal_shape: PetalShape::Round,
                petal_width: 2.5,
                petal_bend: [-0.3, 0.1],
                saturation: 5.0,
                lightness: 90.0,
            }),
            FloraKey::Daisy => flower(FlowerRecipe {
                petal_count: 25,
                center_ratio: 0.25,
                spread: 4.5,
                petal_hue: [0.0, 0.0],
                center_hue: [45.0, 55.0],
                petal_shape: PetalShape::Thin,
                petal_width: 0.8,
                petal_bend: [0.0, 0.05],
                saturation: 0.0,
                lightness: 98.0,
            }),
            FloraKey::Carnation => flower(FlowerRecipe {
                petal_count: 40,
                center_ratio: 0.1,
                spread: 3.5,
                petal_hue: [350.0, 10.0],
                center_hue: [0.0, 0.0],
                petal_shape: PetalShape::Round,
                petal_width: 1.2,
                petal_bend: [-0.5, 0.5],
                saturation: 80.0,
                lightness: 50.0,
            }),
            FloraKey::Orchid => flower(FlowerRecipe {
                petal_count: 5,
                center_ratio: 0.1,
                spread: 5.0,
                petal_hue: [280.0, 310.0],
                center_hue: [330.0, 350.0],
                petal_shape: PetalShape::Pointed,
                petal_width: 1.8,
                petal_bend: [-0.2, 0.1],
                saturation: 60.0,
                lightness: 70.0,
            }),
        }
    }
}

/// Parameters for drawing one plant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FloraRecipe {
    Tree(TreeRecipe),
    Flower(FlowerRecipe),
}

impl FloraRecipe {
    /// Overall size multiplier; flowers are drawn at unit scale.
    pub fn scale(&self) -> f32 {
        match self {
            FloraRecipe::Tree(tree) => tree.scale,
            FloraRecipe::Flower(_) => 1.0,
        }
    }
}

/// Skeleton style of a woody plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthPattern {
    Recursive,
    Conifer,
    Palm,
    Segmented,
    Cactus(CactusKind),
    Bush,
    Floating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CactusKind {
    Saguaro,
    Pad,
}

/// Foliage drawn at branch tips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeafShape {
    Circle,
    Flower,
    Line,
    /// No foliage at all.
    Bare,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PetalShape {
    Pointed,
    Round,
    Thin,
}

/// Branching parameters for trees, bushes, cacti and floating plants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeRecipe {
    pub growth: GrowthPattern,
    pub branch_hue: [f32; 2],
    pub leaf_hue: [f32; 2],
    /// Branch spread in radians, `[min, max]`.
    pub branch_angle: [f32; 2],
    /// Child branch length relative to its parent.
    pub length_decay: f32,
    /// Child branch width relative to its parent.
    pub width_decay: f32,
    /// Downward pull per generation; negative values flatten crowns upward.
    pub gravity: f32,
    pub leaf_shape: LeafShape,
    /// Trunk length as a fraction of the plant's bounding height.
    pub start_length_factor: f32,
    pub scale: f32,
    /// Stems per plant for clustered growth.
    pub cluster_size: u32,
    pub fruit: bool,
    pub has_flower: bool,
}

impl TreeRecipe {
    /// Generic broadleaf tree every species starts from.
    pub const BASE: TreeRecipe = TreeRecipe {
        growth: GrowthPattern::Recursive,
        branch_hue: [30.0, 40.0],
        leaf_hue: [60.0, 100.0],
        branch_angle: [0.5, 0.8],
        length_decay: 0.7,
        width_decay: 0.7,
        gravity: 0.0,
        leaf_shape: LeafShape::Circle,
        start_length_factor: 0.25,
        scale: 1.0,
        cluster_size: 1,
        fruit: false,
        has_flower: false,
    };
}

/// Radial petal layout for flowers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowerRecipe {
    pub petal_count: u32,
    /// Radius of the centre disc relative to the bloom.
    pub center_ratio: f32,
    pub spread: f32,
    pub petal_hue: [f32; 2],
    pub center_hue: [f32; 2],
    pub petal_shape: PetalShape,
    pub petal_width: f32,
    pub petal_bend: [f32; 2],
    pub saturation: f32,
    pub lightness: f32,
}
