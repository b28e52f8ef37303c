//! The fixed biome catalog.

use super::flora::FloraKey;

/// Static descriptor for a biome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeDef {
    /// Display name.
    pub name: &'static str,
    /// Ground color as `0xRRGGBB`.
    pub color: u32,
    /// Species that grows here, if any.
    pub flora: Option<FloraKey>,
    /// Ground glows (lava).
    pub emissive: bool,
}

impl BiomeDef {
    const fn new(name: &'static str, color: u32, flora: Option<FloraKey>) -> Self {
        Self {
            name,
            color,
            flora,
            emissive: false,
        }
    }

    /// Ground color as normalized `[r, g, b]`.
    pub fn rgb(&self) -> [f32; 3] {
        let channel = |shift: u32| ((self.color >> shift) & 0xff) as f32 / 255.0;
        [channel(16), channel(8), channel(0)]
    }
}

/// A named biome. Each variant indexes one entry of the static catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Biome {
    Lava,
    Ocean,
    Shallows,
    Beach,
    Scorched,
    Desert,
    RedDesert,
    Savanna,
    Drylands,
    Rainforest,
    Swamp,
    RiverBank,
    Canyon,
    Cliff,
    Plains,
    Mediterranean,
    FlowerField,
    SunflowerPlains,
    Forest,
    BirchForest,
    AutumnWoods,
    CherryGrove,
    MagicForest,
    Highlands,
    Taiga,
    Tundra,
    Stone,
    Snow,
}

static CATALOG: [BiomeDef; Biome::COUNT] = [
    BiomeDef {
        emissive: true,
        ..BiomeDef::new("Magma", 0xff4400, None)
    },
    BiomeDef::new("Ocean", 0x1a3355, None),
    BiomeDef::new("Shallows", 0x226688, Some(FloraKey::WaterLily)),
    BiomeDef::new("Beach", 0xdccbba, Some(FloraKey::PalmCoco)),
    BiomeDef::new("Scorched", 0x553322, Some(FloraKey::Dead)),
    BiomeDef::new("Desert", 0xe0cda0, Some(FloraKey::CactusSaguaro)),
    BiomeDef::new("Red Desert", 0xc27e5c, Some(FloraKey::CactusNopal)),
    BiomeDef::new("Savanna", 0xaabb66, Some(FloraKey::Acacia)),
    BiomeDef::new("Drylands", 0x99aa55, Some(FloraKey::Baobab)),
    BiomeDef::new("Jungle", 0x115511, Some(FloraKey::BambooGrove)),
    BiomeDef::new("Swamp", 0x3b4f4f, Some(FloraKey::WillowWeeping)),
    BiomeDef::new("River Bank", 0x4b6f4f, Some(FloraKey::SugarCane)),
    BiomeDef::new("Canyon", 0x995544, Some(FloraKey::Shrub)),
    BiomeDef::new("Cliff", 0x776655, None),
    BiomeDef::new("Plains", 0x77cc77, Some(FloraKey::BushBerry)),
    BiomeDef::new("Mediterranean", 0x889955, Some(FloraKey::Olive)),
    BiomeDef::new("Flower Field", 0x88dd88, Some(FloraKey::FlowerMix)),
    BiomeDef::new("Sun Plains", 0xaadd44, Some(FloraKey::Sunflower)),
    BiomeDef::new("Forest", 0x338844, Some(FloraKey::OakClassic)),
    BiomeDef::new("Birch Forest", 0x55aa66, Some(FloraKey::Birch)),
    BiomeDef::new("Autumn Woods", 0xd98c40, Some(FloraKey::Maple)),
    BiomeDef::new("Sakura Grove", 0xffb7c5, Some(FloraKey::Sakura)),
    BiomeDef::new("Magic Forest", 0x663399, Some(FloraKey::Jacaranda)),
    BiomeDef::new("Highland", 0x668855, Some(FloraKey::PineNordic)),
    BiomeDef::new("Taiga", 0x446655, Some(FloraKey::SpruceBlue)),
    BiomeDef::new("Tundra", 0xaaccbb, Some(FloraKey::BushSnow)),
    BiomeDef::new("Stone", 0x777777, None),
    BiomeDef::new("Snow", 0xffffff, Some(FloraKey::PineNordic)),
];

impl Biome {
    /// Number of biomes in the catalog.
    pub const COUNT: usize = 28;

    /// Every biome, in catalog order.
    pub const ALL: [Biome; Biome::COUNT] = [
        Biome::Lava,
        Biome::Ocean,
        Biome::Shallows,
        Biome::Beach,
        Biome::Scorched,
        Biome::Desert,
        Biome::RedDesert,
        Biome::Savanna,
        Biome::Drylands,
        Biome::Rainforest,
        Biome::Swamp,
        Biome::RiverBank,
        Biome::Canyon,
        Biome::Cliff,
        Biome::Plains,
        Biome::Mediterranean,
        Biome::FlowerField,
        Biome::SunflowerPlains,
        Biome::Forest,
        Biome::BirchForest,
        Biome::AutumnWoods,
        Biome::CherryGrove,
        Biome::MagicForest,
        Biome::Highlands,
        Biome::Taiga,
        Biome::Tundra,
        Biome::Stone,
        Biome::Snow,
    ];

    /// Catalog entry for this biome.
    pub fn def(self) -> &'static BiomeDef {
        &CATALOG[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn flora(self) -> Option<FloraKey> {
        self.def().flora
    }

    /// Looks up a biome by display name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Biome> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }
}
