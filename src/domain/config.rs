//! Tunables for the valuation pipeline.
//!
//! Everything here has a sensible default; a JSON file can override any part
//! of it (see `util::persistence`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::rarity::Rarity;

/// Nesting allowed below a top-level item (backpack -> bag -> item is 2).
pub const DEFAULT_MAX_DEPTH: usize = 6;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Deepest nested inventory level accepted before the item is rejected.
    pub max_depth: usize,
    pub worth: ApplicationWorth,
    /// Reforge name (lowercase `modifier` tag) -> stone that applies it.
    pub reforges: BTreeMap<String, ReforgeStone>,
    pub pet_curve: PetLevelCurve,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            worth: ApplicationWorth::default(),
            reforges: default_reforges(),
            pet_curve: PetLevelCurve::default(),
        }
    }
}

/// Share of an upgrade's market price that is credited once applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationWorth {
    pub recombobulator: f64,
    pub hot_potato_book: f64,
    pub fuming_potato_book: f64,
    pub gemstone: f64,
    pub essence: f64,
    pub silex: f64,
    pub master_star: f64,
    pub art_of_peace: f64,
    pub art_of_war: f64,
    pub booster: f64,
    pub divan_powder_coating: f64,
    pub enrichment: f64,
    pub etherwarp: f64,
    pub farming_for_dummies: f64,
    pub gemstone_power_scroll: f64,
    pub jalapeno_book: f64,
    pub mana_disintegrator: f64,
    pub necron_blade_scroll: f64,
    pub pocket_sack_in_a_sack: f64,
    pub polarvoid: f64,
    pub prestige_item: f64,
    pub thunder_in_a_bottle: f64,
    pub rod_part: f64,
    pub shens_auction_price: f64,
    pub tuned_transmission: f64,
    pub wood_singularity: f64,
    pub drill_part: f64,
    pub dye: f64,
    pub enchanted_book: f64,
    pub enchantments: f64,
    pub runes: f64,
    pub soulbound_pet_skins: f64,
    pub soulbound_skins: f64,
    pub reforge: f64,
    pub pet_item: f64,
    pub pet_candy: f64,
    pub winning_bid: f64,
}

impl Default for ApplicationWorth {
    fn default() -> Self {
        Self {
            recombobulator: 0.8,
            hot_potato_book: 1.0,
            fuming_potato_book: 0.6,
            gemstone: 1.0,
            essence: 0.75,
            silex: 0.75,
            master_star: 1.0,
            art_of_peace: 0.8,
            art_of_war: 0.6,
            booster: 0.8,
            divan_powder_coating: 0.8,
            enrichment: 0.5,
            etherwarp: 1.0,
            farming_for_dummies: 0.5,
            gemstone_power_scroll: 0.5,
            jalapeno_book: 0.8,
            mana_disintegrator: 0.8,
            necron_blade_scroll: 1.0,
            pocket_sack_in_a_sack: 0.7,
            polarvoid: 1.0,
            prestige_item: 1.0,
            thunder_in_a_bottle: 0.8,
            rod_part: 1.0,
            shens_auction_price: 0.85,
            tuned_transmission: 0.7,
            wood_singularity: 0.5,
            drill_part: 1.0,
            dye: 0.9,
            enchanted_book: 1.0,
            enchantments: 0.85,
            runes: 0.6,
            soulbound_pet_skins: 0.8,
            soulbound_skins: 0.8,
            reforge: 1.0,
            pet_item: 1.0,
            pet_candy: 0.65,
            winning_bid: 1.0,
        }
    }
}

/// Reforge stone plus the coin cost the blacksmith charges to apply it,
/// which depends on the item's rarity at the time of application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReforgeStone {
    pub stone: String,
    #[serde(default)]
    pub apply_cost: BTreeMap<Rarity, f64>,
}

impl ReforgeStone {
    pub fn new(stone: &str) -> Self {
        Self {
            stone: stone.to_string(),
            apply_cost: BTreeMap::new(),
        }
    }

    pub fn cost_at(&self, rarity: Option<Rarity>) -> f64 {
        rarity
            .and_then(|rarity| self.apply_cost.get(&rarity).copied())
            .unwrap_or(0.0)
    }
}

fn default_reforges() -> BTreeMap<String, ReforgeStone> {
    [
        ("ancient", "PRECURSOR_GEAR"),
        ("auspicious", "ROCK_GEMSTONE"),
        ("blessed", "BLESSED_FRUIT"),
        ("blood_soaked", "PRESUMED_GALLON_OF_RED_PAINT"),
        ("blooming", "FLOWERING_BOUQUET"),
        ("bountiful", "GOLDEN_BALL"),
        ("bulky", "BULKY_STONE"),
        ("bustling", "SKYMART_BROCHURE"),
        ("coldfused", "ENTROPY_SUPPRESSOR"),
        ("dirty", "DIRT_BOTTLE"),
        ("empowered", "SADAN_BROOCH"),
        ("fabled", "DRAGON_CLAW"),
        ("festive", "FROZEN_BAUBLE"),
        ("fleet", "DIAMONITE"),
        ("fortified", "METEOR_SHARD"),
        ("fruitful", "ONYX"),
        ("giant", "GIANT_TOOTH"),
        ("gilded", "MIDAS_JEWEL"),
        ("glistening", "SHINY_PRISM"),
        ("jaded", "JADERALD"),
        ("loving", "RED_SCARF"),
        ("lucky", "LUCKY_DICE"),
        ("magnetic", "LAPIS_CRYSTAL"),
        ("mithraic", "PURE_MITHRIL"),
        ("moil", "MOIL_LOG"),
        ("mossy", "OVERGROWN_GRASS"),
        ("necrotic", "NECROMANCER_BROOCH"),
        ("perfect", "DIAMOND_ATOM"),
        ("precise", "OPTICAL_LENS"),
        ("refined", "REFINED_AMBER"),
        ("reinforced", "RARE_DIAMOND"),
        ("renowned", "DRAGON_HORN"),
        ("ridiculous", "RED_NOSE"),
        ("rooted", "BURROWING_SPORES"),
        ("salty", "SALT_CUBE"),
        ("spiritual", "SPIRIT_DECOY"),
        ("stellar", "PETRIFIED_STARFALL"),
        ("strengthened", "SEARING_STONE"),
        ("submerged", "DEEP_SEA_ORB"),
        ("suspicious", "SUSPICIOUS_VIAL"),
        ("toil", "TOIL_LOG"),
        ("treacherous", "RUSTY_ANCHOR"),
        ("undead", "PREMIUM_FLESH"),
        ("warped", "AOTE_STONE"),
        ("waxed", "BLAZE_WAX"),
        ("withered", "WITHER_BLOOD"),
    ]
    .into_iter()
    .map(|(name, stone)| (name.to_string(), ReforgeStone::new(stone)))
    .collect()
}

/// Pet leveling data: where each rarity starts on the shared XP curve, which
/// pets level past 100, and the XP needed for each level-up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetLevelCurve {
    pub rarity_offsets: BTreeMap<Rarity, usize>,
    pub default_max_level: u32,
    /// Pet type -> max level, for pets that do not cap at `default_max_level`.
    pub max_level_overrides: BTreeMap<String, u32>,
    /// XP for each level-up, index 0 = level 1 -> 2 at offset 0.
    pub xp_per_level: Vec<f64>,
}

/// XP for each level-up of the shared pet curve.
const PET_LEVELS: [f64; 119] = [
    100.0, 110.0, 120.0, 130.0, 145.0, 160.0, 175.0, 190.0, 210.0, 230.0, 250.0, 275.0, 300.0,
    330.0, 360.0, 400.0, 440.0, 490.0, 540.0, 600.0, 660.0, 730.0, 800.0, 880.0, 960.0, 1050.0,
    1150.0, 1260.0, 1380.0, 1510.0, 1650.0, 1800.0, 1960.0, 2130.0, 2310.0, 2500.0, 2700.0,
    2920.0, 3160.0, 3420.0, 3700.0, 4000.0, 4350.0, 4750.0, 5200.0, 5700.0, 6300.0, 7000.0,
    7800.0, 8700.0, 9700.0, 10800.0, 12000.0, 13300.0, 14700.0, 16200.0, 17800.0, 19500.0,
    21300.0, 23200.0, 25200.0, 27400.0, 29800.0, 32400.0, 35200.0, 38200.0, 41400.0, 44800.0,
    48400.0, 52200.0, 56200.0, 60400.0, 64800.0, 69400.0, 74200.0, 79200.0, 84700.0, 90700.0,
    97200.0, 104200.0, 111700.0, 119700.0, 128200.0, 137200.0, 146700.0, 156700.0, 167700.0,
    179700.0, 192700.0, 206700.0, 221700.0, 237700.0, 254700.0, 272700.0, 291700.0, 311700.0,
    333700.0, 357700.0, 383700.0, 411700.0, 441700.0, 476700.0, 516700.0, 561700.0, 611700.0,
    666700.0, 726700.0, 791700.0, 861700.0, 936700.0, 1016700.0, 1101700.0, 1191700.0,
    1286700.0, 1386700.0, 1496700.0, 1616700.0, 1746700.0, 1886700.0,
];

/// Levels 101 to 200 all cost the same.
const PET_LEVELS_PAST_100: usize = 100;

impl Default for PetLevelCurve {
    fn default() -> Self {
        let rarity_offsets = [
            (Rarity::Common, 0),
            (Rarity::Uncommon, 6),
            (Rarity::Rare, 11),
            (Rarity::Epic, 16),
            (Rarity::Legendary, 20),
            (Rarity::Mythic, 20),
        ]
        .into_iter()
        .collect();

        let max_level_overrides = [("GOLDEN_DRAGON", 200), ("JADE_DRAGON", 200), ("ROSE_DRAGON", 200)]
            .into_iter()
            .map(|(pet, level)| (pet.to_string(), level))
            .collect();

        let last = PET_LEVELS[PET_LEVELS.len() - 1];
        let xp_per_level = PET_LEVELS
            .iter()
            .copied()
            .chain(std::iter::repeat(last).take(PET_LEVELS_PAST_100))
            .collect();

        Self {
            rarity_offsets,
            default_max_level: 100,
            max_level_overrides,
            xp_per_level,
        }
    }
}

impl PetLevelCurve {
    pub fn max_level(&self, pet_type: &str) -> u32 {
        self.max_level_overrides
            .get(pet_type)
            .copied()
            .unwrap_or(self.default_max_level)
    }

    /// Curve offset for a rarity; tiers without an entry use the highest offset known.
    pub fn offset(&self, rarity: Rarity) -> usize {
        self.rarity_offsets
            .get(&rarity)
            .copied()
            .or_else(|| {
                self.rarity_offsets
                    .range(..rarity)
                    .next_back()
                    .map(|(_, offset)| *offset)
            })
            .unwrap_or(0)
    }
}
