use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::rarity::Rarity;

/// One decoded SkyBlock item, as produced by the NBT decoder.
///
/// Field names follow the decoder's JSON output so a decoded inventory can be
/// fed in with `serde_json` directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworthItem {
    /// `ExtraAttributes.id`. Vanilla items have none and are never priced.
    pub skyblock_id: Option<String>,
    /// Legacy numeric Minecraft id and damage value.
    pub id: i32,
    pub damage: i16,
    pub count: u32,
    pub name: Option<String>,
    pub lore: Vec<String>,
    pub enchantments: BTreeMap<String, u32>,
    pub attributes: ItemAttributes,
    pub gems: BTreeMap<String, GemValue>,
    pub pet_info: Option<PetInfo>,
    pub is_soulbound: bool,
    /// Per-star upgrade costs resolved from item metadata, index 0 = first star.
    pub upgrade_costs: Vec<Vec<UpgradeCost>>,
}

impl Default for NetworthItem {
    fn default() -> Self {
        Self {
            skyblock_id: None,
            id: 0,
            damage: 0,
            count: 1,
            name: None,
            lore: Vec::new(),
            enchantments: BTreeMap::new(),
            attributes: ItemAttributes::default(),
            gems: BTreeMap::new(),
            pet_info: None,
            is_soulbound: false,
            upgrade_costs: Vec::new(),
        }
    }
}

impl NetworthItem {
    pub fn new(skyblock_id: impl Into<String>) -> Self {
        Self {
            skyblock_id: Some(skyblock_id.into()),
            ..Self::default()
        }
    }

    /// Price-table id, empty for vanilla items.
    pub fn skyblock_id(&self) -> &str {
        self.skyblock_id.as_deref().unwrap_or_default()
    }

    pub fn is_pet(&self) -> bool {
        self.pet_info.is_some()
    }

    /// Displayed rarity: the pet tier for pets, otherwise the last lore line.
    pub fn rarity(&self) -> Option<Rarity> {
        if let Some(pet) = &self.pet_info {
            return Some(pet.tier);
        }
        self.lore
            .iter()
            .rev()
            .find(|line| !line.trim().is_empty())
            .and_then(|line| Rarity::from_lore_line(line))
    }

    /// Dungeon/essence stars, whichever tag the item uses.
    pub fn stars(&self) -> u32 {
        self.attributes
            .upgrade_level
            .max(self.attributes.dungeon_item_level)
    }
}

/// The decoded `ExtraAttributes` compound. Only tags a modifier reads are kept.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemAttributes {
    /// Reforge name, e.g. `ancient`.
    pub modifier: Option<String>,
    pub rarity_upgrades: u32,
    pub hot_potato_count: u32,
    pub upgrade_level: u32,
    pub dungeon_item_level: u32,
    #[serde(rename = "artOfPeaceApplied")]
    pub art_of_peace_applied: u32,
    pub art_of_war_count: u32,
    pub collected_coins: f64,
    pub boosters: Vec<String>,
    pub divan_powder_coating: u32,
    pub talisman_enrichment: Option<String>,
    pub ethermerge: u32,
    pub farming_for_dummies_count: u32,
    pub power_ability_scroll: Option<String>,
    pub jalapeno_count: u32,
    pub mana_disintegrator_count: u32,
    pub winning_bid: f64,
    pub additional_coins: f64,
    pub ability_scroll: Vec<String>,
    pub new_years_cake: Option<u32>,
    pub pickonimbus_durability: Option<u32>,
    pub sack_pss: u32,
    pub polarvoid: u32,
    pub thunder_charge: f64,
    pub line: Option<RodPart>,
    pub hook: Option<RodPart>,
    pub sinker: Option<RodPart>,
    /// Shen's auction tags: price paid, auction number and bid number.
    pub price: Option<f64>,
    pub auction: Option<u32>,
    pub bid: Option<u32>,
    pub tuned_transmission: u32,
    pub wood_singularity_count: u32,
    pub drill_part_upgrade_module: Option<String>,
    pub drill_part_fuel_tank: Option<String>,
    pub drill_part_engine: Option<String>,
    pub dye_item: Option<String>,
    pub runes: BTreeMap<String, u32>,
    pub skin: Option<String>,
    /// Backpack/bag contents keyed by slot; `None` is an empty slot.
    pub inventory: BTreeMap<u32, Option<NetworthItem>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RodPart {
    pub part: String,
}

/// A gem compound entry. Slots hold a quality, `<slot>_gem` holds the gem type
/// of a generic slot, and `unlocked_slots` lists slot names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GemValue {
    Plain(String),
    Detailed {
        quality: String,
        #[serde(default)]
        uuid: Option<String>,
    },
    List(Vec<String>),
}

impl GemValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            GemValue::Plain(value) => Some(value),
            GemValue::Detailed { quality, .. } => Some(quality),
            GemValue::List(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpgradeCost {
    Essence { essence_type: String, amount: u32 },
    Item { item_id: String, amount: u32 },
}

/// Decoded `petInfo` JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetInfo {
    #[serde(rename = "type")]
    pub pet_type: String,
    pub tier: Rarity,
    #[serde(default)]
    pub exp: f64,
    #[serde(default)]
    pub held_item: Option<String>,
    #[serde(default)]
    pub skin: Option<String>,
    #[serde(default)]
    pub candy_used: u32,
}

impl PetInfo {
    /// `TIER_TYPE`, the identity used in pet price keys.
    pub fn price_key(&self) -> String {
        format!("{}_{}", self.tier.key(), self.pet_type.to_ascii_uppercase())
    }
}

/// One audit record: a single applied modifier and the coins it added.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
    pub count: u32,
}

impl Calculation {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, value: f64, count: u32) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            value,
            count,
        }
    }
}

/// Valuation of one item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemNetworth {
    pub item: NetworthItem,
    pub base_price: f64,
    /// Per-unit price, base plus every contribution.
    pub price: f64,
    /// `price * count`.
    pub networth: f64,
    pub calculation: Vec<Calculation>,
    /// Whether the price table had an entry for the item (or its pet anchors).
    pub priced: bool,
    /// Part of `networth` that is soulbound.
    pub soulbound_portion: f64,
}
