//! Item and pet rarity tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rarity tier as shown on the last lore line of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Divine,
    Special,
    VerySpecial,
    Ultimate,
    Admin,
}

/// Tiers in upgrade order. `Special` and above are not reached by recombobulating.
pub const RARITIES: &[Rarity] = &[
    Rarity::Common,
    Rarity::Uncommon,
    Rarity::Rare,
    Rarity::Epic,
    Rarity::Legendary,
    Rarity::Mythic,
    Rarity::Divine,
    Rarity::Special,
    Rarity::VerySpecial,
    Rarity::Ultimate,
    Rarity::Admin,
];

impl Rarity {
    /// Price-table spelling (`VERY_SPECIAL`).
    pub fn key(&self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Uncommon => "UNCOMMON",
            Rarity::Rare => "RARE",
            Rarity::Epic => "EPIC",
            Rarity::Legendary => "LEGENDARY",
            Rarity::Mythic => "MYTHIC",
            Rarity::Divine => "DIVINE",
            Rarity::Special => "SPECIAL",
            Rarity::VerySpecial => "VERY_SPECIAL",
            Rarity::Ultimate => "ULTIMATE",
            Rarity::Admin => "ADMIN",
        }
    }

    pub fn from_key(key: &str) -> Option<Rarity> {
        let normalized = key.trim().to_ascii_uppercase().replace(' ', "_");
        RARITIES.iter().copied().find(|r| r.key() == normalized)
    }

    /// One tier up, saturating at the top of its ladder.
    pub fn upgraded(self) -> Rarity {
        match self {
            Rarity::Common => Rarity::Uncommon,
            Rarity::Uncommon => Rarity::Rare,
            Rarity::Rare => Rarity::Epic,
            Rarity::Epic => Rarity::Legendary,
            Rarity::Legendary => Rarity::Mythic,
            Rarity::Mythic => Rarity::Divine,
            Rarity::Special => Rarity::VerySpecial,
            other => other,
        }
    }

    /// One tier down, saturating at `Common`.
    pub fn downgraded(self) -> Rarity {
        match self {
            Rarity::Uncommon => Rarity::Common,
            Rarity::Rare => Rarity::Uncommon,
            Rarity::Epic => Rarity::Rare,
            Rarity::Legendary => Rarity::Epic,
            Rarity::Mythic => Rarity::Legendary,
            Rarity::Divine => Rarity::Mythic,
            Rarity::VerySpecial => Rarity::Special,
            other => other,
        }
    }

    /// Parse the rarity out of a lore line such as `§6§lLEGENDARY HELMET`.
    ///
    /// Obfuscated markers (`§ka§r`) around the tier are tolerated.
    pub fn from_lore_line(line: &str) -> Option<Rarity> {
        let plain = strip_formatting(line);
        let words: Vec<&str> = plain.split_whitespace().collect();

        for (i, word) in words.iter().enumerate() {
            if word.eq_ignore_ascii_case("VERY")
                && words
                    .get(i + 1)
                    .is_some_and(|next| next.eq_ignore_ascii_case("SPECIAL"))
            {
                return Some(Rarity::VerySpecial);
            }
            if let Some(rarity) = Rarity::from_key(word) {
                return Some(rarity);
            }
        }
        None
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Remove `§x` colour and style codes.
pub fn strip_formatting(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '§' {
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_from_lore_line() {
        assert_eq!(
            Rarity::from_lore_line("§6§lLEGENDARY HELMET"),
            Some(Rarity::Legendary)
        );
        assert_eq!(
            Rarity::from_lore_line("§d§l§ka§r §d§lMYTHIC DUNGEON SWORD §d§l§ka"),
            Some(Rarity::Mythic)
        );
        assert_eq!(
            Rarity::from_lore_line("§c§lVERY SPECIAL"),
            Some(Rarity::VerySpecial)
        );
        assert_eq!(Rarity::from_lore_line("§7Strength: §c+10"), None);
    }

    #[test]
    fn test_rarity_upgrade_ladder() {
        assert_eq!(Rarity::Common.upgraded(), Rarity::Uncommon);
        assert_eq!(Rarity::Mythic.upgraded(), Rarity::Divine);
        assert_eq!(Rarity::Special.upgraded(), Rarity::VerySpecial);
        assert_eq!(Rarity::Admin.upgraded(), Rarity::Admin);
        assert_eq!(Rarity::Legendary.upgraded().downgraded(), Rarity::Legendary);
        assert_eq!(Rarity::Common.downgraded(), Rarity::Common);
    }

    #[test]
    fn test_rarity_keys_round_trip() {
        for rarity in RARITIES {
            assert_eq!(Rarity::from_key(rarity.key()), Some(*rarity));
        }
        assert_eq!(Rarity::from_key("very special"), Some(Rarity::VerySpecial));
    }
}
