use crate::domain::entities::NetworthItem;
use crate::domain::evaluation::{Valuation, ValuationContext};

use super::{add_market_value, ModifierHandler};

const ENCHANTED_BOOK: &str = "ENCHANTED_BOOK";
const SILEX: &str = "SIL_EX";
const MAX_PLAIN_EFFICIENCY: u32 = 5;

/// Enchantments whose level only grows with use; they sell at level 1.
const STACKING_ENCHANTMENTS: &[&str] = &[
    "expertise",
    "compact",
    "cultivating",
    "champion",
    "hecatomb",
    "toxophilite",
];

/// Enchantments an item carries natively, which add nothing when present.
const BLOCKED_ENCHANTMENTS: &[(&str, &[&str])] = &[
    ("BONE_BOOMERANG", &["overload", "power", "ultimate_soul_eater"]),
    ("DEATH_BOW", &["overload", "power", "ultimate_soul_eater"]),
    ("BASIC_GARDENING_HOE", &["replenish"]),
    ("ADVANCED_GARDENING_HOE", &["replenish"]),
    ("BASIC_GARDENING_AXE", &["replenish"]),
    ("ADVANCED_GARDENING_AXE", &["replenish"]),
];

/// Per-enchantment worth overrides; everything else uses the configured default.
const ENCHANTMENT_WORTH: &[(&str, f64)] = &[
    ("big_brain", 0.35),
    ("counter_strike", 0.2),
    ("overload", 0.35),
    ("ultimate_fatal_tempo", 0.65),
    ("ultimate_inferno", 0.35),
    ("ultimate_soul_eater", 0.35),
];

/// Items whose efficiency past 5 is innate rather than silex.
const IGNORED_SILEX: &[&str] = &["STONK_PICKAXE"];

fn enchantment_id(name: &str, level: u32) -> String {
    format!("ENCHANTMENT_{}_{}", name.to_ascii_uppercase(), level)
}

pub struct EnchantedBookHandler;

impl ModifierHandler for EnchantedBookHandler {
    fn name(&self) -> &'static str {
        "enchanted_book"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.skyblock_id() == ENCHANTED_BOOK && !item.enchantments.is_empty()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        item.enchantments
            .iter()
            .map(|(name, level)| {
                let id = enchantment_id(name, *level);
                add_market_value(valuation, ctx, &id, "ENCHANT", 1, ctx.config.worth.enchanted_book)
            })
            .sum()
    }
}

/// Enchantments applied to a regular item.
pub struct EnchantmentHandler;

impl EnchantmentHandler {
    fn is_blocked(item_id: &str, enchantment: &str) -> bool {
        BLOCKED_ENCHANTMENTS
            .iter()
            .any(|(id, blocked)| *id == item_id && blocked.contains(&enchantment))
    }

    fn worth(ctx: &ValuationContext<'_>, enchantment: &str) -> f64 {
        ENCHANTMENT_WORTH
            .iter()
            .find(|(name, _)| *name == enchantment)
            .map_or(ctx.config.worth.enchantments, |(_, worth)| *worth)
    }
}

impl ModifierHandler for EnchantmentHandler {
    fn name(&self) -> &'static str {
        "enchantment"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.skyblock_id() != ENCHANTED_BOOK && !item.enchantments.is_empty()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let item_id = item.skyblock_id();
        let mut added = 0.0;

        for (name, level) in &item.enchantments {
            let name = name.to_ascii_lowercase();
            if Self::is_blocked(item_id, &name) {
                continue;
            }
            // Dungeon drops roll scavenger 5 on their own.
            if name == "scavenger" && *level == 5 {
                continue;
            }

            let level = if STACKING_ENCHANTMENTS.contains(&name.as_str()) {
                1
            } else {
                *level
            };

            if name == "efficiency" && level > MAX_PLAIN_EFFICIENCY && !IGNORED_SILEX.contains(&item_id) {
                added += add_market_value(
                    valuation,
                    ctx,
                    SILEX,
                    "SILEX",
                    level - MAX_PLAIN_EFFICIENCY,
                    ctx.config.worth.silex,
                );
            }

            let id = enchantment_id(&name, level);
            added += add_market_value(valuation, ctx, &id, "ENCHANT", 1, Self::worth(ctx, &name));
        }
        added
    }
}
