//! Rarity, potato book and star upgrades.

use crate::domain::entities::{NetworthItem, UpgradeCost};
use crate::domain::evaluation::{Valuation, ValuationContext};
use crate::domain::rarity::Rarity;

use super::{add_market_value, ModifierHandler};

const RECOMBOBULATOR: &str = "RECOMBOBULATOR_3000";
const HOT_POTATO_BOOK: &str = "HOT_POTATO_BOOK";
const FUMING_POTATO_BOOK: &str = "FUMING_POTATO_BOOK";
/// Books past this count are fuming potato books.
const MAX_HOT_POTATO_BOOKS: u32 = 10;
const MAX_ESSENCE_STARS: u32 = 5;
const MASTER_STARS: [&str; 5] = [
    "FIRST_MASTER_STAR",
    "SECOND_MASTER_STAR",
    "THIRD_MASTER_STAR",
    "FOURTH_MASTER_STAR",
    "FIFTH_MASTER_STAR",
];

pub struct RecombobulatorHandler;

impl ModifierHandler for RecombobulatorHandler {
    fn name(&self) -> &'static str {
        "recombobulator"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.attributes.rarity_upgrades > 0 && !item.is_pet()
    }

    fn calculate(
        &self,
        _item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        valuation.rarity = valuation.rarity.map(Rarity::upgraded);
        add_market_value(
            valuation,
            ctx,
            RECOMBOBULATOR,
            RECOMBOBULATOR,
            1,
            ctx.config.worth.recombobulator,
        )
    }
}

pub struct PotatoBookHandler;

impl ModifierHandler for PotatoBookHandler {
    fn name(&self) -> &'static str {
        "potato_books"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.attributes.hot_potato_count > 0
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let total = item.attributes.hot_potato_count;
        let hot = total.min(MAX_HOT_POTATO_BOOKS);
        let fuming = total - hot;
        let worth = &ctx.config.worth;

        let mut added = add_market_value(
            valuation,
            ctx,
            HOT_POTATO_BOOK,
            HOT_POTATO_BOOK,
            hot,
            worth.hot_potato_book,
        );
        if fuming > 0 {
            added += add_market_value(
                valuation,
                ctx,
                FUMING_POTATO_BOOK,
                FUMING_POTATO_BOOK,
                fuming,
                worth.fuming_potato_book,
            );
        }
        added
    }
}

/// Stars one to five, paid in essence (and sometimes items) listed per star.
pub struct EssenceStarHandler;

impl ModifierHandler for EssenceStarHandler {
    fn name(&self) -> &'static str {
        "essence_stars"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.stars() > 0 && !item.upgrade_costs.is_empty()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let stars = item.stars().min(MAX_ESSENCE_STARS) as usize;
        let mut added = 0.0;

        for star_costs in item.upgrade_costs.iter().take(stars) {
            for cost in star_costs {
                added += match cost {
                    UpgradeCost::Essence {
                        essence_type,
                        amount,
                    } => {
                        let id = format!("ESSENCE_{}", essence_type.to_ascii_uppercase());
                        add_market_value(valuation, ctx, &id, "STAR", *amount, ctx.config.worth.essence)
                    }
                    UpgradeCost::Item { item_id, amount } => {
                        add_market_value(valuation, ctx, item_id, "STAR", *amount, 1.0)
                    }
                };
            }
        }
        added
    }
}

pub struct MasterStarHandler;

impl ModifierHandler for MasterStarHandler {
    fn name(&self) -> &'static str {
        "master_stars"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.stars() > MAX_ESSENCE_STARS
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let master_stars = (item.stars() - MAX_ESSENCE_STARS) as usize;
        MASTER_STARS
            .iter()
            .take(master_stars)
            .map(|star| {
                add_market_value(valuation, ctx, star, "MASTER_STAR", 1, ctx.config.worth.master_star)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::handlers::test_support::{prices, run};

    #[test]
    fn test_recombobulator_promotes_rarity() {
        let mut item = NetworthItem::new("HYPERION");
        item.lore = vec!["§d§l§ka§r §d§lMYTHIC DUNGEON SWORD §d§l§ka".to_string()];
        item.attributes.rarity_upgrades = 1;
        let prices = prices(&[(RECOMBOBULATOR, 10_000_000.0)]);

        let (delta, valuation) = run(&RecombobulatorHandler, &item, &prices, 0.0);
        assert_eq!(delta, 8_000_000.0);
        // Lore shows the upgraded tier, so the valuation starts one below it.
        assert_eq!(valuation.rarity, Some(Rarity::Mythic));
        assert_eq!(valuation.calculation[0].kind, RECOMBOBULATOR);
    }

    #[test]
    fn test_potato_books_split_hot_and_fuming() {
        let mut item = NetworthItem::new("HYPERION");
        item.attributes.hot_potato_count = 15;
        let prices = prices(&[(HOT_POTATO_BOOK, 80_000.0), (FUMING_POTATO_BOOK, 1_000_000.0)]);

        let (delta, valuation) = run(&PotatoBookHandler, &item, &prices, 0.0);
        assert_eq!(valuation.calculation.len(), 2);
        assert_eq!(valuation.calculation[0].count, 10);
        assert_eq!(valuation.calculation[1].count, 5);
        assert!((delta - (800_000.0 + 3_000_000.0)).abs() < 1e-6);
    }

    #[test]
    fn test_potato_books_without_fuming_price() {
        let mut item = NetworthItem::new("HYPERION");
        item.attributes.hot_potato_count = 12;
        let prices = prices(&[(HOT_POTATO_BOOK, 80_000.0)]);

        let (delta, valuation) = run(&PotatoBookHandler, &item, &prices, 0.0);
        assert_eq!(delta, 800_000.0);
        assert_eq!(valuation.calculation.len(), 1);
    }

    #[test]
    fn test_essence_stars_stop_at_current_level() {
        let mut item = NetworthItem::new("LIVID_DAGGER");
        item.attributes.dungeon_item_level = 2;
        item.upgrade_costs = (1..=5)
            .map(|star| {
                vec![UpgradeCost::Essence {
                    essence_type: "WITHER".to_string(),
                    amount: star * 10,
                }]
            })
            .collect();
        let prices = prices(&[("ESSENCE_WITHER", 2_000.0)]);

        let (delta, valuation) = run(&EssenceStarHandler, &item, &prices, 0.0);
        assert_eq!(valuation.calculation.len(), 2);
        assert!((delta - (10.0 + 20.0) * 2_000.0 * 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_master_stars() {
        let mut item = NetworthItem::new("HYPERION");
        item.attributes.upgrade_level = 7;
        let prices = prices(&[
            ("FIRST_MASTER_STAR", 5_000_000.0),
            ("SECOND_MASTER_STAR", 10_000_000.0),
            ("THIRD_MASTER_STAR", 20_000_000.0),
        ]);

        let (delta, valuation) = run(&MasterStarHandler, &item, &prices, 0.0);
        assert_eq!(delta, 15_000_000.0);
        assert_eq!(valuation.calculation.len(), 2);
        assert!(!MasterStarHandler.applies(&NetworthItem::new("HYPERION")));
    }
}
