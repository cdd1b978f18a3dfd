use crate::domain::entities::{Calculation, NetworthItem};
use crate::domain::evaluation::{Valuation, ValuationContext};
use crate::domain::pet::PetLevel;

use super::{add_market_value, ModifierHandler};

/// Pets whose value does not drop when candied.
const CANDY_EXEMPT_PETS: &[&str] = &["ENDER_DRAGON", "GOLDEN_DRAGON", "SCATHA"];
const MAX_CANDY_REDUCTION: f64 = 5_000_000.0;
/// Pets that level past 100 lose more in absolute terms.
const MAX_CANDY_REDUCTION_LEVEL_200: f64 = 30_000_000.0;

pub struct PetItemHandler;

impl ModifierHandler for PetItemHandler {
    fn name(&self) -> &'static str {
        "pet_item"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.pet_info
            .as_ref()
            .is_some_and(|pet| pet.held_item.is_some())
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let Some(held_item) = item.pet_info.as_ref().and_then(|pet| pet.held_item.as_deref()) else {
            return 0.0;
        };
        add_market_value(valuation, ctx, held_item, "PET_ITEM", 1, ctx.config.worth.pet_item)
    }
}

/// Candied pets below max level sell at a discount.
pub struct PetCandyHandler;

impl ModifierHandler for PetCandyHandler {
    fn name(&self) -> &'static str {
        "pet_candy"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.pet_info.as_ref().is_some_and(|pet| {
            pet.candy_used > 0 && !CANDY_EXEMPT_PETS.contains(&pet.pet_type.to_ascii_uppercase().as_str())
        })
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let Some(pet) = &item.pet_info else {
            return 0.0;
        };
        let level = PetLevel::of(pet, &ctx.config.pet_curve);
        if level.level >= level.max_level {
            return 0.0;
        }

        let cap = if level.max_level > 100 {
            MAX_CANDY_REDUCTION_LEVEL_200
        } else {
            MAX_CANDY_REDUCTION
        };
        let reduced = (valuation.price * ctx.config.worth.pet_candy).max(valuation.price - cap);
        let delta = reduced - valuation.price;
        if delta == 0.0 {
            return 0.0;
        }
        valuation.add(Calculation::new("CANDY", "PET_CANDY", delta, pet.candy_used))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PetInfo;
    use crate::domain::handlers::test_support::{prices, run};
    use crate::domain::rarity::Rarity;

    fn pet(pet_type: &str, exp: f64, candy_used: u32) -> NetworthItem {
        let mut item = NetworthItem::new("PET");
        item.pet_info = Some(PetInfo {
            pet_type: pet_type.to_string(),
            tier: Rarity::Legendary,
            exp,
            held_item: None,
            skin: None,
            candy_used,
        });
        item
    }

    #[test]
    fn test_held_item() {
        let mut item = pet("BLAZE", 0.0, 0);
        if let Some(info) = item.pet_info.as_mut() {
            info.held_item = Some("PET_ITEM_TIER_BOOST".to_string());
        }
        let prices = prices(&[("PET_ITEM_TIER_BOOST", 60_000_000.0)]);
        let (delta, valuation) = run(&PetItemHandler, &item, &prices, 1_000_000.0);
        assert_eq!(delta, 60_000_000.0);
        assert_eq!(valuation.calculation[0].kind, "PET_ITEM");
    }

    #[test]
    fn test_candy_percentage_discount() {
        let item = pet("BLAZE", 1_000.0, 10);
        let (delta, valuation) = run(&PetCandyHandler, &item, &prices(&[]), 4_000_000.0);
        assert!((delta + 1_400_000.0).abs() < 1e-6);
        assert!((valuation.price - 2_600_000.0).abs() < 1e-6);
        assert_eq!(valuation.calculation[0].count, 10);
    }

    #[test]
    fn test_candy_reduction_capped() {
        let item = pet("BLAZE", 1_000.0, 10);
        let (delta, _) = run(&PetCandyHandler, &item, &prices(&[]), 100_000_000.0);
        assert_eq!(delta, -MAX_CANDY_REDUCTION);
    }

    #[test]
    fn test_candy_exempt_and_max_level() {
        assert!(!PetCandyHandler.applies(&pet("ENDER_DRAGON", 0.0, 10)));

        let maxed = pet("BLAZE", 30_000_000.0, 10);
        let (delta, valuation) = run(&PetCandyHandler, &maxed, &prices(&[]), 4_000_000.0);
        assert_eq!(delta, 0.0);
        assert!(valuation.calculation.is_empty());
    }

    #[test]
    fn test_candy_reduction_cap_for_level_200_pets() {
        let item = pet("JADE_DRAGON", 1_000.0, 10);
        let (delta, valuation) = run(&PetCandyHandler, &item, &prices(&[]), 200_000_000.0);
        assert_eq!(delta, -MAX_CANDY_REDUCTION_LEVEL_200);
        assert_eq!(valuation.price, 170_000_000.0);
    }
}
