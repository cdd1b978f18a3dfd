//! Skins that were applied from a soulbound source. They add value to the
//! item but cannot be traded separately, so they count toward the soulbound
//! portion.

use crate::domain::entities::{Calculation, NetworthItem};
use crate::domain::evaluation::{Valuation, ValuationContext};

use super::ModifierHandler;

const PET_SKIN_PREFIX: &str = "PET_SKIN_";

/// Credit `price(id) * worth` as a soulbound contribution.
fn add_soulbound_value(
    valuation: &mut Valuation,
    ctx: &ValuationContext<'_>,
    id: &str,
    kind: &str,
    worth: f64,
) -> f64 {
    let value = ctx.prices.get(id) * worth;
    if value == 0.0 {
        return 0.0;
    }
    valuation.add_soulbound(Calculation::new(id, kind, value, 1))
}

pub struct SoulboundPetSkinHandler;

impl ModifierHandler for SoulboundPetSkinHandler {
    fn name(&self) -> &'static str {
        "soulbound_pet_skin"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        if !item.is_soulbound {
            return false;
        }
        match &item.pet_info {
            Some(pet) => pet.skin.is_some(),
            None => item.skyblock_id().starts_with(PET_SKIN_PREFIX),
        }
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let worth = ctx.config.worth.soulbound_pet_skins;
        match item.pet_info.as_ref().and_then(|pet| pet.skin.as_deref()) {
            Some(skin) => {
                let id = format!("{PET_SKIN_PREFIX}{}", skin.to_ascii_uppercase());
                add_soulbound_value(valuation, ctx, &id, "SOULBOUND_PET_SKIN", worth)
            }
            None => {
                // The skin item itself: marked down to its soulbound worth.
                let markdown = valuation.base_price * (worth - 1.0);
                if markdown == 0.0 {
                    return 0.0;
                }
                valuation.add(Calculation::new(
                    item.skyblock_id(),
                    "SOULBOUND_PET_SKIN",
                    markdown,
                    1,
                ))
            }
        }
    }
}

pub struct SoulboundSkinHandler;

impl ModifierHandler for SoulboundSkinHandler {
    fn name(&self) -> &'static str {
        "soulbound_skin"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.is_soulbound && !item.is_pet() && item.attributes.skin.is_some()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let Some(skin) = item.attributes.skin.as_deref() else {
            return 0.0;
        };
        add_soulbound_value(
            valuation,
            ctx,
            &skin.to_ascii_uppercase(),
            "SOULBOUND_SKIN",
            ctx.config.worth.soulbound_skins,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::ValuationConfig;
    use crate::domain::entities::PetInfo;
    use crate::domain::evaluation::calculate_item;
    use crate::domain::handlers::test_support::{prices, run};
    use crate::domain::rarity::Rarity;

    #[test]
    fn test_soulbound_skin_on_pet() {
        let mut item = NetworthItem::new("PET");
        item.is_soulbound = true;
        item.pet_info = Some(PetInfo {
            pet_type: "ENDER_DRAGON".to_string(),
            tier: Rarity::Legendary,
            exp: 0.0,
            held_item: None,
            skin: Some("ENDER_DRAGON_BABY".to_string()),
            candy_used: 0,
        });
        let prices = prices(&[("PET_SKIN_ENDER_DRAGON_BABY", 10_000_000.0)]);

        let (delta, valuation) = run(&SoulboundPetSkinHandler, &item, &prices, 0.0);
        assert_eq!(delta, 8_000_000.0);
        assert_eq!(valuation.soulbound_portion, 8_000_000.0);
    }

    #[test]
    fn test_soulbound_standalone_pet_skin_marked_down() {
        let mut item = NetworthItem::new("PET_SKIN_SHEEP_NEON_BLUE");
        item.is_soulbound = true;
        let prices = prices(&[]);

        let (delta, valuation) = run(&SoulboundPetSkinHandler, &item, &prices, 5_000_000.0);
        assert!((delta + 1_000_000.0).abs() < 1e-6);
        assert!((valuation.price - 4_000_000.0).abs() < 1e-6);

        item.is_soulbound = false;
        assert!(!SoulboundPetSkinHandler.applies(&item));
    }

    #[test]
    fn test_applied_item_skin() {
        let mut item = NetworthItem::new("WITHER_GOGGLES");
        item.is_soulbound = true;
        item.attributes.skin = Some("wither_goggles_celestial".to_string());
        let prices = prices(&[("WITHER_GOGGLES_CELESTIAL", 2_500_000.0)]);

        let (delta, valuation) = run(&SoulboundSkinHandler, &item, &prices, 0.0);
        assert_eq!(delta, 2_000_000.0);
        assert_eq!(valuation.calculation[0].kind, "SOULBOUND_SKIN");
        assert_eq!(valuation.soulbound_portion, 2_000_000.0);
    }

    #[test]
    fn test_tradeable_item_skin_is_not_soulbound() {
        let mut item = NetworthItem::new("WITHER_GOGGLES");
        item.attributes.skin = Some("wither_goggles_celestial".to_string());
        assert!(!SoulboundSkinHandler.applies(&item));

        let prices = prices(&[
            ("WITHER_GOGGLES", 1_000_000.0),
            ("WITHER_GOGGLES_CELESTIAL", 2_500_000.0),
        ]);
        let config = ValuationConfig::default();
        let result = calculate_item(&item, &ValuationContext::new(&prices, &config)).unwrap();
        assert_eq!(result.soulbound_portion, 0.0);
        assert!(result.calculation.iter().all(|entry| entry.kind != "SOULBOUND_SKIN"));
    }
}
