//! Pet valuation: a level-interpolated base price followed by the pet handlers.

use log::debug;

use super::config::PetLevelCurve;
use super::entities::{ItemNetworth, NetworthItem, PetInfo};
use super::evaluation::{run_handlers, Valuation, ValuationContext};
use super::handlers::PET_HANDLERS;

const TIER_BOOST: &str = "PET_ITEM_TIER_BOOST";

/// Where a pet sits on its XP curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PetLevel {
    pub level: u32,
    pub max_level: u32,
    /// XP from level 1 to level 100 at this pet's rarity.
    pub xp_to_level_100: f64,
}

impl PetLevel {
    pub fn of(pet: &PetInfo, curve: &PetLevelCurve) -> Self {
        let rarity = if pet.held_item.as_deref() == Some(TIER_BOOST) {
            pet.tier.upgraded()
        } else {
            pet.tier
        };
        let max_level = curve.max_level(&pet.pet_type.to_ascii_uppercase());

        let offset = curve.offset(rarity).min(curve.xp_per_level.len());
        let end = (offset + max_level.saturating_sub(1) as usize).min(curve.xp_per_level.len());
        let levels = &curve.xp_per_level[offset..end];

        let mut level = 1;
        let mut remaining = pet.exp;
        for needed in levels {
            if remaining < *needed {
                break;
            }
            remaining -= needed;
            level += 1;
        }

        Self {
            level: level.min(max_level.max(1)),
            max_level,
            xp_to_level_100: levels.iter().take(99).sum(),
        }
    }
}

/// Price anchors for one pet identity. `None` when the table has no entry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct PetAnchors {
    level_1: Option<f64>,
    level_100: Option<f64>,
    level_200: Option<f64>,
}

impl PetAnchors {
    fn lookup(pet: &PetInfo, is_soulbound: bool, ctx: &ValuationContext<'_>) -> Self {
        let key = pet.price_key();
        // A soulbound skin is credited by its own handler instead.
        let skin = pet
            .skin
            .as_deref()
            .filter(|_| !is_soulbound)
            .map(str::to_ascii_uppercase);

        let anchor = |level: u32| {
            let plain = ctx.prices.lookup(&format!("LVL_{level}_{key}"));
            let skinned = skin
                .as_ref()
                .and_then(|skin| ctx.prices.lookup(&format!("LVL_{level}_{key}_SKINNED_{skin}")));
            match (plain, skinned) {
                (Some(plain), Some(skinned)) => Some(plain.max(skinned)),
                (plain, skinned) => plain.or(skinned),
            }
        };

        Self {
            level_1: anchor(1),
            level_100: anchor(100),
            level_200: anchor(200),
        }
    }

    fn is_unpriced(&self) -> bool {
        [self.level_1, self.level_100, self.level_200]
            .iter()
            .all(|anchor| anchor.unwrap_or(0.0) == 0.0)
    }

    fn price_at(&self, pet: &PetInfo, level: &PetLevel) -> f64 {
        let level_1 = self.level_1.unwrap_or(0.0);
        let level_100 = self.level_100.unwrap_or(0.0);

        match level.level {
            l if l < 100 && level.xp_to_level_100 > 0.0 => {
                level_1 + (level_100 - level_1) / level.xp_to_level_100 * pet.exp
            }
            100 => level_100,
            l if l > 100 && l < 200 => {
                let level_200 = self.level_200.unwrap_or(level_100);
                level_100 + (level_200 - level_100) / 100.0 * f64::from(l - 100)
            }
            _ => self.level_200.unwrap_or(level_100),
        }
    }
}

/// Value a pet. Pets never nest, so this cannot fail.
pub fn calculate_pet(item: &NetworthItem, pet: &PetInfo, ctx: &ValuationContext<'_>) -> ItemNetworth {
    let anchors = PetAnchors::lookup(pet, item.is_soulbound, ctx);
    if anchors.is_unpriced() {
        debug!("no price anchors for pet {}", pet.price_key());
        return Valuation::starting_at(0.0, item).into_networth(item);
    }

    let level = PetLevel::of(pet, &ctx.config.pet_curve);
    let base_price = anchors.price_at(pet, &level);

    let mut valuation = Valuation::starting_at(base_price, item);
    valuation.priced = true;
    run_handlers(&PET_HANDLERS, item, ctx, &mut valuation);
    valuation.into_networth(item)
}
