//! Item-specific modifiers: values that only make sense for one item family.

use crate::domain::entities::{Calculation, NetworthItem};
use crate::domain::evaluation::{Valuation, ValuationContext};

use super::{add_market_value, ModifierHandler};

const AVARICE_CROWN: &str = "CROWN_OF_AVARICE";
const AVARICE_CROWN_MAXED: &str = "CROWN_OF_AVARICE_1B";
const AVARICE_MAX_COINS: f64 = 1_000_000_000.0;

pub struct AvariceCoinsHandler;

impl ModifierHandler for AvariceCoinsHandler {
    fn name(&self) -> &'static str {
        "avarice_coins"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.skyblock_id() == AVARICE_CROWN && item.attributes.collected_coins >= AVARICE_MAX_COINS
    }

    fn calculate(
        &self,
        _item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let Some(maxed) = ctx.prices.lookup(AVARICE_CROWN_MAXED) else {
            return 0.0;
        };
        let premium = maxed - valuation.base_price;
        if premium <= 0.0 {
            return 0.0;
        }
        valuation.add(Calculation::new(AVARICE_CROWN_MAXED, AVARICE_CROWN, premium, 1))
    }
}

/// Midas weapons scale with the coins bid on them; past the cap they trade as maxed.
const MIDAS_WEAPONS: &[(&str, f64, &str)] = &[
    ("MIDAS_SWORD", 50_000_000.0, "MIDAS_SWORD_50M"),
    ("MIDAS_STAFF", 100_000_000.0, "MIDAS_STAFF_100M"),
    ("STARRED_MIDAS_SWORD", 250_000_000.0, "STARRED_MIDAS_SWORD_250M"),
    ("STARRED_MIDAS_STAFF", 500_000_000.0, "STARRED_MIDAS_STAFF_500M"),
];

pub struct MidasWeaponHandler;

impl MidasWeaponHandler {
    fn weapon(item: &NetworthItem) -> Option<&'static (&'static str, f64, &'static str)> {
        MIDAS_WEAPONS.iter().find(|(id, ..)| *id == item.skyblock_id())
    }
}

impl ModifierHandler for MidasWeaponHandler {
    fn name(&self) -> &'static str {
        "midas_weapon"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        let paid = item.attributes.winning_bid + item.attributes.additional_coins;
        Self::weapon(item).is_some() && paid > 0.0
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let Some((id, cap, maxed_id)) = Self::weapon(item) else {
            return 0.0;
        };
        let paid = item.attributes.winning_bid + item.attributes.additional_coins;

        let (source, target) = match ctx.prices.lookup(maxed_id) {
            Some(maxed) if paid >= *cap => (*maxed_id, maxed),
            _ => (*id, paid * ctx.config.worth.winning_bid),
        };
        let premium = target - valuation.base_price;
        if premium <= 0.0 {
            return 0.0;
        }
        valuation.add(Calculation::new(source, "MIDAS_WEAPON", premium, 1))
    }
}

pub struct NewYearCakeHandler;

impl ModifierHandler for NewYearCakeHandler {
    fn name(&self) -> &'static str {
        "new_year_cake"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.skyblock_id() == "NEW_YEAR_CAKE" && item.attributes.new_years_cake.is_some()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let Some(year) = item.attributes.new_years_cake else {
            return 0.0;
        };
        let id = format!("NEW_YEAR_CAKE_{year}");
        add_market_value(valuation, ctx, &id, "NEW_YEAR_CAKE", 1, 1.0)
    }
}

const PICKONIMBUS_DURABILITY: u32 = 2000;

/// A worn pickonimbus is worth its remaining durability share.
pub struct PickonimbusHandler;

impl ModifierHandler for PickonimbusHandler {
    fn name(&self) -> &'static str {
        "pickonimbus"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.skyblock_id() == "PICKONIMBUS"
            && item
                .attributes
                .pickonimbus_durability
                .is_some_and(|durability| durability < PICKONIMBUS_DURABILITY)
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        _ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let Some(durability) = item.attributes.pickonimbus_durability else {
            return 0.0;
        };
        let remaining = f64::from(durability) / f64::from(PICKONIMBUS_DURABILITY);
        let reduction = valuation.price * (remaining - 1.0);
        if reduction == 0.0 {
            return 0.0;
        }
        valuation.add(Calculation::new("PICKONIMBUS_DURABILITY", "PICKONIMBUS", reduction, 1))
    }
}

const PRESTIGE_TIERS: &[&str] = &["HOT_", "BURNING_", "FIERY_", "INFERNAL_"];
const PRESTIGE_SETS: &[&str] = &["CRIMSON_", "AURORA_", "TERROR_", "HOLLOW_", "FERVOR_"];

/// Crimson isle armor keeps the value of every tier it was prestiged through.
pub struct PrestigeHandler;

impl PrestigeHandler {
    /// Lower tiers of a prestiged piece, cheapest first.
    fn lower_tiers(id: &str) -> Option<Vec<String>> {
        let (tier, piece) = PRESTIGE_TIERS
            .iter()
            .enumerate()
            .find_map(|(tier, prefix)| id.strip_prefix(prefix).map(|piece| (tier, piece)))?;
        if !PRESTIGE_SETS.iter().any(|set| piece.starts_with(set)) {
            return None;
        }

        let mut lower = vec![piece.to_string()];
        lower.extend(
            PRESTIGE_TIERS[..tier]
                .iter()
                .map(|prefix| format!("{prefix}{piece}")),
        );
        Some(lower)
    }
}

impl ModifierHandler for PrestigeHandler {
    fn name(&self) -> &'static str {
        "prestige"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        Self::lower_tiers(item.skyblock_id()).is_some()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        Self::lower_tiers(item.skyblock_id())
            .unwrap_or_default()
            .iter()
            .map(|id| add_market_value(valuation, ctx, id, "PRESTIGE", 1, ctx.config.worth.prestige_item))
            .sum()
    }
}

/// Thunder charge stored in a pulse ring, one bottle per 50k charge.
const THUNDER_CHARGE_PER_BOTTLE: f64 = 50_000.0;

pub struct PulseRingHandler;

impl ModifierHandler for PulseRingHandler {
    fn name(&self) -> &'static str {
        "pulse_ring"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.skyblock_id() == "PULSE_RING" && item.attributes.thunder_charge >= THUNDER_CHARGE_PER_BOTTLE
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let bottles = (item.attributes.thunder_charge / THUNDER_CHARGE_PER_BOTTLE).floor() as u32;
        add_market_value(
            valuation,
            ctx,
            "THUNDER_IN_A_BOTTLE",
            "THUNDER_CHARGE",
            bottles,
            ctx.config.worth.thunder_in_a_bottle,
        )
    }
}

/// Items won at Shen's auction are worth at least a share of what was paid.
pub struct ShensAuctionHandler;

impl ModifierHandler for ShensAuctionHandler {
    fn name(&self) -> &'static str {
        "shens_auction"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        let attributes = &item.attributes;
        attributes.price.is_some() && attributes.auction.is_some() && attributes.bid.is_some()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let Some(paid) = item.attributes.price else {
            return 0.0;
        };
        let credited = paid * ctx.config.worth.shens_auction_price;
        if credited <= valuation.price {
            return 0.0;
        }
        valuation.add(Calculation::new(
            item.skyblock_id(),
            "SHENS_AUCTION",
            credited - valuation.price,
            1,
        ))
    }
}
