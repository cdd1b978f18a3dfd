//! Consumable upgrades bought off the bazaar or auction house and applied to an item.

use crate::domain::config::ApplicationWorth;
use crate::domain::entities::{Calculation, ItemAttributes, NetworthItem};
use crate::domain::evaluation::{Valuation, ValuationContext};

use super::{add_market_value, ModifierHandler};

/// An upgrade whose value is simply `price(id) * applied count * worth`.
pub struct CountedUpgrade {
    name: &'static str,
    id: &'static str,
    count: fn(&ItemAttributes) -> u32,
    worth: fn(&ApplicationWorth) -> f64,
}

impl ModifierHandler for CountedUpgrade {
    fn name(&self) -> &'static str {
        self.name
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        (self.count)(&item.attributes) > 0
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let count = (self.count)(&item.attributes);
        let worth = (self.worth)(&ctx.config.worth);
        add_market_value(valuation, ctx, self.id, self.id, count, worth)
    }
}

pub static ART_OF_PEACE: CountedUpgrade = CountedUpgrade {
    name: "art_of_peace",
    id: "THE_ART_OF_PEACE",
    count: |attributes| attributes.art_of_peace_applied.min(1),
    worth: |worth| worth.art_of_peace,
};

pub static ART_OF_WAR: CountedUpgrade = CountedUpgrade {
    name: "art_of_war",
    id: "THE_ART_OF_WAR",
    count: |attributes| attributes.art_of_war_count,
    worth: |worth| worth.art_of_war,
};

pub static DIVAN_POWDER_COATING: CountedUpgrade = CountedUpgrade {
    name: "divan_powder_coating",
    id: "DIVAN_POWDER_COATING",
    count: |attributes| attributes.divan_powder_coating.min(1),
    worth: |worth| worth.divan_powder_coating,
};

pub static ETHERWARP_CONDUIT: CountedUpgrade = CountedUpgrade {
    name: "etherwarp_conduit",
    id: "ETHERWARP_CONDUIT",
    count: |attributes| attributes.ethermerge.min(1),
    worth: |worth| worth.etherwarp,
};

pub static FARMING_FOR_DUMMIES: CountedUpgrade = CountedUpgrade {
    name: "farming_for_dummies",
    id: "FARMING_FOR_DUMMIES",
    count: |attributes| attributes.farming_for_dummies_count,
    worth: |worth| worth.farming_for_dummies,
};

pub static JALAPENO_BOOK: CountedUpgrade = CountedUpgrade {
    name: "jalapeno_book",
    id: "JALAPENO_BOOK",
    count: |attributes| attributes.jalapeno_count.min(1),
    worth: |worth| worth.jalapeno_book,
};

pub static MANA_DISINTEGRATOR: CountedUpgrade = CountedUpgrade {
    name: "mana_disintegrator",
    id: "MANA_DISINTEGRATOR",
    count: |attributes| attributes.mana_disintegrator_count,
    worth: |worth| worth.mana_disintegrator,
};

pub static POCKET_SACK_IN_A_SACK: CountedUpgrade = CountedUpgrade {
    name: "pocket_sack_in_a_sack",
    id: "POCKET_SACK_IN_A_SACK",
    count: |attributes| attributes.sack_pss,
    worth: |worth| worth.pocket_sack_in_a_sack,
};

pub static POLARVOID_BOOK: CountedUpgrade = CountedUpgrade {
    name: "polarvoid_book",
    id: "POLARVOID_BOOK",
    count: |attributes| attributes.polarvoid,
    worth: |worth| worth.polarvoid,
};

pub static TRANSMISSION_TUNER: CountedUpgrade = CountedUpgrade {
    name: "transmission_tuner",
    id: "TRANSMISSION_TUNER",
    count: |attributes| attributes.tuned_transmission,
    worth: |worth| worth.tuned_transmission,
};

pub static WOOD_SINGULARITY: CountedUpgrade = CountedUpgrade {
    name: "wood_singularity",
    id: "WOOD_SINGULARITY",
    count: |attributes| attributes.wood_singularity_count.min(1),
    worth: |worth| worth.wood_singularity,
};

pub struct BoosterHandler;

impl ModifierHandler for BoosterHandler {
    fn name(&self) -> &'static str {
        "booster"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        !item.attributes.boosters.is_empty()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        item.attributes
            .boosters
            .iter()
            .map(|booster| {
                let id = format!("{}_BOOSTER", booster.to_ascii_uppercase());
                add_market_value(valuation, ctx, &id, "BOOSTER", 1, ctx.config.worth.booster)
            })
            .sum()
    }
}

/// Every talisman enrichment can be swapped for any other, so an applied one
/// is only worth the cheapest of them.
const ENRICHMENTS: &[&str] = &[
    "TALISMAN_ENRICHMENT_ATTACK_SPEED",
    "TALISMAN_ENRICHMENT_CRITICAL_CHANCE",
    "TALISMAN_ENRICHMENT_CRITICAL_DAMAGE",
    "TALISMAN_ENRICHMENT_DEFENSE",
    "TALISMAN_ENRICHMENT_FEROCITY",
    "TALISMAN_ENRICHMENT_HEALTH",
    "TALISMAN_ENRICHMENT_INTELLIGENCE",
    "TALISMAN_ENRICHMENT_MAGIC_FIND",
    "TALISMAN_ENRICHMENT_SEA_CREATURE_CHANCE",
    "TALISMAN_ENRICHMENT_STRENGTH",
    "TALISMAN_ENRICHMENT_WALK_SPEED",
];

pub struct EnrichmentHandler;

impl ModifierHandler for EnrichmentHandler {
    fn name(&self) -> &'static str {
        "enrichment"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.attributes.talisman_enrichment.is_some()
    }

    fn calculate(
        &self,
        _item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let cheapest = ENRICHMENTS
            .iter()
            .filter_map(|id| ctx.prices.lookup(id).map(|price| (*id, price)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match cheapest {
            Some((id, price)) if price > 0.0 => valuation.add(Calculation::new(
                id,
                "TALISMAN_ENRICHMENT",
                price * ctx.config.worth.enrichment,
                1,
            )),
            _ => 0.0,
        }
    }
}

pub struct GemstonePowerScrollHandler;

impl ModifierHandler for GemstonePowerScrollHandler {
    fn name(&self) -> &'static str {
        "gemstone_power_scroll"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.attributes.power_ability_scroll.is_some()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let Some(scroll) = &item.attributes.power_ability_scroll else {
            return 0.0;
        };
        add_market_value(
            valuation,
            ctx,
            &scroll.to_ascii_uppercase(),
            "GEMSTONE_POWER_SCROLL",
            1,
            ctx.config.worth.gemstone_power_scroll,
        )
    }
}

/// Wither impact scrolls (implosion, shadow warp, wither shield) on a necron blade.
pub struct NecronBladeScrollHandler;

impl ModifierHandler for NecronBladeScrollHandler {
    fn name(&self) -> &'static str {
        "necron_blade_scrolls"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        !item.attributes.ability_scroll.is_empty()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        item.attributes
            .ability_scroll
            .iter()
            .map(|scroll| {
                add_market_value(
                    valuation,
                    ctx,
                    scroll,
                    "NECRON_SCROLL",
                    1,
                    ctx.config.worth.necron_blade_scroll,
                )
            })
            .sum()
    }
}

pub struct DyeHandler;

impl ModifierHandler for DyeHandler {
    fn name(&self) -> &'static str {
        "dye"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        item.attributes.dye_item.is_some()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let Some(dye) = &item.attributes.dye_item else {
            return 0.0;
        };
        add_market_value(valuation, ctx, dye, "DYE", 1, ctx.config.worth.dye)
    }
}

/// Runes applied to gear. Rune items themselves are priced by their own id.
pub struct RuneHandler;

impl ModifierHandler for RuneHandler {
    fn name(&self) -> &'static str {
        "rune"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        let id = item.skyblock_id();
        !item.attributes.runes.is_empty() && id != "RUNE" && id != "UNIQUE_RUNE"
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        item.attributes
            .runes
            .iter()
            .map(|(rune, level)| {
                let id = format!("RUNE_{}_{}", rune.to_ascii_uppercase(), level);
                add_market_value(valuation, ctx, &id, "RUNE", 1, ctx.config.worth.runes)
            })
            .sum()
    }
}
