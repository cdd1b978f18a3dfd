use crate::domain::entities::{Calculation, NetworthItem};
use crate::domain::evaluation::{Valuation, ValuationContext};

use super::ModifierHandler;

/// Reforge stone plus the blacksmith's fee at the item's current rarity.
pub struct ReforgeHandler;

impl ReforgeHandler {
    fn reforge(item: &NetworthItem) -> Option<String> {
        item.attributes
            .modifier
            .as_deref()
            .map(str::to_ascii_lowercase)
    }
}

impl ModifierHandler for ReforgeHandler {
    fn name(&self) -> &'static str {
        "reforge"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        !item.is_pet() && item.attributes.modifier.is_some()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        let Some(stone) = Self::reforge(item).and_then(|name| ctx.config.reforges.get(&name)) else {
            return 0.0;
        };
        let Some(stone_price) = ctx.prices.lookup(&stone.stone) else {
            return 0.0;
        };

        let value = stone_price * ctx.config.worth.reforge + stone.cost_at(valuation.rarity);
        if value == 0.0 {
            return 0.0;
        }
        valuation.add(Calculation::new(stone.stone.as_str(), "REFORGE", value, 1))
    }
}
