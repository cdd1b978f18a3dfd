use crate::domain::entities::NetworthItem;
use crate::domain::evaluation::{Valuation, ValuationContext};

use super::{add_market_value, ModifierHandler};

/// Line, hook and sinker fitted to a fishing rod.
pub struct RodPartHandler;

impl RodPartHandler {
    fn parts(item: &NetworthItem) -> impl Iterator<Item = String> + '_ {
        let attributes = &item.attributes;
        [&attributes.line, &attributes.hook, &attributes.sinker]
            .into_iter()
            .flatten()
            .map(|part| part.part.to_ascii_uppercase())
    }
}

impl ModifierHandler for RodPartHandler {
    fn name(&self) -> &'static str {
        "rod_parts"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        Self::parts(item).next().is_some()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        Self::parts(item)
            .map(|part| add_market_value(valuation, ctx, &part, "ROD_PART", 1, ctx.config.worth.rod_part))
            .sum()
    }
}

/// Upgrade module, fuel tank and engine fitted to a drill.
pub struct DrillPartHandler;

impl DrillPartHandler {
    fn parts(item: &NetworthItem) -> impl Iterator<Item = String> + '_ {
        let attributes = &item.attributes;
        [
            &attributes.drill_part_upgrade_module,
            &attributes.drill_part_fuel_tank,
            &attributes.drill_part_engine,
        ]
        .into_iter()
        .flatten()
        .map(|part| part.to_ascii_uppercase())
    }
}

impl ModifierHandler for DrillPartHandler {
    fn name(&self) -> &'static str {
        "drill_parts"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        Self::parts(item).next().is_some()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        Self::parts(item)
            .map(|part| {
                add_market_value(valuation, ctx, &part, "DRILL_PART", 1, ctx.config.worth.drill_part)
            })
            .sum()
    }
}
