use crate::domain::entities::NetworthItem;
use crate::domain::evaluation::{Valuation, ValuationContext};

use super::{add_market_value, ModifierHandler};

/// Slots that accept several gem types; the chosen type sits under `<slot>_gem`.
const GENERIC_SLOTS: &[&str] = &["COMBAT", "OFFENSIVE", "DEFENSIVE", "MINING", "UNIVERSAL", "CHISEL"];
const UNLOCKED_SLOTS: &str = "unlocked_slots";

pub struct GemstoneHandler;

impl GemstoneHandler {
    /// Price-table id (`FLAWLESS_JADE_GEM`) of every socketed gem.
    fn socketed(item: &NetworthItem) -> impl Iterator<Item = String> + '_ {
        item.gems.iter().filter_map(move |(slot, value)| {
            if slot == UNLOCKED_SLOTS || slot.ends_with("_gem") {
                return None;
            }
            let quality = value.as_str()?;
            let slot_type = slot.rsplit_once('_').map_or(slot.as_str(), |(head, _)| head);
            let gem_type = if GENERIC_SLOTS.contains(&slot_type) {
                item.gems.get(&format!("{slot}_gem"))?.as_str()?
            } else {
                slot_type
            };
            Some(format!(
                "{}_{}_GEM",
                quality.to_ascii_uppercase(),
                gem_type.to_ascii_uppercase()
            ))
        })
    }
}

impl ModifierHandler for GemstoneHandler {
    fn name(&self) -> &'static str {
        "gemstones"
    }

    fn applies(&self, item: &NetworthItem) -> bool {
        Self::socketed(item).next().is_some()
    }

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64 {
        Self::socketed(item)
            .map(|gem| add_market_value(valuation, ctx, &gem, "GEMSTONE", 1, ctx.config.worth.gemstone))
            .sum()
    }
}
