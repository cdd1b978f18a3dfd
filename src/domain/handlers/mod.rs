//! Modifier handlers: one unit per priced upgrade an item can carry.
//!
//! The order of [`ITEM_HANDLERS`] is load-bearing. Recombobulation moves the
//! item's rarity, and the reforge application cost is read at whatever rarity
//! the earlier handlers left behind, so Enchantment and Reforge always run
//! last. Keep the list a fixed array; it is never assembled at runtime.

mod consumables;
mod enchantments;
mod gemstones;
mod parts;
mod pet;
mod reforge;
mod skins;
mod special;
mod upgrades;

use super::entities::{Calculation, NetworthItem};
use super::evaluation::{Valuation, ValuationContext};

pub use consumables::{
    CountedUpgrade, BoosterHandler, DyeHandler, EnrichmentHandler, GemstonePowerScrollHandler,
    NecronBladeScrollHandler, RuneHandler, ART_OF_PEACE, ART_OF_WAR, DIVAN_POWDER_COATING,
    ETHERWARP_CONDUIT, FARMING_FOR_DUMMIES, JALAPENO_BOOK, MANA_DISINTEGRATOR,
    POCKET_SACK_IN_A_SACK, POLARVOID_BOOK, TRANSMISSION_TUNER, WOOD_SINGULARITY,
};
pub use enchantments::{EnchantedBookHandler, EnchantmentHandler};
pub use gemstones::GemstoneHandler;
pub use parts::{DrillPartHandler, RodPartHandler};
pub use pet::{PetCandyHandler, PetItemHandler};
pub use reforge::ReforgeHandler;
pub use skins::{SoulboundPetSkinHandler, SoulboundSkinHandler};
pub use special::{
    AvariceCoinsHandler, MidasWeaponHandler, NewYearCakeHandler, PickonimbusHandler,
    PrestigeHandler, PulseRingHandler, ShensAuctionHandler,
};
pub use upgrades::{
    EssenceStarHandler, MasterStarHandler, PotatoBookHandler, RecombobulatorHandler,
};

/// A priced modifier.
///
/// `applies` must only look at the item. `calculate` records its
/// contribution through [`Valuation::add`] and returns the sum it added; that
/// return value is the authoritative delta.
pub trait ModifierHandler: Sync {
    fn name(&self) -> &'static str;

    fn applies(&self, item: &NetworthItem) -> bool;

    fn calculate(
        &self,
        item: &NetworthItem,
        ctx: &ValuationContext<'_>,
        valuation: &mut Valuation,
    ) -> f64;
}

/// Every generic item modifier, in execution order.
pub static ITEM_HANDLERS: [&dyn ModifierHandler; 36] = [
    &RecombobulatorHandler,
    &PotatoBookHandler,
    &GemstoneHandler,
    &EssenceStarHandler,
    &MasterStarHandler,
    &ART_OF_PEACE,
    &ART_OF_WAR,
    &AvariceCoinsHandler,
    &BoosterHandler,
    &DIVAN_POWDER_COATING,
    &EnrichmentHandler,
    &ETHERWARP_CONDUIT,
    &FARMING_FOR_DUMMIES,
    &GemstonePowerScrollHandler,
    &JALAPENO_BOOK,
    &MANA_DISINTEGRATOR,
    &MidasWeaponHandler,
    &NecronBladeScrollHandler,
    &NewYearCakeHandler,
    &PickonimbusHandler,
    &POCKET_SACK_IN_A_SACK,
    &POLARVOID_BOOK,
    &PrestigeHandler,
    &PulseRingHandler,
    &RodPartHandler,
    &ShensAuctionHandler,
    &TRANSMISSION_TUNER,
    &WOOD_SINGULARITY,
    &DrillPartHandler,
    &DyeHandler,
    &EnchantedBookHandler,
    &RuneHandler,
    &SoulboundPetSkinHandler,
    &SoulboundSkinHandler,
    &EnchantmentHandler,
    &ReforgeHandler,
];

/// Pet modifiers, applied after the level-interpolated base price.
/// Candy scales whatever has accumulated, so it stays last.
pub static PET_HANDLERS: [&dyn ModifierHandler; 3] =
    [&PetItemHandler, &SoulboundPetSkinHandler, &PetCandyHandler];

/// Record `price(id) * count * worth` under `kind`. Missing or zero prices add nothing.
pub(crate) fn add_market_value(
    valuation: &mut Valuation,
    ctx: &ValuationContext<'_>,
    id: &str,
    kind: &str,
    count: u32,
    worth: f64,
) -> f64 {
    let Some(unit) = ctx.prices.lookup(id) else {
        return 0.0;
    };
    let value = unit * f64::from(count) * worth;
    if value == 0.0 {
        return 0.0;
    }
    valuation.add(Calculation::new(id, kind, value, count))
}
