//! Item model, modifier handlers and the valuation engines.

pub mod config;
pub mod dispatch;
pub mod entities;
pub mod evaluation;
pub mod handlers;
pub mod pet;
pub mod prices;
pub mod rarity;

#[allow(unused_imports)]
pub use config::{ApplicationWorth, PetLevelCurve, ReforgeStone, ValuationConfig, DEFAULT_MAX_DEPTH};
#[allow(unused_imports)]
pub use dispatch::{calculate_networth, NetworthCalculator};
#[allow(unused_imports)]
pub use entities::{
    Calculation, GemValue, ItemAttributes, ItemNetworth, NetworthItem, PetInfo, RodPart, UpgradeCost,
};
#[allow(unused_imports)]
pub use evaluation::{calculate_item, Valuation, ValuationContext, ValuationError};
#[allow(unused_imports)]
pub use handlers::{ModifierHandler, ITEM_HANDLERS, PET_HANDLERS};
#[allow(unused_imports)]
pub use pet::{calculate_pet, PetLevel};
#[allow(unused_imports)]
pub use prices::{PriceError, PriceProvider, PriceTable};
#[allow(unused_imports)]
pub use rarity::Rarity;
