//! Item valuation engine.
//!
//! An item starts at its own market price and every applicable modifier
//! handler then adds its contribution in [`ITEM_HANDLERS`] order. Bags and
//! backpacks add the networth of their contents as one `INVENTORY` entry.

use log::{debug, warn};
use thiserror::Error;

use super::config::ValuationConfig;
use super::dispatch::route;
use super::entities::{Calculation, ItemNetworth, NetworthItem};
use super::handlers::{ModifierHandler, ITEM_HANDLERS};
use super::prices::{PriceError, PriceTable};
use super::rarity::Rarity;

#[derive(Debug, Error)]
pub enum ValuationError {
    #[error("item nesting depth {depth} exceeds the configured maximum of {max_depth}")]
    DepthExceeded { depth: usize, max_depth: usize },
    #[error("price table unavailable: {0}")]
    Prices(#[from] PriceError),
}

/// Read-only inputs shared by every handler of one valuation.
#[derive(Clone, Copy, Debug)]
pub struct ValuationContext<'a> {
    pub prices: &'a PriceTable,
    pub config: &'a ValuationConfig,
}

impl<'a> ValuationContext<'a> {
    pub fn new(prices: &'a PriceTable, config: &'a ValuationConfig) -> Self {
        Self { prices, config }
    }
}

/// Running state of one item's valuation.
///
/// Handlers only ever grow it through [`Valuation::add`] and
/// [`Valuation::add_soulbound`], which keeps `price` equal to
/// `base_price` plus the sum of `calculation`.
#[derive(Clone, Debug, PartialEq)]
pub struct Valuation {
    pub base_price: f64,
    pub price: f64,
    /// Rarity as of the handlers run so far.
    pub rarity: Option<Rarity>,
    pub calculation: Vec<Calculation>,
    /// Per-unit value that cannot be traded away.
    pub soulbound_portion: f64,
    pub priced: bool,
}

impl Valuation {
    /// Fresh valuation at `base_price`. A recombobulated item's lore already
    /// shows the promoted tier, so its rarity starts one tier lower.
    pub fn starting_at(base_price: f64, item: &NetworthItem) -> Self {
        let rarity = item.rarity().map(|rarity| {
            if !item.is_pet() && item.attributes.rarity_upgrades > 0 {
                rarity.downgraded()
            } else {
                rarity
            }
        });

        Self {
            base_price,
            price: base_price,
            rarity,
            calculation: Vec::new(),
            soulbound_portion: 0.0,
            priced: false,
        }
    }

    /// Record a contribution and return its value.
    pub fn add(&mut self, entry: Calculation) -> f64 {
        let value = entry.value;
        self.price += value;
        self.calculation.push(entry);
        value
    }

    /// Record a contribution that is also soulbound.
    pub fn add_soulbound(&mut self, entry: Calculation) -> f64 {
        let value = self.add(entry);
        self.soulbound_portion += value;
        value
    }

    pub fn into_networth(self, item: &NetworthItem) -> ItemNetworth {
        let count = f64::from(item.count);
        let networth = self.price * count;
        // A pet's soulbound flag only covers its skin.
        let soulbound_portion = if item.is_soulbound && !item.is_pet() {
            networth
        } else {
            self.soulbound_portion * count
        };

        ItemNetworth {
            item: item.clone(),
            base_price: self.base_price,
            price: self.price,
            networth,
            calculation: self.calculation,
            priced: self.priced,
            soulbound_portion,
        }
    }
}

/// Run each applicable handler, in slice order.
pub(crate) fn run_handlers(
    handlers: &[&dyn ModifierHandler],
    item: &NetworthItem,
    ctx: &ValuationContext<'_>,
    valuation: &mut Valuation,
) {
    for handler in handlers {
        if !handler.applies(item) {
            continue;
        }
        let first = valuation.calculation.len();
        let delta = handler.calculate(item, ctx, valuation);
        debug_assert!(
            {
                let recorded: f64 = valuation.calculation[first..].iter().map(|entry| entry.value).sum();
                (recorded - delta).abs() <= 1e-9 * recorded.abs().max(delta.abs()).max(1.0)
            },
            "{} returned {delta} but recorded different entries",
            handler.name()
        );
        if delta != 0.0 {
            debug!("{}: {} {delta:+}", item.skyblock_id(), handler.name());
        }
    }
}

/// Value a non-pet item and everything nested inside it.
pub fn calculate_item(
    item: &NetworthItem,
    ctx: &ValuationContext<'_>,
) -> Result<ItemNetworth, ValuationError> {
    value_item(item, ctx, 0)
}

pub(crate) fn value_item(
    item: &NetworthItem,
    ctx: &ValuationContext<'_>,
    depth: usize,
) -> Result<ItemNetworth, ValuationError> {
    let id = item.skyblock_id();
    let priced = !id.is_empty() && ctx.prices.contains(id);
    let base_price = if priced { ctx.prices.get(id) } else { 0.0 };
    let mut valuation = Valuation::starting_at(base_price, item);
    valuation.priced = priced;

    run_handlers(&ITEM_HANDLERS, item, ctx, &mut valuation);
    add_inventory(item, ctx, depth, &mut valuation)?;

    Ok(valuation.into_networth(item))
}

pub(crate) fn check_depth(depth: usize, config: &ValuationConfig) -> Result<(), ValuationError> {
    if depth > config.max_depth {
        warn!(
            "refusing to value item nested {depth} levels deep (max {})",
            config.max_depth
        );
        return Err(ValuationError::DepthExceeded {
            depth,
            max_depth: config.max_depth,
        });
    }
    Ok(())
}

fn add_inventory(
    item: &NetworthItem,
    ctx: &ValuationContext<'_>,
    depth: usize,
    valuation: &mut Valuation,
) -> Result<(), ValuationError> {
    let inventory = &item.attributes.inventory;
    if inventory.is_empty() {
        return Ok(());
    }

    let mut contents = 0.0;
    for nested in inventory.values().flatten() {
        let result = route(nested, ctx, depth + 1)?;
        contents += result.networth;
        valuation.soulbound_portion += result.soulbound_portion;
    }

    if contents > 0.0 {
        valuation.add(Calculation::new("INVENTORY", "INVENTORY", contents, 1));
    }
    Ok(())
}
