//! Networth calculator for decoded SkyBlock items.
//!
//! Values an item (and everything nested inside it) against a price table
//! snapshot and records every modifier's contribution:
//!
//! ```no_run
//! use networth_calculator::{NetworthCalculator, NetworthItem, PriceTable, StaticPrices};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let prices = PriceTable::from_json_str(r#"{"HYPERION": 900000000}"#)?;
//! let calculator = NetworthCalculator::new(StaticPrices::new(prices));
//!
//! let result = calculator.calculate(&NetworthItem::new("HYPERION")).await?;
//! for entry in &result.calculation {
//!     println!("{} {}: {}", entry.kind, entry.id, entry.value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod infra;
pub mod util;

pub use domain::{
    calculate_networth, Calculation, ItemNetworth, NetworthCalculator, NetworthItem, PriceError,
    PriceProvider, PriceTable, Rarity, ValuationConfig, ValuationError,
};
pub use infra::prices::{CachedPriceProvider, JsonFileSource, PriceSource, StaticPrices};
