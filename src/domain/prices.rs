//! Immutable price snapshot shared by concurrent valuations.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PriceError {
    #[error("price source error: {0}")]
    Source(String),
    #[error("invalid price payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can hand out the current price snapshot.
pub trait PriceProvider: Send + Sync {
    fn get_prices(&self) -> impl Future<Output = Result<Arc<PriceTable>, PriceError>> + Send;
}

/// Coin price per price-table id (`HOT_POTATO_BOOK`, `LVL_100_LEGENDARY_ENDER_DRAGON`, ...).
///
/// Never mutated once built; wrap it in an `Arc` to share it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, f64>", into = "HashMap<String, f64>")]
pub struct PriceTable {
    prices: HashMap<String, f64>,
}

impl PriceTable {
    pub fn new(prices: HashMap<String, f64>) -> Self {
        let prices = prices
            .into_iter()
            .filter(|(_, price)| price.is_finite())
            .collect();
        Self { prices }
    }

    /// Parse a `{ "ID": price, ... }` JSON object.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let prices: HashMap<String, f64> = serde_json::from_str(json)?;
        Ok(Self::new(prices))
    }

    /// Price for `id`, `None` when the table has no entry.
    pub fn lookup(&self, id: &str) -> Option<f64> {
        self.prices.get(id).copied()
    }

    /// Price for `id`, 0 when the table has no entry.
    pub fn get(&self, id: &str) -> f64 {
        self.lookup(id).unwrap_or(0.0)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.prices.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for PriceTable {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(|(id, price)| (id.into(), price)).collect())
    }
}

impl From<HashMap<String, f64>> for PriceTable {
    fn from(prices: HashMap<String, f64>) -> Self {
        Self::new(prices)
    }
}

impl From<PriceTable> for HashMap<String, f64> {
    fn from(table: PriceTable) -> Self {
        table.prices
    }
}
