//! Entry point: picks the pet or item engine for each item.

use log::debug;

use super::config::ValuationConfig;
use super::entities::{ItemNetworth, NetworthItem};
use super::evaluation::{check_depth, value_item, ValuationContext, ValuationError};
use super::pet::calculate_pet;
use super::prices::{PriceProvider, PriceTable};

/// Values items against snapshots from a [`PriceProvider`].
pub struct NetworthCalculator<P> {
    provider: P,
    config: ValuationConfig,
}

impl<P: PriceProvider> NetworthCalculator<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, ValuationConfig::default())
    }

    pub fn with_config(provider: P, config: ValuationConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Value one item against the provider's current snapshot.
    pub async fn calculate(&self, item: &NetworthItem) -> Result<ItemNetworth, ValuationError> {
        let prices = self.provider.get_prices().await?;
        self.calculate_with_prices(item, &prices)
    }

    /// Value a batch against a single snapshot, in input order.
    pub async fn calculate_many(
        &self,
        items: &[NetworthItem],
    ) -> Result<Vec<ItemNetworth>, ValuationError> {
        let prices = self.provider.get_prices().await?;
        debug!("valuing {} items against {} prices", items.len(), prices.len());
        items
            .iter()
            .map(|item| self.calculate_with_prices(item, &prices))
            .collect()
    }

    pub fn calculate_with_prices(
        &self,
        item: &NetworthItem,
        prices: &PriceTable,
    ) -> Result<ItemNetworth, ValuationError> {
        calculate_networth(item, prices, &self.config)
    }
}

/// Value any item, pet or not, without a provider.
pub fn calculate_networth(
    item: &NetworthItem,
    prices: &PriceTable,
    config: &ValuationConfig,
) -> Result<ItemNetworth, ValuationError> {
    route(item, &ValuationContext::new(prices, config), 0)
}

pub(crate) fn route(
    item: &NetworthItem,
    ctx: &ValuationContext<'_>,
    depth: usize,
) -> Result<ItemNetworth, ValuationError> {
    check_depth(depth, ctx.config)?;
    match &item.pet_info {
        Some(pet) => Ok(calculate_pet(item, pet, ctx)),
        None => value_item(item, ctx, depth),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::domain::entities::PetInfo;
    use crate::domain::prices::PriceError;
    use crate::domain::rarity::Rarity;

    struct CountingProvider {
        prices: Arc<PriceTable>,
        fetches: AtomicUsize,
    }

    impl PriceProvider for CountingProvider {
        async fn get_prices(&self) -> Result<Arc<PriceTable>, PriceError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::clone(&self.prices))
        }
    }

    struct FailingProvider;

    impl PriceProvider for FailingProvider {
        async fn get_prices(&self) -> Result<Arc<PriceTable>, PriceError> {
            Err(PriceError::Source("bazaar offline".to_string()))
        }
    }

    fn provider(entries: &[(&str, f64)]) -> CountingProvider {
        CountingProvider {
            prices: Arc::new(entries.iter().map(|(id, price)| (*id, *price)).collect()),
            fetches: AtomicUsize::new(0),
        }
    }

    fn blaze() -> NetworthItem {
        let mut item = NetworthItem::new("PET");
        item.pet_info = Some(PetInfo {
            pet_type: "BLAZE".to_string(),
            tier: Rarity::Legendary,
            exp: 0.0,
            held_item: None,
            skin: None,
            candy_used: 0,
        });
        item
    }

    #[tokio::test]
    async fn test_routes_pets_and_items() {
        let calculator = NetworthCalculator::new(provider(&[
            ("PET", 1.0),
            ("LVL_1_LEGENDARY_BLAZE", 2_000_000.0),
            ("HYPERION", 900_000_000.0),
        ]));

        let pet = calculator.calculate(&blaze()).await.unwrap();
        assert_eq!(pet.price, 2_000_000.0);

        let item = calculator.calculate(&NetworthItem::new("HYPERION")).await.unwrap();
        assert_eq!(item.price, 900_000_000.0);
    }

    #[tokio::test]
    async fn test_batch_uses_one_snapshot() {
        let calculator = NetworthCalculator::new(provider(&[("HYPERION", 1.0), ("TERMINATOR", 2.0)]));
        let items = vec![NetworthItem::new("HYPERION"), NetworthItem::new("TERMINATOR")];

        let results = calculator.calculate_many(&items).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].networth, 2.0);
        assert_eq!(calculator.provider().fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_is_surfaced() {
        let calculator = NetworthCalculator::new(FailingProvider);
        let err = calculator.calculate(&NetworthItem::new("HYPERION")).await.unwrap_err();
        assert!(matches!(err, ValuationError::Prices(PriceError::Source(_))));
    }

    #[test]
    fn test_pets_nested_in_bags_use_pet_engine() {
        let prices: PriceTable = [("LVL_1_LEGENDARY_BLAZE", 2_000_000.0)].into_iter().collect();
        let mut menu = NetworthItem::new("PET_MENU");
        menu.attributes.inventory.insert(0, Some(blaze()));

        let result = calculate_networth(&menu, &prices, &ValuationConfig::default()).unwrap();
        assert_eq!(result.calculation[0].id, "INVENTORY");
        assert_eq!(result.price, 2_000_000.0);
    }
}
