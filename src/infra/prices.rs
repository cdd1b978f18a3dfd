//! Price snapshot providers.
//!
//! - [`CachedPriceProvider`] keeps the last snapshot for 60 minutes and falls
//!   back to it, stale, when a refresh fails.
//! - [`StaticPrices`] hands out one fixed snapshot.
//! - [`JsonFileSource`] reads a `{ "ID": price }` dump from disk.

use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::domain::{PriceError, PriceProvider, PriceTable};

const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Wherever raw prices come from (bazaar/auction aggregator, file, ...).
pub trait PriceSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<PriceTable, PriceError>> + Send;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Cached,
    Stale,
}

#[derive(Clone, Debug)]
pub struct CachedPayload<T> {
    pub data: T,
    pub fetched_at: Instant,
    pub status: CacheStatus,
}

impl<T> CachedPayload<T> {
    fn new(data: T, fetched_at: Instant, status: CacheStatus) -> Self {
        Self {
            data,
            fetched_at,
            status,
        }
    }
}

struct Cached<T> {
    value: T,
    fetched_at: Instant,
}

impl<T: Clone> Cached<T> {
    fn new(value: T, fetched_at: Instant) -> Self {
        Self { value, fetched_at }
    }

    fn if_fresh(&self, ttl: Duration) -> Option<CachedPayload<T>> {
        if self.fetched_at.elapsed() <= ttl {
            Some(CachedPayload::new(
                self.value.clone(),
                self.fetched_at,
                CacheStatus::Cached,
            ))
        } else {
            None
        }
    }

    fn stale(&self) -> CachedPayload<T> {
        CachedPayload::new(self.value.clone(), self.fetched_at, CacheStatus::Stale)
    }
}

/// Wraps a [`PriceSource`] with a TTL cache and stale fallback.
pub struct CachedPriceProvider<S> {
    source: Arc<S>,
    cache: Arc<Mutex<Option<Cached<Arc<PriceTable>>>>>,
    ttl: Duration,
}

impl<S> Clone for CachedPriceProvider<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            cache: Arc::clone(&self.cache),
            ttl: self.ttl,
        }
    }
}

impl<S: PriceSource> CachedPriceProvider<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            cache: Arc::new(Mutex::new(None)),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Current snapshot and where it came from.
    pub async fn get_snapshot(&self) -> Result<CachedPayload<Arc<PriceTable>>, PriceError> {
        if let Some(payload) = self.cached().await {
            return Ok(payload);
        }

        match self.source.fetch().await {
            Ok(table) => {
                info!("refreshed price table ({} entries)", table.len());
                Ok(self.store(Arc::new(table)).await)
            }
            Err(error) => {
                if let Some(stale) = self.cached_stale().await {
                    warn!("price refresh failed, serving stale snapshot: {error}");
                    return Ok(stale);
                }
                Err(error)
            }
        }
    }

    pub async fn clear_cache(&self) {
        *self.cache.lock().await = None;
    }

    async fn cached(&self) -> Option<CachedPayload<Arc<PriceTable>>> {
        let cache = self.cache.lock().await;
        let result = cache.as_ref().and_then(|entry| entry.if_fresh(self.ttl));
        if result.is_some() {
            debug!("serving cached price table");
        }
        result
    }

    async fn cached_stale(&self) -> Option<CachedPayload<Arc<PriceTable>>> {
        let cache = self.cache.lock().await;
        cache.as_ref().map(Cached::stale)
    }

    async fn store(&self, table: Arc<PriceTable>) -> CachedPayload<Arc<PriceTable>> {
        let fetched_at = Instant::now();
        let payload = CachedPayload::new(Arc::clone(&table), fetched_at, CacheStatus::Fresh);
        *self.cache.lock().await = Some(Cached::new(table, fetched_at));
        payload
    }
}

impl<S: PriceSource> PriceProvider for CachedPriceProvider<S> {
    async fn get_prices(&self) -> Result<Arc<PriceTable>, PriceError> {
        self.get_snapshot().await.map(|payload| payload.data)
    }
}

/// A fixed snapshot, for tests and offline runs.
#[derive(Clone, Debug, Default)]
pub struct StaticPrices {
    prices: Arc<PriceTable>,
}

impl StaticPrices {
    pub fn new(prices: PriceTable) -> Self {
        Self {
            prices: Arc::new(prices),
        }
    }
}

impl From<PriceTable> for StaticPrices {
    fn from(prices: PriceTable) -> Self {
        Self::new(prices)
    }
}

impl PriceProvider for StaticPrices {
    async fn get_prices(&self) -> Result<Arc<PriceTable>, PriceError> {
        Ok(Arc::clone(&self.prices))
    }
}

/// Reads a JSON price dump on every fetch.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PriceSource for JsonFileSource {
    async fn fetch(&self) -> Result<PriceTable, PriceError> {
        let json = fs::read_to_string(&self.path)
            .map_err(|error| PriceError::Source(format!("{}: {error}", self.path.display())))?;
        Ok(PriceTable::from_json_str(&json)?)
    }
}
