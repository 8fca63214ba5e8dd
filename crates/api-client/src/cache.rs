use crate::error::ApiError;
use crate::table::Table;
use crate::{DataProvider, SheetRef};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// How long a fetched tab may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    pub ttl: Duration,
}

impl FreshnessPolicy {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Never reuse a fetched tab.
    pub fn always_refetch() -> Self {
        Self { ttl: Duration::ZERO }
    }

    fn is_fresh(&self, fetched_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(fetched_at) < self.ttl
    }
}

struct CacheEntry {
    fetched_at: Instant,
    table: Arc<Table>,
}

/// Wraps a `DataProvider` with a pull-with-expiry cache.
///
/// A tab is served from memory while it is younger than the policy's TTL and
/// refetched from the inner provider afterwards. Failed fetches are never cached.
pub struct CachedProvider<P> {
    inner: P,
    policy: FreshnessPolicy,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl<P: DataProvider> CachedProvider<P> {
    pub fn new(inner: P, policy: FreshnessPolicy) -> Self {
        Self {
            inner,
            policy,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn policy(&self) -> FreshnessPolicy {
        self.policy
    }

    /// Drops the cached copy of `sheet`, forcing the next fetch to hit the source.
    pub fn invalidate(&self, sheet: &SheetRef) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&sheet.cache_key());
    }

    fn lookup(&self, key: &str) -> Option<Arc<Table>> {
        let now = Instant::now();
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(key)
            .filter(|entry| self.policy.is_fresh(entry.fetched_at, now))
            .map(|entry| Arc::clone(&entry.table))
    }
}

#[async_trait]
impl<P: DataProvider> DataProvider for CachedProvider<P> {
    async fn fetch(&self, sheet: &SheetRef) -> Result<Arc<Table>, ApiError> {
        let key = sheet.cache_key();
        if let Some(table) = self.lookup(&key) {
            tracing::debug!(sheet = %sheet.name, "Serving sheet from cache.");
            return Ok(table);
        }

        let table = self.inner.fetch(sheet).await?;

        if !self.policy.ttl.is_zero() {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(
                    key,
                    CacheEntry {
                        fetched_at: Instant::now(),
                        table: Arc::clone(&table),
                    },
                );
        }

        Ok(table)
    }
}
