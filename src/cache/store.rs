//! Cache Store Module
//!
//! TTL cache over a [`KvStore`]. Entries are written as `{data, timestamp, ttl}`
//! envelopes and checked for freshness on every read; a stale entry is
//! deleted by the read that finds it.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, CacheStats, Clock, StatsCounters};
use crate::error::{Result, ServiceError};
use crate::kv::KvStore;
use crate::namespace::Namespace;

// == TTL Cache ==
/// Cache for one namespace with a fixed TTL.
#[derive(Debug)]
pub struct TtlCache {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
    namespace: Namespace,
    ttl_ms: u64,
    stats: StatsCounters,
}

impl TtlCache {
    // == Constructor ==
    /// Creates a cache writing into `namespace` with a TTL of `ttl_ms`.
    pub fn new(
        store: Arc<dyn KvStore>,
        clock: Arc<dyn Clock>,
        namespace: Namespace,
        ttl_ms: u64,
    ) -> Self {
        Self {
            store,
            clock,
            namespace,
            ttl_ms,
            stats: StatsCounters::new(),
        }
    }

    /// Creates the market-trends cache.
    pub fn market_trends(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>, ttl_ms: u64) -> Self {
        Self::new(store, clock, Namespace::MarketTrends, ttl_ms)
    }

    /// Composite key for `field` in this cache's namespace.
    pub fn key_for(&self, field: &str) -> Result<String> {
        self.namespace.key(field)
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    // == Put ==
    /// Stores `payload` under `key`, stamped with the current time.
    ///
    /// Replaces any existing entry, fresh or stale.
    pub async fn put(&self, key: &str, payload: Value) -> Result<()> {
        let entry = CacheEntry::new(payload, self.clock.now_ms(), self.ttl_ms);
        self.store.set(key, entry.to_value()).await?;
        self.stats.record_write();

        info!("Cached '{}' for {}ms", key, self.ttl_ms);
        Ok(())
    }

    // == Get ==
    /// Returns the payload under `key` if it is still fresh.
    ///
    /// A stale entry is deleted and reported the same way as a missing one.
    pub async fn get(&self, key: &str) -> Result<Value> {
        let Some(raw) = self.store.get(key).await? else {
            self.stats.record_miss();
            debug!("Cache miss for '{}'", key);
            return Err(not_found(key));
        };

        let entry = CacheEntry::from_value(key, raw.clone())?;
        let now = self.clock.now_ms();

        if !entry.is_fresh(now) {
            // Only the envelope read above is removed; a concurrent put survives.
            let evicted = self.store.del_if(key, &raw).await?;
            self.stats.record_expired();
            if evicted {
                warn!(
                    "Evicted stale entry '{}' (age {}ms > ttl {}ms)",
                    key,
                    entry.age_ms(now),
                    entry.ttl
                );
            } else {
                debug!("Stale entry '{}' was replaced before eviction", key);
            }
            return Err(not_found(key));
        }

        self.stats.record_hit();
        debug!("Cache hit for '{}' ({}ms left)", key, entry.ttl_remaining_ms(now));
        Ok(entry.data)
    }

    // == Delete ==
    /// Removes `key`. Succeeds whether or not it existed.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.store.del(key).await?;
        debug!("Deleted '{}'", key);
        Ok(())
    }

    // == Contains ==
    /// Whether the backing store holds anything under `key`, ignoring freshness.
    pub async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.store.get(key).await?.is_some())
    }

    // == Sweep Expired ==
    /// Deletes every stale entry in this namespace.
    ///
    /// Returns the number of entries removed. Undecodable entries are left alone.
    pub async fn sweep_expired(&self) -> Result<usize> {
        let now = self.clock.now_ms();
        let entries = self.store.get_by_prefix(self.namespace.prefix()).await?;

        let mut removed = 0;
        for (key, raw) in entries {
            let entry = match CacheEntry::from_value(&key, raw.clone()) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping sweep of '{}': {}", key, e);
                    continue;
                }
            };
            if entry.is_fresh(now) {
                continue;
            }

            match self.store.del_if(&key, &raw).await {
                Ok(true) => removed += 1,
                Ok(false) => debug!("'{}' was rewritten during sweep", key),
                Err(e) => {
                    self.stats.record_swept(removed as u64);
                    return Err(e.into());
                }
            }
        }

        self.stats.record_swept(removed as u64);
        Ok(removed)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

fn not_found(key: &str) -> ServiceError {
    ServiceError::NotFound(format!("No cached data found for '{}'", key))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::error::StorageError;
    use crate::kv::{MemoryKvStore, StoreResult};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Notify;

    const HOUR_MS: u64 = 3_600_000;

    #[derive(Debug)]
    struct OfflineStore;

    #[async_trait]
    impl KvStore for OfflineStore {
        async fn get(&self, _key: &str) -> StoreResult<Option<Value>> {
            Err(StorageError::Unavailable("offline".into()))
        }
        async fn set(&self, _key: &str, _value: Value) -> StoreResult<()> {
            Err(StorageError::Unavailable("offline".into()))
        }
        async fn del(&self, _key: &str) -> StoreResult<()> {
            Err(StorageError::Unavailable("offline".into()))
        }
        async fn del_if(&self, _key: &str, _expected: &Value) -> StoreResult<bool> {
            Err(StorageError::Unavailable("offline".into()))
        }
        async fn get_by_prefix(&self, _prefix: &str) -> StoreResult<Vec<(String, Value)>> {
            Err(StorageError::Unavailable("offline".into()))
        }
    }

    /// Memory store with hooks: pause a read between fetching and returning,
    /// or fail conditional deletes once a budget runs out.
    #[derive(Debug)]
    struct FaultyStore {
        inner: MemoryKvStore,
        pause_next_get: AtomicBool,
        read_done: Notify,
        resume: Notify,
        del_if_budget: AtomicUsize,
    }

    impl FaultyStore {
        fn new() -> Self {
            Self {
                inner: MemoryKvStore::new(),
                pause_next_get: AtomicBool::new(false),
                read_done: Notify::new(),
                resume: Notify::new(),
                del_if_budget: AtomicUsize::new(usize::MAX),
            }
        }
    }

    #[async_trait]
    impl KvStore for FaultyStore {
        async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
            let value = self.inner.get(key).await?;
            if self.pause_next_get.swap(false, Ordering::SeqCst) {
                self.read_done.notify_one();
                self.resume.notified().await;
            }
            Ok(value)
        }
        async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
            self.inner.set(key, value).await
        }
        async fn del(&self, key: &str) -> StoreResult<()> {
            self.inner.del(key).await
        }
        async fn del_if(&self, key: &str, expected: &Value) -> StoreResult<bool> {
            let budget = self.del_if_budget.load(Ordering::SeqCst);
            if budget == 0 {
                return Err(StorageError::Unavailable("delete rejected".into()));
            }
            self.del_if_budget.store(budget - 1, Ordering::SeqCst);
            self.inner.del_if(key, expected).await
        }
        async fn get_by_prefix(&self, prefix: &str) -> StoreResult<Vec<(String, Value)>> {
            self.inner.get_by_prefix(prefix).await
        }
    }

    fn market_cache() -> (TtlCache, Arc<ManualClock>, Arc<MemoryKvStore>) {
        let clock = Arc::new(ManualClock::new(0));
        let store = Arc::new(MemoryKvStore::new());
        let cache = TtlCache::market_trends(store.clone(), clock.clone(), HOUR_MS);
        (cache, clock, store)
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let (cache, _, _) = market_cache();

        cache.put("market_trends_tech", json!({"growth": 25})).await.unwrap();
        let value = cache.get("market_trends_tech").await.unwrap();

        assert_eq!(value, json!({"growth": 25}));
    }

    #[tokio::test]
    async fn test_get_never_written() {
        let (cache, _, _) = market_cache();

        let result = cache.get("market_trends_tech").await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
        assert_eq!(cache.stats().misses, 1);
    }

    #[tokio::test]
    async fn test_market_trends_scenario() {
        let (cache, clock, _) = market_cache();
        let key = "market_trends_technology";

        cache.put(key, json!({"growth": 25})).await.unwrap();

        clock.set(3_599_999);
        assert_eq!(cache.get(key).await.unwrap(), json!({"growth": 25}));

        clock.set(3_600_001);
        assert!(matches!(cache.get(key).await, Err(ServiceError::NotFound(_))));
        assert!(!cache.contains(key).await.unwrap());
    }

    #[tokio::test]
    async fn test_exact_ttl_boundary_is_fresh() {
        let (cache, clock, _) = market_cache();

        clock.set(500);
        cache.put("market_trends_a", json!(1)).await.unwrap();

        clock.set(500 + HOUR_MS);
        assert!(cache.get("market_trends_a").await.is_ok());
    }

    #[tokio::test]
    async fn test_expired_read_evicts_and_counts() {
        let (cache, clock, store) = market_cache();

        cache.put("market_trends_a", json!(1)).await.unwrap();
        assert!(cache.contains("market_trends_a").await.unwrap());

        clock.advance(HOUR_MS + 1);
        assert!(cache.get("market_trends_a").await.is_err());

        assert!(store.is_empty().await);
        let stats = cache.stats();
        assert_eq!(stats.expired, 1);
        assert_eq!(stats.misses, 0);
    }

    #[tokio::test]
    async fn test_stale_entry_persists_until_read() {
        let (cache, clock, _) = market_cache();

        cache.put("market_trends_a", json!(1)).await.unwrap();
        clock.advance(10 * HOUR_MS);

        assert!(cache.contains("market_trends_a").await.unwrap());
    }

    #[tokio::test]
    async fn test_overwrite_resets_timestamp() {
        let (cache, clock, _) = market_cache();

        cache.put("market_trends_a", json!("old")).await.unwrap();
        clock.advance(HOUR_MS - 10);
        cache.put("market_trends_a", json!("new")).await.unwrap();
        clock.advance(100);

        assert_eq!(cache.get("market_trends_a").await.unwrap(), json!("new"));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (cache, _, _) = market_cache();

        cache.put("market_trends_a", json!(1)).await.unwrap();
        assert!(cache.delete("market_trends_a").await.is_ok());
        assert!(cache.delete("market_trends_a").await.is_ok());
        assert!(cache.get("market_trends_a").await.is_err());
    }

    #[tokio::test]
    async fn test_corrupt_envelope_is_storage_error() {
        let (cache, _, store) = market_cache();

        store.set("market_trends_a", json!("not an envelope")).await.unwrap();
        let result = cache.get("market_trends_a").await;
        assert!(matches!(result, Err(ServiceError::Storage(StorageError::Corrupt { .. }))));
    }

    #[tokio::test]
    async fn test_storage_fault_is_not_not_found() {
        let cache = TtlCache::market_trends(
            Arc::new(OfflineStore),
            Arc::new(ManualClock::new(0)),
            HOUR_MS,
        );

        assert!(matches!(
            cache.put("market_trends_a", json!(1)).await,
            Err(ServiceError::Storage(_))
        ));
        assert!(matches!(
            cache.get("market_trends_a").await,
            Err(ServiceError::Storage(_))
        ));
        assert!(matches!(
            cache.delete("market_trends_a").await,
            Err(ServiceError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_sweep_expired() {
        let (cache, clock, store) = market_cache();

        cache.put("market_trends_old", json!(1)).await.unwrap();
        clock.advance(HOUR_MS);
        cache.put("market_trends_new", json!(2)).await.unwrap();
        store.set("student_analysis_1", json!({"timestamp": 0})).await.unwrap();
        clock.advance(1);

        let removed = cache.sweep_expired().await.unwrap();
        assert_eq!(removed, 1);
        assert!(!cache.contains("market_trends_old").await.unwrap());
        assert!(cache.contains("market_trends_new").await.unwrap());
        assert_eq!(store.len().await, 2);
        assert_eq!(cache.stats().swept, 1);
    }

    #[tokio::test]
    async fn test_stale_read_keeps_concurrent_write() {
        let clock = Arc::new(ManualClock::new(0));
        let store = Arc::new(FaultyStore::new());
        let cache = Arc::new(TtlCache::market_trends(store.clone(), clock.clone(), HOUR_MS));
        let key = "market_trends_technology";

        cache.put(key, json!({"growth": 10})).await.unwrap();
        clock.advance(HOUR_MS + 1);

        // The reader fetches the stale envelope, then waits before evicting.
        store.pause_next_get.store(true, Ordering::SeqCst);
        let reader = tokio::spawn({
            let cache = cache.clone();
            async move { cache.get(key).await }
        });
        store.read_done.notified().await;

        cache.put(key, json!({"growth": 25})).await.unwrap();
        store.resume.notify_one();

        let stale_read = reader.await.unwrap();
        assert!(matches!(stale_read, Err(ServiceError::NotFound(_))));
        assert_eq!(cache.get(key).await.unwrap(), json!({"growth": 25}));
        assert_eq!(cache.stats().expired, 1);
    }

    #[tokio::test]
    async fn test_failed_eviction_is_storage_error() {
        let clock = Arc::new(ManualClock::new(0));
        let store = Arc::new(FaultyStore::new());
        store.del_if_budget.store(0, Ordering::SeqCst);
        let cache = TtlCache::market_trends(store.clone(), clock.clone(), HOUR_MS);

        cache.put("market_trends_a", json!(1)).await.unwrap();
        clock.advance(HOUR_MS + 1);

        let result = cache.get("market_trends_a").await;
        assert!(matches!(result, Err(ServiceError::Storage(_))));
        assert!(cache.contains("market_trends_a").await.unwrap());
    }

    #[tokio::test]
    async fn test_sweep_counts_removals_before_failure() {
        let clock = Arc::new(ManualClock::new(0));
        let store = Arc::new(FaultyStore::new());
        let cache = TtlCache::market_trends(store.clone(), clock.clone(), HOUR_MS);

        cache.put("market_trends_a", json!(1)).await.unwrap();
        cache.put("market_trends_b", json!(2)).await.unwrap();
        clock.advance(HOUR_MS + 1);
        store.del_if_budget.store(1, Ordering::SeqCst);

        assert!(matches!(cache.sweep_expired().await, Err(ServiceError::Storage(_))));
        assert_eq!(cache.stats().swept, 1);
    }

    #[tokio::test]
    async fn test_key_for() {
        let (cache, _, _) = market_cache();
        assert_eq!(cache.key_for("finance").unwrap(), "market_trends_finance");
        assert!(cache.key_for("").is_err());
    }
}
