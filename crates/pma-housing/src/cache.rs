//! Content-addressed statistics cache using moka
//!
//! Memoizes [`HousingStatistics`] by [`CacheKey`]. Concurrent lookups of the
//! same absent key are coalesced so only one computation runs; lookups of
//! different keys never wait on each other.

use crate::digest::CacheKey;
use crate::error::HousingError;
use crate::stats::HousingStatistics;
use moka::future::Cache;
use moka::policy::EvictionPolicy;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default maximum number of cached entries
pub const DEFAULT_CACHE_CAPACITY: u64 = 500;

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries in cache (eventually consistent)
    pub entry_count: u64,
    /// Total lookups
    pub lookups: u64,
    /// Lookups that ran a computation
    pub computations: u64,
}

impl CacheStats {
    /// Lookups answered without computing
    #[inline]
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.lookups.saturating_sub(self.computations)
    }
}

#[derive(Debug, Default)]
struct Counters {
    lookups: AtomicU64,
    computations: AtomicU64,
}

/// Statistics cache keyed by dataset content
///
/// Entries are stored behind `Arc`, so a reader either sees a complete value
/// or none at all. Eviction is least-recently-used beyond `max_capacity`.
#[derive(Debug, Clone)]
pub struct StatsCache {
    inner: Cache<CacheKey, Arc<HousingStatistics>>,
    counters: Arc<Counters>,
}

impl StatsCache {
    /// Create new cache with max capacity
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .eviction_policy(EvictionPolicy::lru())
                .build(),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Get cached statistics or compute them
    ///
    /// Only one `compute` runs per key at a time; other callers for the same
    /// key wait and receive its outcome. A failed computation stores nothing
    /// and its error goes to every waiter. Values computed under
    /// [`CacheKey::KeyError`] are handed out but not retained.
    ///
    /// # Errors
    /// Whatever `compute` fails with.
    pub async fn get_or_try_compute<F, Fut>(
        &self,
        key: CacheKey,
        compute: F,
    ) -> Result<Arc<HousingStatistics>, HousingError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<HousingStatistics, HousingError>>,
    {
        self.counters.lookups.fetch_add(1, Ordering::Relaxed);
        let computations = &self.counters.computations;

        let result = self
            .inner
            .try_get_with(key, async move {
                computations.fetch_add(1, Ordering::Relaxed);
                tracing::info!(%key, "computing housing statistics");
                compute().await.map(Arc::new)
            })
            .await
            .map_err(|err| (*err).clone());

        // A KeyError lookup landing between the insert above and this
        // invalidation is served the value just computed from a fresh read.
        // No older value can be returned from this slot.
        if key == CacheKey::KeyError {
            self.inner.invalidate(&key).await;
        }

        result
    }

    /// Insert statistics under `key`
    #[inline]
    pub async fn insert(&self, key: CacheKey, stats: HousingStatistics) {
        self.inner.insert(key, Arc::new(stats)).await;
    }

    /// Get cached statistics
    #[inline]
    #[must_use]
    pub async fn get(&self, key: &CacheKey) -> Option<Arc<HousingStatistics>> {
        self.inner.get(key).await
    }

    /// Check if cache holds `key`
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.inner.contains_key(key)
    }

    /// Invalidate all entries
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Apply pending evictions and bookkeeping
    #[inline]
    pub async fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks().await;
    }

    /// Get approximate entry count
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.inner.entry_count(),
            lookups: self.counters.lookups.load(Ordering::Relaxed),
            computations: self.counters.computations.load(Ordering::Relaxed),
        }
    }
}

impl Default for StatsCache {
    /// Create cache with default capacity (500 entries)
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DatasetDigest;
    use std::sync::atomic::AtomicUsize;

    fn stats_with_count(count: usize) -> HousingStatistics {
        HousingStatistics {
            count,
            ..HousingStatistics::empty()
        }
    }

    fn digest_key(data: &[u8]) -> CacheKey {
        CacheKey::Digest(DatasetDigest::compute(data))
    }

    #[tokio::test]
    async fn cache_insert_and_get() {
        let cache = StatsCache::new(100);
        let key = digest_key(b"dataset");

        cache.insert(key, stats_with_count(3)).await;

        let retrieved = cache.get(&key).await;
        assert_eq!(retrieved.unwrap().count, 3);
        assert!(cache.contains(&key));
    }

    #[tokio::test]
    async fn cache_returns_none_for_missing() {
        let cache = StatsCache::new(100);
        assert!(cache.get(&digest_key(b"missing")).await.is_none());
    }

    #[tokio::test]
    async fn cache_get_or_try_compute() {
        let cache = StatsCache::new(100);
        let key = digest_key(b"compute me");
        let call_count = Arc::new(AtomicUsize::new(0));

        let calls = call_count.clone();
        let first = cache
            .get_or_try_compute(key, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(stats_with_count(7))
            })
            .await
            .unwrap();
        assert_eq!(first.count, 7);

        // Second call should use cache
        let second = cache
            .get_or_try_compute(key, || async {
                call_count.fetch_add(1, Ordering::SeqCst);
                unreachable!("should use cached value")
            })
            .await
            .unwrap();

        assert_eq!(second.count, 7);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);

        let stats = cache.stats();
        assert_eq!(stats.lookups, 2);
        assert_eq!(stats.computations, 1);
        assert_eq!(stats.hits(), 1);
    }

    #[tokio::test]
    async fn failed_compute_is_not_stored() {
        let cache = StatsCache::new(100);
        let key = digest_key(b"bad");

        let err = cache
            .get_or_try_compute(key, || async {
                Err(HousingError::data_format(2, "price", "abc", "invalid digit"))
            })
            .await
            .unwrap_err();
        assert!(err.is_format());
        assert!(!cache.contains(&key));

        let ok = cache
            .get_or_try_compute(key, || async { Ok(stats_with_count(1)) })
            .await
            .unwrap();
        assert_eq!(ok.count, 1);
    }

    #[tokio::test]
    async fn key_error_slot_is_not_retained() {
        let cache = StatsCache::new(100);

        let stats = cache
            .get_or_try_compute(CacheKey::KeyError, || async { Ok(stats_with_count(4)) })
            .await
            .unwrap();
        assert_eq!(stats.count, 4);
        assert!(cache.get(&CacheKey::KeyError).await.is_none());

        let again = cache
            .get_or_try_compute(CacheKey::KeyError, || async { Ok(stats_with_count(5)) })
            .await
            .unwrap();
        assert_eq!(again.count, 5);
    }

    #[tokio::test]
    async fn distinct_keys_hold_distinct_values() {
        let cache = StatsCache::new(100);
        let old = digest_key(b"v1");
        let new = digest_key(b"v2");

        cache.insert(old, stats_with_count(1)).await;
        let fresh = cache
            .get_or_try_compute(new, || async { Ok(stats_with_count(2)) })
            .await
            .unwrap();

        assert_eq!(fresh.count, 2);
        assert_eq!(cache.get(&old).await.unwrap().count, 1);
    }

    #[tokio::test]
    async fn capacity_is_enforced() {
        let cache = StatsCache::new(2);

        for i in 0..10u8 {
            cache.insert(digest_key(&[i]), stats_with_count(usize::from(i))).await;
        }
        cache.run_pending_tasks().await;

        assert!(cache.entry_count() <= 2);
    }

    #[tokio::test]
    async fn least_recently_used_entry_is_evicted() {
        let cache = StatsCache::new(2);
        let a = digest_key(b"a");
        let b = digest_key(b"b");
        let c = digest_key(b"c");

        cache.insert(a, stats_with_count(1)).await;
        cache.insert(b, stats_with_count(2)).await;
        assert!(cache.get(&a).await.is_some());
        cache.insert(c, stats_with_count(3)).await;
        cache.run_pending_tasks().await;

        assert!(cache.contains(&a));
        assert!(!cache.contains(&b));
        assert!(cache.contains(&c));
    }

    #[tokio::test]
    async fn invalidate_all_clears_entries() {
        let cache = StatsCache::new(10);
        let key = digest_key(b"dataset");
        cache.insert(key, stats_with_count(1)).await;

        cache.invalidate_all();
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn cache_default_capacity() {
        let cache = StatsCache::default();
        let key = digest_key(b"dataset");

        cache.insert(key, stats_with_count(1)).await;
        assert!(cache.get(&key).await.is_some());
    }
}
