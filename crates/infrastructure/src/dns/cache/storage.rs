use super::metrics::{CacheMetrics, CacheMetricsSnapshot};
use super::record::CachedAddresses;
use lru::LruCache;
use resolvercache_domain::ConfigError;
use rustc_hash::FxBuildHasher;
use std::net::IpAddr;
use std::num::NonZeroUsize;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;
use tracing::{debug, info};

type Entries = LruCache<String, CachedAddresses, FxBuildHasher>;

/// Hostname → address list store, bounded by entry count.
///
/// Recency is updated on every successful `get`; inserting past capacity
/// evicts the least recently used hostname whatever its remaining TTL.
/// Expired entries are dropped when read and by [`AddressCache::purge_expired`].
pub struct AddressCache {
    entries: Mutex<Entries>,
    capacity: NonZeroUsize,
    metrics: Arc<CacheMetrics>,
}

impl AddressCache {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            ConfigError::Validation("cache_capacity must be at least 1".to_string())
        })?;

        info!(capacity = capacity.get(), "Initializing address cache");

        Ok(Self {
            entries: Mutex::new(LruCache::with_hasher(capacity, FxBuildHasher)),
            capacity,
            metrics: Arc::new(CacheMetrics::default()),
        })
    }

    // The map is left consistent by every critical section, so a poisoned
    // lock is still safe to use.
    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn contains(&self, hostname: &str) -> bool {
        let now = Instant::now();
        self.entries()
            .peek(hostname)
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    pub fn get(&self, hostname: &str) -> Option<Arc<Vec<IpAddr>>> {
        let now = Instant::now();
        let mut entries = self.entries();

        match entries.get(hostname) {
            Some(entry) if !entry.is_expired_at(now) => {
                self.metrics.hits.fetch_add(1, AtomicOrdering::Relaxed);
                return Some(Arc::clone(&entry.addresses));
            }
            Some(_) => {}
            None => {
                self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
                return None;
            }
        }

        entries.pop(hostname);
        drop(entries);

        self.metrics.expirations.fetch_add(1, AtomicOrdering::Relaxed);
        self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
        debug!(hostname = %hostname, "Cache entry expired");
        None
    }

    /// Stores `addresses` under `hostname` for `ttl` seconds, replacing any
    /// previous entry for the same hostname.
    pub fn insert(&self, hostname: &str, addresses: Arc<Vec<IpAddr>>, ttl: u32) {
        let record = CachedAddresses::new(addresses, ttl, Instant::now());

        let displaced = self.entries().push(hostname.to_string(), record);
        self.metrics.insertions.fetch_add(1, AtomicOrdering::Relaxed);

        if let Some((evicted, _)) = displaced.filter(|(key, _)| key != hostname) {
            self.metrics.evictions.fetch_add(1, AtomicOrdering::Relaxed);
            debug!(evicted = %evicted, "Evicted least recently used entry");
        }

        debug!(hostname = %hostname, ttl, "Inserted addresses into cache");
    }

    pub fn remove(&self, hostname: &str) -> bool {
        self.entries().pop(hostname).is_some()
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries();

        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(hostname, _)| hostname.clone())
            .collect();

        for hostname in &expired {
            entries.pop(hostname.as_str());
        }
        drop(entries);

        if !expired.is_empty() {
            self.metrics
                .expirations
                .fetch_add(expired.len() as u64, AtomicOrdering::Relaxed);
        }
        expired.len()
    }

    pub fn clear(&self) {
        self.entries().clear();
        self.metrics.reset();
        info!("Address cache cleared");
    }

    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.len())
    }
}
