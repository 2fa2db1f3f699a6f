use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

#[derive(Default, Debug)]
pub struct CacheMetrics {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub insertions: AtomicU64,
    /// Entries dropped to stay within capacity.
    pub evictions: AtomicU64,
    /// Entries dropped because their TTL ran out (on access or by the sweep).
    pub expirations: AtomicU64,
}

/// Point-in-time copy of [`CacheMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CacheMetricsSnapshot {
    pub total_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub insertions: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub hit_rate: f64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(AtomicOrdering::Relaxed) as f64;
        let total = hits + self.misses.load(AtomicOrdering::Relaxed) as f64;

        if total > 0.0 {
            (hits / total) * 100.0
        } else {
            0.0
        }
    }

    pub fn snapshot(&self, total_entries: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            total_entries,
            hits: self.hits.load(AtomicOrdering::Relaxed),
            misses: self.misses.load(AtomicOrdering::Relaxed),
            insertions: self.insertions.load(AtomicOrdering::Relaxed),
            evictions: self.evictions.load(AtomicOrdering::Relaxed),
            expirations: self.expirations.load(AtomicOrdering::Relaxed),
            hit_rate: self.hit_rate(),
        }
    }

    pub(crate) fn reset(&self) {
        self.hits.store(0, AtomicOrdering::Relaxed);
        self.misses.store(0, AtomicOrdering::Relaxed);
        self.insertions.store(0, AtomicOrdering::Relaxed);
        self.evictions.store(0, AtomicOrdering::Relaxed);
        self.expirations.store(0, AtomicOrdering::Relaxed);
    }
}
