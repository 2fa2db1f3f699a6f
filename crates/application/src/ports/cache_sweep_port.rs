use async_trait::async_trait;

/// Outcome of one sweep over the address cache.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheSweepOutcome {
    pub entries_removed: usize,
    pub cache_size: usize,
}

/// Port for proactively reaping expired cache entries.
#[async_trait]
pub trait CacheSweepPort: Send + Sync {
    async fn run_sweep_cycle(&self) -> CacheSweepOutcome;
}
