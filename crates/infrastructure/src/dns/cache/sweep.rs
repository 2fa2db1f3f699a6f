use super::storage::AddressCache;
use async_trait::async_trait;
use resolvercache_application::ports::{CacheSweepOutcome, CacheSweepPort};
use tracing::debug;

#[async_trait]
impl CacheSweepPort for AddressCache {
    async fn run_sweep_cycle(&self) -> CacheSweepOutcome {
        let entries_removed = self.purge_expired();
        let cache_size = self.len();

        debug!(entries_removed, cache_size, "Address cache sweep finished");

        CacheSweepOutcome {
            entries_removed,
            cache_size,
        }
    }
}
