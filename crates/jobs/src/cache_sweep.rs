use resolvercache_application::ports::CacheSweepPort;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

/// Periodically drops expired entries from the address cache.
pub struct CacheSweepJob {
    sweeper: Arc<dyn CacheSweepPort>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl CacheSweepJob {
    pub fn new(sweeper: Arc<dyn CacheSweepPort>) -> Self {
        Self {
            sweeper,
            interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Spawns the sweep loop. The first sweep runs one interval after start.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting cache sweep job"
        );

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CacheSweepJob: shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        let outcome = self.sweeper.run_sweep_cycle().await;
                        if outcome.entries_removed > 0 {
                            info!(
                                entries_removed = outcome.entries_removed,
                                cache_size = outcome.cache_size,
                                "Cache sweep cycle completed"
                            );
                        } else {
                            debug!(cache_size = outcome.cache_size, "Cache sweep found nothing to remove");
                        }
                    }
                }
            }
        })
    }
}
