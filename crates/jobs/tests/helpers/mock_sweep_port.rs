use async_trait::async_trait;
use resolvercache_application::ports::{CacheSweepOutcome, CacheSweepPort};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub struct MockCacheSweepPort {
    sweep_call_count: Arc<AtomicU64>,
    outcome: Mutex<CacheSweepOutcome>,
}

impl MockCacheSweepPort {
    pub fn new() -> Self {
        Self {
            sweep_call_count: Arc::new(AtomicU64::new(0)),
            outcome: Mutex::new(CacheSweepOutcome::default()),
        }
    }

    pub fn with_outcome(self, outcome: CacheSweepOutcome) -> Self {
        *self.outcome.lock().unwrap() = outcome;
        self
    }

    pub fn sweep_call_count(&self) -> u64 {
        self.sweep_call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CacheSweepPort for MockCacheSweepPort {
    async fn run_sweep_cycle(&self) -> CacheSweepOutcome {
        self.sweep_call_count.fetch_add(1, Ordering::Relaxed);
        self.outcome.lock().unwrap().clone()
    }
}
