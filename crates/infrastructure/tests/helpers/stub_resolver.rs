use async_trait::async_trait;
use resolvercache_application::ports::HostResolver;
use resolvercache_domain::{ResolutionResult, ResolveError};
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Host resolver returning a fixed, swappable outcome after an optional delay.
pub struct StubResolver {
    outcome: Mutex<Result<ResolutionResult, ResolveError>>,
    delay: Duration,
    calls: AtomicU64,
    hostnames: Mutex<Vec<String>>,
}

impl StubResolver {
    pub fn new(outcome: Result<ResolutionResult, ResolveError>) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            delay: Duration::ZERO,
            calls: AtomicU64::new(0),
            hostnames: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(addresses: &[&str], ttl: u32) -> Self {
        let addresses = addresses
            .iter()
            .map(|a| a.parse::<IpAddr>().unwrap())
            .collect();
        Self::new(Ok(ResolutionResult::new(addresses, ttl)))
    }

    pub fn failing(error: ResolveError) -> Self {
        Self::new(Err(error))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_outcome(&self, outcome: Result<ResolutionResult, ResolveError>) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn hostnames(&self) -> Vec<String> {
        self.hostnames.lock().unwrap().clone()
    }
}

#[async_trait]
impl HostResolver for StubResolver {
    async fn resolve(
        &self,
        hostname: &str,
        cancel: &CancellationToken,
    ) -> Result<ResolutionResult, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.hostnames.lock().unwrap().push(hostname.to_string());

        if !self.delay.is_zero() {
            tokio::select! {
                _ = cancel.cancelled() => return Err(ResolveError::Cancelled),
                _ = tokio::time::sleep(self.delay) => {}
            }
        }

        self.outcome.lock().unwrap().clone()
    }
}
