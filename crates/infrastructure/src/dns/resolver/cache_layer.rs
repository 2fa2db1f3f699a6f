use crate::dns::cache::AddressCache;
use async_trait::async_trait;
use dashmap::DashMap;
use resolvercache_application::ports::{AddressLookup, HostResolver};
use resolvercache_domain::{literal_ip, ResolveError};
use rustc_hash::FxBuildHasher;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

type FlightOutcome = Result<Arc<Vec<IpAddr>>, ResolveError>;

type InflightSender = Arc<watch::Sender<Option<Arc<FlightOutcome>>>>;

type InflightMap = DashMap<String, InflightSender, FxBuildHasher>;

enum Flight {
    Leader(InflightSender),
    Follower(watch::Receiver<Option<Arc<FlightOutcome>>>),
}

/// Owns one leader's registration. Only that registration is ever removed,
/// so a successor leader for the same hostname is left alone.
///
/// Releases waiters with `None` if the leader never publishes an outcome
/// (its future was dropped, or its caller cancelled).
struct InflightLeaderGuard {
    inflight: Arc<InflightMap>,
    hostname: String,
    sender: InflightSender,
    published: bool,
}

impl InflightLeaderGuard {
    fn unregister(&self) -> bool {
        self.inflight
            .remove_if(&self.hostname, |_, tx| Arc::ptr_eq(tx, &self.sender))
            .is_some()
    }

    fn publish(mut self, outcome: &FlightOutcome) {
        self.published = true;
        if self.unregister() {
            let _ = self.sender.send(Some(Arc::new(outcome.clone())));
        }
    }
}

impl Drop for InflightLeaderGuard {
    fn drop(&mut self) {
        if !self.published && self.unregister() {
            let _ = self.sender.send(None);
        }
    }
}

/// TTL-respecting lookup cache in front of a [`HostResolver`].
///
/// Concurrent misses for the same hostname are coalesced: the first caller
/// queries the network, the others wait for its outcome, success or error.
/// Failures are never cached.
pub struct ResolverCache {
    resolver: Arc<dyn HostResolver>,
    cache: Arc<AddressCache>,
    default_expiration_secs: u32,
    inflight: Arc<InflightMap>,
}

impl ResolverCache {
    pub fn new(
        resolver: Arc<dyn HostResolver>,
        cache: Arc<AddressCache>,
        default_expiration_secs: u32,
    ) -> Self {
        Self {
            resolver,
            cache,
            default_expiration_secs,
            inflight: Arc::new(DashMap::with_hasher(FxBuildHasher)),
        }
    }

    pub fn cache(&self) -> &Arc<AddressCache> {
        &self.cache
    }

    /// Cached lookup. Literal IPs are returned as-is.
    pub async fn lookup(&self, hostname: &str) -> Result<Arc<Vec<IpAddr>>, ResolveError> {
        self.lookup_with_cancel(hostname, &CancellationToken::new())
            .await
    }

    /// Always queries the network; the cache is neither read nor written.
    pub async fn lookup_uncached(
        &self,
        hostname: &str,
    ) -> Result<Arc<Vec<IpAddr>>, ResolveError> {
        self.lookup_uncached_with_cancel(hostname, &CancellationToken::new())
            .await
    }

    pub async fn lookup_with_cancel(
        &self,
        hostname: &str,
        cancel: &CancellationToken,
    ) -> Result<Arc<Vec<IpAddr>>, ResolveError> {
        if let Some(ip) = literal_ip(hostname) {
            return Ok(Arc::new(vec![ip]));
        }

        loop {
            if let Some(addresses) = self.cache.get(hostname) {
                debug!(hostname = %hostname, "Cache HIT");
                return Ok(addresses);
            }

            match self.register_or_join_inflight(hostname) {
                Flight::Leader(sender) => {
                    return self.resolve_as_leader(hostname, sender, cancel).await
                }
                Flight::Follower(rx) => {
                    if let Some(outcome) = Self::wait_for_leader(rx, cancel).await? {
                        return outcome;
                    }
                    debug!(hostname = %hostname, "In-flight leader abandoned, retrying");
                }
            }
        }
    }

    pub async fn lookup_uncached_with_cancel(
        &self,
        hostname: &str,
        cancel: &CancellationToken,
    ) -> Result<Arc<Vec<IpAddr>>, ResolveError> {
        if let Some(ip) = literal_ip(hostname) {
            return Ok(Arc::new(vec![ip]));
        }

        let resolution = self.resolver.resolve(hostname, cancel).await?;
        Ok(Arc::new(resolution.addresses))
    }

    fn register_or_join_inflight(&self, hostname: &str) -> Flight {
        match self.inflight.entry(hostname.to_string()) {
            dashmap::Entry::Occupied(e) => {
                let rx = e.get().subscribe();
                drop(e);
                Flight::Follower(rx)
            }
            dashmap::Entry::Vacant(e) => {
                let (tx, _rx) = watch::channel(None::<Arc<FlightOutcome>>);
                let sender = Arc::new(tx);
                e.insert(Arc::clone(&sender));
                Flight::Leader(sender)
            }
        }
    }

    /// `Ok(None)` means the leader went away without an outcome.
    async fn wait_for_leader(
        mut rx: watch::Receiver<Option<Arc<FlightOutcome>>>,
        cancel: &CancellationToken,
    ) -> Result<Option<FlightOutcome>, ResolveError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ResolveError::Cancelled),
            // An error here only means the sender is gone; the value is read below either way.
            _ = rx.changed() => {}
        }

        let outcome = rx.borrow().clone();
        Ok(outcome.map(|outcome| (*outcome).clone()))
    }

    async fn resolve_as_leader(
        &self,
        hostname: &str,
        sender: InflightSender,
        cancel: &CancellationToken,
    ) -> FlightOutcome {
        debug!(hostname = %hostname, "Cache MISS");

        let guard = InflightLeaderGuard {
            inflight: Arc::clone(&self.inflight),
            hostname: hostname.to_string(),
            sender,
            published: false,
        };

        let outcome = match self.resolver.resolve(hostname, cancel).await {
            Ok(resolution) => {
                let ttl = resolution.effective_ttl(self.default_expiration_secs);
                let addresses = Arc::new(resolution.addresses);
                self.cache.insert(hostname, Arc::clone(&addresses), ttl);
                Ok(addresses)
            }
            Err(e) => {
                debug!(hostname = %hostname, error = %e, "Resolution failed, not cached");
                Err(e)
            }
        };

        // Cancellation is this caller's alone; dropping the guard lets waiters retry.
        if !matches!(outcome, Err(ResolveError::Cancelled)) {
            guard.publish(&outcome);
        }

        outcome
    }
}

#[async_trait]
impl AddressLookup for ResolverCache {
    async fn lookup(
        &self,
        hostname: &str,
        cancel: &CancellationToken,
    ) -> Result<Arc<Vec<IpAddr>>, ResolveError> {
        self.lookup_with_cancel(hostname, cancel).await
    }

    async fn lookup_uncached(
        &self,
        hostname: &str,
        cancel: &CancellationToken,
    ) -> Result<Arc<Vec<IpAddr>>, ResolveError> {
        self.lookup_uncached_with_cancel(hostname, cancel).await
    }
}
