use super::cache_layer::ResolverCache;
use super::query_client::QueryClient;
use crate::dns::cache::AddressCache;
use crate::dns::transport::DnsTransport;
use resolvercache_application::ports::HostResolver;
use resolvercache_domain::{ConfigError, ResolverOptions};
use resolvercache_jobs::CacheSweepJob;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Wires a [`QueryClient`] and an [`AddressCache`] into a [`ResolverCache`].
///
/// Options are validated before anything is built, including when a host
/// resolver is supplied directly.
pub struct ResolverBuilder {
    options: ResolverOptions,
    transports: Option<Vec<Arc<dyn DnsTransport>>>,
    resolver: Option<Arc<dyn HostResolver>>,
}

impl ResolverBuilder {
    pub fn new(options: ResolverOptions) -> Self {
        Self {
            options,
            transports: None,
            resolver: None,
        }
    }

    /// Replaces the transports derived from `options.nameservers`.
    pub fn with_transports(mut self, transports: Vec<Arc<dyn DnsTransport>>) -> Self {
        self.transports = Some(transports);
        self
    }

    /// Bypasses the query client entirely.
    pub fn with_host_resolver(mut self, resolver: Arc<dyn HostResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn build(self) -> Result<Arc<ResolverCache>, ConfigError> {
        self.options.validate()?;

        let resolver: Arc<dyn HostResolver> = match (self.resolver, self.transports) {
            (Some(resolver), _) => resolver,
            (None, Some(transports)) => Arc::new(QueryClient::with_transports(
                transports,
                self.options.max_retries,
                self.options.query_timeout(),
            )?),
            (None, None) => Arc::new(QueryClient::from_options(&self.options)?),
        };

        let cache = Arc::new(AddressCache::new(self.options.cache_capacity)?);

        info!(
            capacity = self.options.cache_capacity,
            default_expiration_secs = self.options.default_expiration_secs,
            "Resolver cache built"
        );

        Ok(Arc::new(ResolverCache::new(
            resolver,
            cache,
            self.options.default_expiration_secs,
        )))
    }

    /// Builds the resolver and spawns a [`CacheSweepJob`] over its cache,
    /// ticking every `sweep_interval_secs` until `shutdown` is cancelled.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn build_with_sweep(
        self,
        shutdown: CancellationToken,
    ) -> Result<(Arc<ResolverCache>, JoinHandle<()>), ConfigError> {
        let interval = self.options.sweep_interval();
        let resolver = self.build()?;

        let sweep = Arc::new(
            CacheSweepJob::new(resolver.cache().clone())
                .with_interval(interval)
                .with_cancellation(shutdown),
        );

        Ok((resolver, sweep.start()))
    }
}
