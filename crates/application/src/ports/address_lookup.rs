use async_trait::async_trait;
use resolvercache_domain::ResolveError;
use std::net::IpAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Hostname to address-list lookup consumed by the connection layer.
///
/// Both methods return `[ip]` for literal IP input without touching the
/// network. An empty list is a successful lookup with no usable address.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(
        &self,
        hostname: &str,
        cancel: &CancellationToken,
    ) -> Result<Arc<Vec<IpAddr>>, ResolveError>;

    async fn lookup_uncached(
        &self,
        hostname: &str,
        cancel: &CancellationToken,
    ) -> Result<Arc<Vec<IpAddr>>, ResolveError>;
}
