use async_trait::async_trait;
use resolvercache_domain::{ResolutionResult, ResolveError};
use tokio_util::sync::CancellationToken;

/// Issues one address-record resolution against the network.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve(
        &self,
        hostname: &str,
        cancel: &CancellationToken,
    ) -> Result<ResolutionResult, ResolveError>;
}
