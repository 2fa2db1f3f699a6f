mod address_lookup;
mod cache_sweep_port;
mod host_resolver;

pub use address_lookup::AddressLookup;
pub use cache_sweep_port::{CacheSweepOutcome, CacheSweepPort};
pub use host_resolver::HostResolver;

// Re-export for convenience
pub use resolvercache_domain::{ResolutionResult, ResolveError};
pub use tokio_util::sync::CancellationToken;
