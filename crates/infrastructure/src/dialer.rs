use resolvercache_application::ports::AddressLookup;
use resolvercache_domain::{split_host_port, DialError, ResolverOptions};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Whether the dialer resolves through the cache or straight to the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupMode {
    #[default]
    Cached,
    Uncached,
}

/// Opens TCP connections to `host:port` targets, resolving `host` first.
pub struct Dialer {
    lookup: Arc<dyn AddressLookup>,
    mode: LookupMode,
    connect_timeout: Duration,
}

impl Dialer {
    pub fn new(lookup: Arc<dyn AddressLookup>, mode: LookupMode, connect_timeout: Duration) -> Self {
        Self {
            lookup,
            mode,
            connect_timeout,
        }
    }

    /// Uses the configured `dial_timeout_ms` as the per-address connect timeout.
    pub fn from_options(
        lookup: Arc<dyn AddressLookup>,
        mode: LookupMode,
        options: &ResolverOptions,
    ) -> Self {
        Self::new(lookup, mode, options.dial_timeout())
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub async fn dial(&self, address: &str) -> Result<TcpStream, DialError> {
        self.dial_with_cancel(address, &CancellationToken::new())
            .await
    }

    /// Tries each resolved address in order; the first connection that
    /// succeeds within the connect timeout wins.
    pub async fn dial_with_cancel(
        &self,
        address: &str,
        cancel: &CancellationToken,
    ) -> Result<TcpStream, DialError> {
        let (host, port) =
            split_host_port(address).ok_or_else(|| DialError::InvalidAddress(address.to_string()))?;

        let addresses = match self.mode {
            LookupMode::Cached => self.lookup.lookup(host, cancel).await?,
            LookupMode::Uncached => self.lookup.lookup_uncached(host, cancel).await?,
        };

        if addresses.is_empty() {
            return Err(DialError::NoAddressFound {
                host: host.to_string(),
            });
        }

        let mut last_error = String::new();

        for ip in addresses.iter() {
            let target = SocketAddr::new(*ip, port);

            let attempt = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(DialError::Cancelled),
                attempt = tokio::time::timeout(self.connect_timeout, TcpStream::connect(target)) => attempt,
            };

            match attempt {
                Ok(Ok(stream)) => {
                    debug!(host = %host, target = %target, "Connected");
                    return Ok(stream);
                }
                Ok(Err(e)) => {
                    debug!(host = %host, target = %target, error = %e, "Connect failed");
                    last_error = e.to_string();
                }
                Err(_) => {
                    debug!(host = %host, target = %target, "Connect timed out");
                    last_error = format!("connect to {} timed out", target);
                }
            }
        }

        Err(DialError::AllAddressesFailed {
            host: host.to_string(),
            attempted: addresses.len(),
            last_error,
        })
    }
}
