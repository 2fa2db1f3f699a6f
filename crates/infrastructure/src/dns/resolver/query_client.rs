use crate::dns::forwarding::{DnsResponse, MessageBuilder, ResponseParser};
use crate::dns::transport::tcp::TcpTransport;
use crate::dns::transport::{create_transport, DnsTransport};
use async_trait::async_trait;
use hickory_proto::op::ResponseCode;
use resolvercache_application::ports::HostResolver;
use resolvercache_domain::{
    ConfigError, NameserverAddr, NameserverProtocol, ResolutionResult, ResolveError,
    ResolverOptions, TransportError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// One pool member: its primary transport and, for UDP endpoints, the TCP
/// transport used when an answer comes back truncated.
pub struct Nameserver {
    transport: Arc<dyn DnsTransport>,
    tcp_fallback: Option<Arc<dyn DnsTransport>>,
}

impl Nameserver {
    pub fn new(transport: Arc<dyn DnsTransport>) -> Self {
        Self {
            transport,
            tcp_fallback: None,
        }
    }

    pub fn with_tcp_fallback(mut self, transport: Arc<dyn DnsTransport>) -> Self {
        self.tcp_fallback = Some(transport);
        self
    }

    pub fn from_addr(addr: &NameserverAddr) -> Self {
        let nameserver = Self::new(create_transport(addr));
        match addr.protocol {
            NameserverProtocol::Udp => {
                nameserver.with_tcp_fallback(Arc::new(TcpTransport::new(addr.addr)))
            }
            NameserverProtocol::Tcp => nameserver,
        }
    }
}

/// Sends address-record queries to a fixed pool of nameservers.
///
/// Each `resolve` call takes the next nameserver in round-robin order and
/// sticks to it for all of its attempts. Transport failures are retried up
/// to `max_retries` attempts in total; a non-success rcode ends the call
/// immediately.
pub struct QueryClient {
    nameservers: Vec<Nameserver>,
    counter: AtomicUsize,
    max_retries: u32,
    query_timeout: Duration,
}

impl QueryClient {
    pub fn from_options(options: &ResolverOptions) -> Result<Self, ConfigError> {
        options.validate()?;

        let nameservers = options
            .nameserver_addrs()?
            .iter()
            .map(Nameserver::from_addr)
            .collect();

        Self::with_nameservers(nameservers, options.max_retries, options.query_timeout())
    }

    /// Pool of plain transports without truncation fallback.
    pub fn with_transports(
        transports: Vec<Arc<dyn DnsTransport>>,
        max_retries: u32,
        query_timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let nameservers = transports.into_iter().map(Nameserver::new).collect();
        Self::with_nameservers(nameservers, max_retries, query_timeout)
    }

    pub fn with_nameservers(
        nameservers: Vec<Nameserver>,
        max_retries: u32,
        query_timeout: Duration,
    ) -> Result<Self, ConfigError> {
        if nameservers.is_empty() {
            return Err(ConfigError::EmptyNameserverPool);
        }
        if max_retries == 0 {
            return Err(ConfigError::Validation(
                "max_retries must be at least 1".to_string(),
            ));
        }

        info!(
            nameservers = nameservers.len(),
            max_retries,
            timeout_ms = query_timeout.as_millis() as u64,
            "Query client created"
        );

        Ok(Self {
            nameservers,
            counter: AtomicUsize::new(0),
            max_retries,
            query_timeout,
        })
    }

    pub fn nameserver_count(&self) -> usize {
        self.nameservers.len()
    }

    fn next_nameserver(&self) -> &Nameserver {
        let index = self.counter.fetch_add(1, Ordering::Relaxed) % self.nameservers.len();
        &self.nameservers[index]
    }

    async fn exchange(
        transport: &Arc<dyn DnsTransport>,
        query_bytes: &[u8],
        timeout: Duration,
    ) -> Result<DnsResponse, TransportError> {
        let response = transport.send(query_bytes, timeout).await?;
        ResponseParser::parse(&response.bytes).map_err(|message| {
            TransportError::MalformedResponse {
                server: transport.server(),
                message,
            }
        })
    }

    async fn attempt(
        nameserver: &Nameserver,
        query_bytes: &[u8],
        timeout: Duration,
    ) -> Result<DnsResponse, TransportError> {
        let response = Self::exchange(&nameserver.transport, query_bytes, timeout).await?;

        if !response.truncated {
            return Ok(response);
        }

        match &nameserver.tcp_fallback {
            Some(tcp) => {
                debug!(
                    server = %tcp.server(),
                    "Response truncated (TC bit), retrying via TCP"
                );
                Self::exchange(tcp, query_bytes, timeout).await
            }
            None => {
                debug!(
                    server = %nameserver.transport.server(),
                    "Response truncated and no TCP fallback, using partial answer"
                );
                Ok(response)
            }
        }
    }
}

#[async_trait]
impl HostResolver for QueryClient {
    async fn resolve(
        &self,
        hostname: &str,
        cancel: &CancellationToken,
    ) -> Result<ResolutionResult, ResolveError> {
        let query = MessageBuilder::build_address_query(hostname)?;
        let nameserver = self.next_nameserver();
        let transport = &nameserver.transport;
        let server = transport.server();

        debug!(
            hostname = %hostname,
            server = %server,
            protocol = transport.protocol_name(),
            "Resolving"
        );

        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ResolveError::Cancelled),
                outcome = Self::attempt(nameserver, &query, self.query_timeout) => outcome,
            };

            let response = match outcome {
                Ok(response) => response,
                Err(e) => {
                    debug!(
                        hostname = %hostname,
                        server = %server,
                        attempt,
                        error = %e,
                        "Attempt failed"
                    );
                    last_error = Some(e);
                    continue;
                }
            };

            if response.rcode != ResponseCode::NoError {
                let status = ResponseParser::rcode_to_status(response.rcode);
                debug!(hostname = %hostname, server = %server, status, "Nameserver returned error");
                return Err(ResolveError::Protocol {
                    server,
                    rcode: u16::from(response.rcode),
                    status,
                });
            }

            let ttl = response.min_ttl.unwrap_or(0);
            debug!(
                hostname = %hostname,
                server = %server,
                attempt,
                addresses = response.addresses.len(),
                ttl,
                "Resolved"
            );
            return Ok(ResolutionResult::new(response.addresses, ttl));
        }

        let source = last_error.unwrap_or_else(|| TransportError::Io {
            server: server.clone(),
            message: "no attempt was made".to_string(),
        });

        warn!(
            hostname = %hostname,
            server = %server,
            attempts = self.max_retries,
            error = %source,
            "All attempts failed"
        );

        Err(ResolveError::Transport {
            server,
            attempts: self.max_retries,
            source,
        })
    }
}
