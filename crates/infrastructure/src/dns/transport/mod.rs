pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use resolvercache_domain::{NameserverAddr, NameserverProtocol, TransportError};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// One nameserver reachable over one protocol.
///
/// `send` performs a single query/response exchange; `timeout` bounds the
/// whole exchange. Retrying is the caller's concern.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;

    fn protocol_name(&self) -> &'static str;

    /// Endpoint label used in logs and errors.
    fn server(&self) -> String;
}

pub fn create_transport(nameserver: &NameserverAddr) -> Arc<dyn DnsTransport> {
    match nameserver.protocol {
        NameserverProtocol::Udp => Arc::new(udp::UdpTransport::new(nameserver.addr)),
        NameserverProtocol::Tcp => Arc::new(tcp::TcpTransport::new(nameserver.addr)),
    }
}
