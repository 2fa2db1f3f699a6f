//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Standard DNS transport. Messages are sent as-is (no framing).
//! A fresh ephemeral socket is bound per exchange.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use resolvercache_domain::TransportError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, TransportError> {
        let socket = UdpSocket::bind(self.bind_addr())
            .await
            .map_err(|e| TransportError::io(self.server_addr, &e))?;

        // Connecting filters out datagrams from other sources.
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| TransportError::io(self.server_addr, &e))?;

        let bytes_sent = socket
            .send(message_bytes)
            .await
            .map_err(|e| TransportError::io(self.server_addr, &e))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let bytes_received = socket
            .recv(&mut recv_buf)
            .await
            .map_err(|e| TransportError::io(self.server_addr, &e))?;

        if bytes_received == MAX_UDP_RESPONSE_SIZE {
            warn!(server = %self.server_addr, "UDP response filled the receive buffer");
        }

        recv_buf.truncate(bytes_received);

        debug!(server = %self.server_addr, bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| TransportError::Timeout {
                server: self.server_addr.to_string(),
            })??;

        Ok(TransportResponse {
            bytes,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }

    fn server(&self) -> String {
        self.server_addr.to_string()
    }
}
