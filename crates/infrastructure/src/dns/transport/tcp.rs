//! TCP Transport for DNS queries (RFC 1035 §4.2.2)
//!
//! Each message is prefixed with its length as a 2-byte big-endian integer.
//! One connection per exchange.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use resolvercache_domain::TransportError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const MAX_TCP_MESSAGE_SIZE: usize = 65535;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<Vec<u8>, TransportError> {
        let mut stream = TcpStream::connect(self.server_addr)
            .await
            .map_err(|e| TransportError::io(self.server_addr, &e))?;

        stream
            .set_nodelay(true)
            .map_err(|e| TransportError::io(self.server_addr, &e))?;

        send_with_length_prefix(&mut stream, message_bytes)
            .await
            .map_err(|e| TransportError::io(self.server_addr, &e))?;

        debug!(
            server = %self.server_addr,
            message_len = message_bytes.len(),
            "TCP query sent"
        );

        let response = read_with_length_prefix(&mut stream)
            .await
            .map_err(|e| TransportError::io(self.server_addr, &e))?;

        debug!(
            server = %self.server_addr,
            response_len = response.len(),
            "TCP response received"
        );

        Ok(response)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        if message_bytes.len() > MAX_TCP_MESSAGE_SIZE {
            return Err(TransportError::Encode(format!(
                "Query too large for TCP framing: {} bytes",
                message_bytes.len()
            )));
        }

        let bytes = tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| TransportError::Timeout {
                server: self.server_addr.to_string(),
            })??;

        Ok(TransportResponse {
            bytes,
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }

    fn server(&self) -> String {
        self.server_addr.to_string()
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> std::io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = message_bytes.len() as u16;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message_bytes).await?;
    stream.flush().await
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> std::io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let response_len = u16::from_be_bytes(len_buf) as usize;

    let mut response = vec![0u8; response_len];
    stream.read_exact(&mut response).await?;

    Ok(response)
}
