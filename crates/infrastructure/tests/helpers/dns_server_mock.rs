use super::responses::answer_to;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// Loopback nameserver answering every query with the same A records,
/// over UDP or TCP (2-byte length framing).
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicU64>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start_udp(records: Vec<(u32, [u8; 4])>) -> std::io::Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&queries);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let response = answer_to(&buf[..len], 0, &records);
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub async fn start_tcp(records: Vec<(u32, [u8; 4])>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let queries = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&queries);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        let records = records.clone();

                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                return;
                            }

                            let response = answer_to(&query, 0, &records);
                            let _ = stream.write_all(&(response.len() as u16).to_be_bytes()).await;
                            let _ = stream.write_all(&response).await;
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
