use super::responses::{answer_to, truncated_answer_to};
use async_trait::async_trait;
use resolvercache_domain::TransportError;
use resolvercache_infrastructure::dns::transport::{DnsTransport, TransportResponse};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum StubReply {
    Answer { rcode: u8, records: Vec<(u32, [u8; 4])> },
    /// NOERROR with the TC bit set, carrying a partial answer.
    Truncated { records: Vec<(u32, [u8; 4])> },
    Timeout,
    Refused,
    Garbage,
    /// Waits out the caller's timeout before failing.
    Hang,
}

impl StubReply {
    pub fn records(records: &[(u32, [u8; 4])]) -> Self {
        Self::Answer {
            rcode: 0,
            records: records.to_vec(),
        }
    }

    pub fn rcode(rcode: u8) -> Self {
        Self::Answer {
            rcode,
            records: vec![],
        }
    }
}

/// In-memory nameserver: replies from a script, then from a fallback reply.
pub struct StubTransport {
    label: String,
    script: Mutex<VecDeque<StubReply>>,
    fallback: StubReply,
    calls: AtomicU64,
    queries: Mutex<Vec<Vec<u8>>>,
}

impl StubTransport {
    pub fn new(label: &str, fallback: StubReply) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicU64::new(0),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn scripted(label: &str, script: Vec<StubReply>, fallback: StubReply) -> Arc<Self> {
        let stub = Self::new(label, fallback);
        stub.script.lock().unwrap().extend(script);
        stub
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<Vec<u8>> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsTransport for StubTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(message_bytes.to_vec());

        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        let bytes = match reply {
            StubReply::Answer { rcode, records } => answer_to(message_bytes, rcode, &records),
            StubReply::Truncated { records } => truncated_answer_to(message_bytes, &records),
            StubReply::Timeout => {
                return Err(TransportError::Timeout {
                    server: self.label.clone(),
                })
            }
            StubReply::Refused => {
                return Err(TransportError::ConnectionRefused {
                    server: self.label.clone(),
                })
            }
            StubReply::Garbage => vec![0xde, 0xad],
            StubReply::Hang => {
                tokio::time::sleep(timeout).await;
                return Err(TransportError::Timeout {
                    server: self.label.clone(),
                });
            }
        };

        Ok(TransportResponse {
            bytes,
            protocol_used: "STUB",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "STUB"
    }

    fn server(&self) -> String {
        self.label.clone()
    }
}
