use std::net::IpAddr;

/// Addresses returned by one successful exchange with a nameserver.
///
/// `ttl` is the smallest TTL among the collected address records, or 0 when
/// the answer carried none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionResult {
    pub addresses: Vec<IpAddr>,
    pub ttl: u32,
}

impl ResolutionResult {
    pub fn new(addresses: Vec<IpAddr>, ttl: u32) -> Self {
        Self { addresses, ttl }
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// TTL to store the result under; a zero TTL falls back to `default_secs`.
    pub fn effective_ttl(&self, default_secs: u32) -> u32 {
        if self.ttl == 0 {
            default_secs
        } else {
            self.ttl
        }
    }
}
