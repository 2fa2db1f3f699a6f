use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// RFC 2181 §8: TTLs above 2^31 - 1 are treated as that maximum.
const MAX_TTL_SECS: u32 = i32::MAX as u32;

/// One hostname's resolved addresses and when they stop being valid.
///
/// Never mutated after insertion; a refresh replaces the whole record.
#[derive(Debug, Clone)]
pub struct CachedAddresses {
    pub addresses: Arc<Vec<IpAddr>>,
    pub ttl: u32,
    pub expires_at: Instant,
}

impl CachedAddresses {
    pub fn new(addresses: Arc<Vec<IpAddr>>, ttl: u32, now: Instant) -> Self {
        let ttl = ttl.min(MAX_TTL_SECS);
        Self {
            addresses,
            ttl,
            expires_at: now + Duration::from_secs(u64::from(ttl)),
        }
    }

    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
