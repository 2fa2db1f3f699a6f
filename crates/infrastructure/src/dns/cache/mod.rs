pub mod metrics;
pub mod record;
pub mod storage;
pub mod sweep;

pub use metrics::{CacheMetrics, CacheMetricsSnapshot};
pub use record::CachedAddresses;
pub use storage::AddressCache;
