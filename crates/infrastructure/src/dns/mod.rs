pub mod cache;
pub mod forwarding;
pub mod resolver;
pub mod transport;

pub use cache::AddressCache;
pub use resolver::{Nameserver, QueryClient, ResolverBuilder, ResolverCache};
