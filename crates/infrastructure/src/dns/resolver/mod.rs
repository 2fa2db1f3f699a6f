pub mod builder;
pub mod cache_layer;
pub mod query_client;

pub use builder::ResolverBuilder;
pub use cache_layer::ResolverCache;
pub use query_client::{Nameserver, QueryClient};
