pub mod errors;
pub mod nameserver;
pub mod options;

pub use errors::ConfigError;
pub use nameserver::{NameserverAddr, NameserverProtocol};
pub use options::{ResolverOptions, DEFAULT_NAMESERVERS};
