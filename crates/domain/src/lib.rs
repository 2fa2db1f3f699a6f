//! resolvercache domain layer
pub mod address;
pub mod config;
pub mod errors;
pub mod resolution;

pub use address::{literal_ip, split_host_port};
pub use config::{ConfigError, NameserverAddr, NameserverProtocol, ResolverOptions};
pub use errors::{DialError, ResolveError, TransportError};
pub use resolution::ResolutionResult;
