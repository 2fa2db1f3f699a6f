pub mod dialer;
pub mod dns;

pub use dialer::{Dialer, LookupMode};
pub use dns::{AddressCache, Nameserver, QueryClient, ResolverBuilder, ResolverCache};
