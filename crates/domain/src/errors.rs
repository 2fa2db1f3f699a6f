use thiserror::Error;

/// Failure of a single exchange with one nameserver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Transport timeout talking to {server}")]
    Timeout { server: String },

    #[error("Transport connection refused by {server}")]
    ConnectionRefused { server: String },

    #[error("Transport I/O error with {server}: {message}")]
    Io { server: String, message: String },

    #[error("Malformed response from {server}: {message}")]
    MalformedResponse { server: String, message: String },

    #[error("Failed to encode DNS query: {0}")]
    Encode(String),
}

impl TransportError {
    pub fn io(server: impl ToString, error: &std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::ConnectionRefused => Self::ConnectionRefused {
                server: server.to_string(),
            },
            std::io::ErrorKind::TimedOut => Self::Timeout {
                server: server.to_string(),
            },
            _ => Self::Io {
                server: server.to_string(),
                message: error.to_string(),
            },
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Every attempt against the selected nameserver failed at the transport level.
    #[error("Resolution via {server} failed after {attempts} attempts: {source}")]
    Transport {
        server: String,
        attempts: u32,
        #[source]
        source: TransportError,
    },

    /// The nameserver answered with a non-success response code.
    #[error("Nameserver {server} answered {status} (rcode {rcode})")]
    Protocol {
        server: String,
        rcode: u16,
        status: &'static str,
    },

    #[error("Invalid hostname '{hostname}': {reason}")]
    InvalidHostname { hostname: String, reason: String },

    #[error("Resolution cancelled")]
    Cancelled,
}

impl ResolveError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol { .. })
    }
}

/// Errors surfaced to callers of the connection layer.
///
/// Resolution failures and address exhaustion stay distinguishable:
/// [`DialError::Resolve`] wraps the former, [`DialError::is_address_exhaustion`]
/// identifies the latter.
#[derive(Error, Debug)]
pub enum DialError {
    #[error("Invalid dial address '{0}': expected host:port")]
    InvalidAddress(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("No address found for host {host}")]
    NoAddressFound { host: String },

    #[error("All {attempted} addresses for host {host} failed, last error: {last_error}")]
    AllAddressesFailed {
        host: String,
        attempted: usize,
        last_error: String,
    },

    #[error("Dial cancelled")]
    Cancelled,
}

impl DialError {
    pub fn is_address_exhaustion(&self) -> bool {
        matches!(
            self,
            Self::NoAddressFound { .. } | Self::AllAddressesFailed { .. }
        )
    }
}
