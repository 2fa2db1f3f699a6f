use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NameserverProtocol {
    #[default]
    Udp,
    Tcp,
}

impl NameserverProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Tcp => "tcp",
        }
    }
}

/// A nameserver endpoint from the configured pool.
///
/// Hosts must be IP literals: a nameserver's own name cannot be resolved
/// before there is a nameserver to ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameserverAddr {
    pub protocol: NameserverProtocol,
    pub addr: SocketAddr,
}

impl NameserverAddr {
    pub fn udp(addr: SocketAddr) -> Self {
        Self {
            protocol: NameserverProtocol::Udp,
            addr,
        }
    }

    pub fn tcp(addr: SocketAddr) -> Self {
        Self {
            protocol: NameserverProtocol::Tcp,
            addr,
        }
    }
}

fn parse_socket_addr(s: &str) -> Option<SocketAddr> {
    if let Ok(addr) = s.parse::<SocketAddr>() {
        return Some(addr);
    }
    // Bare IP without a port, including bracketed IPv6.
    let bare = s
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(s);
    bare.parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
}

impl FromStr for NameserverAddr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (protocol, rest) = if let Some(rest) = s.strip_prefix("udp://") {
            (NameserverProtocol::Udp, rest)
        } else if let Some(rest) = s.strip_prefix("tcp://") {
            (NameserverProtocol::Tcp, rest)
        } else if s.contains("://") {
            return Err(format!(
                "Unsupported nameserver scheme in '{}'. Expected udp:// or tcp://",
                s
            ));
        } else {
            (NameserverProtocol::Udp, s)
        };

        let addr = parse_socket_addr(rest).ok_or_else(|| {
            format!(
                "Invalid nameserver '{}'. Expected IP, IP:PORT, [IPv6]:PORT, udp://IP:PORT or tcp://IP:PORT",
                s
            )
        })?;

        Ok(Self { protocol, addr })
    }
}

impl fmt::Display for NameserverAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.protocol.as_str(), self.addr)
    }
}
