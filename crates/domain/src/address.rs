use std::net::IpAddr;

/// Parses `host` as a literal IPv4 or IPv6 address.
///
/// Bracketed IPv6 (`[::1]`) is not a literal here; brackets belong to the
/// `host:port` syntax and are stripped by [`split_host_port`].
#[inline]
pub fn literal_ip(host: &str) -> Option<IpAddr> {
    host.parse::<IpAddr>().ok()
}

/// Splits a dial target at its last `:` into host and port.
pub fn split_host_port(address: &str) -> Option<(&str, u16)> {
    let (host, port) = address.rsplit_once(':')?;
    let port = port.parse::<u16>().ok()?;

    let host = match host.strip_prefix('[') {
        Some(inner) => inner.strip_suffix(']')?,
        None => host,
    };

    if host.is_empty() {
        return None;
    }
    Some((host, port))
}
