//! Upstream address normalization.
//!
//! Configured nameservers are plain strings. `#` marks an explicit port, as
//! in dnsmasq (`1.1.1.1#5353`); entries without one get the default port.
//! Host syntax is not validated: a malformed entry is passed through and
//! fails later, at the transport layer, for that upstream only.

/// Separator between host and explicit port in a configured entry.
pub const PORT_SEPARATOR: char = '#';

/// Returns the normalized `host:port` list, in configuration order.
///
/// The order is the dispatch priority used by the staggered race.
pub fn normalize_nameservers<S: AsRef<str>>(servers: &[S], default_port: u16) -> Vec<String> {
    servers
        .iter()
        .map(|server| normalize_nameserver(server.as_ref(), default_port))
        .collect()
}

/// Normalizes a single entry. A separator in leading position is not
/// treated as one.
pub fn normalize_nameserver(server: &str, default_port: u16) -> String {
    match server.find(PORT_SEPARATOR) {
        Some(i) if i > 0 => format!("{}:{}", &server[..i], &server[i + 1..]),
        _ => format!("{}:{}", server, default_port),
    }
}

/// Strips the trailing root dot from a fully qualified name.
pub fn un_fqdn(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}
