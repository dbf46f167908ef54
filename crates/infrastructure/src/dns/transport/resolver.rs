use dispatch_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

/// Resolves a normalized `host:port` upstream to a socket address.
///
/// IP literals are parsed directly; host names go through the system
/// resolver, bounded by `timeout`. The first address returned wins.
pub async fn resolve_upstream(upstream: &str, timeout: Duration) -> Result<SocketAddr, DomainError> {
    if let Ok(addr) = upstream.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(upstream))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: upstream.to_string(),
        })?
        .map_err(|e| {
            DomainError::InvalidUpstream(format!("Failed to resolve {}: {}", upstream, e))
        })?;

    addrs
        .next()
        .ok_or_else(|| DomainError::InvalidUpstream(format!("No addresses found for {}", upstream)))
}
