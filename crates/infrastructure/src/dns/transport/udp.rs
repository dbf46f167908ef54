//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Standard DNS transport. Messages are sent as-is (no framing).
//! A fresh ephemeral socket is bound and connected per attempt, so only
//! the upstream's replies are read; nothing is reused across queries.

use super::resolver::resolve_upstream;
use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dispatch_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    upstream: String,
}

impl UdpTransport {
    pub fn new(upstream: impl Into<String>) -> Self {
        Self {
            upstream: upstream.into(),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server_addr = resolve_upstream(&self.upstream, timeout).await?;

        let bind_addr: SocketAddr = if server_addr.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
            DomainError::TransportIo(format!("Failed to bind UDP socket: {}", e))
        })?;

        // Connected: the kernel drops datagrams from any other source.
        socket.connect(server_addr).await.map_err(|e| {
            DomainError::TransportIo(format!(
                "Failed to connect UDP socket to {}: {}",
                server_addr, e
            ))
        })?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send(message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.upstream.clone(),
            })?
            .map_err(|e| {
                DomainError::TransportIo(format!(
                    "Failed to send UDP query to {}: {}",
                    server_addr, e
                ))
            })?;

        debug!(
            server = %server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let bytes_received = tokio::time::timeout(timeout, socket.recv(&mut recv_buf))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.upstream.clone(),
            })?
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused {
                    server: self.upstream.clone(),
                },
                _ => DomainError::TransportIo(format!(
                    "Failed to receive UDP response from {}: {}",
                    server_addr, e
                )),
            })?;

        recv_buf.truncate(bytes_received);

        debug!(
            server = %server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes: recv_buf,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
