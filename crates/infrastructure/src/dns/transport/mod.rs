pub mod resolver;
pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use dispatch_dns_domain::{DomainError, TransportMode};
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }
}

/// Builds the wire transport for one attempt against `upstream`.
///
/// `upstream` is a normalized `host:port`; it is not validated here.
pub fn create_transport(mode: TransportMode, upstream: &str) -> Result<Transport, DomainError> {
    match mode {
        TransportMode::Udp => Ok(Transport::Udp(udp::UdpTransport::new(upstream))),
        TransportMode::Tcp => Ok(Transport::Tcp(tcp::TcpTransport::new(upstream))),
        TransportMode::Http => Err(DomainError::UnsupportedTransport(mode)),
    }
}
