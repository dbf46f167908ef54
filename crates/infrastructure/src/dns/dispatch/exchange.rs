use crate::dns::transport;
use async_trait::async_trait;
use dispatch_dns_domain::{DomainError, TransportMode};
use hickory_proto::op::Message;
use std::time::{Duration, Instant};
use tracing::debug;

/// One query/response exchange against one upstream.
///
/// This is the seam the race dispatches through; each call is owned end to
/// end by a single worker.
#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    async fn exchange(
        &self,
        transport: TransportMode,
        upstream: &str,
        query: &Message,
        timeout: Duration,
    ) -> Result<Message, DomainError>;
}

/// Exchanges real DNS wire messages over UDP or TCP.
///
/// A truncated UDP answer is retried over TCP against the same upstream
/// within whatever remains of the attempt's time.
#[derive(Debug, Default, Clone, Copy)]
pub struct WireExchange;

impl WireExchange {
    pub fn new() -> Self {
        Self
    }

    async fn round_trip(
        transport: TransportMode,
        upstream: &str,
        query_bytes: &[u8],
        query_id: u16,
        timeout: Duration,
    ) -> Result<Message, DomainError> {
        let dns_transport = transport::create_transport(transport, upstream)?;
        let transport_response = dns_transport.send(query_bytes, timeout).await?;

        debug!(
            server = %upstream,
            protocol = transport_response.protocol_used,
            response_len = transport_response.bytes.len(),
            "Upstream replied"
        );

        let message = Message::from_vec(&transport_response.bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!(
                "Failed to parse response from {}: {}",
                upstream, e
            ))
        })?;

        if message.id() != query_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Transaction id mismatch from {}: expected {}, got {}",
                upstream,
                query_id,
                message.id()
            )));
        }

        Ok(message)
    }
}

#[async_trait]
impl UpstreamExchange for WireExchange {
    async fn exchange(
        &self,
        transport: TransportMode,
        upstream: &str,
        query: &Message,
        timeout: Duration,
    ) -> Result<Message, DomainError> {
        let start = Instant::now();

        let query_bytes = query.to_vec().map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS query: {}", e))
        })?;

        let response = Self::round_trip(transport, upstream, &query_bytes, query.id(), timeout).await?;

        if response.truncated() && transport == TransportMode::Udp {
            debug!(
                server = %upstream,
                "Response truncated (TC bit), retrying via TCP"
            );

            let remaining = timeout
                .checked_sub(start.elapsed())
                .unwrap_or(Duration::from_millis(500));

            return Self::round_trip(
                TransportMode::Tcp,
                upstream,
                &query_bytes,
                query.id(),
                remaining,
            )
            .await;
        }

        Ok(response)
    }
}
