use async_trait::async_trait;
use dispatch_dns_domain::{DomainError, TransportMode};
use hickory_proto::op::Message;

/// A strategy that turns one query into one response.
///
/// Implementations own their upstream selection; the caller only picks
/// which strategy runs by transport mode.
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    async fn lookup(&self, transport: TransportMode, query: &Message)
        -> Result<Message, DomainError>;

    fn name(&self) -> &'static str;
}
