use crate::ports::UpstreamResolver;
use dispatch_dns_domain::{un_fqdn, DomainError, TransportMode};
use hickory_proto::op::Message;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Resolves one query through the path its transport mode selects.
///
/// Wire modes (`udp`, `tcp`) go to the racing resolver; `http` goes to the
/// relay. There is no fallback from one path to the other.
pub struct LookupUseCase {
    race: Arc<dyn UpstreamResolver>,
    relay: Option<Arc<dyn UpstreamResolver>>,
}

impl LookupUseCase {
    pub fn new(race: Arc<dyn UpstreamResolver>) -> Self {
        Self { race, relay: None }
    }

    pub fn with_relay(mut self, relay: Arc<dyn UpstreamResolver>) -> Self {
        self.relay = Some(relay);
        self
    }

    pub async fn execute(
        &self,
        transport: TransportMode,
        query: &Message,
    ) -> Result<Message, DomainError> {
        let start = Instant::now();
        let resolver = self.select(transport)?;

        let qname = query
            .queries()
            .first()
            .map(|q| q.name().to_utf8())
            .unwrap_or_default();

        let result = resolver.lookup(transport, query).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => debug!(
                qname = %un_fqdn(&qname),
                transport = %transport,
                resolver = resolver.name(),
                rcode = %response.response_code(),
                answers = response.answer_count(),
                elapsed_ms,
                "Lookup complete"
            ),
            Err(e) => warn!(
                qname = %un_fqdn(&qname),
                transport = %transport,
                resolver = resolver.name(),
                error = %e,
                elapsed_ms,
                "Lookup failed"
            ),
        }

        result
    }

    fn select(&self, transport: TransportMode) -> Result<&Arc<dyn UpstreamResolver>, DomainError> {
        match transport {
            TransportMode::Udp | TransportMode::Tcp => Ok(&self.race),
            TransportMode::Http => self
                .relay
                .as_ref()
                .ok_or(DomainError::UnsupportedTransport(transport)),
        }
    }
}
