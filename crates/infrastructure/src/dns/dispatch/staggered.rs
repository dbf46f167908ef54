//! Staggered upstream race.
//!
//! Upstreams are dispatched one per interval, in configuration order, and
//! every launched attempt keeps racing until it finishes on its own. The
//! first acceptable answer is handed through a single-slot channel and
//! returned at once; anything published after that is dropped.

use super::exchange::{UpstreamExchange, WireExchange};
use super::policy::Verdict;
use async_trait::async_trait;
use dispatch_dns_application::ports::UpstreamResolver;
use dispatch_dns_domain::{un_fqdn, AnswerPolicy, DomainError, ResolvConfig, TransportMode};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use hickory_proto::op::Message;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub struct StaggeredResolver {
    config: ResolvConfig,
    exchange: Arc<dyn UpstreamExchange>,
}

impl StaggeredResolver {
    pub fn new(config: ResolvConfig) -> Self {
        Self::with_exchange(config, Arc::new(WireExchange::new()))
    }

    pub fn with_exchange(config: ResolvConfig, exchange: Arc<dyn UpstreamExchange>) -> Self {
        Self { config, exchange }
    }

    /// Races `query` against the configured upstreams.
    ///
    /// Returns the first published answer, or `ResolutionFailed` naming
    /// every upstream attempted once all of them have finished without one.
    /// Attempts still in flight after an early win are left to finish on
    /// their own; their answers are discarded.
    pub async fn resolve(
        &self,
        transport: TransportMode,
        query: &Message,
    ) -> Result<Message, DomainError> {
        if !transport.is_wire() {
            return Err(DomainError::UnsupportedTransport(transport));
        }

        let qname: Arc<str> = query
            .queries()
            .first()
            .ok_or(DomainError::EmptyQuestion)?
            .name()
            .to_utf8()
            .into();

        let nameservers = self.config.nameservers();
        let timeout = self.config.timeout();
        let interval = self.config.interval();
        let query = Arc::new(query.clone());

        debug!(
            strategy = "staggered",
            servers = nameservers.len(),
            qname = %un_fqdn(&qname),
            transport = %transport,
            "Racing upstreams"
        );

        let (slot, mut winner) = mpsc::channel::<Message>(1);
        let mut workers = FuturesUnordered::new();

        for nameserver in &nameservers {
            let attempt = Attempt {
                exchange: Arc::clone(&self.exchange),
                transport,
                upstream: nameserver.clone(),
                query: Arc::clone(&query),
                qname: Arc::clone(&qname),
                timeout,
                policy: self.config.negative_answers,
            };
            workers.push(tokio::spawn(attempt.run(slot.clone())));

            tokio::select! {
                biased;
                Some(response) = winner.recv() => return Ok(response),
                _ = tokio::time::sleep(interval) => {}
            }
        }

        drop(slot);
        while let Some(joined) = workers.next().await {
            if let Err(e) = joined {
                warn!(error = %e, "Upstream worker panicked");
            }
        }

        winner
            .try_recv()
            .map_err(|_| DomainError::ResolutionFailed {
                qname: qname.to_string(),
                transport,
                nameservers,
            })
    }
}

#[async_trait]
impl UpstreamResolver for StaggeredResolver {
    async fn lookup(
        &self,
        transport: TransportMode,
        query: &Message,
    ) -> Result<Message, DomainError> {
        self.resolve(transport, query).await
    }

    fn name(&self) -> &'static str {
        "staggered"
    }
}

/// One worker: a single exchange against a single upstream.
struct Attempt {
    exchange: Arc<dyn UpstreamExchange>,
    transport: TransportMode,
    upstream: String,
    query: Arc<Message>,
    qname: Arc<str>,
    timeout: Duration,
    policy: AnswerPolicy,
}

impl Attempt {
    async fn run(self, slot: mpsc::Sender<Message>) {
        let start = Instant::now();

        let exchange = self
            .exchange
            .exchange(self.transport, &self.upstream, &self.query, self.timeout);
        let result = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::TransportTimeout {
                server: self.upstream.clone(),
            }),
        };

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    qname = %un_fqdn(&self.qname),
                    upstream = %self.upstream,
                    transport = %self.transport,
                    error = %e,
                    "Upstream exchange failed"
                );
                return;
            }
        };

        let rcode = response.response_code();
        let verdict = Verdict::classify(self.policy, rcode);

        match verdict {
            Verdict::Accept => debug!(
                qname = %un_fqdn(&self.qname),
                upstream = %self.upstream,
                transport = %self.transport,
                latency_ms = start.elapsed().as_millis() as u64,
                "Resolved on upstream"
            ),
            Verdict::Definitive | Verdict::Skip => warn!(
                qname = %un_fqdn(&self.qname),
                upstream = %self.upstream,
                transport = %self.transport,
                rcode = %rcode,
                policy = self.policy.as_str(),
                definitive = verdict.publishes(),
                "No valid answer from upstream"
            ),
        }

        if !verdict.publishes() {
            return;
        }

        // Full slot: another upstream already won.
        if slot.try_send(response).is_err() {
            debug!(upstream = %self.upstream, "Race already decided, answer discarded");
        }
    }
}
