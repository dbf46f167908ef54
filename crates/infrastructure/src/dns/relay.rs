//! HTTP relay resolution.
//!
//! The question is encoded in the request path and the relay answers with
//! the raw wire message as standard base64 text:
//!
//! ```text
//! GET {remote}/{resolver}/{qname without trailing dot}/{qtype}
//!
//! <base64 wire bytes>
//! ```
//!
//! Requires the `http-relay` feature flag.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use dispatch_dns_application::ports::UpstreamResolver;
use dispatch_dns_domain::{un_fqdn, DomainError, HttpRelayConfig, TransportMode};
use hickory_proto::op::Message;
use std::time::Duration;
use tracing::{debug, error};

pub struct HttpRelayResolver {
    config: HttpRelayConfig,
    client: reqwest::Client,
}

impl HttpRelayResolver {
    pub fn new(config: HttpRelayConfig, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { config, client }
    }

    /// Request URL for the first question of `query`, if it has one.
    pub fn relay_url(&self, query: &Message) -> Option<String> {
        let question = query.queries().first()?;
        let name = question.name().to_utf8();

        Some(
            [
                self.config.remote.as_str(),
                self.config.resolver.as_str(),
                un_fqdn(&name),
                &question.query_type().to_string(),
            ]
            .join("/"),
        )
    }

    pub async fn relay(&self, query: &Message) -> Result<Message, DomainError> {
        let Some(url) = self.relay_url(query) else {
            error!(id = query.id(), "Relay query carries no question");
            return Err(DomainError::Unknown);
        };

        debug!(url = %url, id = query.id(), "Sending relay query");

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!(stage = "request", url = %url, error = %e, "Relay request failed");
            DomainError::Unknown
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                stage = "status",
                url = %url,
                status = status.as_u16(),
                "Relay returned non-success status"
            );
            return Err(DomainError::Unknown);
        }

        let body = response.text().await.map_err(|e| {
            error!(stage = "body", url = %url, error = %e, "Failed to read relay response");
            DomainError::Unknown
        })?;

        let bytes = STANDARD.decode(body.trim()).map_err(|e| {
            error!(stage = "base64", url = %url, error = %e, "Relay body is not valid base64");
            DomainError::Unknown
        })?;

        let mut message = Message::from_vec(&bytes).map_err(|e| {
            error!(stage = "wire", url = %url, error = %e, "Relay body is not a DNS message");
            DomainError::Unknown
        })?;

        message.set_id(query.id());

        debug!(
            url = %url,
            rcode = %message.response_code(),
            answers = message.answer_count(),
            "Relay response received"
        );

        Ok(message)
    }
}

#[async_trait]
impl UpstreamResolver for HttpRelayResolver {
    async fn lookup(
        &self,
        transport: TransportMode,
        query: &Message,
    ) -> Result<Message, DomainError> {
        if transport != TransportMode::Http {
            return Err(DomainError::UnsupportedTransport(transport));
        }
        self.relay(query).await
    }

    fn name(&self) -> &'static str {
        "http-relay"
    }
}
