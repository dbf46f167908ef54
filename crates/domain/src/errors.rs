use crate::TransportMode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Every upstream was attempted and none produced an acceptable answer.
    #[error("{qname} resolv failed on {} ({transport})", .nameservers.join("; "))]
    ResolutionFailed {
        qname: String,
        transport: TransportMode,
        nameservers: Vec<String>,
    },

    #[error("unknown error. failed to resolve...")]
    Unknown,

    #[error("Query carries no question")]
    EmptyQuestion,

    #[error("Invalid upstream address: {0}")]
    InvalidUpstream(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport I/O error: {0}")]
    TransportIo(String),

    #[error("No resolver available for transport mode {0}")]
    UnsupportedTransport(TransportMode),
}

impl DomainError {
    /// True for failures scoped to a single upstream attempt.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUpstream(_)
                | Self::InvalidDnsResponse(_)
                | Self::TransportTimeout { .. }
                | Self::TransportConnectionRefused { .. }
                | Self::TransportIo(_)
        )
    }
}
