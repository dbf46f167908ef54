//! Dispatch DNS Domain Layer
pub mod config;
pub mod errors;
pub mod nameservers;
pub mod transport_mode;

pub use config::{AnswerPolicy, CliOverrides, Config, ConfigError, HttpRelayConfig, ResolvConfig};
pub use errors::DomainError;
pub use nameservers::{normalize_nameservers, un_fqdn, PORT_SEPARATOR};
pub use transport_mode::TransportMode;
