use crate::nameservers::normalize_nameservers;
use crate::TransportMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the race treats a non-success answer that is not a server failure.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnswerPolicy {
    /// NXDOMAIN and friends end the race: the upstream already verified the
    /// negative answer and asking others would not change it.
    #[default]
    Definitive,

    /// Every non-success code is skipped and the race continues.
    Retry,
}

impl AnswerPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Definitive => "definitive",
            Self::Retry => "retry",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolvConfig {
    /// Upstreams in dispatch order. `host#port` overrides the default port.
    #[serde(default)]
    pub servers: Vec<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-attempt timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Stagger between successive upstream dispatches, in milliseconds.
    #[serde(default = "default_interval")]
    pub interval: u64,

    #[serde(default)]
    pub negative_answers: AnswerPolicy,

    /// resolv.conf-style file consulted when `servers` is empty.
    #[serde(default)]
    pub resolv_file: Option<String>,

    #[serde(default)]
    pub transport: TransportMode,
}

impl Default for ResolvConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            port: default_port(),
            timeout: default_timeout(),
            interval: default_interval(),
            negative_answers: AnswerPolicy::default(),
            resolv_file: None,
            transport: TransportMode::default(),
        }
    }
}

impl ResolvConfig {
    /// Normalized `host:port` upstreams, configuration order preserved.
    pub fn nameservers(&self) -> Vec<String> {
        normalize_nameservers(&self.servers, self.port)
    }

    /// Applies to both the send and the receive side of each attempt.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval)
    }
}

fn default_port() -> u16 {
    53
}

fn default_timeout() -> u64 {
    5
}

fn default_interval() -> u64 {
    200
}
