use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a lookup reaches its upstreams.
///
/// `Udp` and `Tcp` race the configured nameservers over the DNS wire
/// protocol; `Http` forwards the query to a single decoding relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Udp,
    Tcp,
    Http,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Udp => "udp",
            TransportMode::Tcp => "tcp",
            TransportMode::Http => "http",
        }
    }

    /// Returns `true` if this mode speaks the DNS wire protocol directly.
    pub fn is_wire(&self) -> bool {
        matches!(self, TransportMode::Udp | TransportMode::Tcp)
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "udp" => Ok(TransportMode::Udp),
            "tcp" => Ok(TransportMode::Tcp),
            "http" => Ok(TransportMode::Http),
            _ => Err(format!(
                "Invalid transport mode '{}'. Expected: udp, tcp or http",
                s
            )),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
