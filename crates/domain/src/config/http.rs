use serde::{Deserialize, Serialize};

/// Endpoint of the HTTP decoding relay.
///
/// Requests go to `{remote}/{resolver}/{name}/{type}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpRelayConfig {
    #[serde(default)]
    pub remote: String,

    #[serde(default = "default_resolver")]
    pub resolver: String,
}

impl Default for HttpRelayConfig {
    fn default() -> Self {
        Self {
            remote: String::new(),
            resolver: default_resolver(),
        }
    }
}

fn default_resolver() -> String {
    "resolve".to_string()
}
