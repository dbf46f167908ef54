use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::http::HttpRelayConfig;
use super::logging::LoggingConfig;
use super::resolv::ResolvConfig;
use super::resolv_conf::ResolvConf;
use crate::TransportMode;

const LOCAL_CONFIG_PATH: &str = "dispatch-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dispatch-dns/config.toml";

/// Main configuration structure for Dispatch DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Upstream nameservers, timeouts and race policy
    #[serde(default)]
    pub resolv: ResolvConfig,

    /// HTTP relay endpoint
    #[serde(default)]
    pub http: HttpRelayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dispatch-dns.toml in current directory
    /// 3. /etc/dispatch-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.load_resolv_file()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(transport) = overrides.transport {
            self.resolv.transport = transport;
        }
        if let Some(servers) = overrides.servers {
            self.resolv.servers = servers;
        }
        if let Some(timeout) = overrides.timeout {
            self.resolv.timeout = timeout;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Fill the upstream set from `resolv_file` when none is configured
    /// inline. An explicit server list always wins.
    pub fn load_resolv_file(&mut self) -> Result<(), ConfigError> {
        if !self.resolv.servers.is_empty() {
            return Ok(());
        }
        let Some(path) = self.resolv.resolv_file.as_deref() else {
            return Ok(());
        };

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        self.apply_resolv_conf(ResolvConf::parse(&contents));
        Ok(())
    }

    pub fn apply_resolv_conf(&mut self, conf: ResolvConf) {
        self.resolv.servers = conf.nameservers;
        if let Some(timeout) = conf.timeout {
            self.resolv.timeout = timeout;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolv.timeout == 0 {
            return Err(ConfigError::Validation(
                "Resolver timeout cannot be 0".to_string(),
            ));
        }

        if self.resolv.interval == 0 {
            return Err(ConfigError::Validation(
                "Dispatch interval cannot be 0".to_string(),
            ));
        }

        if self.resolv.transport == TransportMode::Http && self.http.remote.is_empty() {
            return Err(ConfigError::Validation(
                "HTTP transport requires [http] remote".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub transport: Option<TransportMode>,
    pub servers: Option<Vec<String>>,
    pub timeout: Option<u64>,
    pub log_level: Option<String>,
}
