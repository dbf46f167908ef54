pub mod errors;
pub mod http;
pub mod logging;
pub mod resolv;
pub mod resolv_conf;
pub mod root;

pub use errors::ConfigError;
pub use http::HttpRelayConfig;
pub use logging::LoggingConfig;
pub use resolv::{AnswerPolicy, ResolvConfig};
pub use resolv_conf::ResolvConf;
pub use root::{CliOverrides, Config};
