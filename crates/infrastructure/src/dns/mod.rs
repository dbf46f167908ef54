pub mod dispatch;
#[cfg(feature = "http-relay")]
pub mod relay;
pub mod transport;

pub use dispatch::{StaggeredResolver, UpstreamExchange, Verdict, WireExchange};
#[cfg(feature = "http-relay")]
pub use relay::HttpRelayResolver;
