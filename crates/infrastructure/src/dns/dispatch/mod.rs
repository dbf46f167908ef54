pub mod exchange;
pub mod policy;
pub mod staggered;

pub use exchange::{UpstreamExchange, WireExchange};
pub use policy::Verdict;
pub use staggered::StaggeredResolver;
