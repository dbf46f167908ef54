#![allow(dead_code)]

mod mock_resolvers;

pub use mock_resolvers::{answer_for, build_query, MockUpstreamResolver};
