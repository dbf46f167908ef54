//! Dispatch DNS Infrastructure Layer
pub mod dns;
