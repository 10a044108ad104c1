//! Service plumbing shared by the cinema catalog binaries: configuration
//! loading, tracing setup, HTTP middleware and serde helpers.

pub mod config;
pub mod middleware;
pub mod serde;
pub mod tracing;
