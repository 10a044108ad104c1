//! Test utilities for the cinema catalog services.
//!
//! Provides signed test tokens and request-body fixtures.
//! Import from `[dev-dependencies]` only, never in production code.

pub mod auth;
pub mod fixture;
