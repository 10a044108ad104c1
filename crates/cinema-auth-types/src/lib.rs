//! Auth types shared across the cinema catalog crates.
//!
//! Provides JWT issuing/validation behind the [`token::TokenSigner`] trait and
//! the [`bearer::BearerToken`] extractor.

pub mod bearer;
pub mod token;
