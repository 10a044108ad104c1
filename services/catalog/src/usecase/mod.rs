use uuid::Uuid;

use crate::error::CatalogServiceError;

pub mod actor;
pub mod auth;
pub mod movie;

/// Parse a path id, mapping anything that is not a UUID to `InvalidId`.
pub fn parse_id(raw: &str) -> Result<Uuid, CatalogServiceError> {
    Uuid::parse_str(raw.trim()).map_err(|_| CatalogServiceError::InvalidId)
}
