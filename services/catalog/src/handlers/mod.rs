use axum::extract::rejection::JsonRejection;
use axum::Json;

use cinema_auth_types::bearer::BearerToken;
use cinema_auth_types::token::{TokenClaims, TokenSigner};
use cinema_domain::role::Role;

use crate::domain::repository::Storage;
use crate::error::CatalogServiceError;
use crate::state::AppState;

pub mod actor;
pub mod auth;
pub mod health;
pub mod movie;

/// Validate the bearer token and require at least `required`.
pub(crate) fn authorize<S: Storage, T: TokenSigner>(
    state: &AppState<S, T>,
    token: &BearerToken,
    required: Role,
) -> Result<TokenClaims, CatalogServiceError> {
    Ok(state.tokens.validate(token.as_str(), required)?)
}

/// Unwrap a JSON body, reporting syntax and shape errors as `MalformedBody`.
pub(crate) fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, CatalogServiceError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| CatalogServiceError::MalformedBody(e.body_text()))
}
