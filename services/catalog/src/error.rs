use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use cinema_auth_types::token::TokenError;

use crate::domain::types::MovieViolation;

/// Catalog service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error("invalid token")]
    InvalidToken,
    #[error("permission denied")]
    PermissionDenied,
    #[error("wrong email or password")]
    InvalidCredentials,
    #[error("name can't be empty")]
    EmptyName,
    #[error("invalid movie: {}", join_violations(.0))]
    InvalidMovie(Vec<MovieViolation>),
    #[error("invalid id")]
    InvalidId,
    #[error("invalid sort: {0}")]
    InvalidSort(String),
    #[error("malformed body: {0}")]
    MalformedBody(String),
    #[error("actor not found")]
    ActorNotFound,
    #[error("movie not found")]
    MovieNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

fn join_violations(violations: &[MovieViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CatalogServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EmptyName => "EMPTY_NAME",
            Self::InvalidMovie(_) => "INVALID_MOVIE",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidSort(_) => "INVALID_SORT",
            Self::MalformedBody(_) => "MALFORMED_BODY",
            Self::ActorNotFound => "ACTOR_NOT_FOUND",
            Self::MovieNotFound => "MOVIE_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<TokenError> for CatalogServiceError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::PermissionDenied => Self::PermissionDenied,
            TokenError::Signing(msg) => Self::Internal(anyhow::anyhow!("sign token: {msg}")),
            _ => Self::InvalidToken,
        }
    }
}

impl IntoResponse for CatalogServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidToken | Self::PermissionDenied => StatusCode::UNAUTHORIZED,
            Self::InvalidCredentials | Self::InvalidId | Self::InvalidSort(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::EmptyName | Self::InvalidMovie(_) | Self::MalformedBody(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::ActorNotFound | Self::MovieNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::InvalidMovie(ref violations) = self {
            body["fields"] = violations.iter().map(|v| v.field()).collect();
        }
        (status, axum::Json(body)).into_response()
    }
}
