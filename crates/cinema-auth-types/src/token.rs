//! JWT issuing and permission checks.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use cinema_domain::role::Role;

/// Default token lifetime in seconds (1 hour).
pub const DEFAULT_TOKEN_TTL: u64 = 3600;

/// Errors returned by [`TokenSigner`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("missing token")]
    Missing,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("permission denied")]
    PermissionDenied,
    #[error("can't make token: {0}")]
    Signing(String),
}

/// Rendered only when [`crate::bearer::BearerToken`] extraction fails; services
/// normally convert `TokenError` into their own error type first.
impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            Self::PermissionDenied => (StatusCode::UNAUTHORIZED, "PERMISSION_DENIED"),
            Self::Signing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
            _ => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
        };
        let body = serde_json::json!({
            "kind": kind,
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `email` | custom | principal email |
/// | `role` | custom | role name, see [`Role`] |
/// | `exp` | `exp` | expiration, seconds since epoch |
///
/// An unknown role name fails deserialization, so such a token is rejected as
/// malformed instead of being ranked below every known role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub email: String,
    pub role: Role,
    pub exp: u64,
}

/// Issues and validates signed, expiring permission tokens.
///
/// Signers are cheap to clone and shared across request handlers.
pub trait TokenSigner: Clone + Send + Sync + 'static {
    /// Sign a token for `email` with `role`.
    fn issue(&self, email: &str, role: Role) -> Result<String, TokenError>;

    /// Verify signature and expiry, then require the embedded role to rank at
    /// least `required`.
    fn validate(&self, token: &str, required: Role) -> Result<TokenClaims, TokenError>;
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// HS256 [`TokenSigner`] over a shared secret.
#[derive(Clone)]
pub struct JwtSigner {
    keys: Arc<Keys>,
    ttl_secs: u64,
}

impl JwtSigner {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            ttl_secs,
        }
    }

    /// Decode and verify a token without a role requirement.
    ///
    /// Validation: HS256, exp checked with the default 60s leeway, `exp`
    /// required.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.required_spec_claims.clear();
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<TokenClaims>(token, &self.keys.decoding, &validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            },
        )?;
        Ok(data.claims)
    }
}

impl TokenSigner for JwtSigner {
    fn issue(&self, email: &str, role: Role) -> Result<String, TokenError> {
        let claims = TokenClaims {
            email: email.to_owned(),
            role,
            exp: now_secs() + self.ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn validate(&self, token: &str, required: Role) -> Result<TokenClaims, TokenError> {
        let claims = self.decode(token).inspect_err(|e| {
            tracing::debug!(reason = %e, "token rejected");
        })?;
        if !claims.role.permits(required) {
            tracing::debug!(
                email = %claims.email,
                role = %claims.role,
                required = %required,
                "permission denied"
            );
            return Err(TokenError::PermissionDenied);
        }
        Ok(claims)
    }
}
