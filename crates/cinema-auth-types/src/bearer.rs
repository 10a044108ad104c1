//! `Authorization` header extractor.

use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;

use crate::token::TokenError;

/// Raw token taken from the `Authorization` header.
///
/// Accepts both `Bearer <token>` and a bare token. Rejects with
/// [`TokenError::Missing`] (401) when the header is absent or empty. Signature
/// and role checks are done by handlers after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_authorization(value: &str) -> Option<String> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => value,
    };
    (!token.is_empty()).then(|| token.to_owned())
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = TokenError;

    // Extract synchronously and return a 'static future so the returned future
    // does not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_authorization);

        async move { token.map(Self).ok_or(TokenError::Missing) }
    }
}
