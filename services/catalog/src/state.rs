use cinema_auth_types::token::TokenSigner;

use crate::domain::repository::Storage;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState<S: Storage, T: TokenSigner> {
    pub storage: S,
    pub tokens: T,
}
