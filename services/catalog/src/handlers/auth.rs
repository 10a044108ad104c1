use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

use cinema_auth_types::token::TokenSigner;

use crate::domain::repository::Storage;
use crate::error::CatalogServiceError;
use crate::handlers::json_body;
use crate::state::AppState;
use crate::usecase::auth::AuthenticateUseCase;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ── POST /auth ───────────────────────────────────────────────────────────────

pub async fn login<S: Storage, T: TokenSigner>(
    State(state): State<AppState<S, T>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, CatalogServiceError> {
    let req = json_body(payload)?;
    let uc = AuthenticateUseCase {
        users: state.storage.users(),
        tokens: state.tokens.clone(),
    };
    let token = uc.execute(&req.email, &req.password).await?;
    Ok(Json(TokenResponse { token }))
}
