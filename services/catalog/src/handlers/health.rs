use axum::extract::State;
use axum::http::StatusCode;

use cinema_auth_types::token::TokenSigner;

use crate::domain::repository::Storage;
use crate::state::AppState;

/// Liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness check: 200 once storage answers, 503 otherwise.
pub async fn readyz<S: Storage, T: TokenSigner>(
    State(state): State<AppState<S, T>>,
) -> StatusCode {
    match state.storage.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = ?e, "storage not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
