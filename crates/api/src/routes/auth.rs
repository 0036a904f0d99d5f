//! Credential check endpoint (`POST /authenticate`).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use groupcast_core::auth::{check_credentials, AuthDecision, Credentials};
use groupcast_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response for a successful credential check.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
}

/// POST /api/v1/authenticate
///
/// Compare submitted credentials against the configured shared secrets.
/// Missing server-side secrets are reported before the body is parsed:
/// that is a configuration fault, not a client error.
async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    if state.config.auth.is_none() {
        return Err(misconfigured_secrets());
    }

    let Json(credentials) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    match check_credentials(&credentials, state.config.auth.as_ref()) {
        AuthDecision::Authorized => {
            tracing::info!(username = %credentials.username, "Credential check passed");
            Ok(Json(AuthResponse { success: true }))
        }
        AuthDecision::Unauthorized => {
            tracing::warn!(username = %credentials.username, "Credential check failed");
            Err(CoreError::Unauthorized("Invalid credentials".to_string()).into())
        }
        AuthDecision::Misconfigured => Err(misconfigured_secrets()),
    }
}

fn misconfigured_secrets() -> AppError {
    CoreError::Misconfigured(
        "Authentication secrets are not configured (AUTH_USERNAME / AUTH_PASSWORD)".to_string(),
    )
    .into()
}

/// Routes mounted at `/authenticate`.
pub fn router() -> Router<AppState> {
    Router::new().route("/authenticate", post(authenticate))
}
