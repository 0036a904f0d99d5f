//! Submission proxy endpoint (`POST /send`).
//!
//! Validates a broadcast submission, strips its credentials, forwards it
//! to the external workflow engine, and answers with the execution id the
//! browser uses to poll progress. Each gate below short-circuits in the
//! documented order; the engine is contacted only after every local check
//! has passed, so exactly one outbound call happens per accepted
//! submission.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use groupcast_core::auth::{check_credentials, AuthDecision, Credentials};
use groupcast_core::error::CoreError;
use groupcast_core::group::validate_group;
use groupcast_core::progress::now_timestamp;
use groupcast_engine::{DispatchPayload, EngineApi};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /send`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub auth: Option<Credentials>,
    #[serde(default)]
    pub message: String,
    pub group: Option<String>,
    #[serde(default)]
    pub has_image: bool,
    /// Data-URI image payload, forwarded verbatim.
    #[serde(default)]
    pub image: Option<String>,
}

/// Response for an accepted submission. This is the only supported reply
/// shape; the plain-text and `200`-with-envelope shapes of earlier
/// revisions are superseded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub success: bool,
    pub execution_id: String,
    pub message: String,
}

/// POST /api/v1/send
async fn send(
    State(state): State<AppState>,
    payload: Result<Json<SendRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    // Gate 1: the engine must be reachable in principle.
    let webhook_url = state.config.engine_webhook_url.clone().ok_or_else(|| {
        CoreError::Misconfigured("Engine webhook URL is not configured (ENGINE_WEBHOOK_URL)".into())
    })?;

    // Gate 2: server-side secrets must exist before we look at the body.
    if state.config.auth.is_none() {
        return Err(CoreError::Misconfigured(
            "Authentication secrets are not configured (AUTH_USERNAME / AUTH_PASSWORD)".into(),
        )
        .into());
    }

    // Gate 3: body must parse.
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    // Gate 4: group label must follow the convention.
    let group = validate_group(request.group.as_deref().unwrap_or(""))?.to_string();

    // Gate 5: credentials must match.
    let auth = request
        .auth
        .ok_or_else(|| CoreError::Unauthorized("Missing credentials".to_string()))?;
    match check_credentials(&auth, state.config.auth.as_ref()) {
        AuthDecision::Authorized => {}
        AuthDecision::Unauthorized => {
            tracing::warn!(username = %auth.username, "Submission rejected: bad credentials");
            return Err(CoreError::Unauthorized("Invalid credentials".to_string()).into());
        }
        AuthDecision::Misconfigured => {
            return Err(CoreError::Misconfigured(
                "Authentication secrets are not configured (AUTH_USERNAME / AUTH_PASSWORD)".into(),
            )
            .into());
        }
    }

    // Credentials stop here; the outbound payload carries only the
    // broadcast fields plus a server-stamped submission time.
    let payload = DispatchPayload {
        message: request.message,
        group: group.clone(),
        sheet_name: group,
        has_image: request.has_image,
        image: request.image,
        timestamp: now_timestamp(),
    };

    let engine = EngineApi::with_client(state.http.clone(), webhook_url)
        .with_timeout(state.config.engine_timeout());
    let ack = engine.dispatch(&payload).await?;

    if ack.fallback_used {
        tracing::warn!(
            execution_id = %ack.execution_id,
            "Engine reply carried no execution id; synthesized one (degraded tracking)",
        );
    }
    tracing::info!(
        execution_id = %ack.execution_id,
        group = %payload.group,
        has_image = payload.has_image,
        "Submission forwarded to engine",
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(SendResponse {
            success: true,
            execution_id: ack.execution_id,
            message: "Broadcast accepted; poll progress with the execution id".to_string(),
        }),
    ))
}

/// Routes mounted at `/send`.
pub fn router() -> Router<AppState> {
    Router::new().route("/send", post(send))
}
