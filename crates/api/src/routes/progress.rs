//! Progress relay endpoint (`POST /progress` + `GET /progress`).
//!
//! Dual-mode contract keyed by execution id: the workflow engine POSTs
//! status updates into the progress store; the browser GETs the
//! last-known record and re-polls until it sees a terminal status. Reads
//! are bounded -- each call returns what is known now, never holding the
//! connection open.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use groupcast_core::progress::{now_timestamp, ProgressRecord, STATUS_CONNECTED};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for a push update. Numeric fields arrive as loose JSON
/// and are coerced, not rejected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub execution_id: Option<String>,
    pub status: Option<String>,
    pub percentage: Option<Value>,
    pub message: Option<String>,
    pub total_items: Option<Value>,
}

/// Acknowledgement for a stored push update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub success: bool,
    pub execution_id: String,
}

/// Query parameters for a pull read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    pub execution_id: Option<String>,
}

/// Served to a poller before the first update for its execution id
/// arrives; mirrors the record shape plus the echoed id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedPlaceholder {
    pub status: &'static str,
    pub message: &'static str,
    pub execution_id: String,
    pub timestamp: String,
}

/// POST /api/v1/progress -- push mode.
///
/// Validates the execution id, coerces/clamps the fields, and overwrites
/// the stored record (last write wins).
async fn push_progress(
    State(state): State<AppState>,
    payload: Result<Json<ProgressUpdate>, JsonRejection>,
) -> AppResult<Json<UpdateAck>> {
    let Json(update) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let execution_id = update
        .execution_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing executionId".to_string()))?;

    let record = ProgressRecord::from_update(
        update.status.as_deref(),
        update.percentage.as_ref(),
        update.message.as_deref(),
        update.total_items.as_ref(),
    );

    tracing::debug!(
        execution_id,
        status = %record.status,
        percentage = record.percentage,
        "Progress update stored",
    );
    state.store.put(execution_id, record).await;

    Ok(Json(UpdateAck {
        success: true,
        execution_id: execution_id.to_string(),
    }))
}

/// GET /api/v1/progress?executionId=... -- pull mode.
///
/// Returns the current record for the id, or a `connected` placeholder
/// when nothing has been recorded yet (the run may simply not have
/// reported). The caller re-polls until `completed` or `error`, or gives
/// up on its own timeout.
async fn pull_progress(
    State(state): State<AppState>,
    query: Result<Query<ProgressQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let execution_id = query
        .execution_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing executionId parameter".to_string()))?;

    match state.store.get(execution_id).await {
        Some(record) => Ok(Json(record).into_response()),
        None => Ok(Json(ConnectedPlaceholder {
            status: STATUS_CONNECTED,
            message: "Awaiting updates",
            execution_id: execution_id.to_string(),
            timestamp: now_timestamp(),
        })
        .into_response()),
    }
}

/// Routes mounted at `/progress`.
pub fn router() -> Router<AppState> {
    Router::new().route("/progress", get(pull_progress).post(push_progress))
}
