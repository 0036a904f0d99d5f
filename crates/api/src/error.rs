use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use groupcast_core::error::CoreError;
use groupcast_engine::EngineError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`EngineError`] for upstream
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent `{"error", "code"}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `groupcast_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure talking to the external workflow engine.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Misconfigured(msg) => {
                    tracing::error!(error = %msg, "Server misconfigured");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "SERVER_MISCONFIGURED",
                        msg.clone(),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Engine errors ---
            AppError::Engine(engine) => classify_engine_error(engine),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an engine error into an HTTP status, error code, and message.
///
/// - Non-2xx engine replies surface the engine's own status code with the
///   reply body passed through.
/// - Timeouts map to 504.
/// - Transport-level failures (connect, DNS, TLS) map to 502.
fn classify_engine_error(err: &EngineError) -> (StatusCode, &'static str, String) {
    match err {
        EngineError::Api { status, body } => {
            let status_code =
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            tracing::error!(status, body = %body, "Engine returned an error");
            (status_code, "UPSTREAM_ERROR", body.clone())
        }
        EngineError::Timeout(timeout) => {
            tracing::error!(timeout_secs = timeout.as_secs(), "Engine call timed out");
            (
                StatusCode::GATEWAY_TIMEOUT,
                "UPSTREAM_TIMEOUT",
                format!("The workflow engine did not respond within {}s", timeout.as_secs()),
            )
        }
        EngineError::Request(e) => {
            tracing::error!(error = %e, "Engine request failed");
            (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                "Failed to reach the workflow engine".to_string(),
            )
        }
    }
}
