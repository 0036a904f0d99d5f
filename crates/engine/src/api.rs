//! REST call to the workflow engine's webhook, using [`reqwest`].

use std::time::Duration;

use serde::Serialize;

use crate::execution::{extract_execution_id, fallback_execution_id};

/// How long to wait for the engine before classifying the call as an
/// upstream timeout. The engine acknowledges quickly and reports real
/// progress asynchronously, so anything slower than this is stuck.
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP client for one workflow-engine webhook.
pub struct EngineApi {
    client: reqwest::Client,
    webhook_url: String,
    timeout: Duration,
}

/// Outbound payload for the engine webhook. Credentials are never part of
/// this type; the caller strips them before constructing it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchPayload {
    pub message: String,
    /// Trimmed group label, e.g. `"Grupo 3"`.
    pub group: String,
    /// The same label again, targeting the engine's sheet-lookup node.
    pub sheet_name: String,
    pub has_image: bool,
    pub image: Option<String>,
    /// Server-stamped RFC 3339 submission time.
    pub timestamp: String,
}

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchAck {
    /// Execution id extracted from the reply, or synthesized when the
    /// reply carried none.
    pub execution_id: String,
    /// True when the id was synthesized (degraded-tracking mode: the
    /// engine will likely never report progress under this id).
    pub fallback_used: bool,
}

/// Errors from the engine dispatch call.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The engine did not answer within the dispatch timeout.
    #[error("Engine did not respond within {0:?}")]
    Timeout(Duration),

    /// The engine returned a non-2xx status code.
    #[error("Engine error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, passed through to the caller.
        body: String,
    },
}

impl EngineApi {
    /// Create a client for the given webhook URL with the default timeout.
    pub fn new(webhook_url: String) -> Self {
        Self::with_client(reqwest::Client::new(), webhook_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (connection pooling across requests).
    pub fn with_client(client: reqwest::Client, webhook_url: String) -> Self {
        Self {
            client,
            webhook_url,
            timeout: DEFAULT_DISPATCH_TIMEOUT,
        }
    }

    /// Override the dispatch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Forward a submission to the engine. Exactly one outbound call; no
    /// retry -- a transient engine failure is surfaced to the caller.
    ///
    /// The reply body is parsed opportunistically: an empty or non-JSON
    /// body is treated as an empty object, and a missing execution id is
    /// substituted with a synthesized one rather than failing, so the
    /// client flow stays alive even when the engine's reply shape is
    /// unexpected.
    pub async fn dispatch(&self, payload: &DispatchPayload) -> Result<DispatchAck, EngineError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        if !status.is_success() {
            return Err(EngineError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let reply: serde_json::Value =
            serde_json::from_str(&body).unwrap_or_else(|_| serde_json::json!({}));

        match extract_execution_id(&reply) {
            Some(execution_id) => Ok(DispatchAck {
                execution_id,
                fallback_used: false,
            }),
            None => Ok(DispatchAck {
                execution_id: fallback_execution_id(),
                fallback_used: true,
            }),
        }
    }

    fn classify_transport_error(&self, error: reqwest::Error) -> EngineError {
        if error.is_timeout() {
            EngineError::Timeout(self.timeout)
        } else {
            EngineError::Request(error)
        }
    }
}
