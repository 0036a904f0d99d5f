use std::sync::Arc;

use groupcast_store::ProgressStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (secrets, engine URL, timeouts).
    pub config: Arc<ServerConfig>,
    /// Progress store keyed by execution id (in-memory by default; behind
    /// the trait so the backing can be swapped for a shared store).
    pub store: Arc<dyn ProgressStore>,
    /// Shared outbound HTTP client; the engine client is built from this
    /// per request, since the webhook URL may be unconfigured.
    pub http: reqwest::Client,
}
