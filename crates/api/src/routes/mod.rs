pub mod auth;
pub mod health;
pub mod progress;
pub mod send;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /authenticate    POST  credential check (public)
/// /send            POST  validate + forward a submission to the engine
/// /progress        POST  engine pushes a status update
/// /progress        GET   browser polls the last-known status
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(send::router())
        .merge(progress::router())
}
