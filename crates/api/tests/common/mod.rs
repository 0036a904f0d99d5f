//! Shared helpers for the HTTP-level integration tests.
//!
//! `build_test_app` mirrors the router construction in `main.rs` (via the
//! shared [`build_app_router`]) so tests exercise the same middleware
//! stack that production uses. Requests are driven through the router
//! in-process with `tower::ServiceExt::oneshot`; the stub engine, by
//! contrast, is a real listener on an ephemeral port because the server
//! reaches it through its outbound HTTP client.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use groupcast_api::config::ServerConfig;
use groupcast_api::router::build_app_router;
use groupcast_api::state::AppState;
use groupcast_core::auth::AuthSecrets;
use groupcast_store::MemoryProgressStore;

pub const TEST_USERNAME: &str = "operator";
pub const TEST_PASSWORD: &str = "hunter2";

/// Build a test `ServerConfig` with secrets configured and a short
/// engine timeout. `engine_url` is `None` for tests that must not reach
/// an engine at all.
pub fn test_config(engine_url: Option<String>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        auth: Some(AuthSecrets {
            username: TEST_USERNAME.to_string(),
            password: TEST_PASSWORD.to_string(),
        }),
        engine_webhook_url: engine_url,
        engine_timeout_secs: 1,
        eviction_delay_secs: 60,
    }
}

/// Build the full application router from a config.
pub fn build_test_app(config: ServerConfig) -> Router {
    let store = Arc::new(MemoryProgressStore::with_eviction_delay(
        config.eviction_delay(),
    ));
    let state = AppState {
        config: Arc::new(config.clone()),
        store,
        http: reqwest::Client::new(),
    };
    build_app_router(state, &config)
}

/// POST a JSON body and return the raw response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST a raw (possibly non-JSON) body and return the raw response.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// GET a URI and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A stub workflow engine: one webhook route with a canned reply, plus a
/// hit counter so tests can assert how many outbound calls were made.
pub struct StubEngine {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl StubEngine {
    /// Number of webhook calls received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Spawn a stub engine replying with a fixed status and body.
pub async fn spawn_stub_engine(status: StatusCode, body: &'static str) -> StubEngine {
    spawn_stub_engine_with_delay(status, body, std::time::Duration::ZERO).await
}

/// Spawn a stub engine that waits `delay` before answering (for timeout
/// classification tests).
pub async fn spawn_stub_engine_with_delay(
    status: StatusCode,
    body: &'static str,
    delay: std::time::Duration,
) -> StubEngine {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_handler = Arc::clone(&hits);

    let app = Router::new().route(
        "/webhook",
        post(move || {
            hits_handler.fetch_add(1, Ordering::SeqCst);
            async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                (status, body).into_response()
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub engine bind");
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub engine serve");
    });

    StubEngine {
        url: format!("http://{addr}/webhook"),
        hits,
    }
}
