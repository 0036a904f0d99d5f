use std::time::Duration;

use groupcast_core::auth::AuthSecrets;

/// Server configuration loaded from environment variables.
///
/// Networking fields have sensible defaults for local development. The
/// shared-secret credentials and the engine webhook URL have no defaults:
/// they stay `None` when unset, and the affected endpoints report a
/// server-misconfiguration error per request instead of the process
/// refusing to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Shared-secret credentials from `AUTH_USERNAME` / `AUTH_PASSWORD`;
    /// `None` unless both are set.
    pub auth: Option<AuthSecrets>,
    /// External workflow-engine webhook URL from `ENGINE_WEBHOOK_URL`.
    pub engine_webhook_url: Option<String>,
    /// Outbound engine call timeout in seconds (default: `20`).
    pub engine_timeout_secs: u64,
    /// Delay before a completed progress record is evicted, in seconds
    /// (default: `1800`, i.e. 30 minutes).
    pub eviction_delay_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default     |
    /// |--------------------------|-------------|
    /// | `HOST`                   | `0.0.0.0`   |
    /// | `PORT`                   | `3000`      |
    /// | `CORS_ORIGINS`           | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`        |
    /// | `AUTH_USERNAME`          | unset       |
    /// | `AUTH_PASSWORD`          | unset       |
    /// | `ENGINE_WEBHOOK_URL`     | unset       |
    /// | `ENGINE_TIMEOUT_SECS`    | `20`        |
    /// | `PROGRESS_EVICTION_SECS` | `1800`      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let auth = match (
            std::env::var("AUTH_USERNAME").ok(),
            std::env::var("AUTH_PASSWORD").ok(),
        ) {
            (Some(username), Some(password)) => Some(AuthSecrets { username, password }),
            _ => None,
        };

        let engine_webhook_url = std::env::var("ENGINE_WEBHOOK_URL").ok();

        let engine_timeout_secs: u64 = std::env::var("ENGINE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("ENGINE_TIMEOUT_SECS must be a valid u64");

        let eviction_delay_secs: u64 = std::env::var("PROGRESS_EVICTION_SECS")
            .unwrap_or_else(|_| "1800".into())
            .parse()
            .expect("PROGRESS_EVICTION_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            auth,
            engine_webhook_url,
            engine_timeout_secs,
            eviction_delay_secs,
        }
    }

    /// Engine call timeout as a [`Duration`].
    pub fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.engine_timeout_secs)
    }

    /// Progress eviction delay as a [`Duration`].
    pub fn eviction_delay(&self) -> Duration {
        Duration::from_secs(self.eviction_delay_secs)
    }
}
