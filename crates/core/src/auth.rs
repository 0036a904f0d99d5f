//! Shared-secret credential check.
//!
//! Credentials travel in the request body and are compared against the
//! `AUTH_USERNAME` / `AUTH_PASSWORD` pair from server configuration.
//! The comparison is constant-time so response timing does not leak how
//! much of a guessed credential matched.

use serde::Deserialize;

/// Credentials submitted by the client, either on their own
/// (`POST /authenticate`) or embedded in a submission (`auth` field).
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// The username/password pair configured on the server.
#[derive(Debug, Clone)]
pub struct AuthSecrets {
    pub username: String,
    pub password: String,
}

/// Outcome of a credential check.
///
/// `Misconfigured` is a server-side fault (secrets absent or empty) and is
/// deliberately distinct from a bad credential: the former is a 500, the
/// latter a 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Authorized,
    Unauthorized,
    Misconfigured,
}

/// Check submitted credentials against the configured secrets.
///
/// Authorized iff secrets are configured, both non-empty, and both match
/// exactly. Both fields are always compared so the decision takes the same
/// time regardless of which one mismatches.
pub fn check_credentials(supplied: &Credentials, configured: Option<&AuthSecrets>) -> AuthDecision {
    let Some(secrets) = configured else {
        return AuthDecision::Misconfigured;
    };
    if secrets.username.is_empty() || secrets.password.is_empty() {
        return AuthDecision::Misconfigured;
    }

    let username_ok = constant_time_eq(supplied.username.as_bytes(), secrets.username.as_bytes());
    let password_ok = constant_time_eq(supplied.password.as_bytes(), secrets.password.as_bytes());

    if username_ok & password_ok {
        AuthDecision::Authorized
    } else {
        AuthDecision::Unauthorized
    }
}

/// Byte-wise equality that does not short-circuit on the first mismatch.
///
/// Length differences still return early; the secret length is not
/// considered sensitive here.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
