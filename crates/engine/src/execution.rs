//! Execution id extraction and fallback synthesis.
//!
//! The engine's webhook reply has gone through several shapes over time.
//! All of them are accepted, in priority order; when none match, a local
//! id is synthesized so the caller always receives a usable identifier.

use serde_json::Value;
use uuid::Uuid;

/// Extract an execution id from an engine reply body.
///
/// Candidate fields, highest priority first:
/// `executionId`, `id`, `execution.id`, `data.executionId`.
/// Numeric ids are accepted and rendered as strings; empty strings are
/// treated as absent.
pub fn extract_execution_id(reply: &Value) -> Option<String> {
    [
        &reply["executionId"],
        &reply["id"],
        &reply["execution"]["id"],
        &reply["data"]["executionId"],
    ]
    .into_iter()
    .find_map(id_from_value)
}

/// Synthesize a fallback execution id from current time plus random bits.
///
/// UUIDv7 is time-ordered, so synthesized ids remain sortable by
/// submission time and cannot collide with each other.
pub fn fallback_execution_id() -> String {
    format!("exec-{}", Uuid::now_v7().simple())
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
