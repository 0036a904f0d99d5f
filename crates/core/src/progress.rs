//! Progress record model and field coercion.
//!
//! The workflow engine reports progress with whatever field types its
//! expression nodes happen to produce, so the numeric fields arrive as
//! loose JSON and are coerced here rather than rejected: percentages are
//! clamped into `0..=100` and anything non-numeric collapses to zero.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Recognized status values. The set is open: unrecognized statuses are
// stored and relayed verbatim, only `completed` changes store behaviour.
pub const STATUS_PROCESSING: &str = "processing";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_ERROR: &str = "error";

/// Placeholder status served to a poller before the first engine update
/// for its execution id arrives.
pub const STATUS_CONNECTED: &str = "connected";

/// Last-known status snapshot for one execution id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub status: String,
    /// Always within `0..=100`.
    pub percentage: u8,
    pub message: String,
    pub total_items: i64,
    /// RFC 3339 timestamp stamped server-side when the record was written.
    pub timestamp: String,
}

impl ProgressRecord {
    /// Build a record from raw engine-reported fields, coercing and
    /// clamping the numeric ones and stamping the current time.
    pub fn from_update(
        status: Option<&str>,
        percentage: Option<&Value>,
        message: Option<&str>,
        total_items: Option<&Value>,
    ) -> Self {
        Self {
            status: status.unwrap_or(STATUS_PROCESSING).to_string(),
            percentage: coerce_percentage(percentage),
            message: message.unwrap_or_default().to_string(),
            total_items: coerce_integer(total_items),
            timestamp: now_timestamp(),
        }
    }

    /// Whether this record marks the end of a successful run.
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }
}

/// Current time as an RFC 3339 string with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Coerce a loose JSON value to an integer percentage clamped to `0..=100`.
///
/// Numbers are truncated toward zero; numeric strings parse; everything
/// else (absent, null, arrays, non-numeric strings) coerces to 0.
pub fn coerce_percentage(value: Option<&Value>) -> u8 {
    coerce_f64(value).map_or(0, |p| (p as i64).clamp(0, 100) as u8)
}

/// Coerce a loose JSON value to an integer, defaulting to 0.
pub fn coerce_integer(value: Option<&Value>) -> i64 {
    coerce_f64(value).map_or(0, |n| n as i64)
}

fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
