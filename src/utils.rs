/// Utility functions
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::Value;

/// Extract number from JSON value
pub fn num(v: &Value) -> Option<f64> {
    if let Some(x) = v.as_f64() {
        return Some(x);
    }
    if let Some(s) = v.as_str() {
        return s.parse::<f64>().ok();
    }
    None
}

/// Render an epoch-millisecond event time as an ISO-8601 UTC string with a
/// trailing Z. Out-of-range inputs fall back to the epoch origin.
pub fn format_event_time(epoch_ms: i64) -> String {
    let dt = Utc
        .timestamp_millis_opt(epoch_ms)
        .single()
        .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap());
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current UTC time rendered the same way as event times.
pub fn iso_utc(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
