use chrono::{TimeZone, Utc};

/// Formats an epoch-millisecond timestamp as "HH:MM:SS" UTC for the
/// terminal display. Out-of-range timestamps render as placeholders
/// rather than panicking.
pub fn epoch_ms_to_time_string(epoch_ms: i64) -> String {
    match Utc.timestamp_millis_opt(epoch_ms).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}
