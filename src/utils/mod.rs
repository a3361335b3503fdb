pub mod config;

use chrono::{DateTime, Utc};

/// Id derived from the creation instant (milliseconds since the epoch).
/// Two records created within the same millisecond share an id.
pub fn time_id(created_at: DateTime<Utc>) -> String {
    created_at.timestamp_millis().to_string()
}
