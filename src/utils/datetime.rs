use chrono::{DateTime, Utc};

const TURNITIN_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// 当前 UTC 时间，格式如 `2024-01-01T12:00:00Z`
pub fn current_timestamp() -> String {
    format_timestamp(Utc::now())
}

pub fn format_timestamp(datetime: DateTime<Utc>) -> String {
    datetime.format(TURNITIN_TIMESTAMP_FORMAT).to_string()
}
