use chrono::{DateTime, Local, Utc};

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn format_timestamp_local(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}
