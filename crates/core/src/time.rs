//! Display formatting for sample labels and log query bounds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Label attached to realtime samples: zero-padded `HH:MM:SS`.
pub fn time_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M:%S").to_string()
}

/// Full timestamp as the monitoring-data endpoint expects it.
pub fn log_timestamp(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Date-only form shown on the log date pickers.
pub fn view_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// First and last instant of `date` (`00:00:00.000` .. `23:59:59.999`).
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
        .map(|t| date.and_time(t))
        .unwrap_or(start);
    (start, end)
}
