//! Daily digest window and schedule arithmetic.
//!
//! The digest covers every question created during the 24 hours before the
//! run time, boundary included. The run time is always passed in explicitly.

use chrono::{Duration, NaiveTime, TimeZone, Utc};

use crate::types::Timestamp;

/// Length of the digest window.
pub const DIGEST_WINDOW_HOURS: i64 = 24;

/// Start of the digest window for a run at `now` (inclusive).
pub fn window_start(now: Timestamp) -> Timestamp {
    now - Duration::hours(DIGEST_WINDOW_HOURS)
}

/// Whether a question created at `created_at` belongs in the digest run at
/// `now`.
pub fn in_window(created_at: Timestamp, now: Timestamp) -> bool {
    created_at >= window_start(now)
}

/// The next scheduled run strictly after `now`, at `hour`:00 UTC.
///
/// `hour` values above 23 are clamped to 23.
pub fn next_run_after(now: Timestamp, hour: u32) -> Timestamp {
    let time = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let today = Utc.from_utc_datetime(&now.date_naive().and_time(time));
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}
