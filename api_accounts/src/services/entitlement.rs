use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// Remaining-entitlement breakdown returned alongside a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub total_minutes_left: i64,
    pub is_expired: bool,
}

impl TimeLeft {
    fn expired() -> Self {
        TimeLeft {
            days: 0,
            hours: 0,
            minutes: 0,
            total_minutes_left: 0,
            is_expired: true,
        }
    }
}

/// Whole days of entitlement remaining at `now`. Never negative.
pub fn days_left(start: DateTime<Utc>, total_days: i64, now: DateTime<Utc>) -> i64 {
    let days_passed = (now - start).num_days();
    (total_days - days_passed).max(0)
}

/// Decomposes the time remaining until the subscription end into whole
/// days, hours and minutes, floor-truncated at every step.
///
/// Pure function of its inputs: identical arguments always yield an
/// identical breakdown.
pub fn time_left(start: DateTime<Utc>, total_days: i64, now: DateTime<Utc>) -> TimeLeft {
    let end = start + Duration::days(total_days);
    let ms_left = (end - now).num_milliseconds();
    if ms_left <= 0 {
        return TimeLeft::expired();
    }
    TimeLeft {
        days: ms_left / MS_PER_DAY,
        hours: ms_left % MS_PER_DAY / MS_PER_HOUR,
        minutes: ms_left % MS_PER_HOUR / MS_PER_MINUTE,
        total_minutes_left: ms_left / MS_PER_MINUTE,
        is_expired: false,
    }
}

/// Extension rule for subscription updates.
///
/// While entitlement remains, the added days stack on top of the current
/// total and the start date stays put. Once nothing remains, the
/// subscription restarts at `now` with exactly the added days.
///
/// Precondition: `added_days` is non-negative; callers validate.
pub fn extend(
    start: DateTime<Utc>,
    total_days: i64,
    added_days: i64,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, i64) {
    if days_left(start, total_days, now) > 0 {
        (start, total_days + added_days)
    } else {
        (now, added_days)
    }
}
