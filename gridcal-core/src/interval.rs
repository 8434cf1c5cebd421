//! Interval math primitives on the UTC timeline.
//!
//! All overlap tests are half-open `[start, end)`. Day axes for layout use
//! the exclusive next-midnight bound so a full day measures exactly 1440
//! minutes; window boundaries carry the inclusive last instant at
//! millisecond precision (23:59:59.999) for display.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc, Weekday};

pub const MINUTES_PER_DAY: f64 = 1440.0;

/// First instant of `day` (00:00:00 UTC).
pub fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_opt(0, 0, 0).unwrap().and_utc()
}

/// Last instant of `day` at millisecond precision (23:59:59.999 UTC).
pub fn day_end(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc()
}

/// Exclusive upper bound of `day`: midnight of the following day.
pub fn next_midnight(day: NaiveDate) -> DateTime<Utc> {
    day_start(day.succ_opt().unwrap())
}

/// Half-open overlap test: does `[a_start, a_end)` intersect `[b_start, b_end)`?
/// Intervals that merely touch at a boundary do not overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Signed duration from `start` to `end` in fractional minutes.
pub fn duration_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 60_000.0
}

/// Minutes elapsed since midnight of the day containing `t`.
pub fn minutes_since_midnight(t: DateTime<Utc>) -> f64 {
    duration_minutes(day_start(t.date_naive()), t)
}

/// Most recent occurrence of `week_start` on or before `anchor`.
pub fn week_start_on_or_before(anchor: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = (7 + anchor.weekday().num_days_from_monday() as i64
        - week_start.num_days_from_monday() as i64)
        % 7;
    anchor - Duration::days(offset)
}

/// First day of `anchor`'s month.
pub fn month_start(anchor: NaiveDate) -> NaiveDate {
    anchor.with_day(1).unwrap()
}

/// Last day of `anchor`'s month.
pub fn month_end(anchor: NaiveDate) -> NaiveDate {
    let first = month_start(anchor);
    first
        .checked_add_months(Months::new(1))
        .unwrap()
        .pred_opt()
        .unwrap()
}

/// First day of `anchor`'s year (Jan 1).
pub fn year_start(anchor: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(anchor.year(), 1, 1).unwrap()
}

/// Last day of `anchor`'s year (Dec 31).
pub fn year_end(anchor: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(anchor.year(), 12, 31).unwrap()
}

/// Clamp `[start, end)` to the axis of `day`, i.e. `[00:00, next midnight)`.
/// Returns `None` when the clamped interval is empty, which covers both
/// zero/negative durations and intervals entirely outside the day.
pub fn clamp_to_day(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    day: NaiveDate,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let lo = start.max(day_start(day));
    let hi = end.min(next_midnight(day));
    (lo < hi).then_some((lo, hi))
}
