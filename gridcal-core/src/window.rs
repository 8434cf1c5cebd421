//! Range Resolver: anchor date + view granularity -> visible window.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::{day_end, day_start, month_end, month_start, week_start_on_or_before, year_end, year_start};
use crate::settings::WeekStart;

/// Zoom level of the calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Year,
    Month,
    Week,
    Day,
}

/// The visible date window for one view: `[start, end)` for overlap tests,
/// with `end` carried as the inclusive last instant (23:59:59.999) of the
/// final day. Derived on every anchor/granularity change, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub label: String,
}

impl ViewWindow {
    /// Every calendar day the window covers, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut day = self.start.date_naive();
        let last = self.end.date_naive();
        while day <= last {
            days.push(day);
            day = day.succ_opt().unwrap();
        }
        days
    }
}

/// Resolve the visible window for `anchor` at the given granularity.
/// `week_start` only affects Week windows.
pub fn resolve_window(anchor: NaiveDate, granularity: Granularity, week_start: WeekStart) -> ViewWindow {
    match granularity {
        Granularity::Year => ViewWindow {
            start: day_start(year_start(anchor)),
            end: day_end(year_end(anchor)),
            label: anchor.format("%Y").to_string(),
        },
        Granularity::Month => ViewWindow {
            start: day_start(month_start(anchor)),
            end: day_end(month_end(anchor)),
            label: anchor.format("%B %Y").to_string(),
        },
        Granularity::Week => {
            let first = week_start_on_or_before(anchor, week_start.weekday());
            let last = first + Duration::days(6);
            ViewWindow {
                start: day_start(first),
                end: day_end(last),
                label: week_label(first, last),
            }
        }
        Granularity::Day => ViewWindow {
            start: day_start(anchor),
            end: day_end(anchor),
            label: anchor.format("%A, %B %-d, %Y").to_string(),
        },
    }
}

fn week_label(first: NaiveDate, last: NaiveDate) -> String {
    if first.year() != last.year() {
        format!("{} - {}", first.format("%b %-d, %Y"), last.format("%b %-d, %Y"))
    } else if first.month() != last.month() {
        format!("{} - {}, {}", first.format("%b %-d"), last.format("%b %-d"), first.format("%Y"))
    } else {
        format!("{} - {}, {}", first.format("%b %-d"), last.format("%-d"), first.format("%Y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_window() {
        let w = resolve_window(date(2024, 3, 15), Granularity::Month, WeekStart::Sunday);
        assert_eq!(w.start, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(
            w.end,
            date(2024, 3, 31).and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc()
        );
        assert_eq!(w.label, "March 2024");
        assert_eq!(w.days().len(), 31);
    }

    #[test]
    fn week_window_sunday_start() {
        let w = resolve_window(date(2024, 3, 15), Granularity::Week, WeekStart::Sunday);
        assert_eq!(w.start, Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap());
        assert_eq!(
            w.end,
            date(2024, 3, 16).and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc()
        );
        assert_eq!(w.days().len(), 7);
        assert_eq!(w.label, "Mar 10 - 16, 2024");
    }

    #[test]
    fn week_window_monday_start() {
        let w = resolve_window(date(2024, 3, 15), Granularity::Week, WeekStart::Monday);
        assert_eq!(w.start, Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap());
        assert_eq!(w.end.date_naive(), date(2024, 3, 17));
    }

    #[test]
    fn week_label_across_boundaries() {
        let w = resolve_window(date(2024, 1, 1), Granularity::Week, WeekStart::Sunday);
        // Dec 31 2023 - Jan 6 2024 crosses the year boundary
        assert_eq!(w.label, "Dec 31, 2023 - Jan 6, 2024");

        let w = resolve_window(date(2024, 3, 31), Granularity::Week, WeekStart::Sunday);
        assert_eq!(w.label, "Mar 31 - Apr 6, 2024");
    }

    #[test]
    fn year_window() {
        let w = resolve_window(date(2024, 7, 4), Granularity::Year, WeekStart::Sunday);
        assert_eq!(w.start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(w.end.date_naive(), date(2024, 12, 31));
        assert_eq!(w.label, "2024");
        assert_eq!(w.days().len(), 366); // leap year
    }

    #[test]
    fn day_window() {
        let w = resolve_window(date(2024, 3, 15), Granularity::Day, WeekStart::Monday);
        assert_eq!(w.start, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
        assert_eq!(w.days(), vec![date(2024, 3, 15)]);
        assert_eq!(w.label, "Friday, March 15, 2024");
    }
}
