//! Event Selector: window filtering and all-day/timed partitioning.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::event::Event;
use crate::interval::{day_start, next_midnight, overlaps};

/// Events whose `[start, end)` interval overlaps `[start, end)` of the
/// query. A pure filter: input order is preserved, no sorting happens here.
pub fn select_in_window<'a>(
    events: &'a [Event],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| overlaps(e.start, e.end, start, end))
        .collect()
}

/// Split a selection into (all-day, timed) subsets by the `all_day` flag.
pub fn partition_all_day<'a>(events: &[&'a Event]) -> (Vec<&'a Event>, Vec<&'a Event>) {
    events.iter().copied().partition(|e| e.all_day)
}

/// The calendar days an all-day event covers: its start date through the
/// date of `end - 1ms` (half-open on day boundaries). A degenerate event
/// (`end <= start`) covers its start date only.
pub fn all_day_span(event: &Event) -> (NaiveDate, NaiveDate) {
    let first = event.start.date_naive();
    let last = if event.end > event.start {
        (event.end - Duration::milliseconds(1)).date_naive()
    } else {
        first
    };
    (first, last.max(first))
}

/// Does `event` touch calendar day `day`? All-day events compare on date
/// boundaries only; timed events use the half-open day axis.
pub fn occupies_day(event: &Event, day: NaiveDate) -> bool {
    if event.all_day {
        let (first, last) = all_day_span(event);
        first <= day && day <= last
    } else {
        overlaps(event.start, event.end, day_start(day), next_midnight(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DEFAULT_EVENT_COLOR;
    use chrono::TimeZone;

    fn event(id: i64, start: DateTime<Utc>, end: DateTime<Utc>, all_day: bool) -> Event {
        Event {
            id,
            user_id: 1,
            title: format!("event-{id}"),
            description: None,
            location: None,
            start,
            end,
            all_day,
            color: DEFAULT_EVENT_COLOR.to_string(),
            notifications: false,
            created_at: start,
            updated_at: start,
        }
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap()
    }

    #[test]
    fn selection_follows_the_overlap_law() {
        let events = vec![
            event(1, at(10, 9), at(10, 10), false),  // inside
            event(2, at(9, 9), at(10, 0), false),    // ends exactly at window start
            event(3, at(12, 0), at(13, 0), false),   // starts exactly at window end
            event(4, at(9, 12), at(13, 12), false),  // spans the whole window
        ];
        let start = at(10, 0);
        let end = at(12, 0);

        let selected = select_in_window(&events, start, end);
        let ids: Vec<i64> = selected.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn selection_preserves_input_order() {
        let events = vec![
            event(5, at(11, 9), at(11, 10), false),
            event(3, at(10, 9), at(10, 10), false),
            event(9, at(10, 12), at(10, 13), false),
        ];
        let selected = select_in_window(&events, at(10, 0), at(12, 0));
        let ids: Vec<i64> = selected.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }

    #[test]
    fn partition_splits_by_flag() {
        let events = vec![
            event(1, at(10, 0), at(11, 0), true),
            event(2, at(10, 9), at(10, 10), false),
            event(3, at(11, 0), at(12, 0), true),
        ];
        let refs: Vec<&Event> = events.iter().collect();
        let (all_day, timed) = partition_all_day(&refs);
        assert_eq!(all_day.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(timed.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn all_day_span_ignores_clock_time() {
        // Ends 00:00 on the 12th: the 12th itself is not covered
        let e = event(1, at(10, 15), Utc.with_ymd_and_hms(2024, 3, 12, 0, 0, 0).unwrap(), true);
        let (first, last) = all_day_span(&e);
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());

        assert!(occupies_day(&e, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
        assert!(occupies_day(&e, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()));
        assert!(!occupies_day(&e, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()));
    }

    #[test]
    fn degenerate_all_day_covers_its_start_date() {
        let e = event(1, at(10, 15), at(10, 15), true);
        let (first, last) = all_day_span(&e);
        assert_eq!(first, last);
        assert!(occupies_day(&e, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
    }
}
