//! Layout Engine: converts events into render-ready grid positions.
//!
//! Week/day views get full-resolution vertical layouts on a normalized
//! 24-hour axis (0% = 00:00, 100% = 24:00 of the day). Month/year views get
//! day buckets (event count + a few preview events) since the grid cell, not
//! a time axis, is the unit there.
//!
//! Everything here is a pure function over its inputs: the same (event, day)
//! pair always yields the same position, and a multi-day event produces one
//! independent record per day it touches.

use chrono::NaiveDate;
use serde::Serialize;

use crate::event::Event;
use crate::interval::{clamp_to_day, day_start, duration_minutes, MINUTES_PER_DAY};
use crate::select::occupies_day;
use crate::settings::TimeFormat;
use crate::window::{Granularity, ViewWindow};

/// Floor on rendered height so near-instant events stay visible.
pub const MIN_VISIBLE_HEIGHT: f64 = 1.0;

/// How many representative events a month/year cell carries.
pub const MAX_PREVIEW_EVENTS: usize = 3;

/// A timed event positioned on one day's 24-hour axis. Display times are the
/// event's true boundaries, not the clamped ones, so a bar truncated at a
/// day edge still shows when the event really starts and ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedEvent {
    pub event: Event,
    pub top_percentage: f64,
    pub height_percentage: f64,
    pub display_start_time: String,
    pub display_end_time: String,
}

/// Position `event` on the axis of `day`.
///
/// The event interval is clamped to `[00:00, next midnight)` of `day`; a
/// clamped interval of zero or negative length (zero-duration events, events
/// entirely outside the day) yields `None` and the event is simply not drawn
/// on this day.
pub fn position_on_day(
    event: &Event,
    day: NaiveDate,
    time_format: TimeFormat,
) -> Option<PositionedEvent> {
    let (effective_start, effective_end) = clamp_to_day(event.start, event.end, day)?;

    let start_minutes = duration_minutes(day_start(day), effective_start);
    let minutes = duration_minutes(effective_start, effective_end);

    Some(PositionedEvent {
        event: event.clone(),
        top_percentage: start_minutes / MINUTES_PER_DAY * 100.0,
        height_percentage: (minutes / MINUTES_PER_DAY * 100.0).max(MIN_VISIBLE_HEIGHT),
        display_start_time: time_format.format(&event.start),
        display_end_time: time_format.format(&event.end),
    })
}

/// One day column of a week/day view: all-day events listed flat, timed
/// events positioned on the vertical axis in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayColumn {
    pub date: NaiveDate,
    pub all_day: Vec<Event>,
    pub timed: Vec<PositionedEvent>,
}

/// Build the per-day columns for a week/day window.
pub fn day_columns(events: &[Event], window: &ViewWindow, time_format: TimeFormat) -> Vec<DayColumn> {
    window
        .days()
        .into_iter()
        .map(|day| {
            let all_day: Vec<Event> = events
                .iter()
                .filter(|e| e.all_day && occupies_day(e, day))
                .cloned()
                .collect();

            let mut timed: Vec<PositionedEvent> = events
                .iter()
                .filter(|e| !e.all_day)
                .filter_map(|e| position_on_day(e, day, time_format))
                .collect();
            timed.sort_by_key(|p| p.event.start);

            DayColumn { date: day, all_day, timed }
        })
        .collect()
}

/// One grid cell of a month/year view: an event count badge plus up to
/// `MAX_PREVIEW_EVENTS` representative events for dot/text previews.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub date: NaiveDate,
    pub event_count: usize,
    pub preview: Vec<Event>,
}

/// Build the day buckets for a month/year window.
pub fn day_buckets(events: &[Event], window: &ViewWindow) -> Vec<DayBucket> {
    window
        .days()
        .into_iter()
        .map(|day| {
            let hits: Vec<&Event> = events.iter().filter(|e| occupies_day(e, day)).collect();
            DayBucket {
                date: day,
                event_count: hits.len(),
                preview: hits.into_iter().take(MAX_PREVIEW_EVENTS).cloned().collect(),
            }
        })
        .collect()
}

/// Render-ready layout for one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ViewLayout {
    /// Week/day: full-resolution vertical layout per day.
    Grid { days: Vec<DayColumn> },
    /// Month/year: day-bucketed counts and previews.
    Buckets { days: Vec<DayBucket> },
}

/// Dispatch to the right layout shape for the granularity.
pub fn view_layout(
    events: &[Event],
    window: &ViewWindow,
    granularity: Granularity,
    time_format: TimeFormat,
) -> ViewLayout {
    match granularity {
        Granularity::Week | Granularity::Day => ViewLayout::Grid {
            days: day_columns(events, window, time_format),
        },
        Granularity::Month | Granularity::Year => ViewLayout::Buckets {
            days: day_buckets(events, window),
        },
    }
}
