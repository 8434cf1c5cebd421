//! Narrow persistence interface consumed by the HTTP boundary.

use chrono::{DateTime, Utc};

use crate::error::GridCalResult;
use crate::event::{Event, EventPatch, NewEvent};
use crate::settings::{CalendarSettings, SettingsPatch};

/// The persistence collaborator. Implementations own their transaction
/// scope per call; absent records come back as `None`/`false`, never as
/// errors.
pub trait EventStore {
    fn event(&self, id: i64) -> GridCalResult<Option<Event>>;

    /// All of `user_id`'s events whose `[start, end)` interval overlaps
    /// `[start, end)`. Implementations may filter loosely; callers re-check
    /// with the selector.
    fn events_in_range(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> GridCalResult<Vec<Event>>;

    fn create_event(&self, draft: NewEvent) -> GridCalResult<Event>;

    /// Partial update; `None` when no event with `id` exists.
    fn update_event(&self, id: i64, patch: EventPatch) -> GridCalResult<Option<Event>>;

    /// `true` when an event was deleted, `false` when `id` was unknown.
    fn delete_event(&self, id: i64) -> GridCalResult<bool>;

    /// Stored settings, or the defaults when the user has no row yet.
    fn settings(&self, user_id: i64) -> GridCalResult<CalendarSettings>;

    /// Read-modify-write merge; lazily creates the row on first update.
    fn update_settings(
        &self,
        user_id: i64,
        patch: SettingsPatch,
    ) -> GridCalResult<CalendarSettings>;
}
