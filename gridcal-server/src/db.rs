//! SQLite-backed persistence for events and per-user settings.
//!
//! Timestamps are stored as fixed-width RFC3339 strings in UTC
//! (`2024-03-15T09:00:00.000Z`), so lexicographic SQL comparisons match
//! chronological order. Malformed stored values fail row mapping with a
//! typed error instead of leaking bad dates into the core.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use gridcal_core::{
    CalendarSettings, Event, EventDisplayMode, EventPatch, EventStore, GridCalError,
    GridCalResult, NewEvent, SettingsPatch, Theme, TimeFormat, WeekStart,
};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> GridCalResult<Self> {
        let conn = Connection::open(path).map_err(storage)?;
        init_schema(&conn)?;
        Ok(SqliteStore { conn: Mutex::new(conn) })
    }

    pub fn open_in_memory() -> GridCalResult<Self> {
        let conn = Connection::open_in_memory().map_err(storage)?;
        init_schema(&conn)?;
        Ok(SqliteStore { conn: Mutex::new(conn) })
    }

    fn conn(&self) -> GridCalResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| GridCalError::Storage("connection lock poisoned".to_string()))
    }
}

fn init_schema(conn: &Connection) -> GridCalResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS events (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id       INTEGER NOT NULL,
            title         TEXT NOT NULL,
            description   TEXT,
            location      TEXT,
            start_date    TEXT NOT NULL,
            end_date      TEXT NOT NULL,
            all_day       INTEGER NOT NULL DEFAULT 0,
            color         TEXT NOT NULL,
            notifications INTEGER NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_events_user_range
            ON events (user_id, start_date, end_date);
        CREATE TABLE IF NOT EXISTS calendar_settings (
            user_id            INTEGER PRIMARY KEY,
            theme              TEXT NOT NULL,
            start_of_week      TEXT NOT NULL,
            time_format        TEXT NOT NULL,
            event_display_mode TEXT NOT NULL
        );",
    )
    .map_err(storage)
}

fn storage(err: rusqlite::Error) -> GridCalError {
    GridCalError::Storage(err.to_string())
}

fn format_ts(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Truncate to millisecond precision so returned values match what the
/// column round-trips.
fn truncate_ts(t: DateTime<Utc>) -> DateTime<Utc> {
    t.with_nanosecond(t.nanosecond() / 1_000_000 * 1_000_000).unwrap()
}

fn parse_ts(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(GridCalError::Validation(format!(
                    "malformed timestamp: {s}"
                ))),
            )
        })
}

fn map_event_row(row: &Row) -> rusqlite::Result<Event> {
    let start_str: String = row.get("start_date")?;
    let end_str: String = row.get("end_date")?;
    let created_str: String = row.get("created_at")?;
    let updated_str: String = row.get("updated_at")?;

    Ok(Event {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        location: row.get("location")?,
        start: parse_ts(5, &start_str)?,
        end: parse_ts(6, &end_str)?,
        all_day: row.get::<_, i64>("all_day")? != 0,
        color: row.get("color")?,
        notifications: row.get::<_, i64>("notifications")? != 0,
        created_at: parse_ts(10, &created_str)?,
        updated_at: parse_ts(11, &updated_str)?,
    })
}

fn setting_column<T>(
    column: usize,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    parse(value).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            Box::new(GridCalError::Validation(format!(
                "invalid settings value: {value}"
            ))),
        )
    })
}

fn map_settings_row(row: &Row) -> rusqlite::Result<CalendarSettings> {
    let theme: String = row.get("theme")?;
    let start_of_week: String = row.get("start_of_week")?;
    let time_format: String = row.get("time_format")?;
    let event_display_mode: String = row.get("event_display_mode")?;

    Ok(CalendarSettings {
        theme: setting_column(1, &theme, Theme::from_str)?,
        start_of_week: setting_column(2, &start_of_week, WeekStart::from_str)?,
        time_format: setting_column(3, &time_format, TimeFormat::from_str)?,
        event_display_mode: setting_column(4, &event_display_mode, EventDisplayMode::from_str)?,
    })
}

impl EventStore for SqliteStore {
    fn event(&self, id: i64) -> GridCalResult<Option<Event>> {
        let conn = self.conn()?;
        conn.query_row("SELECT * FROM events WHERE id = ?1", params![id], map_event_row)
            .optional()
            .map_err(storage)
    }

    fn events_in_range(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> GridCalResult<Vec<Event>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT * FROM events
                 WHERE user_id = ?1 AND start_date < ?2 AND end_date > ?3
                 ORDER BY start_date ASC",
            )
            .map_err(storage)?;

        let rows = stmt
            .query_map(
                params![user_id, format_ts(end), format_ts(start)],
                map_event_row,
            )
            .map_err(storage)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(storage)?);
        }
        Ok(out)
    }

    fn create_event(&self, draft: NewEvent) -> GridCalResult<Event> {
        draft.validate()?;
        let now = truncate_ts(Utc::now());
        let start = truncate_ts(draft.start);
        let end = truncate_ts(draft.end);
        let color = draft.color_or_default();

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO events
                (user_id, title, description, location, start_date, end_date,
                 all_day, color, notifications, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                draft.user_id,
                draft.title,
                draft.description,
                draft.location,
                format_ts(start),
                format_ts(end),
                draft.all_day as i64,
                color,
                draft.notifications as i64,
                format_ts(now),
                format_ts(now),
            ],
        )
        .map_err(storage)?;

        Ok(Event {
            id: conn.last_insert_rowid(),
            user_id: draft.user_id,
            title: draft.title,
            description: draft.description,
            location: draft.location,
            start,
            end,
            all_day: draft.all_day,
            color,
            notifications: draft.notifications,
            created_at: now,
            updated_at: now,
        })
    }

    fn update_event(&self, id: i64, patch: EventPatch) -> GridCalResult<Option<Event>> {
        patch.validate()?;
        let conn = self.conn()?;

        let existing = conn
            .query_row("SELECT * FROM events WHERE id = ?1", params![id], map_event_row)
            .optional()
            .map_err(storage)?;
        let Some(mut event) = existing else {
            return Ok(None);
        };

        patch.apply(&mut event);
        event.start = truncate_ts(event.start);
        event.end = truncate_ts(event.end);
        event.updated_at = truncate_ts(Utc::now());

        conn.execute(
            "UPDATE events SET
                title = ?2, description = ?3, location = ?4, start_date = ?5,
                end_date = ?6, all_day = ?7, color = ?8, notifications = ?9,
                updated_at = ?10
             WHERE id = ?1",
            params![
                id,
                event.title,
                event.description,
                event.location,
                format_ts(event.start),
                format_ts(event.end),
                event.all_day as i64,
                event.color,
                event.notifications as i64,
                format_ts(event.updated_at),
            ],
        )
        .map_err(storage)?;

        Ok(Some(event))
    }

    fn delete_event(&self, id: i64) -> GridCalResult<bool> {
        let conn = self.conn()?;
        let deleted = conn
            .execute("DELETE FROM events WHERE id = ?1", params![id])
            .map_err(storage)?;
        Ok(deleted > 0)
    }

    fn settings(&self, user_id: i64) -> GridCalResult<CalendarSettings> {
        let conn = self.conn()?;
        let stored = conn
            .query_row(
                "SELECT * FROM calendar_settings WHERE user_id = ?1",
                params![user_id],
                map_settings_row,
            )
            .optional()
            .map_err(storage)?;
        Ok(stored.unwrap_or_default())
    }

    fn update_settings(
        &self,
        user_id: i64,
        patch: SettingsPatch,
    ) -> GridCalResult<CalendarSettings> {
        let conn = self.conn()?;
        // Read-modify-write under one lock acquisition; last write wins
        // across concurrent requests.
        let current = conn
            .query_row(
                "SELECT * FROM calendar_settings WHERE user_id = ?1",
                params![user_id],
                map_settings_row,
            )
            .optional()
            .map_err(storage)?
            .unwrap_or_default();

        let merged = current.merged(patch);

        conn.execute(
            "INSERT OR REPLACE INTO calendar_settings
                (user_id, theme, start_of_week, time_format, event_display_mode)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user_id,
                merged.theme.as_str(),
                merged.start_of_week.as_str(),
                merged.time_format.as_str(),
                merged.event_display_mode.as_str(),
            ],
        )
        .map_err(storage)?;

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    fn draft(user_id: i64, title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> NewEvent {
        NewEvent {
            user_id,
            title: title.to_string(),
            description: None,
            location: None,
            start,
            end,
            all_day: false,
            color: None,
            notifications: false,
        }
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, h, 0, 0).unwrap()
    }

    #[test]
    fn create_and_fetch_round_trip() {
        let store = store();
        let created = store
            .create_event(draft(7, "Standup", at(15, 9), at(15, 10)))
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.color, gridcal_core::DEFAULT_EVENT_COLOR);

        let fetched = store.event(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(store.event(9999).unwrap().is_none());
    }

    #[test]
    fn empty_title_is_rejected_on_create() {
        let store = store();
        let result = store.create_event(draft(7, "  ", at(15, 9), at(15, 10)));
        assert!(matches!(result, Err(GridCalError::Validation(_))));
    }

    #[test]
    fn range_query_is_half_open_and_scoped_to_the_user() {
        let store = store();
        store.create_event(draft(7, "inside", at(15, 9), at(15, 10))).unwrap();
        store.create_event(draft(7, "before", at(14, 9), at(15, 0))).unwrap();
        store.create_event(draft(7, "after", at(16, 0), at(16, 1))).unwrap();
        store.create_event(draft(8, "other user", at(15, 9), at(15, 10))).unwrap();

        let found = store.events_in_range(7, at(15, 0), at(16, 0)).unwrap();
        let titles: Vec<&str> = found.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["inside"]);
    }

    #[test]
    fn negative_duration_is_stored_as_given() {
        let store = store();
        let created = store
            .create_event(draft(7, "backwards", at(15, 10), at(15, 9)))
            .unwrap();
        let fetched = store.event(created.id).unwrap().unwrap();
        assert!(fetched.end < fetched.start);
    }

    #[test]
    fn update_merges_and_bumps_updated_at() {
        let store = store();
        let created = store
            .create_event(draft(7, "Standup", at(15, 9), at(15, 10)))
            .unwrap();

        let patch: EventPatch =
            serde_json::from_str(r#"{"title": "Retro", "location": "Room 2"}"#).unwrap();
        let updated = store.update_event(created.id, patch).unwrap().unwrap();

        assert_eq!(updated.title, "Retro");
        assert_eq!(updated.location.as_deref(), Some("Room 2"));
        assert_eq!(updated.start, created.start);
        assert!(updated.updated_at >= created.updated_at);

        assert!(store.update_event(9999, EventPatch::default()).unwrap().is_none());
    }

    #[test]
    fn delete_signals_presence() {
        let store = store();
        let created = store
            .create_event(draft(7, "Standup", at(15, 9), at(15, 10)))
            .unwrap();
        assert!(store.delete_event(created.id).unwrap());
        assert!(!store.delete_event(created.id).unwrap());
        assert!(store.event(created.id).unwrap().is_none());
    }

    #[test]
    fn settings_default_until_first_update() {
        let store = store();
        assert_eq!(store.settings(7).unwrap(), CalendarSettings::default());

        let patch: SettingsPatch = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        let updated = store.update_settings(7, patch).unwrap();
        assert_eq!(updated.theme, Theme::Dark);
        assert_eq!(updated.time_format, TimeFormat::TwelveHour);

        // Second partial update keeps earlier changes
        let patch: SettingsPatch = serde_json::from_str(r#"{"timeFormat": "24h"}"#).unwrap();
        let updated = store.update_settings(7, patch).unwrap();
        assert_eq!(updated.theme, Theme::Dark);
        assert_eq!(updated.time_format, TimeFormat::TwentyFourHour);

        assert_eq!(store.settings(7).unwrap(), updated);
        // Other users are untouched
        assert_eq!(store.settings(8).unwrap(), CalendarSettings::default());
    }
}
