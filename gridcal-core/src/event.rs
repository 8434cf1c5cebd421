//! Calendar event types.
//!
//! `Event` is the stored record; `NewEvent` is the creation draft with
//! server-defaulted fields, and `EventPatch` is a partial update where only
//! supplied fields override. Wire names are camelCase to match the JSON API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GridCalError, GridCalResult};

/// Color applied to events created without an explicit one.
pub const DEFAULT_EVENT_COLOR: &str = "#3788d8";

/// A calendar event owned by a single user.
///
/// `start < end` is expected but deliberately not enforced: a zero or
/// negative duration event stays readable by id and is simply excluded from
/// time-axis rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "startDate")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub color: String,
    pub notifications: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the client when creating an event.
///
/// `id`, `created_at` and `updated_at` are assigned by storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "startDate")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub notifications: bool,
}

impl NewEvent {
    pub fn validate(&self) -> GridCalResult<()> {
        if self.title.trim().is_empty() {
            return Err(GridCalError::Validation(
                "event title must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn color_or_default(&self) -> String {
        self.color
            .clone()
            .unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string())
    }
}

/// Partial update for an event. A missing field leaves the stored value
/// untouched; for the nullable fields (description, location) an explicit
/// JSON `null` clears the value, so they are modelled as `Option<Option<_>>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub location: Option<Option<String>>,
    #[serde(rename = "startDate", default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(rename = "endDate", default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub all_day: Option<bool>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub notifications: Option<bool>,
}

impl EventPatch {
    pub fn validate(&self) -> GridCalResult<()> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(GridCalError::Validation(
                    "event title must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Merge this patch into `event`. Timestamps (`updated_at`) are the
    /// caller's responsibility.
    pub fn apply(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(location) = &self.location {
            event.location = location.clone();
        }
        if let Some(start) = self.start {
            event.start = start;
        }
        if let Some(end) = self.end {
            event.end = end;
        }
        if let Some(all_day) = self.all_day {
            event.all_day = all_day;
        }
        if let Some(color) = &self.color {
            event.color = color.clone();
        }
        if let Some(notifications) = self.notifications {
            event.notifications = notifications;
        }
    }
}
