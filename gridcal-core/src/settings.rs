//! Per-user display settings.
//!
//! Every field is a closed enum, so an invalid value fails deserialization
//! at the boundary instead of being silently coerced. A user without a
//! stored row gets `CalendarSettings::default()`; the row is only created on
//! first update.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

/// Which day starts the week row in week/month grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekStart::Sunday => "sunday",
            WeekStart::Monday => "monday",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sunday" => Some(WeekStart::Sunday),
            "monday" => Some(WeekStart::Monday),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl TimeFormat {
    /// Format the clock time of `t` for display ("9:05 PM" / "21:05").
    pub fn format(self, t: &DateTime<Utc>) -> String {
        match self {
            TimeFormat::TwelveHour => t.format("%-I:%M %p").to_string(),
            TimeFormat::TwentyFourHour => t.format("%H:%M").to_string(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeFormat::TwelveHour => "12h",
            TimeFormat::TwentyFourHour => "24h",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "12h" => Some(TimeFormat::TwelveHour),
            "24h" => Some(TimeFormat::TwentyFourHour),
            _ => None,
        }
    }
}

/// How events are rendered inside month/year grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventDisplayMode {
    Dots,
    Text,
    Box,
    Color,
}

impl EventDisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EventDisplayMode::Dots => "dots",
            EventDisplayMode::Text => "text",
            EventDisplayMode::Box => "box",
            EventDisplayMode::Color => "color",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dots" => Some(EventDisplayMode::Dots),
            "text" => Some(EventDisplayMode::Text),
            "box" => Some(EventDisplayMode::Box),
            "color" => Some(EventDisplayMode::Color),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSettings {
    pub theme: Theme,
    pub start_of_week: WeekStart,
    pub time_format: TimeFormat,
    pub event_display_mode: EventDisplayMode,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        CalendarSettings {
            theme: Theme::Light,
            start_of_week: WeekStart::Sunday,
            time_format: TimeFormat::TwelveHour,
            event_display_mode: EventDisplayMode::Dots,
        }
    }
}

impl CalendarSettings {
    /// Read-modify-write merge: fields present in `patch` override, the rest
    /// keep their current values.
    pub fn merged(mut self, patch: SettingsPatch) -> Self {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(start_of_week) = patch.start_of_week {
            self.start_of_week = start_of_week;
        }
        if let Some(time_format) = patch.time_format {
            self.time_format = time_format;
        }
        if let Some(event_display_mode) = patch.event_display_mode {
            self.event_display_mode = event_display_mode;
        }
        self
    }
}

/// Partial settings update; omitted fields fall back to current values.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub start_of_week: Option<WeekStart>,
    #[serde(default)]
    pub time_format: Option<TimeFormat>,
    #[serde(default)]
    pub event_display_mode: Option<EventDisplayMode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn merge_preserves_untouched_fields() {
        let stored = CalendarSettings {
            theme: Theme::Dark,
            start_of_week: WeekStart::Monday,
            time_format: TimeFormat::TwelveHour,
            event_display_mode: EventDisplayMode::Text,
        };
        let patch: SettingsPatch = serde_json::from_str(r#"{"theme": "light"}"#).unwrap();
        let merged = stored.merged(patch);

        assert_eq!(merged.theme, Theme::Light);
        assert_eq!(merged.start_of_week, WeekStart::Monday);
        assert_eq!(merged.time_format, TimeFormat::TwelveHour);
        assert_eq!(merged.event_display_mode, EventDisplayMode::Text);
    }

    #[test]
    fn invalid_enum_value_fails_deserialization() {
        let result: Result<SettingsPatch, _> = serde_json::from_str(r#"{"theme": "sepia"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn time_format_wire_names() {
        let settings = CalendarSettings::default();
        let json = serde_json::to_value(settings).unwrap();
        assert_eq!(json["timeFormat"], "12h");
        assert_eq!(json["startOfWeek"], "sunday");
    }

    #[test]
    fn clock_formatting() {
        let t = Utc.with_ymd_and_hms(2024, 3, 15, 21, 5, 0).unwrap();
        assert_eq!(TimeFormat::TwelveHour.format(&t), "9:05 PM");
        assert_eq!(TimeFormat::TwentyFourHour.format(&t), "21:05");
    }

    #[test]
    fn db_string_round_trip() {
        for mode in [
            EventDisplayMode::Dots,
            EventDisplayMode::Text,
            EventDisplayMode::Box,
            EventDisplayMode::Color,
        ] {
            assert_eq!(EventDisplayMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(TimeFormat::from_str("24h"), Some(TimeFormat::TwentyFourHour));
        assert_eq!(Theme::from_str("blue"), None);
    }
}
