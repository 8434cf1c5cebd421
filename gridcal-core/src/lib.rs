//! Core types and temporal layout engine for the gridcal calendar.
//!
//! This crate holds everything with actual interval algebra in it:
//! - `interval` for day/week/month/year boundary math and overlap tests
//! - `window` for resolving an anchor date + granularity into a visible window
//! - `select` for picking the events that intersect a window
//! - `layout` for turning events into render-ready grid positions
//! - `settings` for per-user display preferences and their merge semantics
//!
//! The HTTP boundary and persistence live in gridcal-server; they talk to
//! this crate through the `store::EventStore` trait and the types re-exported
//! below.

pub mod error;
pub mod event;
pub mod interval;
pub mod layout;
pub mod select;
pub mod settings;
pub mod store;
pub mod window;

// Re-export the main types at crate root for convenience
pub use error::{GridCalError, GridCalResult};
pub use event::{Event, EventPatch, NewEvent, DEFAULT_EVENT_COLOR};
pub use layout::{
    DayBucket, DayColumn, PositionedEvent, ViewLayout, MAX_PREVIEW_EVENTS, MIN_VISIBLE_HEIGHT,
};
pub use settings::{
    CalendarSettings, EventDisplayMode, SettingsPatch, Theme, TimeFormat, WeekStart,
};
pub use store::EventStore;
pub use window::{resolve_window, Granularity, ViewWindow};
