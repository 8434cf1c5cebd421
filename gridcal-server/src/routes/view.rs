//! Resolved-view endpoint: anchor + granularity -> window + layout.
//!
//! Runs the whole pipeline server-side so clients get render-ready
//! positions: resolve the window (honoring the user's week start), query the
//! store, select overlapping events, and lay them out per the user's time
//! format.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use gridcal_core::layout::view_layout;
use gridcal_core::select::select_in_window;
use gridcal_core::{resolve_window, Event, EventStore, Granularity, ViewLayout, ViewWindow};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/view", get(get_view))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewQuery {
    pub user_id: i64,
    pub granularity: Granularity,
    /// Anchor date, YYYY-MM-DD
    pub anchor: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse {
    pub window: ViewWindow,
    pub layout: ViewLayout,
}

/// GET /api/view?userId=..&granularity=week&anchor=2024-03-15
async fn get_view(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ViewResponse>, AppError> {
    let settings = state.store.settings(query.user_id)?;
    let window = resolve_window(query.anchor, query.granularity, settings.start_of_week);

    let candidates = state
        .store
        .events_in_range(query.user_id, window.start, window.end)?;
    let selected: Vec<Event> = select_in_window(&candidates, window.start, window.end)
        .into_iter()
        .cloned()
        .collect();

    let layout = view_layout(&selected, &window, query.granularity, settings.time_format);

    Ok(Json(ViewResponse { window, layout }))
}
